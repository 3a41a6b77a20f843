//! Artifacts written from pipeline buffers: images, point clouds, stats.

pub mod image;
pub mod pcd;

pub use self::image::{color_png, encode_png, grayscale_png, palette_png};
pub use self::pcd::{save_pcd, write_pcd};

use depth_colorize::{DepthFrame, DepthPipeline, EqualizedTable};
use serde::Serialize;

use crate::error::ViewerError;

/// Summary of one frame, printed as JSON by `render --stats`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameStats {
    pub width: usize,
    pub height: usize,
    pub valid_samples: usize,
    pub min_sample: Option<u16>,
    pub max_sample: Option<u16>,
    pub calibration: String,
    pub color_mode: String,
    /// Mean distance in meters around the frame center
    pub center_distance_m: Option<f32>,
}

impl FrameStats {
    pub fn collect(
        pipeline: &DepthPipeline,
        frame: &DepthFrame,
        equalized: &EqualizedTable,
        window: usize,
    ) -> Result<Self, ViewerError> {
        let center_distance_m = if frame.is_empty() {
            None
        } else {
            pipeline.mean_distance(frame, frame.width() / 2, frame.height() / 2, window)?
        };

        Ok(Self {
            width: frame.width(),
            height: frame.height(),
            valid_samples: equalized.valid_samples(),
            min_sample: equalized.min_sample(),
            max_sample: equalized.max_sample(),
            calibration: pipeline.projector().table().formula().to_string(),
            color_mode: pipeline.color_mode().to_string(),
            center_distance_m,
        })
    }
}
