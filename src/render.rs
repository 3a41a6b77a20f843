//! The `render` command: one raw frame in, image and cloud files out.

use std::fs;
use std::path::{Path, PathBuf};

use depth_colorize::{ColorMode, DepthFrame, DepthPipeline, LabelFrame};

use crate::error::ViewerError;
use crate::output::{self, FrameStats};

pub const DEPTH_IMAGE: &str = "depth.png";
pub const USERS_IMAGE: &str = "users.png";
pub const CLOUD_FILE: &str = "cloud.pcd";

/// File name of the false-color image for `mode`.
pub fn color_image_name(mode: ColorMode) -> String {
    format!("color_{}.png", mode.name())
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Override the configured color mode
    pub mode: Option<ColorMode>,
    /// Write one color image per mode
    pub all_modes: bool,
    /// Also write the point cloud
    pub cloud: bool,
    /// Half-size of the window for the center distance in the stats
    pub measure_window: usize,
}

#[derive(Debug, Clone)]
pub struct RenderReport {
    pub files: Vec<PathBuf>,
    pub points: Option<usize>,
    pub stats: FrameStats,
}

/// Run the pipeline over `frame` and write every requested artifact into
/// `output_dir`.
pub fn render_frame(
    pipeline: &DepthPipeline,
    frame: &DepthFrame,
    labels: Option<&LabelFrame>,
    output_dir: &Path,
    options: &RenderOptions,
) -> Result<RenderReport, ViewerError> {
    fs::create_dir_all(output_dir)?;

    let pipeline = match options.mode {
        Some(mode) => pipeline.with_color_mode(mode),
        None => pipeline.clone(),
    };
    let buffers = pipeline.process(frame);
    let equalized = buffers.equalized();
    let order = pipeline.channel_order();
    let mut files = Vec::new();

    let path = output_dir.join(DEPTH_IMAGE);
    fs::write(&path, output::grayscale_png(&buffers)?)?;
    files.push(path);

    let modes: Vec<ColorMode> = if options.all_modes {
        ColorMode::ALL.to_vec()
    } else {
        vec![pipeline.color_mode()]
    };
    for mode in modes {
        let color = if mode == pipeline.color_mode() {
            buffers.color().to_vec()
        } else {
            pipeline.colorize(frame, equalized, mode)
        };
        let path = output_dir.join(color_image_name(mode));
        fs::write(
            &path,
            output::color_png(frame.width(), frame.height(), &color, order)?,
        )?;
        files.push(path);
    }

    if let Some(labels) = labels {
        let overlay = pipeline.colorize_labels(frame, labels)?;
        let path = output_dir.join(USERS_IMAGE);
        fs::write(
            &path,
            output::color_png(frame.width(), frame.height(), &overlay, order)?,
        )?;
        files.push(path);
    }

    let points = if options.cloud {
        let path = output_dir.join(CLOUD_FILE);
        let points = output::save_pcd(&path, buffers.world())?;
        files.push(path);
        Some(points)
    } else {
        None
    };

    let stats = FrameStats::collect(&pipeline, frame, equalized, options.measure_window)?;

    tracing::info!(
        dir = %output_dir.display(),
        files = files.len(),
        valid_samples = stats.valid_samples,
        "Rendered frame"
    );

    Ok(RenderReport {
        files,
        points,
        stats,
    })
}
