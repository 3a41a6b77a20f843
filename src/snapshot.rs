//! Timestamped snapshots: the false-color image plus the point cloud.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use depth_colorize::{DepthFrame, DepthPipeline};

use crate::error::ViewerError;
use crate::output;

pub const IMAGE_PREFIX: &str = "KinectImage_";
pub const CLOUD_PREFIX: &str = "PointCloud_";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Image and cloud file names for a snapshot taken at `at`.
pub fn snapshot_names(at: NaiveDateTime) -> (String, String) {
    let stamp = at.format(TIMESTAMP_FORMAT);
    (
        format!("{IMAGE_PREFIX}{stamp}.png"),
        format!("{CLOUD_PREFIX}{stamp}.pcd"),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub image: PathBuf,
    pub cloud: PathBuf,
    pub points: usize,
}

pub fn take_snapshot(
    pipeline: &DepthPipeline,
    frame: &DepthFrame,
    output_dir: &Path,
    at: NaiveDateTime,
) -> Result<Snapshot, ViewerError> {
    fs::create_dir_all(output_dir)?;
    let (image_name, cloud_name) = snapshot_names(at);
    let buffers = pipeline.process(frame);

    let image = output_dir.join(image_name);
    fs::write(
        &image,
        output::color_png(
            buffers.width(),
            buffers.height(),
            buffers.color(),
            buffers.channel_order(),
        )?,
    )?;

    let cloud = output_dir.join(cloud_name);
    let points = output::save_pcd(&cloud, buffers.world())?;

    tracing::info!(image = %image.display(), points, "Saved snapshot");

    Ok(Snapshot {
        image,
        cloud,
        points,
    })
}
