//! Raw frame files: `width * height` little-endian `u16` samples, no header.

use std::fs;
use std::path::Path;

use depth_colorize::{DepthFrame, LabelFrame, OutOfRange};

use crate::error::ViewerError;

fn read_exact_frame(path: &Path, width: usize, height: usize) -> Result<Vec<u8>, ViewerError> {
    let bytes = fs::read(path)?;
    let expected = width * height * 2;
    if bytes.len() != expected {
        return Err(ViewerError::FrameSize {
            path: path.display().to_string(),
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Load a depth frame, applying `policy` to samples above 2047.
pub fn read_depth_frame(
    path: &Path,
    width: usize,
    height: usize,
    policy: OutOfRange,
) -> Result<DepthFrame, ViewerError> {
    let bytes = read_exact_frame(path, width, height)?;
    let frame = DepthFrame::from_le_bytes(&bytes, width, height, policy)?;
    tracing::debug!(
        path = %path.display(),
        valid_samples = frame.valid_count(),
        "Loaded depth frame"
    );
    Ok(frame)
}

/// Load a user label frame of the same layout.
pub fn read_label_frame(
    path: &Path,
    width: usize,
    height: usize,
) -> Result<LabelFrame, ViewerError> {
    let bytes = read_exact_frame(path, width, height)?;
    Ok(LabelFrame::from_le_bytes(&bytes, width, height)?)
}

/// Serialize samples in the raw file layout.
pub fn encode_samples(samples: &[u16]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

pub fn write_depth_frame(path: &Path, frame: &DepthFrame) -> Result<(), ViewerError> {
    fs::write(path, encode_samples(frame.samples()))?;
    Ok(())
}
