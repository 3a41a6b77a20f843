//! Error type for the depth-colorize public API.
//!
//! Every variant is a setup-time or boundary failure. Once a frame has been
//! accepted by [`DepthFrame::new`](crate::DepthFrame::new) and a pipeline has
//! been built, per-pixel processing cannot fail.

use thiserror::Error;

use crate::calibration::CalibrationFormula;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DepthError {
    /// A raw sample does not fit the 11-bit sensor range.
    #[error("depth sample {value} at index {index} exceeds the 11-bit range (max 2047)")]
    SampleOutOfRange { index: usize, value: u16 },

    #[error("buffer of {len} samples does not match {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("label frame is {label_width}x{label_height}, depth frame is {width}x{height}")]
    LabelDimensionMismatch {
        width: usize,
        height: usize,
        label_width: usize,
        label_height: usize,
    },

    #[error("device max depth must be in 1..=2047, got {0}")]
    InvalidMaxDepth(u16),

    #[error("unknown color mode: {0}")]
    UnknownColorMode(String),

    #[error("unknown calibration formula: {0}")]
    UnknownFormula(String),

    #[error("unknown channel order: {0}")]
    UnknownChannelOrder(String),

    #[error("unknown out-of-range policy: {0}")]
    UnknownOutOfRange(String),

    #[error("unknown color ramp: {0}")]
    UnknownRamp(String),

    /// World coordinates need a formula that yields meters.
    #[error("calibration formula {0} does not produce metric distances")]
    NonMetricFormula(CalibrationFormula),

    #[error("camera intrinsics must be finite with non-zero focal lengths")]
    InvalidIntrinsics,

    #[error("pixel ({x}, {y}) lies outside the {width}x{height} frame")]
    InvalidRegion {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_out_of_range_message() {
        let err = DepthError::SampleOutOfRange {
            index: 12,
            value: 4096,
        };
        assert_eq!(
            err.to_string(),
            "depth sample 4096 at index 12 exceeds the 11-bit range (max 2047)"
        );
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = DepthError::DimensionMismatch {
            width: 640,
            height: 480,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "buffer of 10 samples does not match 640x480"
        );
    }

    #[test]
    fn test_unknown_setting_messages() {
        assert_eq!(
            DepthError::UnknownChannelOrder("argb".into()).to_string(),
            "unknown channel order: argb"
        );
        assert_eq!(
            DepthError::UnknownOutOfRange("clamp".into()).to_string(),
            "unknown out-of-range policy: clamp"
        );
    }

    #[test]
    fn test_non_metric_formula_message() {
        let err = DepthError::NonMetricFormula(CalibrationFormula::CubicGamma);
        assert_eq!(
            err.to_string(),
            "calibration formula cubic-gamma does not produce metric distances"
        );
    }
}
