//! depth-colorize: turn raw 11-bit depth frames into pictures and points
//!
//! The crate covers the numeric core of a structured-light depth viewer:
//! calibration of raw sensor codes into meters, per-frame histogram
//! equalization, false-color encodings and pinhole back-projection.
//!
//! # Quick Start
//!
//! [`DepthPipeline`] owns every precomputed table and processes frames
//! through `&self`:
//!
//! ```
//! use depth_colorize::{ChannelOrder, ColorMode, DepthFrame, DepthPipeline};
//!
//! let pipeline = DepthPipeline::builder()
//!     .max_depth(2047)
//!     .color_mode(ColorMode::Psychedelic)
//!     .channel_order(ChannelOrder::Rgb)
//!     .build()
//!     .unwrap();
//!
//! let frame = DepthFrame::new(vec![0, 5, 15, 25], 2, 2).unwrap();
//! let buffers = pipeline.process(&frame);
//!
//! assert_eq!(buffers.color_at(0, 0).unwrap().to_bytes(), [0, 0, 0]);
//! assert_eq!(buffers.color_at(1, 0).unwrap().to_bytes(), [255, 0, 0]);
//! ```
//!
//! # Raw Samples
//!
//! Samples are raw codes in `0..=2047`. Code 0 means the sensor saw nothing;
//! it is excluded from the histogram, drawn black in every color mode and
//! projected to the origin. [`DepthFrame`] rejects codes above 2047 at the
//! boundary (or zeroes them with [`OutOfRange::Discard`]), so per-pixel
//! lookups never fail.
//!
//! # Calibration
//!
//! [`CalibrationTable`] precomputes one of the published raw-to-meter
//! approximations for every code. Metric tables store 0.0 where a formula
//! has no distance (code 0 and codes past the curve's pole near 1090).
//! [`CalibrationFormula::CubicGamma`] is not a distance: it packs a color
//! band in its high byte and a position within the band in its low byte,
//! and only feeds [`ColorMode::ColoredDepth`].
//!
//! # Color Modes
//!
//! - [`ColorMode::LinearHistogram`]: equalized intensity on red and green
//! - [`ColorMode::Psychedelic`]: ten hard bands repeating every 100 codes
//! - [`ColorMode::Rainbow`]: device range stretched over the rainbow palette
//! - [`ColorMode::CyclicRainbow`]: rainbow repeating every 256 codes
//! - [`ColorMode::CyclicRainbowHistogram`]: cyclic rainbow dimmed by intensity
//! - [`ColorMode::ColoredDepth`]: six-band sweep over the cubic gamma table
//! - [`ColorMode::Terrain`]: terrain ramp over the cubic gamma curve

pub mod calibration;
pub mod encode;
pub mod error;
pub mod frame;
pub mod histogram;
pub mod palette;
pub mod pipeline;

#[cfg(test)]
mod domain_tests;

pub use calibration::{CalibrationFormula, CalibrationTable, DepthToWorld, Intrinsics, Point3};
pub use encode::{ColorMode, EncodeContext, EncodeFn, Encoder};
pub use error::DepthError;
pub use frame::{
    DepthFrame, LabelFrame, OutOfRange, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_SAMPLE, NO_DATA,
    SAMPLE_RANGE,
};
pub use histogram::EqualizedTable;
pub use palette::{user_color, ColorRamp, RainbowPalette, RampPalette, Rgb, USER_COLOR_COUNT};
pub use pipeline::{ChannelOrder, DepthPipeline, DepthPipelineBuilder, FrameBuffers};
