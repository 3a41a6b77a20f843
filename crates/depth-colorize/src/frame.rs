//! Input frame buffers.
//!
//! [`DepthFrame`] is the only way raw samples enter the pipeline. Its
//! constructors validate every sample against the 11-bit sensor range once,
//! so lookup tables can be indexed without bounds concerns afterwards.

use std::str::FromStr;

use crate::error::DepthError;

/// Number of distinct raw depth codes (11-bit sensor).
pub const SAMPLE_RANGE: usize = 2048;

/// Largest raw depth code the sensor reports.
pub const MAX_SAMPLE: u16 = 2047;

/// Raw sample meaning "no return".
pub const NO_DATA: u16 = 0;

/// Native Kinect v1 depth resolution.
pub const DEFAULT_WIDTH: usize = 640;
pub const DEFAULT_HEIGHT: usize = 480;

/// What to do with samples above [`MAX_SAMPLE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutOfRange {
    /// Fail frame construction with [`DepthError::SampleOutOfRange`].
    #[default]
    Reject,
    /// Replace the sample with [`NO_DATA`].
    Discard,
}

impl FromStr for OutOfRange {
    type Err = DepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(OutOfRange::Reject),
            "discard" => Ok(OutOfRange::Discard),
            _ => Err(DepthError::UnknownOutOfRange(s.to_string())),
        }
    }
}

/// One frame of raw depth samples, row-major, every sample in `0..=2047`.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    samples: Vec<u16>,
    width: usize,
    height: usize,
}

impl DepthFrame {
    /// Wrap raw samples, rejecting anything outside the 11-bit range.
    pub fn new(samples: Vec<u16>, width: usize, height: usize) -> Result<Self, DepthError> {
        Self::with_policy(samples, width, height, OutOfRange::Reject)
    }

    /// Wrap raw samples, handling out-of-range values according to `policy`.
    pub fn with_policy(
        mut samples: Vec<u16>,
        width: usize,
        height: usize,
        policy: OutOfRange,
    ) -> Result<Self, DepthError> {
        if samples.len() != width * height {
            return Err(DepthError::DimensionMismatch {
                width,
                height,
                len: samples.len(),
            });
        }

        match policy {
            OutOfRange::Reject => {
                if let Some((index, &value)) = samples
                    .iter()
                    .enumerate()
                    .find(|(_, &value)| value > MAX_SAMPLE)
                {
                    return Err(DepthError::SampleOutOfRange { index, value });
                }
            }
            OutOfRange::Discard => {
                let mut discarded = 0usize;
                for sample in samples.iter_mut().filter(|s| **s > MAX_SAMPLE) {
                    *sample = NO_DATA;
                    discarded += 1;
                }
                if discarded > 0 {
                    tracing::debug!(discarded, "Discarded out-of-range depth samples");
                }
            }
        }

        Ok(Self {
            samples,
            width,
            height,
        })
    }

    /// Decode a headerless little-endian `u16` buffer.
    pub fn from_le_bytes(
        bytes: &[u8],
        width: usize,
        height: usize,
        policy: OutOfRange,
    ) -> Result<Self, DepthError> {
        if bytes.len() != width * height * 2 {
            return Err(DepthError::DimensionMismatch {
                width,
                height,
                len: bytes.len() / 2,
            });
        }
        let samples = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::with_policy(samples, width, height, policy)
    }

    /// A frame where every pixel reports `value`. Mostly useful for tests.
    pub fn filled(value: u16, width: usize, height: usize) -> Result<Self, DepthError> {
        Self::new(vec![value; width * height], width, height)
    }

    #[inline]
    pub fn samples(&self) -> &[u16] {
        &self.samples
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at pixel `(x, y)`, or `None` outside the frame.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<u16> {
        if x < self.width && y < self.height {
            Some(self.samples[y * self.width + x])
        } else {
            None
        }
    }

    /// Number of samples carrying a depth reading.
    pub fn valid_count(&self) -> usize {
        self.samples.iter().filter(|&&s| s != NO_DATA).count()
    }
}

/// Per-pixel user labels from a tracker, same layout as the depth frame.
/// Label 0 is background.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelFrame {
    labels: Vec<u16>,
    width: usize,
    height: usize,
}

impl LabelFrame {
    pub fn new(labels: Vec<u16>, width: usize, height: usize) -> Result<Self, DepthError> {
        if labels.len() != width * height {
            return Err(DepthError::DimensionMismatch {
                width,
                height,
                len: labels.len(),
            });
        }
        Ok(Self {
            labels,
            width,
            height,
        })
    }

    pub fn from_le_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self, DepthError> {
        if bytes.len() != width * height * 2 {
            return Err(DepthError::DimensionMismatch {
                width,
                height,
                len: bytes.len() / 2,
            });
        }
        let labels = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        Self::new(labels, width, height)
    }

    #[inline]
    pub fn labels(&self) -> &[u16] {
        &self.labels
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }
}
