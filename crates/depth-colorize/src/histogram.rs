//! Cumulative-histogram equalization of one depth frame.
//!
//! Near pixels come out bright and far pixels dark: a sample's intensity is
//! the fraction of valid samples in the frame that lie strictly farther away.

use crate::frame::{DepthFrame, NO_DATA, SAMPLE_RANGE};

/// Per-raw-code normalized intensity in `0.0..=1.0` for one frame.
///
/// Recomputed from scratch every frame; no state carries over.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualizedTable {
    values: Box<[f32]>,
    valid_samples: usize,
    min_sample: Option<u16>,
    max_sample: Option<u16>,
}

impl Default for EqualizedTable {
    /// The table of an empty frame: every lookup yields 0.
    fn default() -> Self {
        Self {
            values: vec![0.0; SAMPLE_RANGE].into_boxed_slice(),
            valid_samples: 0,
            min_sample: None,
            max_sample: None,
        }
    }
}

impl EqualizedTable {
    /// Build the equalization table for `frame`.
    ///
    /// Samples equal to [`NO_DATA`] are not counted. When the frame has no
    /// valid sample the rescale step is skipped and every lookup yields 0.
    pub fn compute(frame: &DepthFrame) -> Self {
        let mut histogram = vec![0u32; SAMPLE_RANGE];
        let mut valid_samples = 0usize;
        let mut min_sample = None;
        let mut max_sample = None;

        for &sample in frame.samples() {
            if sample != NO_DATA {
                histogram[sample as usize] += 1;
                valid_samples += 1;
                min_sample = Some(min_sample.map_or(sample, |m: u16| m.min(sample)));
                max_sample = Some(max_sample.map_or(sample, |m: u16| m.max(sample)));
            }
        }

        for index in 1..SAMPLE_RANGE {
            histogram[index] += histogram[index - 1];
        }

        let mut values = vec![0.0f32; SAMPLE_RANGE].into_boxed_slice();
        if valid_samples == 0 {
            tracing::warn!(valid_samples, "Depth frame has no valid samples");
        } else {
            let total = valid_samples as f32;
            for index in 1..SAMPLE_RANGE {
                values[index] = 1.0 - histogram[index] as f32 / total;
            }
        }

        Self {
            values,
            valid_samples,
            min_sample,
            max_sample,
        }
    }

    /// Number of non-zero samples the table was built from.
    #[inline]
    pub fn valid_samples(&self) -> usize {
        self.valid_samples
    }

    /// `true` when the frame carried no depth at all.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.valid_samples == 0
    }

    #[inline]
    pub fn min_sample(&self) -> Option<u16> {
        self.min_sample
    }

    #[inline]
    pub fn max_sample(&self) -> Option<u16> {
        self.max_sample
    }

    /// Normalized intensity for a validated raw sample.
    #[inline]
    pub fn intensity(&self, sample: u16) -> f32 {
        if sample == NO_DATA || self.is_degenerate() {
            return 0.0;
        }
        self.values.get(sample as usize).copied().unwrap_or(0.0)
    }

    /// 8-bit grayscale value: `trunc(256 * intensity)`, saturated at 255.
    #[inline]
    pub fn to_byte(&self, sample: u16) -> u8 {
        ((256.0 * self.intensity(sample)) as u32).min(255) as u8
    }
}
