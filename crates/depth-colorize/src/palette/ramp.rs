//! Piecewise-linear color ramps keyed by integer position.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use super::Rgb;
use crate::error::DepthError;
use crate::frame::SAMPLE_RANGE;

/// Ordered color stops with linear interpolation in between.
///
/// Positions below the first stop take the first color, positions above the
/// last stop take the last color.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColorRamp {
    stops: BTreeMap<usize, Rgb>,
}

impl ColorRamp {
    /// Build from `(position, 0xRRGGBB)` stops.
    pub fn new<I: IntoIterator<Item = (usize, u32)>>(stops: I) -> Self {
        Self {
            stops: stops
                .into_iter()
                .map(|(position, hex)| (position, Rgb::from_hex(hex)))
                .collect(),
        }
    }

    /// The coloring of freenect's glview demo: white, red, yellow, green,
    /// cyan, blue, black every 256 steps.
    pub fn glview() -> Self {
        Self::new([
            (0, 0xFFFFFF),
            (256, 0xFF0000),
            (512, 0xFFFF00),
            (768, 0x00FF00),
            (1024, 0x00FFFF),
            (1280, 0x0000FF),
            (1536, 0x000000),
        ])
    }

    /// Land-to-sea coloring: white peaks down through brown, maize and greens
    /// to a hard edge into sky blue and deep water.
    pub fn terrain() -> Self {
        Self::new([
            (0, 0xFFFFFF),    // white
            (256, 0x964B00),  // brown
            (512, 0xFBEC5D),  // maize
            (768, 0x66FF00),  // bright green
            (1024, 0x014421), // forest green
            (1025, 0x87CEFA), // light sky blue
            (1280, 0x00008B), // dark blue
            (2047, 0x000000), // black
            (2048, 0x696969), // dim gray
        ])
    }

    /// Look up a preset by name: `terrain` or `glview`.
    pub fn preset(name: &str) -> Result<Self, DepthError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "terrain" => Ok(Self::terrain()),
            "glview" => Ok(Self::glview()),
            _ => Err(DepthError::UnknownRamp(name.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Color at `position`. An empty ramp is black everywhere.
    pub fn color(&self, position: usize) -> Rgb {
        if let Some(&exact) = self.stops.get(&position) {
            return exact;
        }

        let upper = self.stops.range((Excluded(position), Unbounded)).next();
        let lower = self.stops.range(..position).next_back();

        match (lower, upper) {
            (None, None) => Rgb::BLACK,
            (None, Some((_, &color))) | (Some((_, &color)), None) => color,
            (Some((&lo, &lo_color)), Some((&hi, &hi_color))) => {
                let ratio = (position - lo) as f64 / (hi - lo) as f64;
                let mix = |a: u8, b: u8| ((1.0 - ratio) * a as f64 + ratio * b as f64).floor() as u8;
                Rgb::new(
                    mix(lo_color.r, hi_color.r),
                    mix(lo_color.g, hi_color.g),
                    mix(lo_color.b, hi_color.b),
                )
            }
        }
    }
}

/// A ramp sampled once per raw depth code through the cubic gamma curve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RampPalette {
    colors: Box<[Rgb]>,
}

impl RampPalette {
    /// Entry `i` is the ramp color at `trunc(9216 * (i / 2048)^3)`.
    pub fn from_ramp(ramp: &ColorRamp) -> Self {
        let colors = (0..SAMPLE_RANGE)
            .map(|i| {
                let v = (i as f32 / 2048.0).powi(3);
                let gamma = (9216.0 * v) as u16;
                ramp.color(gamma as usize)
            })
            .collect();
        Self { colors }
    }

    /// Color for a raw depth code, `None` past the 11-bit range.
    #[inline]
    pub fn get(&self, sample: u16) -> Option<Rgb> {
        self.colors.get(sample as usize).copied()
    }

    /// Like [`get`](Self::get), black past the 11-bit range.
    #[inline]
    pub(crate) fn at(&self, sample: u16) -> Rgb {
        self.get(sample).unwrap_or(Rgb::BLACK)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
