//! False-color encoding policies.
//!
//! Each [`ColorMode`] maps to one pure function. The function is resolved
//! once per frame into an [`Encoder`]; the per-pixel loop only calls through
//! it. Raw depth 0 is black in every mode.

use std::fmt;
use std::str::FromStr;

use crate::calibration::CalibrationTable;
use crate::error::DepthError;
use crate::frame::{MAX_SAMPLE, NO_DATA};
use crate::histogram::EqualizedTable;
use crate::palette::{RainbowPalette, RampPalette, Rgb};

/// Selectable false-color encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ColorMode {
    /// Equalized intensity on red and green.
    LinearHistogram,
    /// Ten hard color bands repeating every 100 raw units.
    Psychedelic,
    /// Whole device range stretched over the rainbow palette.
    Rainbow,
    /// Rainbow palette repeating every 256 raw units.
    CyclicRainbow,
    /// Cyclic rainbow darkened by equalized intensity.
    CyclicRainbowHistogram,
    /// Six-band white→red→yellow→green→cyan→blue→black sweep over the cubic
    /// gamma table.
    #[default]
    ColoredDepth,
    /// Configured color ramp (terrain unless chosen otherwise) over the
    /// cubic gamma curve.
    Terrain,
}

impl ColorMode {
    pub const ALL: [ColorMode; 7] = [
        ColorMode::LinearHistogram,
        ColorMode::Psychedelic,
        ColorMode::Rainbow,
        ColorMode::CyclicRainbow,
        ColorMode::CyclicRainbowHistogram,
        ColorMode::ColoredDepth,
        ColorMode::Terrain,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorMode::LinearHistogram => "linear-histogram",
            ColorMode::Psychedelic => "psychedelic",
            ColorMode::Rainbow => "rainbow",
            ColorMode::CyclicRainbow => "cyclic-rainbow",
            ColorMode::CyclicRainbowHistogram => "cyclic-rainbow-histogram",
            ColorMode::ColoredDepth => "colored-depth",
            ColorMode::Terrain => "terrain",
        }
    }

    /// Whether the mode reads the frame's equalization table.
    pub fn uses_histogram(self) -> bool {
        matches!(
            self,
            ColorMode::LinearHistogram | ColorMode::CyclicRainbowHistogram
        )
    }

    /// Resolve the per-pixel function for this mode.
    pub fn encoder(self) -> Encoder {
        let f: EncodeFn = match self {
            ColorMode::LinearHistogram => linear_histogram,
            ColorMode::Psychedelic => psychedelic,
            ColorMode::Rainbow => rainbow,
            ColorMode::CyclicRainbow => cyclic_rainbow,
            ColorMode::CyclicRainbowHistogram => cyclic_rainbow_histogram,
            ColorMode::ColoredDepth => colored_depth,
            ColorMode::Terrain => terrain,
        };
        Encoder { mode: self, f }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorMode {
    type Err = DepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        if normalized == "coloreddepth" {
            return Ok(ColorMode::ColoredDepth);
        }
        ColorMode::ALL
            .into_iter()
            .find(|mode| mode.name() == normalized)
            .ok_or_else(|| DepthError::UnknownColorMode(s.to_string()))
    }
}

/// Read-only inputs shared by every encoding function for one frame.
#[derive(Debug, Clone, Copy)]
pub struct EncodeContext<'a> {
    pub(crate) equalized: &'a EqualizedTable,
    pub(crate) rainbow: &'a RainbowPalette,
    pub(crate) gamma: &'a CalibrationTable,
    pub(crate) ramp: &'a RampPalette,
    pub(crate) max_depth: u16,
}

/// Signature of a single encoding policy. `depth` is a non-zero raw sample
/// in `1..=2047`.
pub type EncodeFn = fn(&EncodeContext<'_>, u16) -> Rgb;

/// A mode resolved to its encoding function.
#[derive(Clone, Copy)]
pub struct Encoder {
    mode: ColorMode,
    f: EncodeFn,
}

impl Encoder {
    #[inline]
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Color for one raw sample, `None` past the 11-bit range.
    #[inline]
    pub fn encode(&self, ctx: &EncodeContext<'_>, depth: u16) -> Option<Rgb> {
        (depth <= MAX_SAMPLE).then(|| self.encode_valid(ctx, depth))
    }

    /// Per-pixel path for samples a [`DepthFrame`](crate::DepthFrame) has
    /// already validated.
    #[inline]
    pub(crate) fn encode_valid(&self, ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
        if depth == NO_DATA {
            return Rgb::BLACK;
        }
        (self.f)(ctx, depth)
    }
}

impl fmt::Debug for Encoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Encoder").field("mode", &self.mode).finish()
    }
}

fn linear_histogram(ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
    let v = (ctx.equalized.intensity(depth) * 255.0) as u8;
    Rgb::new(v, v, 0)
}

fn psychedelic(_ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
    match (depth / 10) % 10 {
        0 => Rgb::new(255, 0, 0),
        1 => Rgb::new(0, 255, 0),
        2 => Rgb::new(0, 0, 255),
        3 => Rgb::new(255, 255, 0),
        4 => Rgb::new(0, 255, 255),
        5 => Rgb::new(255, 0, 255),
        6 => Rgb::new(255, 255, 255),
        7 => Rgb::new(127, 0, 255),
        8 => Rgb::new(255, 0, 127),
        _ => Rgb::new(127, 255, 0),
    }
}

fn rainbow(ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
    let index = (depth as f64 / (ctx.max_depth as f64 / 256.0)) as usize;
    ctx.rainbow.get(index.min(255) as u8)
}

fn cyclic_rainbow(ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
    ctx.rainbow.get((depth % 256) as u8)
}

fn cyclic_rainbow_histogram(ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
    ctx.rainbow
        .get((depth % 256) as u8)
        .scale(ctx.equalized.intensity(depth))
}

fn colored_depth(ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
    let packed = ctx.gamma.packed(depth);
    let lb = (packed & 0xFF) as u8;
    match packed >> 8 {
        0 => Rgb::new(255, 255 - lb, 255 - lb),
        1 => Rgb::new(255, lb, 0),
        2 => Rgb::new(255 - lb, 255, 0),
        3 => Rgb::new(0, 255, lb),
        4 => Rgb::new(0, 255 - lb, 255),
        5 => Rgb::new(0, 0, 255 - lb),
        _ => Rgb::BLACK,
    }
}

fn terrain(ctx: &EncodeContext<'_>, depth: u16) -> Rgb {
    ctx.ramp.at(depth)
}
