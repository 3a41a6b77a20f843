//! Color types and precomputed palettes.
//!
//! - [`RainbowPalette`]: 256-entry blue-to-red sweep used by the rainbow modes
//! - [`ColorRamp`] / [`RampPalette`]: piecewise-linear ramps over raw depth
//! - [`user_color`]: fixed colors for tracked-user label overlays
//!
//! Palettes are built once and never mutated afterwards, so they can be
//! shared freely between threads.

mod rainbow;
mod ramp;
mod users;

pub use rainbow::RainbowPalette;
pub use ramp::{ColorRamp, RampPalette};
pub use users::{user_color, USER_COLOR_COUNT};

/// An 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// From `0xRRGGBB`.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Multiply each channel by `factor` (expected in `0.0..=1.0`), truncating.
    #[inline]
    pub fn scale(self, factor: f32) -> Self {
        Self {
            r: (self.r as f32 * factor) as u8,
            g: (self.g as f32 * factor) as u8,
            b: (self.b as f32 * factor) as u8,
        }
    }
}
