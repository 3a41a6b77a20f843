//! Five-segment rainbow palette.

use super::Rgb;

/// Blue → cyan → green → yellow → red over indices 1..=254.
///
/// Indices 0 and 255 are never assigned by the generator and stay black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RainbowPalette {
    r: [u8; 256],
    g: [u8; 256],
    b: [u8; 256],
}

impl RainbowPalette {
    pub fn generate() -> Self {
        let mut palette = Self {
            r: [0; 256],
            g: [0; 256],
            b: [0; 256],
        };

        for i in 1..255usize {
            let x = i as f64;
            // `as u8` truncates toward zero and saturates below 0
            let (r, g, b) = if i <= 29 {
                ((129.36 - x * 4.36) as u8, 0, 255)
            } else if i <= 86 {
                (0, (-133.54 + x * 4.52) as u8, 255)
            } else if i <= 141 {
                (0, 255, (665.83 - x * 4.72) as u8)
            } else if i <= 199 {
                ((-635.26 + x * 4.47) as u8, 255, 0)
            } else {
                (255, (1166.81 - x * 4.57) as u8, 0)
            };

            palette.r[i] = r;
            palette.g[i] = g;
            palette.b[i] = b;
        }

        palette
    }

    #[inline]
    pub fn get(&self, index: u8) -> Rgb {
        let i = index as usize;
        Rgb::new(self.r[i], self.g[i], self.b[i])
    }

    pub fn red(&self) -> &[u8; 256] {
        &self.r
    }

    pub fn green(&self) -> &[u8; 256] {
        &self.g
    }

    pub fn blue(&self) -> &[u8; 256] {
        &self.b
    }
}

impl Default for RainbowPalette {
    fn default() -> Self {
        Self::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_boundaries() {
        let palette = RainbowPalette::generate();

        // end of segment 1: red has faded out
        let c29 = palette.get(29);
        assert!(c29.r <= 3, "r at 29 = {}", c29.r);
        assert_eq!(c29.b, 255);

        // end of segment 2: green saturated
        assert_eq!(palette.get(86).g, 255);
        assert_eq!(palette.get(86).b, 255);

        // end of segment 3: blue gone
        assert_eq!(palette.get(141), Rgb::new(0, 255, 0));

        // end of segment 4: nearly yellow
        assert_eq!(palette.get(199), Rgb::new(254, 255, 0));

        // last generated entry: red
        assert_eq!(palette.get(254), Rgb::new(255, 6, 0));
    }

    #[test]
    fn test_exact_slopes() {
        let palette = RainbowPalette::generate();
        assert_eq!(palette.get(1), Rgb::new(125, 0, 255));
        assert_eq!(palette.get(10), Rgb::new(85, 0, 255));
        assert_eq!(palette.get(30), Rgb::new(0, 2, 255));
        assert_eq!(palette.get(100), Rgb::new(0, 255, 193));
        assert_eq!(palette.get(150), Rgb::new(35, 255, 0));
        assert_eq!(palette.get(200), Rgb::new(255, 252, 0));
    }

    #[test]
    fn test_segment_four_start_saturates() {
        // -635.26 + 142 * 4.47 is slightly negative
        assert_eq!(RainbowPalette::generate().get(142), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_unassigned_ends_are_black() {
        let palette = RainbowPalette::generate();
        assert_eq!(palette.get(0), Rgb::BLACK);
        assert_eq!(palette.get(255), Rgb::BLACK);
    }

    #[test]
    fn test_every_byte_index_is_addressable() {
        let palette = RainbowPalette::default();
        for index in 0..=255u8 {
            let _ = palette.get(index);
        }
        assert_eq!(palette.red().len(), 256);
    }
}
