//! Label colors for tracked users.

use super::Rgb;

/// Number of distinct user colors before labels wrap around.
pub const USER_COLOR_COUNT: u16 = 10;

const USER_COLORS: [[f32; 3]; 11] = [
    [0.0, 1.0, 1.0],
    [0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 0.0, 0.0],
    [1.0, 0.5, 0.0],
    [0.5, 1.0, 0.0],
    [0.0, 0.5, 1.0],
    [0.5, 0.0, 1.0],
    [1.0, 1.0, 0.5],
    // background
    [0.0, 0.0, 0.0],
];

/// Overlay color for a tracker label. Label 0 is background (black); other
/// labels cycle through ten colors.
pub fn user_color(label: u16) -> Rgb {
    let index = if label == 0 {
        USER_COLOR_COUNT as usize
    } else {
        (label % USER_COLOR_COUNT) as usize
    };
    let [r, g, b] = USER_COLORS[index];
    Rgb::new((255.0 * r) as u8, (255.0 * g) as u8, (255.0 * b) as u8)
}
