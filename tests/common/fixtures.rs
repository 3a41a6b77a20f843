//! Test fixtures and constants.

use depth_colorize::DepthFrame;

/// Small frame geometry used by most tests
pub const WIDTH: usize = 16;
pub const HEIGHT: usize = 12;

/// Config for the small test frame
pub fn small_config_yaml() -> String {
    format!(
        "frame:\n  width: {WIDTH}\n  height: {HEIGHT}\n\
         color_mode: rainbow\n\
         channel_order: rgb\n\
         measure_window: 2\n"
    )
}

/// Ramp of raw codes from 450 upward with the first column empty.
pub fn gradient_samples() -> Vec<u16> {
    (0..WIDTH * HEIGHT)
        .map(|i| {
            if i % WIDTH == 0 {
                0
            } else {
                450 + (i as u16) * 3
            }
        })
        .collect()
}

pub fn gradient_frame() -> DepthFrame {
    DepthFrame::new(gradient_samples(), WIDTH, HEIGHT).unwrap()
}

/// Labels: left half user 1, right half user 2, top row background.
pub fn label_samples() -> Vec<u16> {
    (0..WIDTH * HEIGHT)
        .map(|i| {
            let (x, y) = (i % WIDTH, i / WIDTH);
            match (y, x < WIDTH / 2) {
                (0, _) => 0,
                (_, true) => 1,
                (_, false) => 2,
            }
        })
        .collect()
}
