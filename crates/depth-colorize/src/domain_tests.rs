//! Domain-critical regression tests for depth-colorize.
//!
//! Each test documents the regression it guards against.

#[cfg(test)]
mod domain_tests {
    use crate::calibration::{CalibrationFormula, CalibrationTable};
    use crate::encode::ColorMode;
    use crate::frame::{DepthFrame, DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_SAMPLE, NO_DATA};
    use crate::histogram::EqualizedTable;
    use crate::palette::{RainbowPalette, Rgb};
    use crate::pipeline::{ChannelOrder, DepthPipeline};

    // ========================================================================
    // Calibration curves
    // ========================================================================

    /// If this breaks, it means: the no-data code started carrying a
    /// distance, so holes in the depth image would show up as points.
    #[test]
    fn test_no_data_code_has_no_distance() {
        for formula in CalibrationFormula::ALL.into_iter().filter(|f| f.is_metric()) {
            assert_eq!(CalibrationTable::build(formula).get(NO_DATA), Some(0.0));
        }
    }

    // ========================================================================
    // Histogram equalization
    // ========================================================================

    /// If this breaks, it means: a sample's own bucket stopped counting
    /// toward its cumulative share. In a uniform frame every pixel is the
    /// farthest, so the value itself and every code past it equalize to 0
    /// while nearer codes reach full intensity.
    #[test]
    fn test_uniform_frame_equalization() {
        let frame = DepthFrame::filled(500, 64, 48).unwrap();
        let table = EqualizedTable::compute(&frame);

        assert_eq!(table.valid_samples(), 64 * 48);
        assert_eq!(table.intensity(500), 0.0);
        assert_eq!(table.to_byte(500), 0);
        for d in [501, 800, MAX_SAMPLE] {
            assert_eq!(table.to_byte(d), 0, "d={d}");
        }
        for d in [1, 250, 499] {
            assert_eq!(table.intensity(d), 1.0, "d={d}");
            assert_eq!(table.to_byte(d), 255, "d={d}");
        }
    }

    /// If this breaks, it means: no-data pixels leaked into the histogram
    /// total and dimmed every real sample.
    #[test]
    fn test_holes_do_not_dilute_histogram() {
        let dense = DepthFrame::new(vec![300, 600], 2, 1).unwrap();
        let holey = DepthFrame::new(vec![300, 0, 0, 600], 4, 1).unwrap();

        let a = EqualizedTable::compute(&dense);
        let b = EqualizedTable::compute(&holey);
        assert_eq!(a.intensity(300), b.intensity(300));
        assert_eq!(a.intensity(300), 0.5);
    }

    // ========================================================================
    // Palette and encoding
    // ========================================================================

    /// If this breaks, it means: the rainbow segment boundaries moved.
    #[test]
    fn test_rainbow_segment_boundaries() {
        let palette = RainbowPalette::generate();
        assert!(palette.get(29).r <= 2);
        assert_eq!(palette.get(86).g, 255);
        assert_eq!(palette.get(0), Rgb::BLACK);
        assert_eq!(palette.get(255), Rgb::BLACK);
        for i in 0..=255u8 {
            let _ = palette.get(i);
        }
    }

    /// If this breaks, it means: some mode started painting holes.
    #[test]
    fn test_no_data_black_in_every_mode() {
        let frame = DepthFrame::new(vec![0, 400, 0, 900], 2, 2).unwrap();
        for mode in ColorMode::ALL {
            let buffers = DepthPipeline::builder()
                .color_mode(mode)
                .build()
                .unwrap()
                .process(&frame);
            assert_eq!(buffers.color_at(0, 0), Some(Rgb::BLACK), "{mode}");
            assert_eq!(buffers.color_at(0, 1), Some(Rgb::BLACK), "{mode}");
            assert_eq!(buffers.gray_at(0, 0), Some(0), "{mode}");
        }
    }

    /// If this breaks, it means: the cyclic rainbow index wrapped
    /// differently, or palette slot 0 is no longer black.
    #[test]
    fn test_cyclic_rainbow_1024_hits_slot_zero() {
        let frame = DepthFrame::filled(1024, 1, 1).unwrap();
        let buffers = DepthPipeline::builder()
            .color_mode(ColorMode::CyclicRainbow)
            .build()
            .unwrap()
            .process(&frame);
        assert_eq!(buffers.color_at(0, 0), Some(Rgb::BLACK));
    }

    // ========================================================================
    // Whole-frame scenarios
    // ========================================================================

    /// If this breaks, it means: a frame with no depth produced noise
    /// instead of empty buffers (typically a divide by zero in the
    /// histogram rescale).
    #[test]
    fn test_all_zero_vga_frame() {
        let frame = DepthFrame::filled(0, DEFAULT_WIDTH, DEFAULT_HEIGHT).unwrap();
        for mode in ColorMode::ALL {
            let buffers = DepthPipeline::builder()
                .color_mode(mode)
                .build()
                .unwrap()
                .process(&frame);

            assert_eq!(buffers.valid_samples(), 0);
            assert!(buffers.grayscale().iter().all(|&v| v == 0), "{mode}");
            assert!(buffers.color().iter().all(|&v| v == 0), "{mode}");
            assert!(buffers.world().iter().all(|p| p[2] == 0.0), "{mode}");
            assert_eq!(buffers.grayscale().len(), DEFAULT_WIDTH * DEFAULT_HEIGHT);
        }
    }

    /// If this breaks, it means: shared tables were mutated by processing,
    /// so a second frame would render differently from the first.
    #[test]
    fn test_processing_is_repeatable() {
        let pipeline = DepthPipeline::builder()
            .color_mode(ColorMode::CyclicRainbowHistogram)
            .channel_order(ChannelOrder::Rgb)
            .build()
            .unwrap();
        let samples = (0..64 * 48).map(|i| (i * 13 % 2048) as u16).collect();
        let frame = DepthFrame::new(samples, 64, 48).unwrap();

        let first = pipeline.process(&frame);
        let _other = pipeline.process(&DepthFrame::filled(1500, 64, 48).unwrap());
        let second = pipeline.process(&frame);
        assert_eq!(first, second);
    }

    /// If this breaks, it means: row chunking mixed up rows, so pixels were
    /// encoded or projected with the wrong `y`.
    #[test]
    fn test_rows_keep_their_coordinates() {
        let pipeline = DepthPipeline::new(MAX_SAMPLE).unwrap();
        let width = 7;
        let height = 5;
        let samples = (0..width * height).map(|i| 500 + i as u16).collect();
        let frame = DepthFrame::new(samples, width, height).unwrap();
        let buffers = pipeline.process(&frame);

        for y in 0..height {
            for x in 0..width {
                let raw = frame.get(x, y).unwrap();
                let expected = pipeline.projector().project(x, y, raw).unwrap();
                assert_eq!(buffers.world_at(x, y), Some(expected), "({x}, {y})");
            }
        }
    }
}
