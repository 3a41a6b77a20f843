//! Per-frame driver: equalize, encode and back-project a depth frame.
//!
//! A [`DepthPipeline`] owns every immutable table (calibration, cubic gamma,
//! rainbow and terrain palettes) and is built once. Processing takes `&self`,
//! so one pipeline can serve frames from several threads.

use std::fmt;
use std::str::FromStr;

use crate::calibration::{
    CalibrationFormula, CalibrationTable, DepthToWorld, Intrinsics, Point3,
};
use crate::encode::{ColorMode, EncodeContext, Encoder};
use crate::error::DepthError;
use crate::frame::{DepthFrame, LabelFrame, MAX_SAMPLE, NO_DATA};
use crate::histogram::EqualizedTable;
use crate::palette::{user_color, ColorRamp, RainbowPalette, RampPalette, Rgb};

/// Byte order of the three color channels in [`FrameBuffers::color`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum ChannelOrder {
    Rgb,
    /// Blue first, the layout of the texture the viewer uploads to.
    #[default]
    Bgr,
}

impl ChannelOrder {
    pub fn name(self) -> &'static str {
        match self {
            ChannelOrder::Rgb => "rgb",
            ChannelOrder::Bgr => "bgr",
        }
    }

    #[inline]
    pub fn arrange(self, color: Rgb) -> [u8; 3] {
        match self {
            ChannelOrder::Rgb => [color.r, color.g, color.b],
            ChannelOrder::Bgr => [color.b, color.g, color.r],
        }
    }

    /// Inverse of [`arrange`](Self::arrange).
    #[inline]
    pub fn read(self, bytes: [u8; 3]) -> Rgb {
        match self {
            ChannelOrder::Rgb => Rgb::new(bytes[0], bytes[1], bytes[2]),
            ChannelOrder::Bgr => Rgb::new(bytes[2], bytes[1], bytes[0]),
        }
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ChannelOrder {
    type Err = DepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rgb" => Ok(ChannelOrder::Rgb),
            "bgr" => Ok(ChannelOrder::Bgr),
            _ => Err(DepthError::UnknownChannelOrder(s.to_string())),
        }
    }
}

/// Output buffers for one frame, reusable across frames of the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffers {
    width: usize,
    height: usize,
    grayscale: Vec<u8>,
    color: Vec<u8>,
    world: Vec<[f32; 3]>,
    channel_order: ChannelOrder,
    equalized: EqualizedTable,
}

impl FrameBuffers {
    /// Zeroed buffers for a `width` x `height` frame.
    pub fn new(width: usize, height: usize) -> Self {
        let len = width * height;
        Self {
            width,
            height,
            grayscale: vec![0; len],
            color: vec![0; len * 3],
            world: vec![[0.0; 3]; len],
            channel_order: ChannelOrder::default(),
            equalized: EqualizedTable::default(),
        }
    }

    fn ensure_size(&mut self, width: usize, height: usize) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Equalized 8-bit intensity, one byte per pixel.
    pub fn grayscale(&self) -> &[u8] {
        &self.grayscale
    }

    /// False color, three bytes per pixel in [`channel_order`](Self::channel_order).
    pub fn color(&self) -> &[u8] {
        &self.color
    }

    /// World coordinates in meters, one `[x, y, z]` per pixel.
    pub fn world(&self) -> &[[f32; 3]] {
        &self.world
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Non-zero samples in the frame these buffers were filled from.
    pub fn valid_samples(&self) -> usize {
        self.equalized.valid_samples()
    }

    /// Equalization table of the frame these buffers were filled from.
    pub fn equalized(&self) -> &EqualizedTable {
        &self.equalized
    }

    pub fn gray_at(&self, x: usize, y: usize) -> Option<u8> {
        self.index(x, y).map(|i| self.grayscale[i])
    }

    /// Pixel color decoded back to [`Rgb`] regardless of channel order.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Rgb> {
        self.index(x, y).map(|i| {
            let px = &self.color[i * 3..i * 3 + 3];
            self.channel_order.read([px[0], px[1], px[2]])
        })
    }

    pub fn world_at(&self, x: usize, y: usize) -> Option<Point3> {
        self.index(x, y).map(|i| {
            let [x, y, z] = self.world[i];
            Point3 { x, y, z }
        })
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}

/// Builder for [`DepthPipeline`].
#[derive(Debug, Clone)]
pub struct DepthPipelineBuilder {
    max_depth: u16,
    intrinsics: Intrinsics,
    formula: CalibrationFormula,
    color_mode: ColorMode,
    channel_order: ChannelOrder,
    ramp: ColorRamp,
}

impl Default for DepthPipelineBuilder {
    fn default() -> Self {
        Self {
            max_depth: MAX_SAMPLE,
            intrinsics: Intrinsics::default(),
            formula: CalibrationFormula::default(),
            color_mode: ColorMode::default(),
            channel_order: ChannelOrder::default(),
            ramp: ColorRamp::terrain(),
        }
    }
}

impl DepthPipelineBuilder {
    /// Largest raw value the device reports; scales [`ColorMode::Rainbow`].
    #[inline]
    pub fn max_depth(mut self, max_depth: u16) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[inline]
    pub fn intrinsics(mut self, intrinsics: Intrinsics) -> Self {
        self.intrinsics = intrinsics;
        self
    }

    /// Metric formula used for world coordinates and distance queries.
    #[inline]
    pub fn calibration(mut self, formula: CalibrationFormula) -> Self {
        self.formula = formula;
        self
    }

    #[inline]
    pub fn color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    #[inline]
    pub fn channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// Ramp sampled by [`ColorMode::Terrain`].
    pub fn ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Validate the configuration and precompute every table.
    pub fn build(self) -> Result<DepthPipeline, DepthError> {
        if self.max_depth == 0 || self.max_depth > MAX_SAMPLE {
            return Err(DepthError::InvalidMaxDepth(self.max_depth));
        }
        let projector =
            DepthToWorld::new(CalibrationTable::build(self.formula), self.intrinsics)?;

        tracing::info!(
            formula = %self.formula,
            mode = %self.color_mode,
            max_depth = self.max_depth,
            "Depth pipeline ready"
        );

        Ok(DepthPipeline {
            max_depth: self.max_depth,
            color_mode: self.color_mode,
            channel_order: self.channel_order,
            projector,
            gamma: CalibrationTable::build(CalibrationFormula::CubicGamma),
            rainbow: RainbowPalette::generate(),
            ramp: RampPalette::from_ramp(&self.ramp),
        })
    }
}

/// Converts raw depth frames into grayscale, false-color and world buffers.
///
/// # Example
///
/// ```
/// use depth_colorize::{ColorMode, DepthFrame, DepthPipeline};
///
/// let pipeline = DepthPipeline::builder()
///     .color_mode(ColorMode::Rainbow)
///     .build()
///     .unwrap();
///
/// let frame = DepthFrame::filled(800, 4, 3).unwrap();
/// let buffers = pipeline.process(&frame);
///
/// assert_eq!(buffers.grayscale().len(), 12);
/// assert_eq!(buffers.color().len(), 36);
/// assert!(buffers.world_at(0, 0).unwrap().z > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct DepthPipeline {
    max_depth: u16,
    color_mode: ColorMode,
    channel_order: ChannelOrder,
    projector: DepthToWorld,
    gamma: CalibrationTable,
    rainbow: RainbowPalette,
    ramp: RampPalette,
}

impl DepthPipeline {
    pub fn builder() -> DepthPipelineBuilder {
        DepthPipelineBuilder::default()
    }

    /// Pipeline for the given device max depth with Kinect defaults otherwise.
    pub fn new(max_depth: u16) -> Result<Self, DepthError> {
        Self::builder().max_depth(max_depth).build()
    }

    pub fn max_depth(&self) -> u16 {
        self.max_depth
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    pub fn projector(&self) -> &DepthToWorld {
        &self.projector
    }

    pub fn rainbow(&self) -> &RainbowPalette {
        &self.rainbow
    }

    pub fn ramp(&self) -> &RampPalette {
        &self.ramp
    }

    /// Same pipeline, different color mode. Tables are shared by clone.
    pub fn with_color_mode(&self, mode: ColorMode) -> Self {
        Self {
            color_mode: mode,
            ..self.clone()
        }
    }

    /// Read-only encoding inputs for one frame.
    pub fn context<'a>(&'a self, equalized: &'a EqualizedTable) -> EncodeContext<'a> {
        EncodeContext {
            equalized,
            rainbow: &self.rainbow,
            gamma: &self.gamma,
            ramp: &self.ramp,
            max_depth: self.max_depth,
        }
    }

    /// Run the full per-frame pipeline into fresh buffers.
    pub fn process(&self, frame: &DepthFrame) -> FrameBuffers {
        let mut buffers = FrameBuffers::new(frame.width(), frame.height());
        self.process_into(frame, &mut buffers);
        buffers
    }

    /// Run the full per-frame pipeline, reusing `buffers`.
    ///
    /// Buffers are reallocated only when the frame size changed. The frame's
    /// equalization table is kept in [`FrameBuffers::equalized`] for further
    /// [`colorize`](Self::colorize) calls.
    pub fn process_into(&self, frame: &DepthFrame, buffers: &mut FrameBuffers) {
        let equalized = EqualizedTable::compute(frame);
        self.fill(frame, &equalized, self.color_mode.encoder(), buffers);

        tracing::debug!(
            mode = %self.color_mode,
            width = frame.width(),
            height = frame.height(),
            valid_samples = equalized.valid_samples(),
            "Processed depth frame"
        );
        buffers.equalized = equalized;
    }

    /// False-color bytes for `frame` in an arbitrary mode, using an
    /// equalization table computed once by the caller.
    pub fn colorize(
        &self,
        frame: &DepthFrame,
        equalized: &EqualizedTable,
        mode: ColorMode,
    ) -> Vec<u8> {
        let ctx = self.context(equalized);
        let encoder = mode.encoder();
        let order = self.channel_order;
        let mut color = Vec::with_capacity(frame.len() * 3);
        for &sample in frame.samples() {
            color.extend_from_slice(&order.arrange(encoder.encode_valid(&ctx, sample)));
        }
        color
    }

    /// User overlay: label colors where the sensor saw something, black
    /// elsewhere.
    pub fn colorize_labels(
        &self,
        frame: &DepthFrame,
        labels: &LabelFrame,
    ) -> Result<Vec<u8>, DepthError> {
        if labels.width() != frame.width() || labels.height() != frame.height() {
            return Err(DepthError::LabelDimensionMismatch {
                width: frame.width(),
                height: frame.height(),
                label_width: labels.width(),
                label_height: labels.height(),
            });
        }

        let order = self.channel_order;
        let mut color = Vec::with_capacity(frame.len() * 3);
        for (&sample, &label) in frame.samples().iter().zip(labels.labels()) {
            let rgb = if sample == NO_DATA {
                Rgb::BLACK
            } else {
                user_color(label)
            };
            color.extend_from_slice(&order.arrange(rgb));
        }
        Ok(color)
    }

    /// Mean calibrated distance in meters of the window of half-size `half`
    /// around `(x, y)`, clamped to the frame.
    ///
    /// Samples without a distance are skipped; `None` when none remain.
    pub fn mean_distance(
        &self,
        frame: &DepthFrame,
        x: usize,
        y: usize,
        half: usize,
    ) -> Result<Option<f32>, DepthError> {
        if x >= frame.width() || y >= frame.height() {
            return Err(DepthError::InvalidRegion {
                x,
                y,
                width: frame.width(),
                height: frame.height(),
            });
        }

        let table = self.projector.table();
        let x_end = x.saturating_add(half).min(frame.width() - 1);
        let y_end = y.saturating_add(half).min(frame.height() - 1);

        let mut sum = 0.0f64;
        let mut count = 0usize;
        for row in y.saturating_sub(half)..=y_end {
            for col in x.saturating_sub(half)..=x_end {
                let meters = frame
                    .get(col, row)
                    .and_then(|raw| table.get(raw))
                    .unwrap_or(0.0);
                if meters > 0.0 {
                    sum += meters as f64;
                    count += 1;
                }
            }
        }

        Ok((count > 0).then(|| (sum / count as f64) as f32))
    }

    fn fill(
        &self,
        frame: &DepthFrame,
        equalized: &EqualizedTable,
        encoder: Encoder,
        buffers: &mut FrameBuffers,
    ) {
        buffers.ensure_size(frame.width(), frame.height());
        buffers.channel_order = self.channel_order;

        let width = frame.width();
        if frame.is_empty() {
            return;
        }

        let ctx = self.context(equalized);
        let order = self.channel_order;
        let projector = &self.projector;

        let fill_row =
            |y: usize, samples: &[u16], gray: &mut [u8], color: &mut [u8], world: &mut [[f32; 3]]| {
                for (x, &sample) in samples.iter().enumerate() {
                    gray[x] = equalized.to_byte(sample);
                    let rgb = encoder.encode_valid(&ctx, sample);
                    color[x * 3..x * 3 + 3].copy_from_slice(&order.arrange(rgb));
                    world[x] = projector.project_valid(x, y, sample).to_array();
                }
            };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            buffers
                .grayscale
                .par_chunks_mut(width)
                .zip(buffers.color.par_chunks_mut(width * 3))
                .zip(buffers.world.par_chunks_mut(width))
                .zip(frame.samples().par_chunks(width))
                .enumerate()
                .for_each(|(y, (((gray, color), world), samples))| {
                    fill_row(y, samples, gray, color, world)
                });
        }

        #[cfg(not(feature = "parallel"))]
        {
            buffers
                .grayscale
                .chunks_mut(width)
                .zip(buffers.color.chunks_mut(width * 3))
                .zip(buffers.world.chunks_mut(width))
                .zip(frame.samples().chunks(width))
                .enumerate()
                .for_each(|(y, (((gray, color), world), samples))| {
                    fill_row(y, samples, gray, color, world)
                });
        }
    }
}
