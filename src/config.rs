use crate::assets::AssetLoader;
use crate::error::ViewerError;
use depth_colorize::{
    CalibrationFormula, ChannelOrder, ColorMode, ColorRamp, DepthPipeline, Intrinsics, OutOfRange,
    DEFAULT_HEIGHT, DEFAULT_WIDTH, MAX_SAMPLE,
};
use serde::Deserialize;

/// Viewer configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Raw frame geometry
    #[serde(default)]
    pub frame: FrameConfig,

    /// Device characteristics
    #[serde(default)]
    pub sensor: SensorConfig,

    /// Raw-to-meter formula name
    #[serde(default = "default_calibration")]
    pub calibration: String,

    /// False-color mode name
    #[serde(default = "default_color_mode")]
    pub color_mode: String,

    /// Ramp preset of the terrain mode: `terrain` or `glview`
    #[serde(default = "default_ramp")]
    pub ramp: String,

    /// `rgb` or `bgr`
    #[serde(default = "default_channel_order")]
    pub channel_order: String,

    /// `reject` or `discard`
    #[serde(default = "default_out_of_range")]
    pub out_of_range: String,

    /// Half-size of the distance measurement window
    #[serde(default = "default_measure_window")]
    pub measure_window: usize,
}

fn default_calibration() -> String {
    CalibrationFormula::default().name().to_string()
}

fn default_color_mode() -> String {
    ColorMode::default().name().to_string()
}

fn default_ramp() -> String {
    "terrain".to_string()
}

fn default_channel_order() -> String {
    ChannelOrder::default().name().to_string()
}

fn default_out_of_range() -> String {
    "reject".to_string()
}

fn default_measure_window() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    #[serde(default = "default_width")]
    pub width: usize,

    #[serde(default = "default_height")]
    pub height: usize,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_height() -> usize {
    DEFAULT_HEIGHT
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    /// Largest raw value the device reports
    #[serde(default = "default_max_depth")]
    pub max_depth: u16,

    #[serde(default)]
    pub intrinsics: IntrinsicsConfig,
}

fn default_max_depth() -> u16 {
    MAX_SAMPLE
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            max_depth: MAX_SAMPLE,
            intrinsics: IntrinsicsConfig::default(),
        }
    }
}

/// Depth camera intrinsics; missing fields take the Kinect v1 defaults.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct IntrinsicsConfig {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl Default for IntrinsicsConfig {
    fn default() -> Self {
        let Intrinsics { fx, fy, cx, cy } = Intrinsics::default();
        Self { fx, fy, cx, cy }
    }
}

impl From<IntrinsicsConfig> for Intrinsics {
    fn from(c: IntrinsicsConfig) -> Self {
        Intrinsics {
            fx: c.fx,
            fy: c.fy,
            cx: c.cx,
            cy: c.cy,
        }
    }
}

impl ViewerConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load(loader: &AssetLoader) -> Result<Self, ViewerError> {
        let content = loader.read_config_string()?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            width = config.frame.width,
            height = config.frame.height,
            calibration = %config.calibration,
            color_mode = %config.color_mode,
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ViewerError> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn calibration_formula(&self) -> Result<CalibrationFormula, ViewerError> {
        Ok(self.calibration.parse::<CalibrationFormula>()?)
    }

    pub fn color_mode(&self) -> Result<ColorMode, ViewerError> {
        Ok(self.color_mode.parse::<ColorMode>()?)
    }

    pub fn ramp(&self) -> Result<ColorRamp, ViewerError> {
        Ok(ColorRamp::preset(&self.ramp)?)
    }

    pub fn channel_order(&self) -> Result<ChannelOrder, ViewerError> {
        Ok(self.channel_order.parse::<ChannelOrder>()?)
    }

    pub fn out_of_range(&self) -> Result<OutOfRange, ViewerError> {
        Ok(self.out_of_range.parse::<OutOfRange>()?)
    }

    pub fn intrinsics(&self) -> Intrinsics {
        self.sensor.intrinsics.into()
    }

    /// Validate every setting and build the pipeline they describe.
    pub fn pipeline(&self) -> Result<DepthPipeline, ViewerError> {
        if self.frame.width == 0 || self.frame.height == 0 {
            return Err(ViewerError::Config(format!(
                "frame size must be non-zero, got {}x{}",
                self.frame.width, self.frame.height
            )));
        }

        Ok(DepthPipeline::builder()
            .max_depth(self.sensor.max_depth)
            .intrinsics(self.intrinsics())
            .calibration(self.calibration_formula()?)
            .color_mode(self.color_mode()?)
            .channel_order(self.channel_order()?)
            .ramp(self.ramp()?)
            .build()?)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            frame: FrameConfig::default(),
            sensor: SensorConfig::default(),
            calibration: default_calibration(),
            color_mode: default_color_mode(),
            ramp: default_ramp(),
            channel_order: default_channel_order(),
            out_of_range: default_out_of_range(),
            measure_window: default_measure_window(),
        }
    }
}
