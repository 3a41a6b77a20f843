//! Depth calibration curves and pinhole back-projection.
//!
//! A [`CalibrationTable`] maps every raw 11-bit depth code to a value once at
//! startup. Metric formulas yield meters; [`CalibrationFormula::CubicGamma`]
//! yields a packed band/offset integer used only for color banding.
//!
//! ```
//! use depth_colorize::{CalibrationFormula, CalibrationTable};
//!
//! let table = CalibrationTable::build(CalibrationFormula::Tangent);
//! let meters = table.get(600).unwrap();
//! assert!(meters > 0.5 && meters < 1.0);
//! assert_eq!(table.get(4096), None);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::DepthError;
use crate::frame::{NO_DATA, SAMPLE_RANGE};

/// Closed-form approximations of the sensor's disparity-to-distance curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CalibrationFormula {
    /// `0.1236 * tan(i / 2842.5 + 1.1863)` meters.
    #[default]
    Tangent,
    /// `1 / (-0.0030711016 * i + 3.3309495161)` meters.
    InverseLinear,
    /// `0.01 * (33.825 * tan(0.5 + i / 1024) + 5.7)` meters.
    TangentOffset,
    /// `trunc((i / 2048)^3 * 36 * 256)`: high byte selects a color band,
    /// low byte the position inside it. Not a distance.
    CubicGamma,
}

impl CalibrationFormula {
    pub const ALL: [CalibrationFormula; 4] = [
        CalibrationFormula::Tangent,
        CalibrationFormula::InverseLinear,
        CalibrationFormula::TangentOffset,
        CalibrationFormula::CubicGamma,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CalibrationFormula::Tangent => "tangent",
            CalibrationFormula::InverseLinear => "inverse-linear",
            CalibrationFormula::TangentOffset => "tangent-offset",
            CalibrationFormula::CubicGamma => "cubic-gamma",
        }
    }

    /// Whether table entries are distances in meters.
    pub fn is_metric(self) -> bool {
        !matches!(self, CalibrationFormula::CubicGamma)
    }

    /// Evaluate the formula for one raw code, without any sanitizing.
    pub fn evaluate(self, index: u16) -> f64 {
        let i = index as f64;
        match self {
            CalibrationFormula::Tangent => {
                const K1: f64 = 1.1863;
                const K2: f64 = 2842.5;
                const K3: f64 = 0.1236;
                K3 * (i / K2 + K1).tan()
            }
            CalibrationFormula::InverseLinear => {
                const K1: f64 = 3.3309495161;
                const K2: f64 = -0.0030711016;
                1.0 / (K2 * i + K1)
            }
            CalibrationFormula::TangentOffset => {
                const K1: f64 = 0.5;
                const K2: f64 = 1024.0;
                const K3: f64 = 33.825;
                const K4: f64 = 5.7;
                0.01 * (K3 * (K1 + i / K2).tan() + K4)
            }
            CalibrationFormula::CubicGamma => {
                // computed in f32, like freenect's gamma table
                ((index as f32 / 2048.0).powi(3) * 6.0 * 6.0 * 256.0) as u16 as f64
            }
        }
    }
}

impl fmt::Display for CalibrationFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CalibrationFormula {
    type Err = DepthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        CalibrationFormula::ALL
            .into_iter()
            .find(|formula| formula.name() == normalized)
            .ok_or_else(|| DepthError::UnknownFormula(s.to_string()))
    }
}

/// Precomputed 2048-entry lookup table, immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationTable {
    formula: CalibrationFormula,
    values: Box<[f32]>,
}

impl CalibrationTable {
    /// Evaluate `formula` for every raw code.
    ///
    /// For metric formulas the no-data code 0 and every code whose result is
    /// non-finite or not positive (past the curve's pole) store `0.0`.
    pub fn build(formula: CalibrationFormula) -> Self {
        let values = (0..SAMPLE_RANGE as u16)
            .map(|index| {
                let value = formula.evaluate(index);
                if !formula.is_metric() {
                    value as f32
                } else if index == NO_DATA || !value.is_finite() || value <= 0.0 {
                    0.0
                } else {
                    value as f32
                }
            })
            .collect();

        Self { formula, values }
    }

    #[inline]
    pub fn formula(&self) -> CalibrationFormula {
        self.formula
    }

    /// Table entry for a raw code, `None` past the 11-bit range.
    #[inline]
    pub fn get(&self, sample: u16) -> Option<f32> {
        self.values.get(sample as usize).copied()
    }

    /// Table entry for a sample already validated by [`DepthFrame`](crate::DepthFrame).
    #[inline]
    pub(crate) fn at(&self, sample: u16) -> f32 {
        self.values[sample as usize]
    }

    /// Packed band/offset value of a [`CalibrationFormula::CubicGamma`] table.
    /// Samples past the table land beyond the last band.
    #[inline]
    pub(crate) fn packed(&self, sample: u16) -> u32 {
        self.values
            .get(sample as usize)
            .map_or(u32::MAX, |&value| value as u32)
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Depth camera intrinsics in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsics {
    pub fx: f64,
    pub fy: f64,
    pub cx: f64,
    pub cy: f64,
}

impl Intrinsics {
    pub fn validate(&self) -> Result<(), DepthError> {
        let all_finite = [self.fx, self.fy, self.cx, self.cy]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite || self.fx == 0.0 || self.fy == 0.0 {
            return Err(DepthError::InvalidIntrinsics);
        }
        Ok(())
    }
}

impl Default for Intrinsics {
    /// Factory-typical Kinect v1 depth camera calibration.
    fn default() -> Self {
        Self {
            fx: 5.9421434211923247e+02,
            fy: 5.9104053696870778e+02,
            cx: 3.3930780975300314e+02,
            cy: 2.4273913761751615e+02,
        }
    }
}

/// A point in camera space, meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }
}

/// Back-projects pixels through a metric calibration table.
#[derive(Debug, Clone)]
pub struct DepthToWorld {
    table: CalibrationTable,
    fx_inv: f64,
    fy_inv: f64,
    cx: f64,
    cy: f64,
}

impl DepthToWorld {
    pub fn new(table: CalibrationTable, intrinsics: Intrinsics) -> Result<Self, DepthError> {
        if !table.formula().is_metric() {
            return Err(DepthError::NonMetricFormula(table.formula()));
        }
        intrinsics.validate()?;

        Ok(Self {
            table,
            fx_inv: 1.0 / intrinsics.fx,
            fy_inv: 1.0 / intrinsics.fy,
            cx: intrinsics.cx,
            cy: intrinsics.cy,
        })
    }

    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// World coordinates of pixel `(x, y)` with raw depth `raw`.
    ///
    /// Returns `None` for raw codes past the 11-bit range. `z` is exactly the
    /// calibration table entry.
    pub fn project(&self, x: usize, y: usize, raw: u16) -> Option<Point3> {
        self.table.get(raw).map(|depth| self.project_meters(x, y, depth))
    }

    #[inline]
    pub(crate) fn project_valid(&self, x: usize, y: usize, raw: u16) -> Point3 {
        self.project_meters(x, y, self.table.at(raw))
    }

    #[inline]
    fn project_meters(&self, x: usize, y: usize, depth: f32) -> Point3 {
        let d = depth as f64;
        Point3 {
            x: ((x as f64 - self.cx) * d * self.fx_inv) as f32,
            y: ((y as f64 - self.cy) * d * self.fy_inv) as f32,
            z: depth,
        }
    }
}
