/// Focus measure module
///
/// Computes classical sharpness statistics over a single image plane:
/// 1. LAPM - modified Laplacian
/// 2. LAPV - variance of the Laplacian
/// 3. TENG - Tenengrad gradient energy
/// 4. GLVN - normalized gray-level variance
///
/// Higher scores mean sharper images under every measure.
pub mod filter;
pub mod kernels;
pub mod measures;

pub use measures::{glvn, lapm, lapv, teng, DEFAULT_TENG_KERNEL_SIZE};

use crate::errors::MeasureError;
use crate::plane::Plane;
use serde::{Deserialize, Serialize};

/// Identifies one of the four focus measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Lapm,
    Lapv,
    Teng,
    Glvn,
}

impl Measure {
    pub const ALL: [Measure; 4] = [Measure::Lapm, Measure::Lapv, Measure::Teng, Measure::Glvn];

    /// Label used in the ranked report columns
    pub fn label(&self) -> &'static str {
        match self {
            Measure::Lapm => "lapm",
            Measure::Lapv => "lapv",
            Measure::Teng => "teng",
            Measure::Glvn => "glnv",
        }
    }

    /// Heading used in per-image score lines
    pub fn title(&self) -> &'static str {
        match self {
            Measure::Lapm => "Lapm",
            Measure::Lapv => "Lapv",
            Measure::Teng => "Teng",
            Measure::Glvn => "Glvn",
        }
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Scores of all four measures for one image
#[derive(Debug, Clone, PartialEq)]
pub struct FocusMetrics {
    pub lapm: f64,
    pub lapv: f64,
    pub teng: f64,
    /// Undefined for zero-mean images
    pub glvn: Result<f64, MeasureError>,
}

impl FocusMetrics {
    pub fn score(&self, measure: Measure) -> Result<f64, MeasureError> {
        match measure {
            Measure::Lapm => Ok(self.lapm),
            Measure::Lapv => Ok(self.lapv),
            Measure::Teng => Ok(self.teng),
            Measure::Glvn => self.glvn.clone(),
        }
    }
}

/// Runs all four measures with a fixed Tenengrad aperture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusAnalyzer {
    teng_kernel_size: usize,
}

impl Default for FocusAnalyzer {
    fn default() -> Self {
        Self {
            teng_kernel_size: DEFAULT_TENG_KERNEL_SIZE,
        }
    }
}

impl FocusAnalyzer {
    pub fn new(teng_kernel_size: usize) -> Result<Self, MeasureError> {
        kernels::validate_kernel_size(teng_kernel_size)?;
        Ok(Self { teng_kernel_size })
    }

    pub fn teng_kernel_size(&self) -> usize {
        self.teng_kernel_size
    }

    pub fn analyze(&self, plane: &Plane) -> Result<FocusMetrics, MeasureError> {
        let metrics = FocusMetrics {
            lapm: lapm(plane)?,
            lapv: lapv(plane)?,
            teng: teng(plane, self.teng_kernel_size)?,
            glvn: glvn(plane),
        };
        log::debug!(
            "Focus metrics for {}x{} plane: lapm={:.3} lapv={:.3} teng={:.3} glvn={:?}",
            plane.width(),
            plane.height(),
            metrics.lapm,
            metrics.lapv,
            metrics.teng,
            metrics.glvn
        );
        Ok(metrics)
    }
}
