use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single focus-measure computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasureError {
    #[error("Empty image: {width}x{height}")]
    EmptyImage { width: usize, height: usize },
    #[error("Non-finite sample at ({x}, {y})")]
    NonFiniteSample { x: usize, y: usize },
    #[error("Invalid kernel size {0}: must be odd and between 1 and 31")]
    InvalidKernelSize(usize),
    #[error("Zero mean brightness, normalized variance is undefined")]
    ZeroMean,
    #[error("Score is not a finite number")]
    NonFiniteScore,
}

#[derive(Debug, Error)]
pub enum ClarityError {
    #[error("Invalid input directory {path:?}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },
    #[error("Decode error for {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Measure error: {0}")]
    Measure(#[from] MeasureError),
}

impl ClarityError {
    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::InvalidRoot {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
