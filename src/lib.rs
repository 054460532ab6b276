//! clarity: rank images from blurred to sharp
//!
//! This crate scores images with four classical focus measures and ranks a
//! directory of images under each of them independently.
//!
//! # Measures
//! - LAPM: modified Laplacian
//! - LAPV: variance of the Laplacian
//! - TENG: Tenengrad (Sobel gradient energy)
//! - GLVN: normalized gray-level variance
//!
//! # Usage
//! ```rust,no_run
//! use clarity::{run_batch, ClarityConfig, ReportWriter};
//! use std::path::Path;
//!
//! let config = ClarityConfig::default();
//! let report = run_batch(Path::new("photos"), &config, |_, _| {})?;
//! ReportWriter::default().write_ranked(&mut std::io::stdout(), &report)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod batch;
pub mod config;
pub mod errors;
pub mod focus;
pub mod invariant_ppt;
pub mod plane;
pub mod ranking;
pub mod report;

// Synthetic planes and image files for offline testing
pub mod testing;

// Re-exports for convenience
pub use batch::{run_batch, BatchReport, BatchRunner, ItemFailure};
pub use config::ClarityConfig;
pub use errors::{ClarityError, MeasureError};
pub use focus::{FocusAnalyzer, FocusMetrics, Measure};
pub use plane::{Channel, Plane};
pub use ranking::{RankedEntry, Ranking, Rankings};
pub use report::ReportWriter;

/// Initialize logging for the analysis run
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("clarity=info"),
    )
    .try_init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
