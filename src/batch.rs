//! Batch driver
//!
//! Walks a directory, scores each decodable image with all four focus
//! measures, and sorts the four rankings once every entry has been seen.
//! Entries that fail to decode are skipped and reported; they never abort
//! the batch.

use crate::config::{ClarityConfig, InputConfig};
use crate::errors::{ClarityError, MeasureError};
use crate::focus::{FocusAnalyzer, FocusMetrics};
use crate::plane::{Channel, Plane};
use crate::ranking::Rankings;
use std::fs;
use std::path::{Path, PathBuf};

/// An entry that could not be scored
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub path: String,
    pub reason: String,
}

/// Outcome of one batch run
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReport {
    pub rankings: Rankings,
    pub failures: Vec<ItemFailure>,
}

impl BatchReport {
    /// Number of images that were scored
    pub fn processed(&self) -> usize {
        self.rankings.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// 0 when every entry was scored, 1 when at least one was skipped
    pub fn exit_code(&self) -> i32 {
        if self.has_failures() {
            1
        } else {
            0
        }
    }
}

/// List the entries of `root` (non-recursive) in lexicographic order
pub fn enumerate_entries(root: &Path, input: &InputConfig) -> Result<Vec<PathBuf>, ClarityError> {
    if !root.is_dir() {
        return Err(ClarityError::invalid_root(root, "not a directory"));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(root).map_err(|e| ClarityError::invalid_root(root, e))? {
        let path = entry.map_err(|e| ClarityError::invalid_root(root, e))?.path();
        if input.accepts(&path) {
            entries.push(path);
        } else {
            log::debug!("Skipping {:?}: extension not selected", path);
        }
    }
    entries.sort();
    Ok(entries)
}

/// Decode an image file and project it onto a single plane
pub fn load_plane(path: &Path, channel: Channel) -> Result<Plane, ClarityError> {
    let image = image::open(path).map_err(|e| ClarityError::decode(path, e))?;
    Plane::from_image(&image, channel).map_err(|e| ClarityError::decode(path, e))
}

/// Accumulates scores image by image
#[derive(Debug)]
pub struct BatchRunner {
    analyzer: FocusAnalyzer,
    channel: Channel,
    report: BatchReport,
}

impl BatchRunner {
    pub fn new(analyzer: FocusAnalyzer, channel: Channel) -> Self {
        Self {
            analyzer,
            channel,
            report: BatchReport::default(),
        }
    }

    pub fn from_config(config: &ClarityConfig) -> Result<Self, ClarityError> {
        let analyzer = FocusAnalyzer::new(config.analysis.teng_kernel_size)?;
        Ok(Self::new(analyzer, config.analysis.channel))
    }

    /// Score an already-decoded plane and record it in all four rankings
    pub fn score(&mut self, path: &str, plane: &Plane) -> Result<FocusMetrics, MeasureError> {
        match self.analyzer.analyze(plane) {
            Ok(metrics) => {
                self.report.rankings.record(path, &metrics);
                Ok(metrics)
            }
            Err(e) => {
                self.record_failure(path, &e);
                Err(e)
            }
        }
    }

    /// Record an entry that could not be scored
    pub fn record_failure(&mut self, path: &str, reason: &dyn std::fmt::Display) {
        log::warn!("Skipping {}: {}", path, reason);
        self.report.failures.push(ItemFailure {
            path: path.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Load and score one file; failures are recorded, not returned
    pub fn process_path(&mut self, path: &Path) -> Option<FocusMetrics> {
        let id = path.display().to_string();
        log::debug!("Processing {}", id);
        match load_plane(path, self.channel) {
            Ok(plane) => self.score(&id, &plane).ok(),
            Err(e) => {
                self.record_failure(&id, &e);
                None
            }
        }
    }

    /// Sort all four rankings and hand back the report
    pub fn finish(mut self) -> BatchReport {
        self.report.rankings.sort_all();
        log::info!(
            "Batch complete: {} scored, {} skipped",
            self.report.processed(),
            self.report.failures.len()
        );
        self.report
    }

    /// Score every selected entry of `root`
    ///
    /// `on_image` runs after each successfully scored image.
    pub fn run_directory<F>(
        mut self,
        root: &Path,
        input: &InputConfig,
        mut on_image: F,
    ) -> Result<BatchReport, ClarityError>
    where
        F: FnMut(&str, &FocusMetrics),
    {
        let entries = enumerate_entries(root, input)?;
        log::info!("Scoring {} entries from {:?}", entries.len(), root);

        for path in &entries {
            if let Some(metrics) = self.process_path(path) {
                on_image(&path.display().to_string(), &metrics);
            }
        }

        Ok(self.finish())
    }
}

/// Run a whole batch over `root` with the given configuration
pub fn run_batch<F>(root: &Path, config: &ClarityConfig, on_image: F) -> Result<BatchReport, ClarityError>
where
    F: FnMut(&str, &FocusMetrics),
{
    BatchRunner::from_config(config)?.run_directory(root, &config.input, on_image)
}
