//! Ranking of images by focus score
//!
//! Each measure gets its own independently sorted column, ascending from
//! the most blurred image to the sharpest. Images whose score is undefined
//! are kept aside so they never reach the comparator.

use crate::assert_invariant;
use crate::errors::MeasureError;
use crate::focus::{FocusMetrics, Measure};
use std::cmp::Ordering;

/// One (identifier, score) pair
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub path: String,
    pub score: f64,
}

/// An image whose score could not be defined for a measure
#[derive(Debug, Clone, PartialEq)]
pub struct UndefinedEntry {
    pub path: String,
    pub error: MeasureError,
}

/// A row cell of a ranked column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RankCell<'a> {
    Ranked(&'a RankedEntry),
    Undefined(&'a UndefinedEntry),
}

impl<'a> RankCell<'a> {
    /// Path of the underlying entry, borrowed for as long as the column
    pub fn path(&self) -> &'a str {
        match self {
            RankCell::Ranked(entry) => &entry.path,
            RankCell::Undefined(entry) => &entry.path,
        }
    }
}

/// Orders entries strictly by score, ascending
pub fn by_score(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    a.score.total_cmp(&b.score)
}

/// Scores of every image under a single measure
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    measure: Measure,
    entries: Vec<RankedEntry>,
    undefined: Vec<UndefinedEntry>,
}

impl Ranking {
    pub fn new(measure: Measure) -> Self {
        Self {
            measure,
            entries: Vec::new(),
            undefined: Vec::new(),
        }
    }

    pub fn push(&mut self, path: impl Into<String>, score: Result<f64, MeasureError>) {
        let path = path.into();
        match score {
            Ok(score) if score.is_finite() => self.entries.push(RankedEntry { path, score }),
            Ok(_) => self.undefined.push(UndefinedEntry {
                path,
                error: MeasureError::NonFiniteScore,
            }),
            Err(error) => {
                log::warn!("{} score undefined for {}: {}", self.measure.title(), path, error);
                self.undefined.push(UndefinedEntry { path, error });
            }
        }
    }

    /// Stable ascending sort; ties keep insertion order
    pub fn sort(&mut self) {
        self.entries.sort_by(by_score);
        assert_invariant!(
            self.is_sorted(),
            "Ranked scores ascend from blur to clarity",
            "ranking"
        );
    }

    pub fn is_sorted(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| by_score(&pair[0], &pair[1]) != Ordering::Greater)
    }

    pub fn measure(&self) -> Measure {
        self.measure
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    pub fn undefined(&self) -> &[UndefinedEntry] {
        &self.undefined
    }

    /// Number of images recorded, defined or not
    pub fn len(&self) -> usize {
        self.entries.len() + self.undefined.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `index`: ranked entries first, then undefined ones
    pub fn cell(&self, index: usize) -> Option<RankCell<'_>> {
        match self.entries.get(index) {
            Some(entry) => Some(RankCell::Ranked(entry)),
            None => self
                .undefined
                .get(index - self.entries.len())
                .map(RankCell::Undefined),
        }
    }

    /// Zero-based position of `path` among the ranked entries
    pub fn position_of(&self, path: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.path == path)
    }
}

/// The four independent rankings produced by a batch
#[derive(Debug, Clone, PartialEq)]
pub struct Rankings {
    columns: [Ranking; 4],
}

impl Default for Rankings {
    fn default() -> Self {
        Self {
            columns: Measure::ALL.map(Ranking::new),
        }
    }
}

impl Rankings {
    pub fn record(&mut self, path: &str, metrics: &FocusMetrics) {
        for column in &mut self.columns {
            let score = metrics.score(column.measure());
            column.push(path, score);
        }
    }

    pub fn sort_all(&mut self) {
        self.columns.iter_mut().for_each(Ranking::sort);
    }

    pub fn get(&self, measure: Measure) -> &Ranking {
        // Columns are laid out in `Measure::ALL` order
        &self.columns[measure as usize]
    }

    pub fn columns(&self) -> &[Ranking] {
        &self.columns
    }

    /// Number of images recorded
    pub fn len(&self) -> usize {
        self.columns[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row `index` across all four columns, in lock step
    pub fn row(&self, index: usize) -> Option<[RankCell<'_>; 4]> {
        let cells = [
            self.columns[0].cell(index)?,
            self.columns[1].cell(index)?,
            self.columns[2].cell(index)?,
            self.columns[3].cell(index)?,
        ];
        Some(cells)
    }
}
