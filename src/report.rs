//! Text and JSON rendering of batch results

use crate::batch::BatchReport;
use crate::focus::{FocusMetrics, Measure};
use crate::ranking::RankCell;
use serde::Serialize;
use std::io::{self, Write};

/// Significant digits printed when no fixed precision is configured
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 6;

/// Format `value` like C's `%g`: `digits` significant digits, trailing
/// zeros dropped, scientific notation for very small or large magnitudes
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{}", value);
    }
    let digits = digits.max(1);

    // The exponent after rounding decides between fixed and scientific form
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => return scientific,
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// Renders scores with six significant digits, or a fixed number of
/// decimals when a precision is configured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportWriter {
    precision: Option<usize>,
}

impl ReportWriter {
    pub fn new(precision: Option<usize>) -> Self {
        Self { precision }
    }

    pub fn format_score(&self, score: f64) -> String {
        match self.precision {
            Some(p) => format!("{:.*}", p, score),
            None => format_significant(score, DEFAULT_SIGNIFICANT_DIGITS),
        }
    }

    fn format_cell(&self, cell: &RankCell<'_>) -> String {
        match cell {
            RankCell::Ranked(entry) => self.format_score(entry.score),
            RankCell::Undefined(entry) => format!("undefined ({})", entry.error),
        }
    }

    /// Score block printed while the batch runs
    pub fn write_image_scores<W: Write>(
        &self,
        out: &mut W,
        path: &str,
        metrics: &FocusMetrics,
    ) -> io::Result<()> {
        writeln!(out, "{:?}", path)?;
        for measure in Measure::ALL {
            let value = match metrics.score(measure) {
                Ok(score) => self.format_score(score),
                Err(e) => format!("undefined ({})", e),
            };
            writeln!(out, "{} :{}", measure.title(), value)?;
        }
        writeln!(out)
    }

    /// Final report: row `i` holds the i-th entry of every column
    pub fn write_ranked<W: Write>(&self, out: &mut W, report: &BatchReport) -> io::Result<()> {
        writeln!(out, "Sorting pics from blur to clarity:")?;
        let mut index = 0;
        while let Some(row) = report.rankings.row(index) {
            for (measure, cell) in Measure::ALL.iter().zip(row.iter()) {
                writeln!(
                    out,
                    "{} ({}): {}",
                    cell.path(),
                    measure.label(),
                    self.format_cell(cell)
                )?;
            }
            writeln!(out)?;
            index += 1;
        }
        Ok(())
    }

    /// Alternative final report: one block per image with its rank under
    /// each measure
    pub fn write_grouped<W: Write>(&self, out: &mut W, report: &BatchReport) -> io::Result<()> {
        writeln!(out, "Ranks per image (1 = most blurred):")?;
        let total = report.rankings.len();

        let lapm = report.rankings.get(Measure::Lapm);
        let mut paths: Vec<&str> = (0..lapm.len())
            .filter_map(|i| lapm.cell(i))
            .map(|cell| cell.path())
            .collect();
        paths.sort_unstable();

        for path in paths {
            writeln!(out, "{}", path)?;
            for measure in Measure::ALL {
                let ranking = report.rankings.get(measure);
                match ranking.position_of(path) {
                    Some(pos) => writeln!(
                        out,
                        "  ({}) {}/{}: {}",
                        measure.label(),
                        pos + 1,
                        total,
                        self.format_score(ranking.entries()[pos].score)
                    )?,
                    None => writeln!(out, "  ({}) -/{}: undefined", measure.label(), total)?,
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Summary of skipped entries
    pub fn write_failures<W: Write>(&self, out: &mut W, report: &BatchReport) -> io::Result<()> {
        if report.failures.is_empty() {
            return Ok(());
        }
        writeln!(out, "Skipped {} unreadable entries:", report.failures.len())?;
        for failure in &report.failures {
            writeln!(out, "  {}: {}", failure.path, failure.reason)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct EntryDto<'a> {
    path: &'a str,
    score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    undefined: Option<String>,
}

#[derive(Debug, Serialize)]
struct ColumnDto<'a> {
    measure: &'static str,
    entries: Vec<EntryDto<'a>>,
}

#[derive(Debug, Serialize)]
struct FailureDto<'a> {
    path: &'a str,
    reason: &'a str,
}

#[derive(Debug, Serialize)]
struct ReportDto<'a> {
    processed: usize,
    rankings: Vec<ColumnDto<'a>>,
    failures: Vec<FailureDto<'a>>,
}

/// Serialize the whole report as pretty JSON
pub fn to_json(report: &BatchReport) -> serde_json::Result<String> {
    let rankings = report
        .rankings
        .columns()
        .iter()
        .map(|column| ColumnDto {
            measure: column.measure().label(),
            entries: (0..column.len())
                .filter_map(|i| column.cell(i))
                .map(|cell| match cell {
                    RankCell::Ranked(entry) => EntryDto {
                        path: &entry.path,
                        score: Some(entry.score),
                        undefined: None,
                    },
                    RankCell::Undefined(entry) => EntryDto {
                        path: &entry.path,
                        score: None,
                        undefined: Some(entry.error.to_string()),
                    },
                })
                .collect(),
        })
        .collect();

    let dto = ReportDto {
        processed: report.processed(),
        rankings,
        failures: report
            .failures
            .iter()
            .map(|f| FailureDto {
                path: &f.path,
                reason: &f.reason,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&dto)
}
