//! CSV output for merged scenario summaries, one row per simulated day.

use std::fs::{create_dir_all, File};
use std::path::Path;

use csv::Writer;
use serde::{Deserialize, Serialize};

use crate::error::SocnetError;
use crate::stats::ScenarioSummary;

/// One day of a scenario summary in flat columnar form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub day: usize,
    pub infected_mean: f64,
    pub infected_m2: f64,
    pub infected_count: f64,
    pub susceptible_mean: f64,
    pub susceptible_m2: f64,
    pub susceptible_count: f64,
    pub reproduction_mean: f64,
    pub reproduction_m2: f64,
    pub reproduction_count: f64,
}

impl SummaryRow {
    fn from_summary(summary: &ScenarioSummary, day: usize) -> SummaryRow {
        SummaryRow {
            day,
            infected_mean: summary.infected.mean[day],
            infected_m2: summary.infected.m2[day],
            infected_count: summary.infected.count[day],
            susceptible_mean: summary.susceptible.mean[day],
            susceptible_m2: summary.susceptible.m2[day],
            susceptible_count: summary.susceptible.count[day],
            reproduction_mean: summary.reproduction.mean[day],
            reproduction_m2: summary.reproduction.m2[day],
            reproduction_count: summary.reproduction.count[day],
        }
    }
}

// Checks that the path is a CSV path and creates missing parent directories, returning the open
// file.
fn create_report_file(path: &Path) -> Result<File, SocnetError> {
    match path.extension().and_then(std::ffi::OsStr::to_str) {
        Some("csv") => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    create_dir_all(parent)?;
                }
            }
            Ok(File::create(path)?)
        }
        _ => Err(SocnetError::ReportError(
            "Summary output files must be CSVs".to_string(),
        )),
    }
}

/// Writes `summary` to `path` as CSV, one row per day with a header row.
///
/// # Errors
///
/// Returns a `SocnetError` if the path is not a `.csv` path or on I/O failure.
pub fn write_summary_csv(path: &Path, summary: &ScenarioSummary) -> Result<(), SocnetError> {
    let file = create_report_file(path)?;
    let mut writer = Writer::from_writer(file);
    for day in 0..summary.duration() {
        writer.serialize(SummaryRow::from_summary(summary, day))?;
    }
    writer.flush()?;
    Ok(())
}
