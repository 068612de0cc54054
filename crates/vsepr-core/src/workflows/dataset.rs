use super::config::CleaningConfig;
use super::error::WorkflowError;
use super::progress::{Progress, ProgressReporter};
use crate::core::io::dataset::{PropertyRecord, PropertyTable, RawRecord};
use crate::core::io::smiles::parse_smiles;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropReason {
    EmptySmiles,
    MissingTarget,
    InvalidTarget,
    InvalidSmiles,
    Duplicate,
}

/// Row counts of one cleaning run, per outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleaningReport {
    pub total_rows: usize,
    pub kept: usize,
    pub empty_smiles: usize,
    pub missing_target: usize,
    pub invalid_target: usize,
    pub invalid_smiles: usize,
    pub duplicates: usize,
}

impl CleaningReport {
    pub fn dropped(&self) -> usize {
        self.total_rows - self.kept
    }

    fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::EmptySmiles => self.empty_smiles += 1,
            DropReason::MissingTarget => self.missing_target += 1,
            DropReason::InvalidTarget => self.invalid_target += 1,
            DropReason::InvalidSmiles => self.invalid_smiles += 1,
            DropReason::Duplicate => self.duplicates += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleanedDataset {
    pub records: Vec<PropertyRecord>,
    pub report: CleaningReport,
}

fn check_row(
    row: &RawRecord,
    seen: &mut HashSet<String>,
    drop_duplicates: bool,
) -> Result<PropertyRecord, DropReason> {
    let smiles = row.smiles.trim();
    if smiles.is_empty() {
        return Err(DropReason::EmptySmiles);
    }
    let target = row
        .target
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(DropReason::MissingTarget)?;
    let value = target
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(DropReason::InvalidTarget)?;
    if parse_smiles(smiles).is_err() {
        return Err(DropReason::InvalidSmiles);
    }
    if drop_duplicates && !seen.insert(smiles.to_string()) {
        return Err(DropReason::Duplicate);
    }
    Ok(PropertyRecord {
        smiles: smiles.to_string(),
        value,
    })
}

/// Filters raw rows down to valid, unique `(SMILES, value)` records.
///
/// Rows are checked in order: empty SMILES, missing target, non-numeric or
/// non-finite target, unparseable SMILES, then duplicate SMILES (the first
/// occurrence is kept). Each dropped row is counted under the first check it fails.
pub fn clean_rows(
    rows: &[RawRecord],
    config: &CleaningConfig,
    reporter: &ProgressReporter,
) -> CleanedDataset {
    let mut report = CleaningReport {
        total_rows: rows.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(rows.len());
    let mut seen = HashSet::new();

    reporter.report(Progress::TaskStart {
        total: rows.len() as u64,
    });
    for row in rows {
        match check_row(row, &mut seen, config.drop_duplicates) {
            Ok(record) => records.push(record),
            Err(reason) => {
                debug!(row = row.row, smiles = %row.smiles, ?reason, "Dropping row.");
                report.record_drop(reason);
            }
        }
        reporter.report(Progress::TaskIncrement);
    }
    reporter.report(Progress::TaskFinish);

    report.kept = records.len();
    CleanedDataset { records, report }
}

/// Reads `input`, cleans it, and writes the result to `output` when given.
#[instrument(skip_all, name = "dataset_cleaning_workflow")]
pub fn run(
    input: &Path,
    output: Option<&Path>,
    config: &CleaningConfig,
    reporter: &ProgressReporter,
) -> Result<CleanedDataset, WorkflowError> {
    reporter.report(Progress::PhaseStart { name: "Loading" });
    let rows = PropertyTable::read_raw(input, &config.columns)?;
    reporter.report(Progress::PhaseFinish);
    info!(rows = rows.len(), path = %input.display(), "Loaded property table.");

    reporter.report(Progress::PhaseStart { name: "Cleaning" });
    let cleaned = clean_rows(&rows, config, reporter);
    reporter.report(Progress::PhaseFinish);

    if let Some(output) = output {
        PropertyTable::write(output, &config.columns, &cleaned.records)?;
        info!(path = %output.display(), "Wrote cleaned table.");
    }

    info!(
        kept = cleaned.report.kept,
        dropped = cleaned.report.dropped(),
        "Dataset cleaning finished."
    );
    Ok(cleaned)
}
