use super::config::ConformerConfig;
use super::error::WorkflowError;
use super::progress::{Progress, ProgressReporter};
use crate::core::conformers::{
    Conformer, ConformerError, rank_by_energy, rmsd_matrix, superimpose,
};
use crate::core::io::xyz::XyzFile;
use serde::Serialize;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedConformer {
    /// Position of the conformer in the input file.
    pub index: usize,
    pub label: String,
    pub relative_energy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConformerAnalysis {
    pub labels: Vec<String>,
    pub aligned: bool,
    pub rmsd_matrix: Vec<Vec<f64>>,
    /// Conformers with an energy, lowest first, filtered by the energy window.
    pub ranking: Vec<RankedConformer>,
}

/// Compares a set of conformers: pairwise RMSD and energy ranking.
#[instrument(skip_all, name = "conformer_workflow", fields(conformers = conformers.len()))]
pub fn analyze_conformers(
    conformers: &[Conformer],
    config: &ConformerConfig,
    reporter: &ProgressReporter,
) -> Result<ConformerAnalysis, WorkflowError> {
    if conformers.is_empty() {
        return Err(ConformerError::Empty.into());
    }

    reporter.report(Progress::PhaseStart { name: "RMSD" });
    let matrix = rmsd_matrix(conformers, config.align)?;
    reporter.report(Progress::PhaseFinish);

    let ranking: Vec<RankedConformer> = rank_by_energy(conformers)
        .into_iter()
        .filter(|(_, relative)| config.energy_window.is_none_or(|window| *relative <= window))
        .map(|(index, relative_energy)| RankedConformer {
            index,
            label: conformers[index].label.clone(),
            relative_energy,
        })
        .collect();

    let unranked = conformers.iter().filter(|c| c.energy.is_none()).count();
    if unranked > 0 {
        warn!(unranked, "Some conformers carry no energy and are not ranked.");
    }
    info!(
        ranked = ranking.len(),
        aligned = config.align,
        "Conformer comparison finished."
    );

    Ok(ConformerAnalysis {
        labels: conformers.iter().map(|c| c.label.clone()).collect(),
        aligned: config.align,
        rmsd_matrix: matrix,
        ranking,
    })
}

/// Superimposes every conformer onto the first one, which serves as the reference.
pub fn superimpose_on_first(conformers: &[Conformer]) -> Result<Vec<Conformer>, WorkflowError> {
    let Some(reference) = conformers.first() else {
        return Err(ConformerError::Empty.into());
    };
    conformers
        .iter()
        .map(|conformer| {
            let positions = superimpose(reference, conformer)?;
            Ok(Conformer {
                positions,
                ..conformer.clone()
            })
        })
        .collect()
}

/// Loads a multi-frame XYZ file and compares its conformers.
pub fn run(
    path: &Path,
    config: &ConformerConfig,
    reporter: &ProgressReporter,
) -> Result<ConformerAnalysis, WorkflowError> {
    reporter.report(Progress::PhaseStart { name: "Loading" });
    let conformers = XyzFile::read_from_path(path)?;
    reporter.report(Progress::PhaseFinish);
    info!(frames = conformers.len(), path = %path.display(), "Loaded conformers.");
    analyze_conformers(&conformers, config, reporter)
}
