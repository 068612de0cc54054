use super::config::AnalysisConfig;
use super::error::WorkflowError;
use super::progress::{Progress, ProgressReporter};
use crate::core::geometry::{Hybridization, MolecularGeometry, label_or_unknown};
use crate::core::io::smiles::parse_smiles_named;
use crate::core::models::molecule::Molecule;
use crate::core::models::topology::BondOrder;
use crate::core::polarity::{BondPolarity, electronegativity_difference};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Classification of one atom of a molecule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomReport {
    pub index: usize,
    pub symbol: String,
    pub formal_charge: i32,
    /// `None` when the count overflows; the atom is then reported as failed.
    pub sigma_bonds: Option<u32>,
    pub bond_order_sum: f64,
    #[serde(flatten)]
    pub outcome: AtomOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AtomOutcome {
    Classified {
        steric_number: u32,
        lone_pairs: u32,
        #[serde(serialize_with = "serialize_label")]
        geometry: Option<MolecularGeometry>,
        #[serde(serialize_with = "serialize_label")]
        electron_geometry: Option<MolecularGeometry>,
        #[serde(serialize_with = "serialize_label")]
        hybridization: Option<Hybridization>,
    },
    /// The steric profile could not be derived; the message explains why.
    Failed { error: String },
}

impl AtomReport {
    pub fn geometry(&self) -> Option<MolecularGeometry> {
        match &self.outcome {
            AtomOutcome::Classified { geometry, .. } => *geometry,
            AtomOutcome::Failed { .. } => None,
        }
    }

    pub fn hybridization(&self) -> Option<Hybridization> {
        match &self.outcome {
            AtomOutcome::Classified { hybridization, .. } => *hybridization,
            AtomOutcome::Failed { .. } => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, AtomOutcome::Failed { .. })
    }
}

/// Polarity of one bond, or of all implicit hydrogens on one atom.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondReport {
    pub atom1: usize,
    /// `None` for bonds to implicit hydrogens of `atom1`.
    pub atom2: Option<usize>,
    pub symbol1: String,
    pub symbol2: String,
    pub order: BondOrder,
    /// Number of identical bonds this entry stands for (always 1 for graph bonds).
    pub multiplicity: u32,
    pub electronegativity_difference: Option<f64>,
    #[serde(serialize_with = "serialize_label")]
    pub polarity: Option<BondPolarity>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoleculeReport {
    pub name: String,
    pub formula: String,
    pub net_charge: i32,
    pub atoms: Vec<AtomReport>,
    pub bonds: Vec<BondReport>,
}

impl MoleculeReport {
    pub fn failed_atoms(&self) -> impl Iterator<Item = &AtomReport> + '_ {
        self.atoms.iter().filter(|a| a.is_failed())
    }
}

fn serialize_label<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(&label_or_unknown(value.as_ref()))
}

/// Classifies every atom and bond of a molecule.
///
/// Atoms whose steric profile cannot be derived (unsupported element, an odd
/// number of non-bonding electrons, ...) are reported as
/// [`AtomOutcome::Failed`]; the rest of the molecule is still analyzed.
#[instrument(skip_all, fields(molecule = %molecule.name))]
pub fn analyze_molecule(molecule: &Molecule, config: &AnalysisConfig) -> MoleculeReport {
    let mut atoms = Vec::with_capacity(molecule.atom_count());
    for (index, atom) in molecule.atoms().iter().enumerate() {
        if atom.is_hydrogen() && !config.include_hydrogens {
            continue;
        }
        let outcome = match molecule.descriptor(index).and_then(|d| d.steric_profile()) {
            Ok(profile) => AtomOutcome::Classified {
                steric_number: profile.steric_number,
                lone_pairs: profile.lone_pairs,
                geometry: profile.geometry(),
                electron_geometry: profile.electron_pair_geometry(),
                hybridization: profile.hybridization(),
            },
            Err(e) => {
                debug!(atom = index, symbol = %atom.symbol, error = %e, "Steric derivation failed.");
                AtomOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        atoms.push(AtomReport {
            index,
            symbol: atom.symbol.clone(),
            formal_charge: atom.formal_charge,
            sigma_bonds: molecule.sigma_bond_count(index),
            bond_order_sum: molecule.bond_order_sum(index),
            outcome,
        });
    }

    let table = &config.electronegativity;
    let mut bonds: Vec<BondReport> = molecule
        .bonds()
        .iter()
        .map(|bond| {
            let symbol1 = &molecule.atoms()[bond.atom1].symbol;
            let symbol2 = &molecule.atoms()[bond.atom2].symbol;
            let delta = electronegativity_difference(symbol1, symbol2, table);
            BondReport {
                atom1: bond.atom1,
                atom2: Some(bond.atom2),
                symbol1: symbol1.clone(),
                symbol2: symbol2.clone(),
                order: bond.order,
                multiplicity: 1,
                electronegativity_difference: delta,
                polarity: delta.map(BondPolarity::from_difference),
            }
        })
        .collect();

    for (index, atom) in molecule.atoms().iter().enumerate() {
        if atom.implicit_hydrogens == 0 {
            continue;
        }
        let delta = electronegativity_difference(&atom.symbol, "H", table);
        bonds.push(BondReport {
            atom1: index,
            atom2: None,
            symbol1: atom.symbol.clone(),
            symbol2: "H".to_string(),
            order: BondOrder::Single,
            multiplicity: atom.implicit_hydrogens,
            electronegativity_difference: delta,
            polarity: delta.map(BondPolarity::from_difference),
        });
    }

    let report = MoleculeReport {
        name: molecule.name.clone(),
        formula: molecule.formula(),
        net_charge: molecule.net_charge(),
        atoms,
        bonds,
    };
    let failed = report.failed_atoms().count();
    if failed > 0 {
        warn!(failed, "Some atoms could not be classified.");
    }
    debug!(
        atoms = report.atoms.len(),
        bonds = report.bonds.len(),
        "Molecule analyzed."
    );
    report
}

/// Parses a SMILES string and analyzes the resulting molecule.
pub fn analyze_smiles(
    smiles: &str,
    name: &str,
    config: &AnalysisConfig,
) -> Result<MoleculeReport, WorkflowError> {
    let molecule = parse_smiles_named(smiles, name).map_err(|source| WorkflowError::Smiles {
        smiles: smiles.to_string(),
        source,
    })?;
    Ok(analyze_molecule(&molecule, config))
}

/// A named SMILES input for batch analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeInput {
    pub name: String,
    pub smiles: String,
}

impl MoleculeInput {
    pub fn new(name: &str, smiles: &str) -> Self {
        Self {
            name: name.to_string(),
            smiles: smiles.to_string(),
        }
    }
}

/// Analyzes many molecules, in parallel when the `parallel` feature is on.
///
/// Results keep the input order. A malformed SMILES fails only its own entry.
#[instrument(skip_all, name = "analysis_workflow")]
pub fn run(
    inputs: &[MoleculeInput],
    config: &AnalysisConfig,
    reporter: &ProgressReporter,
) -> Vec<Result<MoleculeReport, WorkflowError>> {
    info!(molecules = inputs.len(), "Starting batch analysis.");
    reporter.report(Progress::PhaseStart { name: "Analysis" });
    reporter.report(Progress::TaskStart {
        total: inputs.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = inputs.iter();

    #[cfg(feature = "parallel")]
    let iterator = inputs.par_iter();

    let results: Vec<Result<MoleculeReport, WorkflowError>> = iterator
        .map(|input| {
            let result = analyze_smiles(&input.smiles, &input.name, config);
            reporter.report(Progress::TaskIncrement);
            result
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    let failures = results.iter().filter(|r| r.is_err()).count();
    info!(
        analyzed = results.len() - failures,
        failures, "Batch analysis finished."
    );
    results
}
