use crate::cli::OutputFormat;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;
use vsepr::core::geometry::label_or_unknown;
use vsepr::workflows::analyze::{AtomOutcome, MoleculeReport};
use vsepr::workflows::conformers::ConformerAnalysis;
use vsepr::workflows::dataset::CleaningReport;

/// Renders `value` as pretty JSON, or as text through `text`.
pub fn render<T, F>(value: &T, format: OutputFormat, text: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)? + "\n"),
        OutputFormat::Text => Ok(text(value)),
    }
}

/// Writes rendered output to `path`, or to standard output when no path is given.
pub fn emit(content: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }
    Ok(())
}

pub fn format_molecule_report(report: &MoleculeReport) -> String {
    let mut out = String::new();
    let title = if report.name.is_empty() {
        report.formula.clone()
    } else {
        format!("{} ({})", report.name, report.formula)
    };
    let _ = writeln!(out, "{}", title);
    if report.net_charge != 0 {
        let _ = writeln!(out, "  net charge: {:+}", report.net_charge);
    }

    let _ = writeln!(
        out,
        "  {:>3}  {:<4} {:>3} {:>3}  {:<22} {:<22} {}",
        "#", "atom", "SN", "LP", "geometry", "electron geometry", "hybridization"
    );
    for atom in &report.atoms {
        match &atom.outcome {
            AtomOutcome::Classified {
                steric_number,
                lone_pairs,
                geometry,
                electron_geometry,
                hybridization,
            } => {
                let _ = writeln!(
                    out,
                    "  {:>3}  {:<4} {:>3} {:>3}  {:<22} {:<22} {}",
                    atom.index,
                    atom.symbol,
                    steric_number,
                    lone_pairs,
                    label_or_unknown(*geometry),
                    label_or_unknown(*electron_geometry),
                    label_or_unknown(*hybridization),
                );
            }
            AtomOutcome::Failed { error } => {
                let _ = writeln!(
                    out,
                    "  {:>3}  {:<4} error: {}",
                    atom.index, atom.symbol, error
                );
            }
        }
    }

    if !report.bonds.is_empty() {
        let _ = writeln!(out, "  bonds:");
    }
    for bond in &report.bonds {
        let partner = match bond.atom2 {
            Some(index) => format!("{}{}", bond.symbol2, index),
            None => bond.symbol2.clone(),
        };
        let pair = format!("{}{}-{}", bond.symbol1, bond.atom1, partner);
        let pair = if bond.multiplicity > 1 {
            format!("{} x{}", pair, bond.multiplicity)
        } else {
            pair
        };
        let delta = bond
            .electronegativity_difference
            .map(|d| format!("{:.2}", d))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "    {:<14} {:<9} dEN {:>5}  {}",
            pair,
            bond.order,
            delta,
            label_or_unknown(bond.polarity)
        );
    }
    out
}

pub fn format_cleaning_report(report: &CleaningReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Rows read:        {}", report.total_rows);
    let _ = writeln!(out, "Rows kept:        {}", report.kept);
    let _ = writeln!(out, "Rows dropped:     {}", report.dropped());
    for (label, count) in [
        ("empty SMILES", report.empty_smiles),
        ("missing target", report.missing_target),
        ("invalid target", report.invalid_target),
        ("invalid SMILES", report.invalid_smiles),
        ("duplicate SMILES", report.duplicates),
    ] {
        if count > 0 {
            let _ = writeln!(out, "  {:<16} {}", label, count);
        }
    }
    out
}

pub fn format_conformer_analysis(analysis: &ConformerAnalysis) -> String {
    let mut out = String::new();
    let kind = if analysis.aligned { "aligned" } else { "raw" };
    let _ = writeln!(out, "Pairwise RMSD ({}, Angstrom):", kind);
    let _ = write!(out, "{:>6}", "");
    for j in 0..analysis.rmsd_matrix.len() {
        let _ = write!(out, "{:>9}", j);
    }
    let _ = writeln!(out);
    for (i, row) in analysis.rmsd_matrix.iter().enumerate() {
        let _ = write!(out, "{:>6}", i);
        for value in row {
            let _ = write!(out, "{:>9.4}", value);
        }
        let _ = writeln!(out);
    }

    if analysis.ranking.is_empty() {
        let _ = writeln!(out, "No conformer energies to rank.");
    } else {
        let _ = writeln!(out, "Energy ranking (relative to lowest):");
        for (rank, entry) in analysis.ranking.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:>3}. #{:<4} {:>12.6}  {}",
                rank + 1,
                entry.index,
                entry.relative_energy,
                entry.label
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsepr::core::polarity::ElectronegativityTable;
    use vsepr::workflows::analyze::analyze_smiles;
    use vsepr::workflows::config::AnalysisConfigBuilder;

    fn water() -> MoleculeReport {
        let config = AnalysisConfigBuilder::new()
            .include_hydrogens(false)
            .electronegativity(ElectronegativityTable::default())
            .build()
            .unwrap();
        analyze_smiles("O", "water", &config).unwrap()
    }

    #[test]
    fn text_report_lists_atoms_and_bonds() {
        let text = format_molecule_report(&water());
        assert!(text.starts_with("water (H2O)\n"));
        assert!(text.contains("bent (109°)"));
        assert!(text.contains("tetrahedral"));
        assert!(text.contains("sp³"));
        assert!(text.contains("O0-H x2"));
        assert!(text.contains("polar covalent"));
    }

    #[test]
    fn failed_atoms_show_their_error() {
        let config = AnalysisConfigBuilder::new()
            .include_hydrogens(false)
            .electronegativity(ElectronegativityTable::default())
            .build()
            .unwrap();
        let report = analyze_smiles("[Fe]", "iron", &config).unwrap();
        let text = format_molecule_report(&report);
        assert!(text.contains("error: Unsupported element"));
    }

    #[test]
    fn json_output_uses_labels() {
        let json = render(&water(), OutputFormat::Json, |_| String::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["atoms"][0]["geometry"], "bent (109°)");
        assert_eq!(value["atoms"][0]["status"], "classified");
        assert_eq!(value["bonds"][0]["polarity"], "polar covalent");
        assert_eq!(value["bonds"][0]["atom2"], serde_json::Value::Null);
    }

    #[test]
    fn cleaning_report_skips_zero_counts() {
        let report = CleaningReport {
            total_rows: 10,
            kept: 8,
            duplicates: 2,
            ..Default::default()
        };
        let text = format_cleaning_report(&report);
        assert!(text.contains("Rows dropped:     2"));
        assert!(text.contains("duplicate SMILES"));
        assert!(!text.contains("invalid target"));
    }

    #[test]
    fn emit_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");
        emit("hello\n", Some(&path)).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "hello\n");
    }
}
