use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::build_analysis_config;
use crate::error::{CliError, Result};
use crate::utils::output;
use crate::utils::progress::CliProgressHandler;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};
use vsepr::workflows::analyze::{self, MoleculeInput, MoleculeReport};
use vsepr::workflows::progress::ProgressReporter;

/// One line of output: a report, or the reason the molecule could not be read.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AnalysisEntry {
    Report(MoleculeReport),
    Failure {
        name: String,
        smiles: String,
        error: String,
    },
}

pub fn run(args: AnalyzeArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = build_analysis_config(&args)?;

    let inputs = match &args.input {
        Some(path) => {
            info!("Reading SMILES from {:?}", path);
            read_smiles_file(path)?
        }
        None => args
            .smiles
            .iter()
            .map(|smiles| MoleculeInput::new(smiles, smiles))
            .collect(),
    };
    if inputs.is_empty() {
        return Err(CliError::Argument("no SMILES to analyze".to_string()));
    }

    let progress_handler = CliProgressHandler::for_run(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let results = analyze::run(&inputs, &config, &reporter);

    let entries: Vec<AnalysisEntry> = inputs
        .iter()
        .zip(results)
        .map(|(input, result)| match result {
            Ok(report) => {
                let failed = report.failed_atoms().count();
                if failed > 0 {
                    warn!(molecule = %input.name, failed, "Some atoms could not be classified.");
                }
                AnalysisEntry::Report(report)
            }
            Err(e) => {
                warn!(molecule = %input.name, error = %e, "Skipping molecule.");
                AnalysisEntry::Failure {
                    name: input.name.clone(),
                    smiles: input.smiles.clone(),
                    error: e.to_string(),
                }
            }
        })
        .collect();

    let content = output::render(entries.as_slice(), format, format_entries)?;
    output::emit(&content, args.output.as_deref())?;
    if let Some(path) = &args.output {
        info!("Report written to {:?}", path);
    }

    let failures = entries
        .iter()
        .filter(|e| matches!(e, AnalysisEntry::Failure { .. }))
        .count();
    if failures == entries.len() {
        return Err(CliError::Argument(
            "none of the given SMILES could be parsed".to_string(),
        ));
    }
    Ok(())
}

fn format_entries(entries: &[AnalysisEntry]) -> String {
    entries
        .iter()
        .map(|entry| match entry {
            AnalysisEntry::Report(report) => output::format_molecule_report(report),
            AnalysisEntry::Failure { name, error, .. } => format!("{}\n  error: {}\n", name, error),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reads a `.smi` file: one SMILES per line, optionally followed by whitespace
/// and a name. Blank lines and lines starting with `#` are skipped.
fn read_smiles_file(path: &Path) -> Result<Vec<MoleculeInput>> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once(char::is_whitespace) {
            Some((smiles, name)) => MoleculeInput::new(name.trim(), smiles),
            None => MoleculeInput::new(line, line),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn smiles_file_names_are_optional() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("mols.smi");
        fs::write(&path, "# header\nO water\n\nC=O   formaldehyde\nN\n").unwrap();

        let inputs = read_smiles_file(&path).unwrap();
        assert_eq!(
            inputs,
            vec![
                MoleculeInput::new("water", "O"),
                MoleculeInput::new("formaldehyde", "C=O"),
                MoleculeInput::new("N", "N"),
            ]
        );
    }

    #[test]
    fn failures_are_rendered_with_their_name() {
        let entries = vec![AnalysisEntry::Failure {
            name: "broken".to_string(),
            smiles: "C1CC".to_string(),
            error: "ring 1 is never closed".to_string(),
        }];
        assert_eq!(
            format_entries(&entries),
            "broken\n  error: ring 1 is never closed\n"
        );

        let json = serde_json::to_value(&entries).unwrap();
        assert_eq!(json[0]["smiles"], "C1CC");
        assert!(json[0].get("status").is_none());
    }
}
