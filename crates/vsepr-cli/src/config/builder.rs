use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use crate::cli::{AnalyzeArgs, CleanArgs, ConfigArgs, ConformerArgs};
use crate::error::{CliError, Result};
use std::str::FromStr;
use tracing::debug;
use vsepr::core::polarity::ElectronegativityTable;
use vsepr::workflows::config as core_config;

/// Reads the config file named on the command line (if any) and applies `--set` overrides.
pub fn load_file_config(args: &ConfigArgs) -> Result<FileConfig> {
    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    apply_set_values(file_config, &args.set_values)
}

/// Base table, then `[electronegativity]` from the config file, then `--electronegativity`.
pub fn build_electronegativity_table(
    file_config: &FileConfig,
    args: &ConfigArgs,
) -> Result<ElectronegativityTable> {
    let mut table = ElectronegativityTable::new();
    if let Some(entries) = &file_config.electronegativity {
        table
            .try_extend(entries.iter().map(|(k, v)| (k.as_str(), *v)))
            .map_err(|e| CliError::Config(e.to_string()))?;
    }
    if let Some(path) = &args.electronegativity {
        table = table.load_overrides(path)?;
    }
    debug!(
        overrides = table.override_count(),
        "Electronegativity table ready."
    );
    Ok(table)
}

pub fn build_analysis_config(args: &AnalyzeArgs) -> Result<core_config::AnalysisConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;
    let electronegativity = build_electronegativity_table(&file_config, &args.config)?;

    let analysis_file = file_config.analysis.take().unwrap_or_default();
    let include_hydrogens = match (args.hydrogens.with_hydrogens, args.hydrogens.no_hydrogens) {
        (true, false) => true,
        (false, true) => false,
        _ => analysis_file
            .include_hydrogens
            .unwrap_or(defaults.include_hydrogens),
    };

    core_config::AnalysisConfigBuilder::new()
        .include_hydrogens(include_hydrogens)
        .electronegativity(electronegativity)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_cleaning_config(args: &CleanArgs) -> Result<core_config::CleaningConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;
    let dataset_file = file_config.dataset.take().unwrap_or_default();

    let smiles_column = args
        .smiles_column
        .clone()
        .or(dataset_file.smiles_column)
        .unwrap_or(defaults.smiles_column);
    let target_column = args
        .target_column
        .clone()
        .or(dataset_file.target_column)
        .unwrap_or(defaults.target_column);
    let drop_duplicates = if args.keep_duplicates {
        false
    } else {
        dataset_file
            .drop_duplicates
            .unwrap_or(defaults.drop_duplicates)
    };

    core_config::CleaningConfigBuilder::new()
        .smiles_column(&smiles_column)
        .target_column(&target_column)
        .drop_duplicates(drop_duplicates)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

pub fn build_conformer_config(args: &ConformerArgs) -> Result<core_config::ConformerConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;
    let conformer_file = file_config.conformers.take().unwrap_or_default();

    let align = if args.no_align {
        false
    } else {
        conformer_file.align.unwrap_or(defaults.align)
    };

    let mut builder = core_config::ConformerConfigBuilder::new().align(align);
    if let Some(window) = args.energy_window.or(conformer_file.energy_window) {
        builder = builder.energy_window(window);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value)))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };

        match key {
            "analysis.include-hydrogens" => {
                config
                    .analysis
                    .get_or_insert_with(Default::default)
                    .include_hydrogens = Some(parse_value(key, value_str, "boolean")?);
            }
            "dataset.smiles-column" => {
                config
                    .dataset
                    .get_or_insert_with(Default::default)
                    .smiles_column = Some(value_str.to_string());
            }
            "dataset.target-column" => {
                config
                    .dataset
                    .get_or_insert_with(Default::default)
                    .target_column = Some(value_str.to_string());
            }
            "dataset.drop-duplicates" => {
                config
                    .dataset
                    .get_or_insert_with(Default::default)
                    .drop_duplicates = Some(parse_value(key, value_str, "boolean")?);
            }
            "conformers.align" => {
                config
                    .conformers
                    .get_or_insert_with(Default::default)
                    .align = Some(parse_value(key, value_str, "boolean")?);
            }
            "conformers.energy-window" => {
                config
                    .conformers
                    .get_or_insert_with(Default::default)
                    .energy_window = Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                if let Some(symbol) = key.strip_prefix("electronegativity.") {
                    let value = parse_value(key, value_str, "float")?;
                    config
                        .electronegativity
                        .get_or_insert_with(Default::default)
                        .insert(symbol.to_string(), value);
                } else {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
    }
    Ok(config)
}
