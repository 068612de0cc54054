use crate::error::{CliError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileAnalysisConfig {
    #[serde(rename = "include-hydrogens")]
    pub include_hydrogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileDatasetConfig {
    #[serde(rename = "smiles-column")]
    pub smiles_column: Option<String>,
    #[serde(rename = "target-column")]
    pub target_column: Option<String>,
    #[serde(rename = "drop-duplicates")]
    pub drop_duplicates: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConformerConfig {
    pub align: Option<bool>,
    #[serde(rename = "energy-window")]
    pub energy_window: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub analysis: Option<FileAnalysisConfig>,
    pub dataset: Option<FileDatasetConfig>,
    pub conformers: Option<FileConformerConfig>,
    /// Extra or replacement Pauling electronegativities, keyed by element symbol.
    pub electronegativity: Option<HashMap<String, f64>>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }
}
