use crate::core::io::dataset::ColumnNames;
use crate::core::polarity::ElectronegativityTable;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Report hydrogen atoms as centers too. Hydrogens never have a defined
    /// shape, so this is mostly useful for polarity listings.
    pub include_hydrogens: bool,
    pub electronegativity: ElectronegativityTable,
}

#[derive(Default)]
pub struct AnalysisConfigBuilder {
    include_hydrogens: Option<bool>,
    electronegativity: Option<ElectronegativityTable>,
}

impl AnalysisConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn include_hydrogens(mut self, include: bool) -> Self {
        self.include_hydrogens = Some(include);
        self
    }
    pub fn electronegativity(mut self, table: ElectronegativityTable) -> Self {
        self.electronegativity = Some(table);
        self
    }

    pub fn build(self) -> Result<AnalysisConfig, ConfigError> {
        Ok(AnalysisConfig {
            include_hydrogens: self
                .include_hydrogens
                .ok_or(ConfigError::MissingParameter("include_hydrogens"))?,
            electronegativity: self
                .electronegativity
                .ok_or(ConfigError::MissingParameter("electronegativity"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningConfig {
    pub columns: ColumnNames,
    /// Keep only the first row of each distinct SMILES string.
    pub drop_duplicates: bool,
}

#[derive(Default)]
pub struct CleaningConfigBuilder {
    smiles_column: Option<String>,
    target_column: Option<String>,
    drop_duplicates: Option<bool>,
}

impl CleaningConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn smiles_column(mut self, name: &str) -> Self {
        self.smiles_column = Some(name.to_string());
        self
    }
    pub fn target_column(mut self, name: &str) -> Self {
        self.target_column = Some(name.to_string());
        self
    }
    pub fn drop_duplicates(mut self, drop: bool) -> Self {
        self.drop_duplicates = Some(drop);
        self
    }

    pub fn build(self) -> Result<CleaningConfig, ConfigError> {
        let smiles = self
            .smiles_column
            .ok_or(ConfigError::MissingParameter("smiles_column"))?;
        let target = self
            .target_column
            .ok_or(ConfigError::MissingParameter("target_column"))?;
        if smiles == target {
            return Err(ConfigError::InvalidParameter {
                name: "target_column",
                reason: format!("must differ from the SMILES column '{smiles}'"),
            });
        }
        Ok(CleaningConfig {
            columns: ColumnNames { smiles, target },
            drop_duplicates: self
                .drop_duplicates
                .ok_or(ConfigError::MissingParameter("drop_duplicates"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConformerConfig {
    /// Superimpose each pair before measuring RMSD.
    pub align: bool,
    /// Keep only conformers within this many energy units of the lowest one.
    pub energy_window: Option<f64>,
}

#[derive(Default)]
pub struct ConformerConfigBuilder {
    align: Option<bool>,
    energy_window: Option<f64>,
}

impl ConformerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: bool) -> Self {
        self.align = Some(align);
        self
    }
    pub fn energy_window(mut self, window: f64) -> Self {
        self.energy_window = Some(window);
        self
    }

    pub fn build(self) -> Result<ConformerConfig, ConfigError> {
        if let Some(window) = self.energy_window {
            if !window.is_finite() || window < 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name: "energy_window",
                    reason: format!("{window} is not a non-negative number"),
                });
            }
        }
        Ok(ConformerConfig {
            align: self.align.ok_or(ConfigError::MissingParameter("align"))?,
            energy_window: self.energy_window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_builder_requires_every_field() {
        let result = AnalysisConfigBuilder::new().include_hydrogens(false).build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("electronegativity"))
        );

        let config = AnalysisConfigBuilder::new()
            .include_hydrogens(true)
            .electronegativity(ElectronegativityTable::default())
            .build()
            .unwrap();
        assert!(config.include_hydrogens);
    }

    #[test]
    fn cleaning_builder_reports_first_missing_column() {
        let result = CleaningConfigBuilder::new().target_column("y").build();
        assert_eq!(result, Err(ConfigError::MissingParameter("smiles_column")));
    }

    #[test]
    fn cleaning_builder_rejects_identical_columns() {
        let result = CleaningConfigBuilder::new()
            .smiles_column("smiles")
            .target_column("smiles")
            .drop_duplicates(true)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "target_column",
                ..
            })
        ));
    }

    #[test]
    fn cleaning_builder_builds_column_names() {
        let config = CleaningConfigBuilder::new()
            .smiles_column("smiles")
            .target_column("logS")
            .drop_duplicates(false)
            .build()
            .unwrap();
        assert_eq!(config.columns, ColumnNames::new("smiles", "logS"));
        assert!(!config.drop_duplicates);
    }

    #[test]
    fn conformer_builder_validates_energy_window() {
        let result = ConformerConfigBuilder::new()
            .align(true)
            .energy_window(-1.0)
            .build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "energy_window",
                ..
            })
        ));

        let config = ConformerConfigBuilder::new().align(false).build().unwrap();
        assert_eq!(config.energy_window, None);
    }
}
