use super::elements::PAULING_ELECTRONEGATIVITY;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Electronegativity difference at or above which a bond is classified as ionic.
pub const IONIC_THRESHOLD: f64 = 1.7;
/// Electronegativity difference at or above which a covalent bond is polar.
pub const POLAR_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BondPolarity {
    #[serde(rename = "ionic")]
    Ionic,
    #[serde(rename = "polar covalent")]
    PolarCovalent,
    #[serde(rename = "non-polar covalent")]
    NonPolarCovalent,
}

impl BondPolarity {
    /// Classifies an absolute electronegativity difference.
    ///
    /// Each band is inclusive at its lower bound: exactly 1.7 is ionic and
    /// exactly 0.4 is polar covalent.
    pub fn from_difference(delta: f64) -> Self {
        if delta >= IONIC_THRESHOLD {
            Self::Ionic
        } else if delta >= POLAR_THRESHOLD {
            Self::PolarCovalent
        } else {
            Self::NonPolarCovalent
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ionic => "ionic",
            Self::PolarCovalent => "polar covalent",
            Self::NonPolarCovalent => "non-polar covalent",
        }
    }
}

impl fmt::Display for BondPolarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
pub enum ElectronegativityLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid electronegativity for '{symbol}': {value} (must be finite and positive)")]
    InvalidValue { symbol: String, value: f64 },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct OverrideFile {
    #[serde(default)]
    electronegativity: HashMap<String, f64>,
}

/// Pauling electronegativities: the built-in base table plus caller-owned overrides.
///
/// The base table is immutable. Coverage is extended by layering overrides on a
/// table value, which is then passed explicitly to [`classify_bond_polarity`].
/// Overrides take precedence over base entries with the same symbol.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElectronegativityTable {
    overrides: HashMap<String, f64>,
}

impl ElectronegativityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one override, rejecting values that are not finite and positive.
    pub fn with_override(
        mut self,
        symbol: &str,
        value: f64,
    ) -> Result<Self, ElectronegativityLoadError> {
        self.try_extend([(symbol, value)])?;
        Ok(self)
    }

    /// Loads overrides from a TOML file with an `[electronegativity]` table
    /// (e.g., `Xe = 2.6`) and layers them over the current table.
    pub fn load_overrides(mut self, path: &Path) -> Result<Self, ElectronegativityLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ElectronegativityLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: OverrideFile =
            toml::from_str(&content).map_err(|e| ElectronegativityLoadError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;
        self.try_extend(file.electronegativity)?;
        Ok(self)
    }

    /// Adds overrides, rejecting values that are not finite and positive.
    /// Nothing is inserted if any entry is invalid.
    pub fn try_extend<I, S>(&mut self, entries: I) -> Result<(), ElectronegativityLoadError>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let entries: Vec<(S, f64)> = entries.into_iter().collect();
        for (symbol, value) in &entries {
            validate(symbol.as_ref(), *value)?;
        }
        for (symbol, value) in entries {
            self.overrides.insert(symbol.as_ref().trim().to_string(), value);
        }
        Ok(())
    }

    /// Looks up a symbol, preferring overrides. Unlisted symbols return `None`;
    /// there is no default value.
    pub fn get(&self, symbol: &str) -> Option<f64> {
        let symbol = symbol.trim();
        self.overrides
            .get(symbol)
            .copied()
            .or_else(|| PAULING_ELECTRONEGATIVITY.get(symbol).copied())
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.get(symbol).is_some()
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }
}

fn validate(symbol: &str, value: f64) -> Result<(), ElectronegativityLoadError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ElectronegativityLoadError::InvalidValue {
            symbol: symbol.to_string(),
            value,
        })
    }
}

/// Absolute electronegativity difference between two elements, if both are listed.
pub fn electronegativity_difference(
    symbol_a: &str,
    symbol_b: &str,
    table: &ElectronegativityTable,
) -> Option<f64> {
    let chi_a = table.get(symbol_a)?;
    let chi_b = table.get(symbol_b)?;
    Some((chi_a - chi_b).abs())
}

/// Classifies the bond between two elements by electronegativity difference.
///
/// Returns `None` (displayed as "unknown") when either symbol is missing from
/// `table`. This never fails.
pub fn classify_bond_polarity(
    symbol_a: &str,
    symbol_b: &str,
    table: &ElectronegativityTable,
) -> Option<BondPolarity> {
    electronegativity_difference(symbol_a, symbol_b, table).map(BondPolarity::from_difference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn sodium_chloride_is_ionic() {
        let table = ElectronegativityTable::default();
        let delta = electronegativity_difference("Na", "Cl", &table).unwrap();
        assert!((delta - 2.23).abs() < 1e-9);
        assert_eq!(
            classify_bond_polarity("Na", "Cl", &table),
            Some(BondPolarity::Ionic)
        );
    }

    #[test]
    fn hydrogen_chloride_is_polar_covalent() {
        let table = ElectronegativityTable::default();
        assert_eq!(
            classify_bond_polarity("H", "Cl", &table).map(|p| p.label()),
            Some("polar covalent")
        );
    }

    #[test]
    fn carbon_hydrogen_is_non_polar_covalent() {
        let table = ElectronegativityTable::default();
        assert_eq!(
            classify_bond_polarity("C", "H", &table).map(|p| p.label()),
            Some("non-polar covalent")
        );
    }

    #[test]
    fn unknown_symbol_yields_none_without_failing() {
        let table = ElectronegativityTable::default();
        assert_eq!(classify_bond_polarity("Xx", "Cl", &table), None);
        assert_eq!(classify_bond_polarity("Cl", "Xx", &table), None);
    }

    #[test]
    fn polarity_is_symmetric() {
        let table = ElectronegativityTable::default();
        assert_eq!(
            classify_bond_polarity("O", "H", &table),
            classify_bond_polarity("H", "O", &table)
        );
    }

    #[test]
    fn thresholds_are_inclusive_at_lower_bound() {
        assert_eq!(BondPolarity::from_difference(1.7), BondPolarity::Ionic);
        assert_eq!(BondPolarity::from_difference(0.4), BondPolarity::PolarCovalent);
        assert_eq!(
            BondPolarity::from_difference(0.399),
            BondPolarity::NonPolarCovalent
        );
        assert_eq!(BondPolarity::from_difference(1.699), BondPolarity::PolarCovalent);
        assert_eq!(BondPolarity::from_difference(0.0), BondPolarity::NonPolarCovalent);
    }

    #[test]
    fn exact_boundary_through_the_table() {
        // Zz is absorbed by the subtraction, leaving the exact thresholds.
        let table = ElectronegativityTable::new()
            .with_override("Aa", 1.7)
            .and_then(|t| t.with_override("Bb", 0.4))
            .and_then(|t| t.with_override("Zz", f64::MIN_POSITIVE))
            .unwrap();
        assert_eq!(
            classify_bond_polarity("Aa", "Zz", &table),
            Some(BondPolarity::Ionic)
        );
        assert_eq!(
            classify_bond_polarity("Bb", "Zz", &table),
            Some(BondPolarity::PolarCovalent)
        );
    }

    #[test]
    fn overrides_extend_and_shadow_the_base_table() {
        let mut table = ElectronegativityTable::new()
            .with_override("Kr", 3.00)
            .unwrap();
        table.try_extend([("H", 2.1)]).unwrap();
        assert_eq!(table.get("Kr"), Some(3.00));
        assert_eq!(table.get("H"), Some(2.1));
        assert_eq!(table.get("Cl"), Some(3.16));
        assert_eq!(table.override_count(), 2);

        // The base table is untouched.
        assert_eq!(ElectronegativityTable::default().get("Kr"), None);
        assert_eq!(ElectronegativityTable::default().get("H"), Some(2.20));
    }

    #[test]
    fn invalid_single_overrides_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, 0.0, -1.0] {
            let result = ElectronegativityTable::new().with_override("Xx", value);
            assert!(
                matches!(result, Err(ElectronegativityLoadError::InvalidValue { .. })),
                "{value} should be rejected"
            );
        }
        // Without a value, Xx stays unknown rather than non-polar.
        assert_eq!(
            classify_bond_polarity("Xx", "Cl", &ElectronegativityTable::new()),
            None
        );
    }

    #[test]
    fn try_extend_is_all_or_nothing() {
        let mut table = ElectronegativityTable::new();
        let result = table.try_extend([("Kr", 3.0), ("Xe", f64::NAN)]);
        assert!(matches!(
            result,
            Err(ElectronegativityLoadError::InvalidValue { .. })
        ));
        assert_eq!(table.override_count(), 0);

        table.try_extend([("Kr", 3.0)]).unwrap();
        assert_eq!(table.get("Kr"), Some(3.0));
    }

    #[test]
    fn load_overrides_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("en.toml");
        fs::write(&path, "[electronegativity]\nKr = 3.0\nFe = 1.83\n").unwrap();

        let table = ElectronegativityTable::new().load_overrides(&path).unwrap();
        assert_eq!(table.get("Kr"), Some(3.0));
        assert_eq!(table.get("Fe"), Some(1.83));
        assert_eq!(
            classify_bond_polarity("Fe", "Cl", &table),
            Some(BondPolarity::PolarCovalent)
        );
    }

    #[test]
    fn load_overrides_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ElectronegativityTable::new().load_overrides(&dir.path().join("nope.toml"));
        assert!(matches!(result, Err(ElectronegativityLoadError::Io { .. })));
    }

    #[test]
    fn load_overrides_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = ElectronegativityTable::new().load_overrides(&path);
        assert!(matches!(result, Err(ElectronegativityLoadError::Toml { .. })));
    }

    #[test]
    fn load_overrides_rejects_non_positive_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("neg.toml");
        fs::write(&path, "[electronegativity]\nKr = -1.0\n").unwrap();
        let result = ElectronegativityTable::new().load_overrides(&path);
        assert!(matches!(
            result,
            Err(ElectronegativityLoadError::InvalidValue { .. })
        ));
    }
}
