use crate::cli::{OutputFormat, PolarityArgs};
use crate::config::{build_electronegativity_table, load_file_config};
use crate::error::Result;
use crate::utils::output;
use serde::Serialize;
use tracing::warn;
use vsepr::core::geometry::label_or_unknown;
use vsepr::core::polarity::{
    BondPolarity, ElectronegativityTable, electronegativity_difference,
};

#[derive(Debug, Serialize)]
struct PolarityLookup {
    element_a: String,
    element_b: String,
    electronegativity_a: Option<f64>,
    electronegativity_b: Option<f64>,
    difference: Option<f64>,
    polarity: String,
}

pub fn run(args: PolarityArgs, format: OutputFormat) -> Result<()> {
    let file_config = load_file_config(&args.config)?;
    let table = build_electronegativity_table(&file_config, &args.config)?;

    let lookup = lookup(args.element_a.trim(), args.element_b.trim(), &table);
    for (symbol, value) in [
        (&lookup.element_a, lookup.electronegativity_a),
        (&lookup.element_b, lookup.electronegativity_b),
    ] {
        if value.is_none() {
            warn!(symbol = %symbol, "No electronegativity value for element.");
        }
    }

    let content = output::render(&lookup, format, |l| match l.difference {
        Some(delta) => format!(
            "{}-{}: {} (difference {:.2})\n",
            l.element_a, l.element_b, l.polarity, delta
        ),
        None => format!("{}-{}: {}\n", l.element_a, l.element_b, l.polarity),
    })?;
    output::emit(&content, None)
}

fn lookup(element_a: &str, element_b: &str, table: &ElectronegativityTable) -> PolarityLookup {
    let difference = electronegativity_difference(element_a, element_b, table);
    PolarityLookup {
        element_a: element_a.to_string(),
        element_b: element_b.to_string(),
        electronegativity_a: table.get(element_a),
        electronegativity_b: table.get(element_b),
        difference,
        polarity: label_or_unknown(difference.map(BondPolarity::from_difference)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sodium_chloride_lookup() {
        let result = lookup("Na", "Cl", &ElectronegativityTable::default());
        assert_eq!(result.polarity, "ionic");
        assert!((result.difference.unwrap() - 2.23).abs() < 1e-9);
    }

    #[test]
    fn missing_element_is_unknown() {
        let result = lookup("Xx", "Cl", &ElectronegativityTable::default());
        assert_eq!(result.polarity, "unknown");
        assert_eq!(result.electronegativity_a, None);
        assert_eq!(result.difference, None);
    }

    #[test]
    fn overrides_are_consulted() {
        let table = ElectronegativityTable::new()
            .with_override("Xx", 3.16)
            .unwrap();
        let result = lookup("Xx", "Cl", &table);
        assert_eq!(result.polarity, "non-polar covalent");
    }
}
