use serde::Serialize;

/// An atom of a molecular graph.
///
/// Hydrogens that are not written as separate atoms in the input (implicit
/// hydrogens of organic-subset atoms, or the `H` count inside a bracket atom)
/// are carried in `implicit_hydrogens` rather than as graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Atom {
    /// Element symbol with standard capitalization (e.g., "C", "Cl").
    pub symbol: String,
    pub formal_charge: i32,
    pub aromatic: bool,
    pub implicit_hydrogens: u32,
    pub isotope: Option<u16>,
}

impl Atom {
    /// Creates a neutral, non-aromatic atom with no attached hydrogens.
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            formal_charge: 0,
            aromatic: false,
            implicit_hydrogens: 0,
            isotope: None,
        }
    }

    pub fn with_charge(mut self, formal_charge: i32) -> Self {
        self.formal_charge = formal_charge;
        self
    }

    pub fn with_hydrogens(mut self, count: u32) -> Self {
        self.implicit_hydrogens = count;
        self
    }

    pub fn is_hydrogen(&self) -> bool {
        crate::core::elements::is_hydrogen(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new("N");
        assert_eq!(atom.symbol, "N");
        assert_eq!(atom.formal_charge, 0);
        assert!(!atom.aromatic);
        assert_eq!(atom.implicit_hydrogens, 0);
        assert_eq!(atom.isotope, None);
    }

    #[test]
    fn builder_methods_set_fields() {
        let atom = Atom::new("N").with_charge(1).with_hydrogens(4);
        assert_eq!(atom.formal_charge, 1);
        assert_eq!(atom.implicit_hydrogens, 4);
    }

    #[test]
    fn is_hydrogen_checks_symbol() {
        assert!(Atom::new("H").is_hydrogen());
        assert!(!Atom::new("Hg").is_hydrogen());
    }
}
