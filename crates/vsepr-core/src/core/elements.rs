use phf::{Map, Set, phf_map, phf_set};

static ELEMENT_SYMBOLS: Set<&'static str> = phf_set! {
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar",
    "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Xe",
    "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu",
    "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr",
    "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
};

static VALENCE_ELECTRONS: Map<&'static str, u8> = phf_map! {
    "H" => 1, "He" => 2,
    "Li" => 1, "Be" => 2, "B" => 3, "C" => 4, "N" => 5, "O" => 6, "F" => 7, "Ne" => 8,
    "Na" => 1, "Mg" => 2, "Al" => 3, "Si" => 4, "P" => 5, "S" => 6, "Cl" => 7, "Ar" => 8,
    "K" => 1, "Ca" => 2, "Ga" => 3, "Ge" => 4, "As" => 5, "Se" => 6, "Br" => 7, "Kr" => 8,
    "Rb" => 1, "Sr" => 2, "In" => 3, "Sn" => 4, "Sb" => 5, "Te" => 6, "I" => 7, "Xe" => 8,
    "Cs" => 1, "Ba" => 2,
};

// Pauling scale.
pub(crate) static PAULING_ELECTRONEGATIVITY: Map<&'static str, f64> = phf_map! {
    "H" => 2.20,
    "Li" => 0.98, "Be" => 1.57, "B" => 2.04, "C" => 2.55, "N" => 3.04, "O" => 3.44, "F" => 3.98,
    "Na" => 0.93, "Mg" => 1.31, "Al" => 1.61, "Si" => 1.90, "P" => 2.19, "S" => 2.58, "Cl" => 3.16,
    "K" => 0.82, "Ca" => 1.00, "Ga" => 1.81, "Ge" => 2.01, "As" => 2.18, "Se" => 2.55, "Br" => 2.96,
    "Rb" => 0.82, "Sr" => 0.95, "Sn" => 1.96, "Sb" => 2.05, "Te" => 2.10, "I" => 2.66, "Xe" => 2.60,
    "Cs" => 0.79, "Ba" => 0.89,
};

/// Returns the number of valence electrons for a main-group element symbol.
///
/// Symbols are case-sensitive (`"Cl"`, not `"CL"`) and surrounding whitespace
/// is ignored. Transition metals are not covered.
pub fn valence_electrons(symbol: &str) -> Option<u8> {
    VALENCE_ELECTRONS.get(symbol.trim()).copied()
}

/// Returns the built-in Pauling electronegativity for an element symbol.
pub fn pauling_electronegativity(symbol: &str) -> Option<f64> {
    PAULING_ELECTRONEGATIVITY.get(symbol.trim()).copied()
}

/// Whether `symbol` names an element of the periodic table (case-sensitive).
pub fn is_element_symbol(symbol: &str) -> bool {
    ELEMENT_SYMBOLS.contains(symbol)
}

pub fn is_hydrogen(symbol: &str) -> bool {
    matches!(symbol.trim(), "H" | "D" | "T")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valence_electrons_follow_group_numbers() {
        assert_eq!(valence_electrons("H"), Some(1));
        assert_eq!(valence_electrons("C"), Some(4));
        assert_eq!(valence_electrons("N"), Some(5));
        assert_eq!(valence_electrons("O"), Some(6));
        assert_eq!(valence_electrons("Cl"), Some(7));
        assert_eq!(valence_electrons("Xe"), Some(8));
    }

    #[test]
    fn valence_electrons_is_case_sensitive_and_trims_whitespace() {
        assert_eq!(valence_electrons(" S "), Some(6));
        assert_eq!(valence_electrons("CL"), None);
        assert_eq!(valence_electrons("cl"), None);
    }

    #[test]
    fn valence_electrons_returns_none_for_uncovered_elements() {
        assert_eq!(valence_electrons("Fe"), None);
        assert_eq!(valence_electrons("Xx"), None);
        assert_eq!(valence_electrons(""), None);
    }

    #[test]
    fn pauling_electronegativity_matches_reference_values() {
        assert_eq!(pauling_electronegativity("F"), Some(3.98));
        assert_eq!(pauling_electronegativity("Na"), Some(0.93));
        assert_eq!(pauling_electronegativity("H"), Some(2.20));
        assert_eq!(pauling_electronegativity("Ne"), None);
    }

    #[test]
    fn is_element_symbol_covers_the_periodic_table() {
        assert!(is_element_symbol("Fe"));
        assert!(is_element_symbol("Og"));
        assert!(!is_element_symbol("Xx"));
        assert!(!is_element_symbol("fe"));
    }

    #[test]
    fn is_hydrogen_recognizes_isotopes() {
        assert!(is_hydrogen("H"));
        assert!(is_hydrogen("D"));
        assert!(!is_hydrogen("He"));
        assert!(!is_hydrogen("Hg"));
    }
}
