use super::elements;
use super::geometry::{self, Hybridization, MolecularGeometry};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum StericError {
    #[error("Unsupported element: '{0}' has no valence-electron entry")]
    UnsupportedElement(String),
    #[error("Invalid steric input: {0}")]
    InvalidStericInput(InvalidStericKind),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidStericKind {
    #[error("bonding exceeds the available valence electrons ({non_bonding} non-bonding electrons)")]
    NegativeLonePairs { non_bonding: i64 },
    #[error("odd number of non-bonding electrons ({non_bonding}) cannot form whole lone pairs")]
    FractionalLonePairs { non_bonding: i64 },
    #[error("bond order sum is not a finite number")]
    NonFiniteBondOrder,
    #[error("bond order sum {bond_order_sum} is negative")]
    NegativeBondOrder { bond_order_sum: f64 },
    #[error("steric number overflows ({sigma_bonds} sigma bonds, {lone_pairs} lone pairs)")]
    StericNumberOverflow { sigma_bonds: u32, lone_pairs: u32 },
    #[error("atom has more sigma bonds than can be counted")]
    SigmaBondOverflow,
}

/// Steric environment of a single atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StericProfile {
    /// Sigma bonds plus lone pairs.
    pub steric_number: u32,
    pub lone_pairs: u32,
}

impl StericProfile {
    pub fn geometry(&self) -> Option<MolecularGeometry> {
        geometry::classify_steric(self.steric_number, self.lone_pairs)
    }

    pub fn electron_pair_geometry(&self) -> Option<MolecularGeometry> {
        geometry::electron_pair_geometry(self.steric_number)
    }

    pub fn hybridization(&self) -> Option<Hybridization> {
        geometry::classify_hybridization(self.steric_number)
    }
}

/// Derives the steric number and lone-pair count of an atom.
///
/// The non-bonding electron count is
/// `valence_electrons - formal_charge - round(bond_order_sum)`, where `round`
/// rounds halves to the nearest even integer. Half of that count is the number
/// of lone pairs, and the steric number adds the sigma bonds.
///
/// # Errors
///
/// Returns [`StericError::InvalidStericInput`] when the non-bonding count is
/// negative or odd, when `bond_order_sum` is negative or not finite, or when
/// the steric number does not fit in a `u32`. Such inputs are never truncated
/// into a profile.
pub fn derive_steric_profile(
    valence_electrons: u8,
    formal_charge: i32,
    bond_order_sum: f64,
    sigma_bonds: u32,
) -> Result<StericProfile, StericError> {
    if !bond_order_sum.is_finite() {
        return Err(StericError::InvalidStericInput(
            InvalidStericKind::NonFiniteBondOrder,
        ));
    }
    if bond_order_sum < 0.0 {
        return Err(StericError::InvalidStericInput(
            InvalidStericKind::NegativeBondOrder { bond_order_sum },
        ));
    }
    // Saturates for huge sums, which then fail as negative lone pairs.
    let bonding = bond_order_sum.round_ties_even() as i64;
    let non_bonding = i64::from(valence_electrons) - i64::from(formal_charge) - bonding;

    if non_bonding < 0 {
        return Err(StericError::InvalidStericInput(
            InvalidStericKind::NegativeLonePairs { non_bonding },
        ));
    }
    if non_bonding % 2 != 0 {
        return Err(StericError::InvalidStericInput(
            InvalidStericKind::FractionalLonePairs { non_bonding },
        ));
    }

    // At most (255 + 2^31) / 2, so this always fits.
    let lone_pairs = u32::try_from(non_bonding / 2).unwrap_or(u32::MAX);
    let steric_number = sigma_bonds.checked_add(lone_pairs).ok_or(
        StericError::InvalidStericInput(InvalidStericKind::StericNumberOverflow {
            sigma_bonds,
            lone_pairs,
        }),
    )?;

    Ok(StericProfile {
        steric_number,
        lone_pairs,
    })
}

/// Read-only view of the bonding situation of one atom.
///
/// Descriptors are created per atom from a parsed molecule (or by hand) and
/// consumed by [`AtomDescriptor::steric_profile`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AtomDescriptor {
    /// Element symbol (e.g., "O", "Cl").
    pub symbol: String,
    /// Valence electrons of the free element.
    pub valence_electrons: u8,
    /// Number of sigma bonds, counting one per bonded neighbor (hydrogens included).
    pub sigma_bonds: u32,
    /// Sum of bond orders over all bonds of the atom (aromatic bonds count 1.5).
    pub bond_order_sum: f64,
    pub formal_charge: i32,
}

impl AtomDescriptor {
    /// Builds a descriptor, looking up the valence-electron count for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns [`StericError::UnsupportedElement`] if the symbol is not in the
    /// valence-electron table.
    pub fn new(
        symbol: &str,
        sigma_bonds: u32,
        bond_order_sum: f64,
        formal_charge: i32,
    ) -> Result<Self, StericError> {
        let symbol = symbol.trim();
        let valence_electrons = elements::valence_electrons(symbol)
            .ok_or_else(|| StericError::UnsupportedElement(symbol.to_string()))?;
        Ok(Self {
            symbol: symbol.to_string(),
            valence_electrons,
            sigma_bonds,
            bond_order_sum,
            formal_charge,
        })
    }

    pub fn steric_profile(&self) -> Result<StericProfile, StericError> {
        derive_steric_profile(
            self.valence_electrons,
            self.formal_charge,
            self.bond_order_sum,
            self.sigma_bonds,
        )
    }
}
