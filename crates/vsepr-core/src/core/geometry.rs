use serde::Serialize;
use std::fmt;

/// Label reported for any steric combination outside the lookup tables.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Molecular shape predicted by VSEPR theory.
///
/// The shape describes the arrangement of the bonded atoms only; lone pairs
/// occupy electron-pair positions but are not part of the shape. The
/// electron-pair arrangement itself is the shape obtained with zero lone pairs
/// (see [`electron_pair_geometry`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MolecularGeometry {
    #[serde(rename = "linear")]
    Linear,
    #[serde(rename = "trigonal planar")]
    TrigonalPlanar,
    /// Bent shape derived from a trigonal-planar electron arrangement.
    #[serde(rename = "bent (120°)")]
    BentTrigonal,
    #[serde(rename = "tetrahedral")]
    Tetrahedral,
    #[serde(rename = "trigonal pyramidal")]
    TrigonalPyramidal,
    /// Bent shape derived from a tetrahedral electron arrangement.
    #[serde(rename = "bent (109°)")]
    BentTetrahedral,
    #[serde(rename = "trigonal bipyramidal")]
    TrigonalBipyramidal,
    #[serde(rename = "seesaw")]
    Seesaw,
    #[serde(rename = "T-shaped")]
    TShaped,
    #[serde(rename = "octahedral")]
    Octahedral,
    #[serde(rename = "square pyramidal")]
    SquarePyramidal,
    #[serde(rename = "square planar")]
    SquarePlanar,
}

/// Every `(steric number, lone pairs)` combination the classifier recognizes.
pub static STERIC_TABLE: [(u32, u32, MolecularGeometry); 13] = [
    (2, 0, MolecularGeometry::Linear),
    (3, 0, MolecularGeometry::TrigonalPlanar),
    (3, 1, MolecularGeometry::BentTrigonal),
    (4, 0, MolecularGeometry::Tetrahedral),
    (4, 1, MolecularGeometry::TrigonalPyramidal),
    (4, 2, MolecularGeometry::BentTetrahedral),
    (5, 0, MolecularGeometry::TrigonalBipyramidal),
    (5, 1, MolecularGeometry::Seesaw),
    (5, 2, MolecularGeometry::TShaped),
    (5, 3, MolecularGeometry::Linear),
    (6, 0, MolecularGeometry::Octahedral),
    (6, 1, MolecularGeometry::SquarePyramidal),
    (6, 2, MolecularGeometry::SquarePlanar),
];

impl MolecularGeometry {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::TrigonalPlanar => "trigonal planar",
            Self::BentTrigonal => "bent (120°)",
            Self::Tetrahedral => "tetrahedral",
            Self::TrigonalPyramidal => "trigonal pyramidal",
            Self::BentTetrahedral => "bent (109°)",
            Self::TrigonalBipyramidal => "trigonal bipyramidal",
            Self::Seesaw => "seesaw",
            Self::TShaped => "T-shaped",
            Self::Octahedral => "octahedral",
            Self::SquarePyramidal => "square pyramidal",
            Self::SquarePlanar => "square planar",
        }
    }

    /// Idealized bond angles (in degrees) between bonded positions of this shape.
    ///
    /// Lone-pair compression is not modelled: a bent tetrahedral shape reports
    /// the tetrahedral angle, not the ~104.5° observed in water.
    pub fn ideal_bond_angles(&self) -> &'static [f64] {
        match self {
            Self::Linear => &[180.0],
            Self::TrigonalPlanar | Self::BentTrigonal => &[120.0],
            Self::Tetrahedral | Self::TrigonalPyramidal | Self::BentTetrahedral => &[109.5],
            Self::TrigonalBipyramidal | Self::Seesaw => &[90.0, 120.0, 180.0],
            Self::TShaped | Self::Octahedral | Self::SquarePyramidal | Self::SquarePlanar => {
                &[90.0, 180.0]
            }
        }
    }
}

impl fmt::Display for MolecularGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Orbital hybridization of a central atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Hybridization {
    #[serde(rename = "sp")]
    Sp,
    #[serde(rename = "sp²")]
    Sp2,
    #[serde(rename = "sp³")]
    Sp3,
    #[serde(rename = "sp³d")]
    Sp3d,
    #[serde(rename = "sp³d²")]
    Sp3d2,
}

impl Hybridization {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sp => "sp",
            Self::Sp2 => "sp²",
            Self::Sp3 => "sp³",
            Self::Sp3d => "sp³d",
            Self::Sp3d2 => "sp³d²",
        }
    }

    /// Number of hybrid orbitals, which equals the steric number it was derived from.
    pub fn orbital_count(&self) -> u32 {
        match self {
            Self::Sp => 2,
            Self::Sp2 => 3,
            Self::Sp3 => 4,
            Self::Sp3d => 5,
            Self::Sp3d2 => 6,
        }
    }
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Looks up the molecular shape for a steric number and lone-pair count.
///
/// Combinations outside [`STERIC_TABLE`] (a steric number outside 2..=6, or more
/// lone pairs than the shape table lists) return `None`, which callers display
/// as [`UNKNOWN_LABEL`]. This never fails.
pub fn classify_steric(steric_number: u32, lone_pairs: u32) -> Option<MolecularGeometry> {
    STERIC_TABLE
        .iter()
        .find(|(sn, lp, _)| *sn == steric_number && *lp == lone_pairs)
        .map(|(_, _, geometry)| *geometry)
}

/// Electron-pair arrangement for a steric number, i.e. the shape with no lone pairs.
pub fn electron_pair_geometry(steric_number: u32) -> Option<MolecularGeometry> {
    classify_steric(steric_number, 0)
}

/// Maps a steric number in 2..=6 to its hybridization; anything else is `None`.
pub fn classify_hybridization(steric_number: u32) -> Option<Hybridization> {
    match steric_number {
        2 => Some(Hybridization::Sp),
        3 => Some(Hybridization::Sp2),
        4 => Some(Hybridization::Sp3),
        5 => Some(Hybridization::Sp3d),
        6 => Some(Hybridization::Sp3d2),
        _ => None,
    }
}

/// Renders an optional classification, substituting [`UNKNOWN_LABEL`] for `None`.
pub fn label_or_unknown<T: fmt::Display>(value: Option<T>) -> String {
    value
        .map(|v| v.to_string())
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
}
