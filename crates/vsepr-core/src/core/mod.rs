//! # Core Module
//!
//! Stateless building blocks of the VSEPR toolkit: lookup tables, the
//! classification rules, molecular data models and file I/O.
//!
//! ## Architecture
//!
//! - **Reference Data** ([`elements`]) - Valence-electron counts and Pauling
//!   electronegativities as compile-time tables
//! - **Shape Rules** ([`geometry`]) - Steric number and lone pairs to molecular
//!   shape, steric number to hybridization
//! - **Steric Derivation** ([`steric`]) - Lone pairs and steric number from an
//!   atom's bonding situation
//! - **Bond Character** ([`polarity`]) - Ionic / polar / non-polar classification
//!   from electronegativity differences, with caller-owned overrides
//! - **Molecular Representation** ([`models`]) - Atoms, bonds and the molecular graph
//! - **File I/O** ([`io`]) - SMILES, XYZ and CSV property tables
//! - **Conformer Geometry** ([`conformers`]) - RMSD, Kabsch superposition and
//!   energy ranking of 3-D conformers
//!
//! Every classification is a pure lookup. Combinations outside the tables
//! yield `None`, rendered as [`geometry::UNKNOWN_LABEL`]; only inconsistent
//! inputs (unsupported elements, impossible electron counts) produce errors.

pub mod conformers;
pub mod elements;
pub mod geometry;
pub mod io;
pub mod models;
pub mod polarity;
pub mod steric;
