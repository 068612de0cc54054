//! # Models Module
//!
//! Molecular graph representation used by the classifiers.
//!
//! - [`atom`] - Element, charge, aromaticity and attached hydrogens of one atom
//! - [`topology`] - Bonds and bond orders
//! - [`molecule`] - The molecular graph with per-atom bonding queries
//!
//! A [`molecule::Molecule`] is usually produced by the SMILES parser in
//! [`crate::core::io::smiles`], but can also be assembled by hand:
//!
//! ```
//! use vsepr::core::models::{atom::Atom, molecule::Molecule};
//!
//! let water = Molecule::new("water", vec![Atom::new("O").with_hydrogens(2)], vec![]);
//! let profile = water.descriptor(0)?.steric_profile()?;
//! assert_eq!(profile.lone_pairs, 2);
//! # Ok::<(), vsepr::core::steric::StericError>(())
//! ```

pub mod atom;
pub mod molecule;
pub mod topology;
