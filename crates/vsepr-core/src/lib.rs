//! # VSEPR Core Library
//!
//! Rule-based prediction of molecular shape, orbital hybridization and bond
//! polarity from molecular connectivity.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers:
//!
//! - **[`core`]: The Foundation.** Static reference tables (valence electrons,
//!   electronegativities), the VSEPR and hybridization lookups, steric-number
//!   derivation, molecular graph models, and file I/O for SMILES, XYZ and CSV.
//!
//! - **[`workflows`]: The Public API.** Complete procedures built on `core`:
//!   per-atom and per-bond analysis of whole molecules, cleaning of
//!   SMILES/property datasets, and conformer comparison. Workflows take a
//!   validated configuration and an optional progress reporter.
//!
//! ## Quick Example
//!
//! ```
//! use vsepr::core::geometry::{classify_hybridization, classify_steric};
//! use vsepr::core::polarity::{ElectronegativityTable, classify_bond_polarity};
//! use vsepr::core::steric::AtomDescriptor;
//!
//! // Water oxygen: two sigma bonds, bond-order sum 2, neutral.
//! let oxygen = AtomDescriptor::new("O", 2, 2.0, 0)?;
//! let profile = oxygen.steric_profile()?;
//! assert_eq!((profile.steric_number, profile.lone_pairs), (4, 2));
//! assert_eq!(classify_steric(4, 2).map(|g| g.label()), Some("bent (109°)"));
//! assert_eq!(classify_hybridization(4).map(|h| h.label()), Some("sp³"));
//!
//! let table = ElectronegativityTable::default();
//! assert_eq!(
//!     classify_bond_polarity("Na", "Cl", &table).map(|p| p.label()),
//!     Some("ionic")
//! );
//! # Ok::<(), vsepr::core::steric::StericError>(())
//! ```

pub mod core;
pub mod workflows;
