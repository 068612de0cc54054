//! # Workflows Module
//!
//! High-level procedures built on [`crate::core`]. Each workflow takes a
//! validated configuration (see [`config`]) and a [`progress::ProgressReporter`],
//! and returns a serializable result.
//!
//! - **Molecule Analysis** ([`analyze`]) - Per-atom geometry and hybridization plus
//!   per-bond polarity for SMILES inputs, batched in parallel
//! - **Dataset Cleaning** ([`dataset`]) - Validation and de-duplication of
//!   SMILES/property CSV tables
//! - **Conformer Comparison** ([`conformers`]) - Pairwise RMSD and energy ranking
//!   of multi-frame XYZ files

pub mod analyze;
pub mod config;
pub mod conformers;
pub mod dataset;
pub mod error;
pub mod progress;
