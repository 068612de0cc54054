//! Readers and writers for the molecular formats the toolkit consumes.
//!
//! Line notation ([`smiles`]) is parsed into a molecular graph, multi-frame
//! coordinate files ([`xyz`]) into conformers, and CSV property tables
//! ([`dataset`]) into raw rows for cleaning.

pub mod dataset;
pub mod smiles;
pub mod xyz;
