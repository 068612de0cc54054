pub mod analyze;
pub mod conformers;
pub mod dataset;
pub mod hybrid;
pub mod polarity;
pub mod profile;
pub mod steric;
