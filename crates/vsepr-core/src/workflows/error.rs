use super::config::ConfigError;
use crate::core::conformers::ConformerError;
use crate::core::io::dataset::DatasetError;
use crate::core::io::smiles::SmilesError;
use crate::core::io::xyz::XyzError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to parse SMILES '{smiles}': {source}")]
    Smiles {
        smiles: String,
        #[source]
        source: SmilesError,
    },

    #[error("Dataset error: {source}")]
    Dataset {
        #[from]
        source: DatasetError,
    },

    #[error("Coordinate file error: {source}")]
    Xyz {
        #[from]
        source: XyzError,
    },

    #[error("Conformer comparison failed: {source}")]
    Conformer {
        #[from]
        source: ConformerError,
    },
}
