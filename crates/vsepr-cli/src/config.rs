mod builder;
mod defaults;
mod file;

pub use builder::{
    build_analysis_config, build_cleaning_config, build_conformer_config,
    build_electronegativity_table, load_file_config,
};
