use crate::cli::{HybridArgs, OutputFormat};
use crate::error::Result;
use crate::utils::output;
use serde::Serialize;
use vsepr::core::geometry::{classify_hybridization, label_or_unknown};

#[derive(Debug, Serialize)]
struct HybridLookup {
    steric_number: u32,
    hybridization: String,
}

pub fn run(args: HybridArgs, format: OutputFormat) -> Result<()> {
    let lookup = HybridLookup {
        steric_number: args.steric_number,
        hybridization: label_or_unknown(classify_hybridization(args.steric_number)),
    };
    let content = output::render(&lookup, format, |l| format!("{}\n", l.hybridization))?;
    output::emit(&content, None)
}
