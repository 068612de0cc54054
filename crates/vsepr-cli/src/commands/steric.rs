use crate::cli::{OutputFormat, StericArgs};
use crate::error::Result;
use crate::utils::output;
use serde::Serialize;
use vsepr::core::geometry::{classify_steric, electron_pair_geometry, label_or_unknown};

#[derive(Debug, Serialize)]
struct StericLookup {
    steric_number: u32,
    lone_pairs: u32,
    geometry: String,
    electron_geometry: String,
}

pub fn run(args: StericArgs, format: OutputFormat) -> Result<()> {
    let lookup = lookup(args.steric_number, args.lone_pairs);
    let content = output::render(&lookup, format, |l| format!("{}\n", l.geometry))?;
    output::emit(&content, None)
}

fn lookup(steric_number: u32, lone_pairs: u32) -> StericLookup {
    StericLookup {
        steric_number,
        lone_pairs,
        geometry: label_or_unknown(classify_steric(steric_number, lone_pairs)),
        electron_geometry: label_or_unknown(electron_pair_geometry(steric_number)),
    }
}
