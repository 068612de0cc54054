use crate::cli::{OutputFormat, ProfileArgs};
use crate::error::{CliError, Result};
use crate::utils::output;
use serde::Serialize;
use tracing::debug;
use vsepr::core::geometry::label_or_unknown;
use vsepr::core::steric::AtomDescriptor;

#[derive(Debug, Serialize)]
struct ProfileReport {
    #[serde(flatten)]
    descriptor: AtomDescriptor,
    steric_number: u32,
    lone_pairs: u32,
    geometry: String,
    electron_geometry: String,
    hybridization: String,
}

pub fn run(args: ProfileArgs, format: OutputFormat) -> Result<()> {
    let report = profile(&args)?;
    let content = output::render(&report, format, |r| {
        format!(
            "{}: steric number {}, {} lone pair(s)\n  geometry:          {}\n  electron geometry: {}\n  hybridization:     {}\n",
            r.descriptor.symbol,
            r.steric_number,
            r.lone_pairs,
            r.geometry,
            r.electron_geometry,
            r.hybridization
        )
    })?;
    output::emit(&content, None)
}

fn profile(args: &ProfileArgs) -> Result<ProfileReport> {
    let bond_order_sum = args.bond_order_sum.unwrap_or(args.sigma_bonds as f64);
    if bond_order_sum < 0.0 {
        return Err(CliError::Argument(format!(
            "bond order sum must not be negative, got {}",
            bond_order_sum
        )));
    }

    let descriptor = AtomDescriptor::new(
        &args.element,
        args.sigma_bonds,
        bond_order_sum,
        args.charge,
    )?;
    let steric = descriptor.steric_profile()?;
    debug!(?descriptor, ?steric, "Derived steric profile.");

    Ok(ProfileReport {
        steric_number: steric.steric_number,
        lone_pairs: steric.lone_pairs,
        geometry: label_or_unknown(steric.geometry()),
        electron_geometry: label_or_unknown(steric.electron_pair_geometry()),
        hybridization: label_or_unknown(steric.hybridization()),
        descriptor,
    })
}
