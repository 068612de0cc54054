use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "VSEPR CLI - Predict molecular shape, hybridization and bond polarity from connectivity.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for batch analysis.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Output format for results
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up the molecular shape for a steric number and lone-pair count.
    Steric(StericArgs),
    /// Look up the hybridization for a steric number.
    Hybrid(HybridArgs),
    /// Derive the steric number and lone pairs of a single atom.
    Profile(ProfileArgs),
    /// Classify the bond between two elements by electronegativity difference.
    Polarity(PolarityArgs),
    /// Classify every atom and bond of one or more molecules given as SMILES.
    Analyze(AnalyzeArgs),
    /// Work with SMILES/property datasets.
    Dataset(DatasetArgs),
    /// Compare the conformers of a multi-frame XYZ file.
    Conformers(ConformerArgs),
}

#[derive(Args, Debug)]
pub struct StericArgs {
    /// Number of sigma bonds plus lone pairs on the central atom.
    pub steric_number: u32,
    /// Number of lone pairs on the central atom.
    pub lone_pairs: u32,
}

#[derive(Args, Debug)]
pub struct HybridArgs {
    pub steric_number: u32,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Element symbol of the atom (e.g., O, Cl).
    pub element: String,

    /// Number of sigma bonds (bonded neighbors, hydrogens included).
    #[arg(short, long, value_name = "INT")]
    pub sigma_bonds: u32,

    /// Sum of bond orders over all bonds of the atom.
    /// Defaults to the number of sigma bonds.
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub bond_order_sum: Option<f64>,

    /// Formal charge of the atom.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub charge: i32,
}

/// Options shared by every command that reads the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S dataset.target-column=logS
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,

    /// TOML file with additional electronegativity values in an
    /// `[electronegativity]` table. Applied on top of the config file.
    #[arg(long, value_name = "PATH")]
    pub electronegativity: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct PolarityArgs {
    pub element_a: String,
    pub element_b: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// SMILES strings to analyze.
    #[arg(value_name = "SMILES", required_unless_present = "input")]
    pub smiles: Vec<String>,

    /// File with one SMILES per line, optionally followed by a name.
    #[arg(short, long, value_name = "PATH", conflicts_with = "smiles")]
    pub input: Option<PathBuf>,

    /// Write the report to this file instead of standard output.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Override `analysis.include-hydrogens` from the config file.
    #[command(flatten)]
    pub hydrogens: HydrogenSelection,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Mutually exclusive flags for reporting explicit hydrogen atoms.
#[derive(Args, Debug, Clone, Copy, Default)]
#[group(required = false, multiple = false)]
pub struct HydrogenSelection {
    /// Report explicit hydrogen atoms as centers.
    #[arg(long)]
    pub with_hydrogens: bool,
    /// Skip explicit hydrogen atoms.
    #[arg(long)]
    pub no_hydrogens: bool,
}

#[derive(Args, Debug)]
pub struct DatasetArgs {
    #[command(subcommand)]
    pub command: DatasetCommands,
}

#[derive(Subcommand, Debug)]
pub enum DatasetCommands {
    /// Drop invalid and duplicate rows from a SMILES/property CSV table.
    Clean(CleanArgs),
}

#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Input CSV file with a header row.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Output CSV file for the cleaned two-column table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Name of the SMILES column.
    #[arg(long, value_name = "NAME")]
    pub smiles_column: Option<String>,

    /// Name of the numeric target column.
    #[arg(long, value_name = "NAME")]
    pub target_column: Option<String>,

    /// Keep rows whose SMILES already appeared earlier in the table.
    #[arg(long)]
    pub keep_duplicates: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct ConformerArgs {
    /// Multi-frame XYZ file.
    #[arg(required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Measure RMSD without superimposing the conformers first.
    #[arg(long)]
    pub no_align: bool,

    /// Only rank conformers within this energy of the lowest one.
    #[arg(short, long, value_name = "FLOAT", allow_negative_numbers = true)]
    pub energy_window: Option<f64>,

    /// Write every conformer superimposed onto the first one to this XYZ file.
    #[arg(long, value_name = "PATH")]
    pub aligned_output: Option<PathBuf>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vsepr", "steric", "4", "2", "-vv", "--format", "json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Steric(StericArgs {
                steric_number: 4,
                lone_pairs: 2
            })
        ));
    }

    #[test]
    fn analyze_requires_smiles_or_input() {
        assert!(Cli::try_parse_from(["vsepr", "analyze"]).is_err());
        assert!(Cli::try_parse_from(["vsepr", "analyze", "-i", "mols.smi"]).is_ok());
        assert!(Cli::try_parse_from(["vsepr", "analyze", "O", "-i", "mols.smi"]).is_err());
    }

    #[test]
    fn hydrogen_flags_are_exclusive() {
        let result = Cli::try_parse_from([
            "vsepr",
            "analyze",
            "O",
            "--with-hydrogens",
            "--no-hydrogens",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn profile_accepts_negative_charge() {
        let cli = Cli::parse_from(["vsepr", "profile", "O", "-s", "1", "--charge", "-1"]);
        match cli.command {
            Commands::Profile(args) => {
                assert_eq!(args.charge, -1);
                assert_eq!(args.bond_order_sum, None);
            }
            other => panic!("Expected 'profile' subcommand, got {other:?}"),
        }
    }

    #[test]
    fn set_values_can_be_repeated() {
        let cli = Cli::parse_from([
            "vsepr",
            "dataset",
            "clean",
            "-i",
            "in.csv",
            "-o",
            "out.csv",
            "-S",
            "dataset.target-column=logS",
            "-S",
            "dataset.drop-duplicates=false",
        ]);
        let Commands::Dataset(DatasetArgs {
            command: DatasetCommands::Clean(args),
        }) = cli.command
        else {
            panic!("Expected 'dataset clean' subcommand");
        };
        assert_eq!(args.config.set_values.len(), 2);
    }
}
