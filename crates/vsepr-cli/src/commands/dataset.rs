use crate::cli::{CleanArgs, DatasetArgs, DatasetCommands, OutputFormat};
use crate::config::build_cleaning_config;
use crate::error::Result;
use crate::utils::output;
use crate::utils::progress::CliProgressHandler;
use tracing::{info, warn};
use vsepr::workflows::dataset;
use vsepr::workflows::progress::ProgressReporter;

pub fn run(args: DatasetArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    match args.command {
        DatasetCommands::Clean(clean_args) => handle_clean(clean_args, format, quiet),
    }
}

fn handle_clean(args: CleanArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = build_cleaning_config(&args)?;
    info!(
        smiles_column = %config.columns.smiles,
        target_column = %config.columns.target,
        drop_duplicates = config.drop_duplicates,
        "Cleaning dataset {:?}",
        &args.input
    );

    let progress_handler = CliProgressHandler::for_run(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let cleaned = dataset::run(&args.input, Some(&args.output), &config, &reporter)?;

    if cleaned.records.is_empty() {
        warn!("No rows survived cleaning; the output table only has a header.");
    }
    info!(
        "Wrote {} cleaned row(s) to {:?}",
        cleaned.report.kept, &args.output
    );

    let content = output::render(&cleaned.report, format, output::format_cleaning_report)?;
    output::emit(&content, None)
}
