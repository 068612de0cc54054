use crate::cli::{ConformerArgs, OutputFormat};
use crate::config::build_conformer_config;
use crate::error::{CliError, Result};
use crate::utils::output;
use crate::utils::progress::CliProgressHandler;
use tracing::info;
use vsepr::core::io::xyz::XyzFile;
use vsepr::workflows::conformers::{analyze_conformers, superimpose_on_first};
use vsepr::workflows::progress::ProgressReporter;

pub fn run(args: ConformerArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = build_conformer_config(&args)?;

    info!("Loading conformers from {:?}", &args.input);
    let conformers =
        XyzFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;

    let progress_handler = CliProgressHandler::for_run(quiet);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let analysis = analyze_conformers(&conformers, &config, &reporter)?;

    if let Some(path) = &args.aligned_output {
        let aligned = superimpose_on_first(&conformers)?;
        XyzFile::write_to_path(&aligned, path).map_err(|e| CliError::FileParsing {
            path: path.clone(),
            source: e.into(),
        })?;
        info!(
            "Wrote {} superimposed conformer(s) to {:?}",
            aligned.len(),
            path
        );
    }

    let content = output::render(&analysis, format, output::format_conformer_analysis)?;
    output::emit(&content, None)
}
