mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 VSEPR CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    if let Some(num_threads) = cli.threads {
        info!(
            "Setting Rayon global thread pool to {} threads.",
            num_threads
        );
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| {
                CliError::Other(anyhow::anyhow!("Failed to build global thread pool: {}", e))
            })?;
    }

    let format = cli.format;
    let quiet = cli.quiet;
    let command_result = match cli.command {
        Commands::Steric(args) => {
            info!("Dispatching to 'steric' command.");
            commands::steric::run(args, format)
        }
        Commands::Hybrid(args) => {
            info!("Dispatching to 'hybrid' command.");
            commands::hybrid::run(args, format)
        }
        Commands::Profile(args) => {
            info!("Dispatching to 'profile' command.");
            commands::profile::run(args, format)
        }
        Commands::Polarity(args) => {
            info!("Dispatching to 'polarity' command.");
            commands::polarity::run(args, format)
        }
        Commands::Analyze(args) => {
            info!("Dispatching to 'analyze' command.");
            commands::analyze::run(args, format, quiet)
        }
        Commands::Dataset(args) => {
            info!("Dispatching to 'dataset' command.");
            commands::dataset::run(args, format, quiet)
        }
        Commands::Conformers(args) => {
            info!("Dispatching to 'conformers' command.");
            commands::conformers::run(args, format, quiet)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }
    command_result
}
