mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod utils;

use crate::cli::{Cli, Commands};
use crate::commands::GlobalOptions;
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 pepnorm CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let options = GlobalOptions {
        config: cli.config.as_deref(),
        set_values: &cli.set_values,
    };

    let command_result = match cli.command {
        Commands::Collect(args) => {
            info!("Dispatching to 'collect' command.");
            commands::collect::run(args)
        }
        Commands::Normalize(args) => {
            info!("Dispatching to 'normalize' command.");
            commands::normalize::run(args, options)
        }
        Commands::Lipophilicity(args) => {
            info!("Dispatching to 'lipophilicity' command.");
            commands::lipophilicity::run(args, options)
        }
        Commands::Unify(args) => {
            info!("Dispatching to 'unify' command.");
            commands::unify::run(args, options)
        }
        Commands::Intrinsic(args) => {
            info!("Dispatching to 'intrinsic' command.");
            commands::intrinsic::run(args, options)
        }
        Commands::PeptideList(args) => {
            info!("Dispatching to 'peptide-list' command.");
            commands::peptide_list::run(args, options)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
