mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use shoply_config::Config;

use crate::cli::{Cli, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = effective_config(&cli.global);
    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &config, &cli.global).await
}

/// Load the config file and apply CLI flag overrides on top.
fn effective_config(global: &GlobalOpts) -> Config {
    let mut config = shoply_config::load_config_or_default();
    if let Some(ref backend) = global.backend {
        config.backend = backend.clone();
    }
    if let Some(timeout) = global.timeout {
        config.timeout = timeout;
    }
    config
}
