//! Scheduler CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use scheduler_cli::cli::Cli;
use scheduler_cli::commands;

fn main() {
    // Load .env.local if it exists (for SCHEDULER_CONFIG etc.)
    let _ = dotenvy::from_filename(".env.local");

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.load_config() {
        Ok(config) => commands::execute(cli.command, config),
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
