//! Placeholder template CLI
//!
//! Renders JSON, YAML or TOML templates containing `{{placeholder}}` tokens
//! against a context document.

mod cli;
mod commands;
mod error;
mod format;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::RenderRequest;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose; logs go to stderr so output stays pipeable
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Render {
            template,
            context,
            config,
            output,
            pretty,
        } => commands::run_render(&RenderRequest {
            template,
            context,
            config,
            output,
            pretty,
        }),
        Commands::Inspect { template, json } => commands::run_inspect(&template, json),
    }
}
