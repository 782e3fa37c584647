//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::format::Format;

/// Render `{{placeholder}}` templates against a context file
#[derive(Parser, Debug)]
#[command(name = "placeholders")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Render a template file
    ///
    /// Template and context may be JSON, YAML or TOML; the format is taken
    /// from the file extension, or guessed from the content.
    ///
    /// Examples:
    ///   placeholders render body.json --context ctx.json
    ///   placeholders render body.yaml --context ctx.toml --output json --pretty
    Render {
        /// Template file
        template: PathBuf,

        /// Context file the placeholders resolve against
        #[arg(short, long)]
        context: PathBuf,

        /// Render options (TOML)
        #[arg(long, env = "PLACEHOLDERS_CONFIG")]
        config: Option<PathBuf>,

        /// Output format (defaults to the template's format)
        #[arg(short, long, value_enum)]
        output: Option<Format>,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },

    /// List the placeholders in a template file
    Inspect {
        /// Template file
        template: PathBuf,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
