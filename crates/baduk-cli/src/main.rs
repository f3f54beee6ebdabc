//! baduk CLI tool.
//!
//! Usage:
//! ```bash
//! baduk scan [OPTIONS] [PATH]
//! baduk show [OPTIONS] <IMPORT_SPEC>
//! baduk init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Extracts the architecture model of Go source trees
#[derive(Parser)]
#[command(name = "baduk")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "BADUK_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a directory tree and print its model
    Scan {
        /// Path to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Exclude patterns (can be specified multiple times)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Exit with status 1 if any declaration or file was skipped
        #[arg(long)]
        strict: bool,
    },

    /// Load one package by import spec and print its model
    Show {
        /// Import spec, resolved as `$GOPATH/src/<spec>`
        spec: String,

        /// GOPATH root (overrides config and environment)
        #[arg(long)]
        gopath: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-entity compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Scan {
            path,
            format,
            exclude,
            strict,
        } => {
            let source = config_resolver::resolve(&path, cli.config.as_deref());
            commands::scan::run(&path, format, exclude, strict, &source)
        }
        Commands::Show {
            spec,
            gopath,
            format,
        } => {
            let cwd = std::env::current_dir()?;
            let source = config_resolver::resolve(&cwd, cli.config.as_deref());
            commands::show::run(&spec, gopath, format, &source)
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
