// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! usagepanel - remaining Claude and Codex quota in a terminal overlay.
//!
//! # Examples
//!
//! ```bash
//! # Open the overlay (Esc, Enter or q closes it)
//! usagepanel
//!
//! # Print the panel once, e.g. into a pipe
//! usagepanel usage --print --width 64
//!
//! # Raw results as JSON
//! usagepanel --format json --pretty
//!
//! # Where configuration and credentials are read from
//! usagepanel config path
//! ```

mod commands;
mod config;
mod output;
mod overlay;
mod panel;

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config as config_cmd, usage};
use config::Config;

const EXIT_FAILURE: i32 = 1;

// ============================================================================
// CLI Definition
// ============================================================================

/// usagepanel - subscription quota at a glance.
#[derive(Parser, Debug)]
#[command(name = "usagepanel")]
#[command(about = "Remaining Claude and Codex subscription quota in a terminal overlay")]
#[command(long_about = r#"
usagepanel shows how much of your Claude and Codex subscription quota is left.

Credentials are read from the shared auth store (~/.pi/agent/auth.json) and,
for Codex, from $CODEX_HOME/auth.json. Nothing is ever written.

Examples:
  usagepanel                      # Interactive overlay
  usagepanel usage --print        # Print the panel once
  usagepanel --format json        # JSON output
  usagepanel config path          # Show paths
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'usage' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logging).
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Write logs to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Configuration file to use instead of the default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show remaining usage (default if no command specified).
    #[command(visible_alias = "u")]
    Usage(usage::UsageArgs),

    /// Inspect configuration.
    Config(config_cmd::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable panel.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

/// Installs the tracing subscriber.
///
/// While the overlay owns the terminal, logs only go to `log_file`; without
/// one they are dropped.
fn setup_logging(
    verbose: bool,
    quiet: bool,
    level: &str,
    log_file: Option<&Path>,
    interactive: bool,
) -> Result<()> {
    if quiet {
        return Ok(());
    }

    let filter = if verbose {
        EnvFilter::new("usagepanel=debug,info")
    } else {
        EnvFilter::try_new(format!("usagepanel={level}"))
            .unwrap_or_else(|_| EnvFilter::new("usagepanel=warn"))
    };

    let writer = match (log_file, interactive) {
        (Some(path), _) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
        (None, true) => return Ok(()),
        (None, false) => BoxMakeWriter::new(std::io::stderr),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(log_file.is_none())
                .with_writer(writer),
        )
        .with(filter)
        .init();

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = run(&cli).await;

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(EXIT_FAILURE);
    }

    Ok(())
}

async fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let default_args = usage::UsageArgs::default();
    let usage_args = match &cli.command {
        Some(Commands::Usage(args)) => Some(args),
        None => Some(&default_args),
        Some(Commands::Config(_)) => None,
    };
    let interactive = usage_args.is_some_and(|args| {
        usage::is_interactive(args, cli.format, std::io::stdout().is_terminal())
    });

    setup_logging(
        cli.verbose,
        cli.quiet,
        &config.log_level,
        cli.log_file.as_deref(),
        interactive,
    )?;

    match &cli.command {
        Some(Commands::Config(args)) => config_cmd::run(args, cli, &config),
        Some(Commands::Usage(args)) => usage::run(args, cli, &config).await,
        None => usage::run(&default_args, cli, &config).await,
    }
}
