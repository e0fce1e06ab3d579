//! Config command - inspect configuration.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::Config;
use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration and credential store paths.
    Path,
}

/// Paths the program reads.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PathsOutput {
    config_file: PathBuf,
    auth_file: Option<PathBuf>,
    codex_auth_file: Option<PathBuf>,
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli, config: &Config) -> Result<()> {
    match args.action {
        ConfigAction::Show => show_config(cli, config),
        ConfigAction::Path => show_paths(cli, config),
    }
}

fn show_config(cli: &Cli, config: &Config) -> Result<()> {
    let pretty = cli.pretty || cli.format == OutputFormat::Text;
    println!("{}", JsonFormatter::new(pretty).format(config)?);
    Ok(())
}

fn show_paths(cli: &Cli, config: &Config) -> Result<()> {
    let credentials = config.credential_paths();
    let paths = PathsOutput {
        config_file: cli.config.clone().unwrap_or_else(Config::default_path),
        auth_file: credentials.auth_file.clone(),
        codex_auth_file: credentials.codex_auth_file(),
    };

    match cli.format {
        OutputFormat::Text => {
            println!("Configuration Paths");
            println!("{}", "─".repeat(40));
            println!();
            println!("Config file:   {}", paths.config_file.display());
            println!("Auth store:    {}", display_opt(paths.auth_file.as_deref()));
            println!("Codex store:   {}", display_opt(paths.codex_auth_file.as_deref()));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }

    Ok(())
}

fn display_opt(path: Option<&Path>) -> String {
    path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
}
