//! Usage command - fetch provider quota and show the panel.

use std::io::IsTerminal;

use anyhow::Result;
use clap::Args;
use tracing::info;
use usagepanel_core::RenderState;
use usagepanel_fetch::FetchContext;
use usagepanel_providers::UsageEngine;

use crate::config::Config;
use crate::output::JsonFormatter;
use crate::overlay::{self, OverlaySettings};
use crate::panel::{AnsiTheme, RenderOptions, render_panel};
use crate::{Cli, OutputFormat};

/// Arguments for the usage command.
#[derive(Args, Debug, Default)]
pub struct UsageArgs {
    /// Print the panel once instead of opening the overlay.
    #[arg(long)]
    pub print: bool,

    /// Panel width in columns (defaults to the configured width).
    #[arg(long)]
    pub width: Option<usize>,
}

/// Returns true when the command should take over the terminal.
pub fn is_interactive(args: &UsageArgs, format: OutputFormat, stdout_is_tty: bool) -> bool {
    !args.print && format == OutputFormat::Text && stdout_is_tty
}

/// Returns true when output should be colored.
pub fn colors_enabled(no_color: bool, config: &Config, stdout_is_tty: bool) -> bool {
    config.panel.colors && !no_color && stdout_is_tty
}

/// Width of the printed panel: the requested or configured width, never
/// narrower than `panel.min_width`.
pub fn print_width(args: &UsageArgs, config: &Config) -> usize {
    args.width
        .unwrap_or(config.panel.width)
        .max(config.panel.min_width)
}

/// Runs the usage command.
pub async fn run(args: &UsageArgs, cli: &Cli, config: &Config) -> Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let engine = UsageEngine::new();
    let ctx = FetchContext::builder()
        .credentials(config.credential_paths())
        .timeout(config.timeout())
        .build();

    let theme = AnsiTheme::new(colors_enabled(cli.no_color, config, stdout_is_tty));

    if is_interactive(args, cli.format, stdout_is_tty) {
        let settings = OverlaySettings {
            width: args.width.unwrap_or(config.panel.width),
            min_width: config.panel.min_width,
            theme,
            options: RenderOptions::default(),
        };
        return overlay::run(engine, ctx, &settings).await;
    }

    info!("Fetching usage");
    let results = engine.fetch_all(&ctx).await;

    match cli.format {
        OutputFormat::Text => {
            let lines = render_panel(
                print_width(args, config),
                &RenderState::Done,
                &results,
                &theme,
                &RenderOptions::default(),
            );
            for line in lines {
                println!("{line}");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_results(&results)?);
        }
    }

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
