//! Interactive overlay.
//!
//! Owns the terminal for one panel invocation: draws the loading frame,
//! redraws when the fetch settles or the terminal is resized, and closes on
//! `Esc`, `Enter`, `q` or `Ctrl-C`. Closing cancels every in-flight request.
//!
//! The panel contents live in a [`watch`] channel. The only writer is the
//! task joining the provider fetches; the draw loop only reads.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use usagepanel_core::{ProviderUsage, RenderState};
use usagepanel_fetch::FetchContext;
use usagepanel_providers::UsageEngine;

use crate::panel::{AnsiTheme, RenderOptions, render_panel};

// ============================================================================
// Snapshot
// ============================================================================

/// What the panel shows at one point in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelSnapshot {
    /// Loading, done or failed.
    pub state: RenderState,
    /// Provider results, in display order. Empty until done.
    pub results: Vec<ProviderUsage>,
}

impl PanelSnapshot {
    fn done(results: Vec<ProviderUsage>) -> Self {
        Self {
            state: RenderState::Done,
            results,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            state: RenderState::Error(message),
            results: Vec::new(),
        }
    }
}

/// Spawns the provider fetches on their own task.
pub fn spawn_fetch(engine: UsageEngine, ctx: Arc<FetchContext>) -> JoinHandle<Vec<ProviderUsage>> {
    tokio::spawn(async move { engine.fetch_all(&ctx).await })
}

/// Waits for the fetch task and publishes the final snapshot.
///
/// A task that panicked or was aborted becomes `RenderState::Error`.
pub async fn publish_results(
    fetch: JoinHandle<Vec<ProviderUsage>>,
    tx: watch::Sender<PanelSnapshot>,
) {
    let snapshot = match fetch.await {
        Ok(results) => PanelSnapshot::done(results),
        Err(err) => {
            warn!(error = %err, "Usage fetch task failed");
            PanelSnapshot::failed(format!("Failed to fetch usage: {err}"))
        }
    };
    tx.send_replace(snapshot);
}

// ============================================================================
// Geometry
// ============================================================================

/// Overlay width for a terminal `cols` wide.
///
/// The nominal width, raised to `min_width`, and never wider than the
/// terminal.
pub fn overlay_width(cols: usize, nominal: usize, min_width: usize) -> usize {
    nominal.max(min_width).min(cols)
}

/// Top-left cell that centers a `width` x `height` box.
pub fn centered_origin(cols: u16, rows: u16, width: usize, height: usize) -> (u16, u16) {
    let width = u16::try_from(width).unwrap_or(u16::MAX);
    let height = u16::try_from(height).unwrap_or(u16::MAX);
    (
        cols.saturating_sub(width) / 2,
        rows.saturating_sub(height) / 2,
    )
}

/// Returns true for the keys that close the overlay.
pub fn is_close_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Raw mode plus alternate screen, restored on drop and on panic.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    /// Takes over the terminal.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;

        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            original_hook(info);
        }));

        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

fn restore_terminal() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}

// ============================================================================
// Overlay
// ============================================================================

/// Presentation settings for the overlay.
#[derive(Debug, Clone)]
pub struct OverlaySettings {
    /// Nominal width.
    pub width: usize,
    /// Narrowest width, terminal permitting.
    pub min_width: usize,
    /// Styling.
    pub theme: AnsiTheme,
    /// Footer text.
    pub options: RenderOptions,
}

fn draw(out: &mut impl Write, snapshot: &PanelSnapshot, settings: &OverlaySettings) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let width = overlay_width(usize::from(cols), settings.width, settings.min_width);
    let lines = render_panel(
        width,
        &snapshot.state,
        &snapshot.results,
        &settings.theme,
        &settings.options,
    );
    let (x, y) = centered_origin(cols, rows, width, lines.len());

    queue!(out, Clear(ClearType::All))?;
    for (row, line) in (y..).zip(&lines) {
        queue!(out, MoveTo(x, row), Print(line))?;
    }
    out.flush()
}

/// Runs the overlay until the user closes it.
pub async fn run(engine: UsageEngine, ctx: FetchContext, settings: &OverlaySettings) -> Result<()> {
    let ctx = Arc::new(ctx);
    let cancel = ctx.cancel.clone();

    let (tx, mut rx) = watch::channel(PanelSnapshot::default());
    let join = tokio::spawn(publish_results(spawn_fetch(engine, Arc::clone(&ctx)), tx));

    let guard = TerminalGuard::enter()?;
    let mut out = io::stdout();
    let mut events = EventStream::new();
    let mut fetch_open = true;

    draw(&mut out, &rx.borrow(), settings)?;

    loop {
        tokio::select! {
            changed = rx.changed(), if fetch_open => {
                if changed.is_err() {
                    fetch_open = false;
                    continue;
                }
                let snapshot = rx.borrow_and_update().clone();
                debug!(state = ?snapshot.state, "Redrawing panel");
                draw(&mut out, &snapshot, settings)?;
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if is_close_key(&key) => break,
                Some(Ok(Event::Resize(..))) => draw(&mut out, &rx.borrow(), settings)?,
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            }
        }
    }

    cancel.cancel();
    drop(guard);

    if let Err(err) = join.await {
        debug!(error = %err, "Fetch join task ended abnormally");
    }
    Ok(())
}
