//! Panel layout.
//!
//! [`render_panel`] is a pure function of the target width, the render state
//! and the provider results. Every line it returns is exactly the target
//! width in visible columns.
//!
//! ```text
//! ╭────────────────────────────────────────────────────────╮
//! │                                                        │
//! │ Claude (max)        (me@example.com) [Dashboard] [Sta… │
//! │                                                        │
//! │ 5h session      [█████░░░] 66%  left resets in 2h 5m   │
//! │ Weekly          [██░░░░░░] 19%  left resets in 3d 4h   │
//! │                                                        │
//! │ Codex (plus)                     [Dashboard] [Status]  │
//! │                                                        │
//! │ ⚠ HTTP 401: {"error":"unauthorized"}                   │
//! │                                                        │
//! │ usagepanel on GitHub                         esc close │
//! ╰────────────────────────────────────────────────────────╯
//! ```

use usagepanel_core::{ProviderLink, ProviderUsage, RenderState, UsageLevel, UsageWindow};

use super::text::{
    center, hyperlink, pad_to_width, single_line, truncate_to_width, truncate_with_ellipsis,
    visible_width,
};
use super::theme::{Theme, ThemeColor};

/// Narrowest width the renderer lays out; smaller requests are clamped up.
pub const MIN_RENDER_WIDTH: usize = 8;

/// Cells in a usage gauge.
pub const GAUGE_CELLS: usize = 8;

const GAUGE_FILLED: &str = "█";
const GAUGE_EMPTY: &str = "░";
const WARNING_SIGN: &str = "⚠";
const LOADING_TEXT: &str = "Fetching usage…";

/// Narrowest account text worth showing before the account is dropped.
const MIN_ACCOUNT_COLUMNS: usize = 4;

// ============================================================================
// Options
// ============================================================================

/// Static text of the panel chrome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Footer call to action.
    pub cta_label: String,
    /// Target of the call to action.
    pub cta_url: String,
    /// Key hint on the right of the footer.
    pub close_hint: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            cta_label: "usagepanel on GitHub".to_string(),
            cta_url: env!("CARGO_PKG_REPOSITORY").to_string(),
            close_hint: "esc close".to_string(),
        }
    }
}

// ============================================================================
// Panel
// ============================================================================

/// Renders the whole panel, borders included.
pub fn render_panel(
    width: usize,
    state: &RenderState,
    results: &[ProviderUsage],
    theme: &dyn Theme,
    options: &RenderOptions,
) -> Vec<String> {
    let width = width.max(MIN_RENDER_WIDTH);
    let inner = width - 4;

    let body = match state {
        RenderState::Loading => vec![center(&theme.fg(ThemeColor::Muted, LOADING_TEXT), inner)],
        RenderState::Error(message) => vec![theme.fg(
            ThemeColor::Error,
            &format!("{WARNING_SIGN} {}", single_line(message)),
        )],
        RenderState::Done => done_body(results, inner, theme),
    };

    let mut rows = Vec::with_capacity(body.len() + 3);
    rows.push(String::new());
    rows.extend(body);
    rows.push(String::new());
    rows.push(footer_row(inner, theme, options));

    let border = "─".repeat(width - 2);
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(theme.fg(ThemeColor::Border, &format!("╭{border}╮")));
    lines.extend(rows.iter().map(|row| frame_row(row, inner, theme)));
    lines.push(theme.fg(ThemeColor::Border, &format!("╰{border}╯")));
    lines
}

/// Wraps content in side borders, fitting it to the content area.
fn frame_row(content: &str, inner: usize, theme: &dyn Theme) -> String {
    let side = theme.fg(ThemeColor::Border, "│");
    format!("{side} {} {side}", pad_to_width(content, inner))
}

fn done_body(results: &[ProviderUsage], inner: usize, theme: &dyn Theme) -> Vec<String> {
    if results.is_empty() {
        return vec![theme.fg(ThemeColor::Muted, "No providers")];
    }

    let label_width = results
        .iter()
        .flat_map(ProviderUsage::windows)
        .map(|w| visible_width(&single_line(&w.label)))
        .max()
        .unwrap_or(0);

    let mut rows = Vec::new();
    for (i, usage) in results.iter().enumerate() {
        rows.push(header_row(usage, inner, theme));
        rows.push(String::new());

        if let Some(error) = usage.error() {
            rows.push(theme.fg(
                ThemeColor::Error,
                &format!("{WARNING_SIGN} {}", single_line(error)),
            ));
        } else if usage.windows().is_empty() {
            rows.push(theme.fg(ThemeColor::Muted, "No usage data"));
        } else {
            rows.extend(
                usage
                    .windows()
                    .iter()
                    .map(|w| window_row(w, label_width, theme)),
            );
        }

        if i + 1 < results.len() {
            rows.push(String::new());
        }
    }
    rows
}

// ============================================================================
// Header
// ============================================================================

/// Provider name and plan on the left, account and links on the right.
fn header_row(usage: &ProviderUsage, inner: usize, theme: &dyn Theme) -> String {
    let name = single_line(usage.provider());
    let plan = usage.plan().map(|p| format!(" ({})", single_line(p)));

    let left_width = visible_width(&name) + plan.as_deref().map_or(0, visible_width);
    let left = format!(
        "{}{}",
        theme.bold(&name),
        plan.map(|p| theme.fg(ThemeColor::Muted, &p))
            .unwrap_or_default()
    );

    let account = usage.account().map(single_line);
    let budget = inner.saturating_sub(left_width + 1);

    match right_cluster(budget, account.as_deref(), usage.links(), theme) {
        Some((right, right_width)) => {
            let gap = inner - left_width - right_width;
            format!("{left}{}{right}", " ".repeat(gap))
        }
        None => truncate_to_width(&left, inner),
    }
}

/// Builds the widest `(account) [Link] [Link]` cluster that fits `budget`.
///
/// Degrades by shortening the account, then dropping it, then dropping
/// links from the end. Returns the styled cluster and its width.
fn right_cluster(
    budget: usize,
    account: Option<&str>,
    links: &[ProviderLink],
    theme: &dyn Theme,
) -> Option<(String, usize)> {
    let labels: Vec<String> = links
        .iter()
        .map(|l| format!("[{}]", single_line(&l.label)))
        .collect();
    let links_width = |n: usize| -> usize {
        labels[..n].iter().map(String::as_str).map(visible_width).sum::<usize>() + n.saturating_sub(1)
    };

    let compose = |account: Option<&str>, n: usize| -> (String, usize) {
        let mut parts = Vec::with_capacity(n + 1);
        if let Some(account) = account {
            parts.push(theme.fg(ThemeColor::Muted, &format!("({account})")));
        }
        for (label, link) in labels.iter().zip(links).take(n) {
            parts.push(hyperlink(&link.url, &theme.fg(ThemeColor::Accent, label)));
        }
        let cluster = parts.join(" ");
        let width = visible_width(&cluster);
        (cluster, width)
    };

    if let Some(account) = account {
        let separator = usize::from(!labels.is_empty());
        let fixed = links_width(labels.len()) + separator + 2;
        if fixed + visible_width(account) <= budget {
            return Some(compose(Some(account), labels.len()));
        }
        let room = budget.saturating_sub(fixed);
        if room >= MIN_ACCOUNT_COLUMNS {
            let shortened = truncate_with_ellipsis(account, room);
            return Some(compose(Some(&shortened), labels.len()));
        }
    }

    (1..=labels.len())
        .rev()
        .find(|&n| links_width(n) <= budget)
        .map(|n| compose(None, n))
}

// ============================================================================
// Window Rows
// ============================================================================

/// Number of filled gauge cells for a remaining percentage.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn gauge_fill(remaining: f64) -> usize {
    ((remaining / 100.0) * GAUGE_CELLS as f64)
        .round()
        .clamp(0.0, GAUGE_CELLS as f64) as usize
}

/// Color used for a usage level.
pub fn level_color(level: UsageLevel) -> ThemeColor {
    match level {
        UsageLevel::Alert => ThemeColor::Error,
        UsageLevel::Caution => ThemeColor::Warning,
        UsageLevel::Normal => ThemeColor::Success,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn display_percent(remaining: f64) -> i64 {
    remaining.round().clamp(0.0, 100.0) as i64
}

/// `label [gauge] NN%  left resets in X`
fn window_row(window: &UsageWindow, label_width: usize, theme: &dyn Theme) -> String {
    let label = single_line(&window.label);
    let label_pad = label_width.saturating_sub(visible_width(&label));

    let remaining = window.remaining_percent();
    let color = level_color(window.level());
    let filled = gauge_fill(remaining);
    let gauge = format!(
        "[{}{}]",
        theme.fg(color, &GAUGE_FILLED.repeat(filled)),
        theme.fg(ThemeColor::Dim, &GAUGE_EMPTY.repeat(GAUGE_CELLS - filled)),
    );

    let percent = format!("{}%", display_percent(remaining));
    let percent_pad = 4usize.saturating_sub(percent.len());

    let mut row = format!(
        "{label}{} {gauge} {}{} left",
        " ".repeat(label_pad),
        theme.fg(color, &percent),
        " ".repeat(percent_pad),
    );
    if let Some(reset) = window.reset_in.as_deref() {
        row.push_str(&theme.fg(
            ThemeColor::Dim,
            &format!(" resets in {}", single_line(reset)),
        ));
    }
    row
}

// ============================================================================
// Footer
// ============================================================================

/// Call to action on the left, close hint on the right.
fn footer_row(inner: usize, theme: &dyn Theme, options: &RenderOptions) -> String {
    let hint_width = visible_width(&options.close_hint);
    let hint = theme.fg(ThemeColor::Dim, &options.close_hint);

    if inner < hint_width + 2 {
        return truncate_to_width(&hint, inner);
    }

    let cta = hyperlink(
        &options.cta_url,
        &theme.fg(ThemeColor::Accent, &options.cta_label),
    );
    let cta = truncate_with_ellipsis(&cta, inner - hint_width - 1);
    let gap = inner - visible_width(&cta) - hint_width;
    format!("{cta}{}{hint}", " ".repeat(gap))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::theme::AnsiTheme;

    fn plain() -> AnsiTheme {
        AnsiTheme::new(false)
    }

    #[test]
    fn test_gauge_fill() {
        assert_eq!(gauge_fill(100.0), 8);
        assert_eq!(gauge_fill(66.0), 5);
        assert_eq!(gauge_fill(50.0), 4);
        assert_eq!(gauge_fill(6.0), 0);
        assert_eq!(gauge_fill(7.0), 1);
        assert_eq!(gauge_fill(0.0), 0);
        assert_eq!(gauge_fill(-20.0), 0);
        assert_eq!(gauge_fill(150.0), 8);
    }

    #[test]
    fn test_window_row_plain() {
        let window = UsageWindow::new("Weekly", 34.0).with_reset(Some("2h 5m".to_string()));
        assert_eq!(
            window_row(&window, 10, &plain()),
            "Weekly     [█████░░░] 66%  left resets in 2h 5m"
        );

        let full = UsageWindow::new("5h session", 0.0);
        assert_eq!(window_row(&full, 10, &plain()), "5h session [████████] 100% left");

        let over = UsageWindow::new("5h session", 130.0);
        assert_eq!(window_row(&over, 10, &plain()), "5h session [░░░░░░░░] 0%   left");
    }

    #[test]
    fn test_window_row_colors() {
        let theme = AnsiTheme::new(true);
        let alert = window_row(&UsageWindow::new("Weekly", 90.0), 6, &theme);
        assert!(alert.contains("\x1b[31m█\x1b[0m"));
        assert!(alert.contains("\x1b[31m10%\x1b[0m"));

        let caution = window_row(&UsageWindow::new("Weekly", 60.0), 6, &theme);
        assert!(caution.contains("\x1b[33m███\x1b[0m"));

        let normal = window_row(&UsageWindow::new("Weekly", 10.0), 6, &theme);
        assert!(normal.contains("\x1b[32m90%\x1b[0m"));
    }

    #[test]
    fn test_level_color() {
        assert_eq!(level_color(UsageLevel::Alert), ThemeColor::Error);
        assert_eq!(level_color(UsageLevel::Caution), ThemeColor::Warning);
        assert_eq!(level_color(UsageLevel::Normal), ThemeColor::Success);
    }

    #[test]
    fn test_footer_exact_gap() {
        let options = RenderOptions::default();
        let footer = footer_row(40, &plain(), &options);
        assert_eq!(visible_width(&footer), 40);
        assert!(footer.ends_with("esc close"));
        assert!(footer.contains("usagepanel on GitHub"));
    }

    #[test]
    fn test_footer_truncates_cta() {
        let options = RenderOptions::default();
        let footer = footer_row(20, &plain(), &options);
        assert_eq!(visible_width(&footer), 20);
        assert!(footer.contains('…'));
        assert!(footer.ends_with(" esc close"));
    }

    #[test]
    fn test_header_full() {
        let usage = ProviderUsage::success(
            "Codex",
            vec![],
            vec![
                ProviderLink::new("Dashboard", "https://example.com/d"),
                ProviderLink::new("Status", "https://example.com/s"),
            ],
        )
        .with_plan(Some("plus".to_string()))
        .with_account(Some("me@example.com".to_string()));

        let row = header_row(&usage, 54, &plain());
        assert_eq!(visible_width(&row), 54);
        assert!(row.starts_with("Codex (plus) "));
        assert!(strip(&row).ends_with("(me@example.com) [Dashboard] [Status]"));
    }

    #[test]
    fn test_header_degrades() {
        let usage = ProviderUsage::success(
            "Claude",
            vec![],
            vec![
                ProviderLink::new("Dashboard", "https://example.com/d"),
                ProviderLink::new("Status", "https://example.com/s"),
            ],
        )
        .with_account(Some("someone.with.a.long.name@example.com".to_string()));

        // account shortened
        let row = strip(&header_row(&usage, 40, &plain()));
        assert!(row.contains('…'), "{row}");
        assert!(row.ends_with("[Dashboard] [Status]"));

        // account dropped, both links kept
        let row = strip(&header_row(&usage, 28, &plain()));
        assert!(!row.contains('('), "{row}");
        assert!(row.ends_with("[Dashboard] [Status]"));

        // trailing link dropped
        let row = strip(&header_row(&usage, 20, &plain()));
        assert!(row.ends_with("[Dashboard]"), "{row}");

        // name hard-truncated
        let row = strip(&header_row(&usage, 4, &plain()));
        assert_eq!(row, "Clau");
    }

    fn strip(text: &str) -> String {
        String::from_utf8_lossy(&strip_ansi_escapes::strip(text.as_bytes())).to_string()
    }
}
