//! Layout tests over whole panels.

use usagepanel_core::{ProviderLink, ProviderUsage, RenderState, UsageWindow};

use super::layout::{MIN_RENDER_WIDTH, RenderOptions, render_panel};
use super::text::visible_width;
use super::theme::AnsiTheme;

// ============================================================================
// Fixtures
// ============================================================================

fn links() -> Vec<ProviderLink> {
    vec![
        ProviderLink::new("Dashboard", "https://claude.ai/settings/usage"),
        ProviderLink::new("Status", "https://status.anthropic.com"),
    ]
}

fn claude(window_count: usize) -> ProviderUsage {
    let windows = [
        UsageWindow::new("5h session", 34.0).with_reset(Some("2h 5m".to_string())),
        UsageWindow::new("Weekly", 81.0).with_reset(Some("3d 4h".to_string())),
        UsageWindow::new("Weekly (Opus)", 55.0),
        UsageWindow::new("Weekly (Sonnet)", 104.0).with_reset(Some("now".to_string())),
    ];
    ProviderUsage::success("Claude", windows[..window_count].to_vec(), links())
        .with_plan(Some("max".to_string()))
        .with_account(Some("someone@example.com".to_string()))
}

fn codex_error() -> ProviderUsage {
    ProviderUsage::failure("Codex", "HTTP 401: {\"error\":\"unauthorized\"}", links())
        .with_account(Some("a.very.long.account.name.for.testing@example.org".to_string()))
}

fn codex_empty() -> ProviderUsage {
    ProviderUsage::success("Codex", Vec::new(), links()).with_plan(Some("plus".to_string()))
}

fn scenarios() -> Vec<(RenderState, Vec<ProviderUsage>)> {
    vec![
        (RenderState::Loading, Vec::new()),
        (RenderState::Error("join failed:\nworker panicked".to_string()), Vec::new()),
        (RenderState::Done, Vec::new()),
        (RenderState::Done, vec![claude(1)]),
        (RenderState::Done, vec![claude(2), codex_error()]),
        (RenderState::Done, vec![claude(3), codex_empty()]),
        (RenderState::Done, vec![claude(4), codex_error()]),
    ]
}

fn render(width: usize, state: &RenderState, results: &[ProviderUsage]) -> Vec<String> {
    render_panel(
        width,
        state,
        results,
        &AnsiTheme::new(false),
        &RenderOptions::default(),
    )
}

fn strip(line: &str) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(line.as_bytes())).to_string()
}

// ============================================================================
// Width
// ============================================================================

#[test]
fn test_every_line_has_exact_width() {
    for colors in [false, true] {
        let theme = AnsiTheme::new(colors);
        for width in [0, 5, 8, 12, 20, 30, 44, 58, 80] {
            for (state, results) in scenarios() {
                let lines = render_panel(
                    width,
                    &state,
                    &results,
                    &theme,
                    &RenderOptions::default(),
                );
                let expected = width.max(MIN_RENDER_WIDTH);
                for line in &lines {
                    assert_eq!(
                        visible_width(line),
                        expected,
                        "width {width}, state {state:?}, colors {colors}: {line:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_no_line_breaks_in_output() {
    for (state, results) in scenarios() {
        for line in render(58, &state, &results) {
            assert!(!line.contains('\n'));
            assert!(!line.contains('\t'));
        }
    }
}

// ============================================================================
// Structure
// ============================================================================

#[test]
fn test_frame_structure() {
    let lines = render(20, &RenderState::Loading, &[]);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], format!("╭{}╮", "─".repeat(18)));
    assert_eq!(lines[5], format!("╰{}╯", "─".repeat(18)));
    assert_eq!(lines[1], format!("│{}│", " ".repeat(18)));
    assert!(lines[2].starts_with("│ ") && lines[2].ends_with(" │"));
    assert_eq!(lines[3], format!("│{}│", " ".repeat(18)));
}

#[test]
fn test_loading_is_centered() {
    let lines = render(44, &RenderState::Loading, &[]);
    let content = strip(&lines[2]);
    assert!(content.contains("Fetching usage…"));
    // 40 columns of content, 15 of text: 12 before
    assert_eq!(content, format!("│ {}Fetching usage…{} │", " ".repeat(12), " ".repeat(13)));
}

#[test]
fn test_error_state_single_line() {
    let lines = render(58, &RenderState::Error("join failed:\nboom".to_string()), &[]);
    assert_eq!(lines.len(), 6);
    assert!(strip(&lines[2]).starts_with("│ ⚠ join failed: boom"));
}

#[test]
fn test_done_without_providers() {
    let lines = render(44, &RenderState::Done, &[]);
    assert!(strip(&lines[2]).contains("No providers"));
}

#[test]
fn test_done_rows_in_order() {
    let lines: Vec<String> = render(60, &RenderState::Done, &[claude(2), codex_error()])
        .iter()
        .map(|l| strip(l))
        .collect();

    // border, pad, header, blank, 2 windows, blank, header, blank, error, pad, footer, border
    assert_eq!(lines.len(), 13);
    assert!(lines[2].starts_with("│ Claude (max) "));
    assert!(lines[2].ends_with("(someone@example.com) [Dashboard] [Status] │"));
    assert!(lines[4].starts_with("│ 5h session [█████░░░] 66%  left resets in 2h 5m"));
    assert!(lines[5].starts_with("│ Weekly     [██░░░░░░] 19%  left resets in 3d 4h"));
    assert!(lines[7].starts_with("│ Codex "));
    assert!(lines[9].starts_with("│ ⚠ HTTP 401: {\"error\":\"unauthorized\"}"));
    assert!(lines[11].contains("usagepanel on GitHub"));
    assert!(lines[11].ends_with("esc close │"));
}

#[test]
fn test_labels_align_across_providers() {
    let codex = ProviderUsage::success(
        "Codex",
        vec![UsageWindow::new("Code Review", 0.0)],
        links(),
    );
    let lines: Vec<String> = render(80, &RenderState::Done, &[claude(1), codex])
        .iter()
        .map(|l| strip(l))
        .collect();

    let claude_row = lines.iter().find(|l| l.contains("5h session")).unwrap();
    let codex_row = lines.iter().find(|l| l.contains("Code Review")).unwrap();
    assert_eq!(claude_row.find('['), codex_row.find('['));
}

#[test]
fn test_empty_windows_row() {
    let lines = render(58, &RenderState::Done, &[codex_empty()]);
    assert!(lines.iter().any(|l| strip(l).contains("No usage data")));
}

#[test]
fn test_overuse_clamped() {
    let lines = render(58, &RenderState::Done, &[claude(4)]);
    let row = lines
        .iter()
        .map(|l| strip(l))
        .find(|l| l.contains("Weekly (Sonnet)"))
        .unwrap();
    assert!(row.contains("[░░░░░░░░] 0%   left resets in now"));
}

#[test]
fn test_links_are_hyperlinked() {
    let lines = render(58, &RenderState::Done, &[claude(1)]);
    assert!(lines[2].contains("\x1b]8;;https://claude.ai/settings/usage\x07[Dashboard]\x1b]8;;\x07"));
}
