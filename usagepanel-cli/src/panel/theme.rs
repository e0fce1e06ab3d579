//! Styling for the panel.
//!
//! The renderer only asks for a color role; the theme decides the escape
//! codes. Styling never changes the visible width of the text.

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GRAY: &str = "\x1b[90m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Color role requested by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    /// Box drawing.
    Border,
    /// Links and the footer call to action.
    Accent,
    /// Secondary text such as the plan and account.
    Muted,
    /// Unfilled gauge cells and hints.
    Dim,
    /// Plenty of quota left.
    Success,
    /// Half or less left.
    Warning,
    /// A fifth or less left, and error rows.
    Error,
}

/// Styling facility used by the renderer.
pub trait Theme {
    /// Colors `text` for the given role.
    fn fg(&self, color: ThemeColor, text: &str) -> String;

    /// Makes `text` bold.
    fn bold(&self, text: &str) -> String;
}

/// Theme emitting plain ANSI SGR sequences.
#[derive(Debug, Clone, Copy)]
pub struct AnsiTheme {
    use_colors: bool,
}

impl AnsiTheme {
    /// Creates a theme; with `use_colors` off every method is the identity.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn code(color: ThemeColor) -> &'static str {
        match color {
            ThemeColor::Border | ThemeColor::Dim => DIM,
            ThemeColor::Accent => CYAN,
            ThemeColor::Muted => GRAY,
            ThemeColor::Success => GREEN,
            ThemeColor::Warning => YELLOW,
            ThemeColor::Error => RED,
        }
    }
}

impl Theme for AnsiTheme {
    fn fg(&self, color: ThemeColor, text: &str) -> String {
        if self.use_colors && !text.is_empty() {
            format!("{}{text}{RESET}", Self::code(color))
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_colors && !text.is_empty() {
            format!("{BOLD}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}
