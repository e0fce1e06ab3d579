//! Escape-aware width helpers.
//!
//! Widths are terminal columns of the visible text: SGR styling (`ESC [ … m`)
//! and OSC 8 hyperlinks (`ESC ] 8 ; ; url BEL`) take no room.

use std::iter::Peekable;
use std::str::Chars;

use unicode_width::UnicodeWidthChar;

const ESC: char = '\x1b';
const BEL: char = '\x07';
const RESET: &str = "\x1b[0m";
const LINK_CLOSE: &str = "\x1b]8;;\x07";

/// Trailing marker for ellipsis truncation.
pub const ELLIPSIS: char = '…';

/// Columns taken by a single character.
fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Returns the visible width of `text`, ignoring escape sequences.
pub fn visible_width(text: &str) -> usize {
    let stripped = strip_ansi_escapes::strip(text.as_bytes());
    String::from_utf8_lossy(&stripped).chars().map(char_width).sum()
}

/// Reads the rest of an escape sequence whose `ESC` was already consumed.
fn read_escape(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut seq = String::from(ESC);
    match chars.next() {
        Some('[') => {
            seq.push('[');
            for c in chars.by_ref() {
                seq.push(c);
                if ('\x40'..='\x7e').contains(&c) {
                    break;
                }
            }
        }
        Some(']') => {
            seq.push(']');
            while let Some(c) = chars.next() {
                seq.push(c);
                if c == BEL {
                    break;
                }
                if c == ESC && chars.peek() == Some(&'\\') {
                    seq.push('\\');
                    chars.next();
                    break;
                }
            }
        }
        Some(c) => seq.push(c),
        None => {}
    }
    seq
}

/// Returns the target of an OSC 8 sequence; empty means "link closed".
fn hyperlink_target(seq: &str) -> Option<&str> {
    let rest = seq.strip_prefix("\x1b]8;")?;
    let (_, target) = rest.split_once(';')?;
    Some(target.trim_end_matches(BEL).trim_end_matches("\x1b\\"))
}

/// Cuts `text` to at most `max_width` visible columns.
///
/// Escape sequences are copied through untouched. If anything was cut from
/// styled text, an open hyperlink is closed and a style reset appended so the
/// cut never bleeds into what follows.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut width = 0;
    let mut styled = false;
    let mut link_open = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ESC {
            let seq = read_escape(&mut chars);
            if let Some(target) = hyperlink_target(&seq) {
                link_open = !target.is_empty();
            }
            styled = true;
            out.push_str(&seq);
            continue;
        }

        let w = char_width(c);
        if width + w > max_width {
            if link_open {
                out.push_str(LINK_CLOSE);
            }
            if styled {
                out.push_str(RESET);
            }
            return out;
        }
        width += w;
        out.push(c);
    }

    out
}

/// Cuts `text` to `max_width`, ending in `…` when more than three columns
/// have to go. Smaller overflows are hard-truncated.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    let width = visible_width(text);
    if width <= max_width {
        return text.to_string();
    }

    if width - max_width > 3 && max_width >= 1 {
        let mut out = truncate_to_width(text, max_width - 1);
        out.push(ELLIPSIS);
        out
    } else {
        truncate_to_width(text, max_width)
    }
}

/// Truncates or right-pads `text` to exactly `width` visible columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    let mut out = if visible_width(text) > width {
        truncate_to_width(text, width)
    } else {
        text.to_string()
    };
    let used = visible_width(&out);
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

/// Centers `text` in `width` columns.
pub fn center(text: &str, width: usize) -> String {
    let left = width.saturating_sub(visible_width(text)) / 2;
    pad_to_width(&format!("{}{text}", " ".repeat(left)), width)
}

/// Wraps `text` in an OSC 8 hyperlink.
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("\x1b]8;;{url}{BEL}{text}{LINK_CLOSE}")
}

/// Replaces control characters (newlines, tabs) so text stays on one row.
pub fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
