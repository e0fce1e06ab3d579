//! Output formatting for the non-interactive modes.

mod json;

pub use json::JsonFormatter;
