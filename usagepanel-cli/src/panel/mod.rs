//! Panel rendering.
//!
//! Turns a [`RenderState`](usagepanel_core::RenderState) and the provider
//! results into fixed-width terminal lines. Nothing here touches the
//! terminal; the overlay decides where the lines go.

pub mod layout;
pub mod text;
pub mod theme;

#[cfg(test)]
mod tests;

pub use layout::{RenderOptions, render_panel};
pub use theme::AnsiTheme;
