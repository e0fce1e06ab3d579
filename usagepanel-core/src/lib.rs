// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # usagepanel Core
//!
//! Core types and pure helpers shared by every other `usagepanel` crate.
//!
//! - Domain models (provider kinds, usage windows, per-provider results)
//! - The render state consumed by the panel renderer
//! - Reset countdown formatting
//! - Error types
//!
//! ## Key Types
//!
//! - [`ProviderKind`] - The two supported subscription providers
//! - [`ProviderUsage`] - Normalized result of one provider fetch
//! - [`UsageWindow`] - One quota bucket (e.g. "5h session", "Weekly")
//! - [`ProviderLink`] - Static dashboard/status link for a provider
//! - [`RenderState`] - Loading / done / error state of the panel
//! - [`UsageLevel`] - Color band derived from remaining quota

pub mod error;
pub mod format;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export formatting helpers
pub use format::{format_reset_at, format_reset_iso, format_seconds, parse_timestamp};

// Re-export all model types
pub use models::{
    ProviderKind, ProviderLink, ProviderUsage, RenderState, UsageLevel, UsageWindow,
};
