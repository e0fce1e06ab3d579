//! Domain models for usagepanel.
//!
//! ## Submodules
//!
//! - [`provider`] - Provider kinds and static links
//! - [`usage`] - Usage windows and normalized per-provider results
//! - [`state`] - Panel render state

mod provider;
mod state;
mod usage;

pub use provider::{ProviderKind, ProviderLink};
pub use state::RenderState;
pub use usage::{ProviderUsage, UsageLevel, UsageWindow};
