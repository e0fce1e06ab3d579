//! Provider-related types.
//!
//! - [`ProviderKind`] - Enum of supported providers
//! - [`ProviderLink`] - Static dashboard/status link

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Provider Kind
// ============================================================================

/// Supported subscription providers.
///
/// The declaration order is the display order: results are always
/// presented Claude first, then Codex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Anthropic Claude (Pro/Max subscriptions).
    Claude,
    /// OpenAI Codex (ChatGPT subscriptions).
    Codex,
}

impl ProviderKind {
    /// Returns the display name for this provider.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Codex => "Codex",
        }
    }

    /// Returns all provider kinds in display order.
    pub fn all() -> &'static [ProviderKind] {
        &[Self::Claude, Self::Codex]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Provider Link
// ============================================================================

/// A static, clickable link shown next to a provider's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderLink {
    /// Short label shown inside brackets (e.g. "Dashboard").
    pub label: String,
    /// Target URL.
    pub url: String,
}

impl ProviderLink {
    /// Creates a new link.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}
