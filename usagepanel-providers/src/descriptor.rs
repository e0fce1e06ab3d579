//! Provider descriptors.
//!
//! A descriptor holds the static configuration for a provider: its display
//! name, the key of its entry in the primary credential store, and the links
//! shown in the panel header.

use usagepanel_core::{ProviderKind, ProviderLink};

// ============================================================================
// Provider Descriptor
// ============================================================================

/// Static configuration for a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Provider identifier.
    pub kind: ProviderKind,
    /// Name shown in the panel header.
    pub display_name: &'static str,
    /// Key of the provider's entry in the primary credential store.
    pub auth_slug: &'static str,
    /// Usage dashboard.
    pub dashboard_url: &'static str,
    /// Status page.
    pub status_url: &'static str,
}

impl ProviderDescriptor {
    /// Links rendered next to the provider name, in display order.
    pub fn links(&self) -> Vec<ProviderLink> {
        vec![
            ProviderLink::new("Dashboard", self.dashboard_url),
            ProviderLink::new("Status", self.status_url),
        ]
    }
}

const CLAUDE: ProviderDescriptor = ProviderDescriptor {
    kind: ProviderKind::Claude,
    display_name: "Claude",
    auth_slug: "anthropic",
    dashboard_url: "https://claude.ai/settings/usage",
    status_url: "https://status.anthropic.com",
};

const CODEX: ProviderDescriptor = ProviderDescriptor {
    kind: ProviderKind::Codex,
    display_name: "Codex",
    auth_slug: "openai-codex",
    dashboard_url: "https://chatgpt.com/codex/settings/usage",
    status_url: "https://status.openai.com",
};

/// Returns the descriptor for a provider.
pub fn descriptor(kind: ProviderKind) -> &'static ProviderDescriptor {
    match kind {
        ProviderKind::Claude => &CLAUDE,
        ProviderKind::Codex => &CODEX,
    }
}

/// Returns the primary store key for a provider.
pub fn auth_slug(kind: ProviderKind) -> &'static str {
    descriptor(kind).auth_slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptors_match_kind() {
        for kind in ProviderKind::all() {
            let desc = descriptor(*kind);
            assert_eq!(desc.kind, *kind);
            assert_eq!(desc.display_name, kind.display_name());
        }
    }

    #[test]
    fn test_links() {
        let links = descriptor(ProviderKind::Codex).links();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "Dashboard");
        assert_eq!(links[1].url, "https://status.openai.com");
        assert_eq!(auth_slug(ProviderKind::Claude), "anthropic");
    }
}
