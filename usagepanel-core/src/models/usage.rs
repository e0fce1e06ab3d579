//! Usage-related types.
//!
//! - [`UsageWindow`] - One quota bucket
//! - [`ProviderUsage`] - Normalized result of one provider fetch
//! - [`UsageLevel`] - Color band derived from remaining quota

use serde::{Deserialize, Serialize};

use super::provider::ProviderLink;

// ============================================================================
// Usage Window
// ============================================================================

/// A single quota bucket reported by a provider (e.g. "5h session").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageWindow {
    /// Display label.
    pub label: String,
    /// Percentage of quota used. Usually 0-100, may exceed 100 on overuse.
    pub percent_used: f64,
    /// Short countdown until the window resets (e.g. "2h 5m").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reset_in: Option<String>,
}

impl UsageWindow {
    /// Creates a new usage window without reset information.
    pub fn new(label: impl Into<String>, percent_used: f64) -> Self {
        Self {
            label: label.into(),
            percent_used,
            reset_in: None,
        }
    }

    /// Sets the reset countdown.
    #[must_use]
    pub fn with_reset(mut self, reset_in: Option<String>) -> Self {
        self.reset_in = reset_in;
        self
    }

    /// Returns the remaining percentage (100 - used). Negative on overuse.
    pub fn remaining_percent(&self) -> f64 {
        100.0 - self.percent_used
    }

    /// Returns the color band for this window.
    pub fn level(&self) -> UsageLevel {
        UsageLevel::from_remaining(self.remaining_percent())
    }
}

// ============================================================================
// Usage Level
// ============================================================================

/// Color band for a window, chosen from what is left rather than what is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UsageLevel {
    /// More than half left.
    Normal,
    /// At most half left.
    Caution,
    /// At most a fifth left.
    Alert,
}

impl UsageLevel {
    /// Classifies a remaining percentage.
    pub fn from_remaining(remaining: f64) -> Self {
        if remaining <= 20.0 {
            Self::Alert
        } else if remaining <= 50.0 {
            Self::Caution
        } else {
            Self::Normal
        }
    }
}

// ============================================================================
// Provider Usage
// ============================================================================

/// Normalized usage for one provider from one invocation.
///
/// Built once by a provider client and never mutated afterwards. A result
/// carrying an error never carries windows; the constructors enforce this.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderUsage {
    provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<String>,
    windows: Vec<UsageWindow>,
    links: Vec<ProviderLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ProviderUsage {
    /// Creates a successful result. `windows` may legitimately be empty.
    pub fn success(
        provider: impl Into<String>,
        windows: Vec<UsageWindow>,
        links: Vec<ProviderLink>,
    ) -> Self {
        Self {
            provider: provider.into(),
            plan: None,
            account: None,
            windows,
            links,
            error: None,
        }
    }

    /// Creates a failed result with no windows.
    pub fn failure(
        provider: impl Into<String>,
        error: impl Into<String>,
        links: Vec<ProviderLink>,
    ) -> Self {
        Self {
            provider: provider.into(),
            plan: None,
            account: None,
            windows: Vec::new(),
            links,
            error: Some(error.into()),
        }
    }

    /// Sets the plan name.
    #[must_use]
    pub fn with_plan(mut self, plan: Option<String>) -> Self {
        self.plan = plan.filter(|p| !p.trim().is_empty());
        self
    }

    /// Sets the account label.
    #[must_use]
    pub fn with_account(mut self, account: Option<String>) -> Self {
        self.account = account.filter(|a| !a.trim().is_empty());
        self
    }

    /// Provider display name.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Plan name, if the provider reported one.
    pub fn plan(&self) -> Option<&str> {
        self.plan.as_deref()
    }

    /// Account label (usually an email), if one could be derived.
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    /// Usage windows in provider order.
    pub fn windows(&self) -> &[UsageWindow] {
        &self.windows
    }

    /// Static provider links.
    pub fn links(&self) -> &[ProviderLink] {
        &self.links
    }

    /// Error message, if the fetch failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Returns true if the fetch failed.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
