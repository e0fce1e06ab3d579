//! Codex usage response parsing.
//!
//! # Usage Response
//!
//! ```json
//! {
//!   "plan_type": "plus",
//!   "rate_limit": {
//!     "primary_window": {"used_percent": 12, "reset_after_seconds": 9000},
//!     "secondary_window": {"used_percent": 40, "reset_after_seconds": 430000}
//!   },
//!   "additional_rate_limits": [
//!     {
//!       "limit_name": "GPT-5-Codex-mini",
//!       "rate_limit": {
//!         "primary_window": {"used_percent": 0},
//!         "secondary_window": {"used_percent": 12, "reset_after_seconds": 86400}
//!       }
//!     }
//!   ],
//!   "code_review_rate_limit": {
//!     "primary_window": {"used_percent": 3, "reset_after_seconds": 600}
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;
use usagepanel_core::{format_seconds, UsageWindow};

use crate::error::ProviderError;

// ============================================================================
// Response Structures
// ============================================================================

/// Response from the `wham/usage` endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct CodexUsageResponse {
    /// Subscription plan (e.g. "plus", "pro").
    pub plan_type: Option<String>,
    /// Main session and weekly limits.
    pub rate_limit: Option<CodexRateLimit>,
    /// Per-model limits.
    pub additional_rate_limits: Option<Vec<CodexAdditionalLimit>>,
    /// Code review limit.
    pub code_review_rate_limit: Option<CodexRateLimit>,
}

/// A pair of windows.
#[derive(Debug, Default, Deserialize)]
pub struct CodexRateLimit {
    /// Short (session) window.
    pub primary_window: Option<CodexWindow>,
    /// Long (weekly) window.
    pub secondary_window: Option<CodexWindow>,
}

/// One window of a rate limit.
#[derive(Debug, Default, Deserialize)]
pub struct CodexWindow {
    /// Percentage used.
    pub used_percent: Option<f64>,
    /// Seconds until the window resets.
    pub reset_after_seconds: Option<f64>,
    /// Reset time in seconds since the epoch.
    pub reset_at: Option<i64>,
}

/// A named per-model limit.
#[derive(Debug, Default, Deserialize)]
pub struct CodexAdditionalLimit {
    /// Model limit name (e.g. "GPT-5-Codex-mini").
    pub limit_name: Option<String>,
    /// Windows for this model.
    pub rate_limit: Option<CodexRateLimit>,
}

impl CodexWindow {
    fn used(&self) -> f64 {
        self.used_percent.unwrap_or(0.0)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn reset_in(&self, now: DateTime<Utc>) -> Option<String> {
        if let Some(secs) = self.reset_after_seconds.filter(|s| s.is_finite()) {
            return Some(format_seconds(secs.round() as i64));
        }
        self.reset_at
            .map(|at| format_seconds(at.saturating_sub(now.timestamp())))
    }

    fn to_window(&self, label: &str, now: DateTime<Utc>) -> UsageWindow {
        UsageWindow::new(label, self.used()).with_reset(self.reset_in(now))
    }
}

// ============================================================================
// Conversion
// ============================================================================

impl CodexUsageResponse {
    /// Returns the plan name.
    pub fn plan(&self) -> Option<String> {
        self.plan_type
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string)
    }

    /// Converts the response into windows in display order: session, weekly,
    /// per-model limits, then code review.
    pub fn windows(&self, now: DateTime<Utc>) -> Vec<UsageWindow> {
        let mut windows = Vec::new();

        if let Some(limit) = &self.rate_limit {
            if let Some(primary) = &limit.primary_window {
                windows.push(primary.to_window("5h session", now));
            }
            if let Some(secondary) = &limit.secondary_window {
                windows.push(secondary.to_window("Weekly", now));
            }
        }

        for extra in self.additional_rate_limits.iter().flatten() {
            if let Some(window) = additional_window(extra, now) {
                windows.push(window);
            }
        }

        if let Some(review) = self
            .code_review_rate_limit
            .as_ref()
            .and_then(|l| l.primary_window.as_ref())
            .filter(|w| w.used() > 0.0)
        {
            windows.push(review.to_window("Code Review", now));
        }

        windows
    }
}

/// Maps one per-model limit, suppressing entries with nothing used.
fn additional_window(extra: &CodexAdditionalLimit, now: DateTime<Utc>) -> Option<UsageWindow> {
    let name = extra.limit_name.as_deref().filter(|n| !n.trim().is_empty())?;
    let limit = extra.rate_limit.as_ref()?;

    let primary = limit.primary_window.as_ref().map_or(0.0, CodexWindow::used);
    let secondary = limit.secondary_window.as_ref().map_or(0.0, CodexWindow::used);
    if primary <= 0.0 && secondary <= 0.0 {
        debug!(name, "Skipping unused model limit");
        return None;
    }

    let reset_in = limit
        .secondary_window
        .as_ref()
        .and_then(|w| w.reset_in(now));
    Some(UsageWindow::new(model_label(name), primary.max(secondary)).with_reset(reset_in))
}

/// Shortens a model limit name: `GPT-5-Codex-mini` becomes `5 mini`.
pub fn model_label(name: &str) -> String {
    let name = name.trim();
    name.strip_prefix("GPT-")
        .unwrap_or(name)
        .replace("-Codex-", " ")
}

/// Parses a usage response body into the plan and windows.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the body is not the expected JSON.
pub fn parse_usage(
    body: &str,
    now: DateTime<Utc>,
) -> Result<(Option<String>, Vec<UsageWindow>), ProviderError> {
    let response: CodexUsageResponse = serde_json::from_str(body)?;
    Ok((response.plan(), response.windows(now)))
}

// ============================================================================
// Tests
// ============================================================================
