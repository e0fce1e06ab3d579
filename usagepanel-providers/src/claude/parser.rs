//! Claude usage response parsing.
//!
//! # Usage Response
//!
//! ```json
//! {
//!   "five_hour": {"utilization": 34.0, "resets_at": "2025-01-01T17:00:00Z"},
//!   "seven_day": {"utilization": 81.0, "resets_at": null},
//!   "seven_day_opus": null,
//!   "seven_day_sonnet": {"utilization": 12.0, "resets_at": "2025-01-05T00:00:00Z"}
//! }
//! ```
//!
//! # Profile Response
//!
//! ```json
//! {"account": {"email": "user@example.com", "full_name": "..."}}
//! ```

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use usagepanel_core::{format_reset_iso, UsageWindow};

use crate::error::ProviderError;

// ============================================================================
// Response Structures
// ============================================================================

/// Response from the OAuth usage endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ClaudeUsageResponse {
    /// Rolling 5-hour session window.
    pub five_hour: Option<ClaudeWindow>,
    /// Weekly window across all models.
    pub seven_day: Option<ClaudeWindow>,
    /// Weekly Opus window.
    pub seven_day_opus: Option<ClaudeWindow>,
    /// Weekly Sonnet window.
    pub seven_day_sonnet: Option<ClaudeWindow>,
}

/// One window of the usage response.
#[derive(Debug, Default, Deserialize)]
pub struct ClaudeWindow {
    /// Percentage used.
    pub utilization: Option<f64>,
    /// Reset time (ISO 8601).
    pub resets_at: Option<String>,
}

impl ClaudeUsageResponse {
    /// Converts the response into windows, in fixed display order.
    ///
    /// Windows that are absent, null or lack a utilization are omitted.
    pub fn into_windows(self, now: DateTime<Utc>) -> Vec<UsageWindow> {
        [
            ("5h session", self.five_hour),
            ("Weekly", self.seven_day),
            ("Weekly (Opus)", self.seven_day_opus),
            ("Weekly (Sonnet)", self.seven_day_sonnet),
        ]
        .into_iter()
        .filter_map(|(label, window)| {
            let window = window?;
            let used = window.utilization?;
            let reset_in = window
                .resets_at
                .as_deref()
                .and_then(|at| format_reset_iso(at, now));
            Some(UsageWindow::new(label, used).with_reset(reset_in))
        })
        .collect()
    }
}

// ============================================================================
// Parsing Functions
// ============================================================================

/// Parses a usage response body into windows.
///
/// # Errors
///
/// Returns `ProviderError::Parse` if the body is not the expected JSON.
pub fn parse_usage(body: &str, now: DateTime<Utc>) -> Result<Vec<UsageWindow>, ProviderError> {
    let response: ClaudeUsageResponse = serde_json::from_str(body)?;
    Ok(response.into_windows(now))
}

/// Extracts the account email from a profile response body.
pub fn parse_profile_email(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    let account = value.get("account");
    [
        account.and_then(|a| a.get("email")),
        account.and_then(|a| a.get("email_address")),
        value.get("email"),
    ]
    .into_iter()
    .flatten()
    .filter_map(Value::as_str)
    .map(str::trim)
    .find(|email| !email.is_empty())
    .map(ToString::to_string)
}

// ============================================================================
// Tests
// ============================================================================
