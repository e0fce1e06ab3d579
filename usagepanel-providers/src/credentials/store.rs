//! On-disk credential store formats.
//!
//! # Primary store (`~/.pi/agent/auth.json`)
//!
//! ```json
//! {
//!   "anthropic": {
//!     "type": "oauth",
//!     "access": "sk-ant-oat01-...",
//!     "refresh": "sk-ant-ort01-...",
//!     "expires": 1735000000000
//!   },
//!   "openai-codex": {
//!     "type": "oauth",
//!     "access": "eyJ...",
//!     "accountId": "acct_..."
//!   }
//! }
//! ```
//!
//! # Legacy Codex store (`$CODEX_HOME/auth.json`)
//!
//! ```json
//! {
//!   "tokens": {
//!     "id_token": "eyJ...",
//!     "access_token": "eyJ...",
//!     "account_id": "acct_..."
//!   }
//! }
//! ```

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

// ============================================================================
// Primary Store
// ============================================================================

/// One provider entry of the primary store.
#[derive(Debug, Deserialize)]
pub(crate) struct AuthStoreEntry {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(alias = "access_token", alias = "accessToken")]
    pub access: Option<String>,
    /// Expiry in milliseconds since the epoch.
    pub expires: Option<i64>,
    #[serde(rename = "accountId", alias = "account_id")]
    pub account_id: Option<String>,
}

impl AuthStoreEntry {
    /// Reads the entry stored under `slug`.
    ///
    /// Other entries in the file are never deserialized, so a foreign
    /// provider with an unexpected shape does not hide ours.
    pub fn from_store(bytes: &[u8], slug: &str) -> Option<Self> {
        let root: Value = match serde_json::from_slice(bytes) {
            Ok(root) => root,
            Err(e) => {
                warn!(error = %e, "Auth store is not valid JSON");
                return None;
            }
        };

        let entry = root.get(slug)?.clone();
        match serde_json::from_value::<Self>(entry) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(slug, error = %e, "Auth store entry has an unexpected shape");
                None
            }
        }
    }

    /// Logs when the stored expiry has passed. Expired tokens are still
    /// used; the server has the final word.
    pub fn note_expiry(&self, slug: &str) {
        let expires_at = self
            .expires
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single());
        if let Some(expires_at) = expires_at.filter(|at| *at <= Utc::now()) {
            debug!(slug, %expires_at, "Stored token looks expired");
        }
        if let Some(kind) = self.kind.as_deref().filter(|kind| *kind != "oauth") {
            debug!(slug, kind, "Auth store entry is not an OAuth entry");
        }
    }
}

// ============================================================================
// Legacy Codex Store
// ============================================================================

/// Root structure of the legacy Codex `auth.json`.
#[derive(Debug, Deserialize)]
pub(crate) struct CodexAuthFile {
    pub tokens: Option<CodexTokens>,
}

/// Token container of the legacy Codex store.
#[derive(Debug, Deserialize)]
pub(crate) struct CodexTokens {
    #[serde(alias = "idToken")]
    pub id_token: Option<String>,
    #[serde(alias = "accessToken")]
    pub access_token: Option<String>,
    #[serde(alias = "accountId")]
    pub account_id: Option<String>,
}

impl CodexAuthFile {
    /// Parses the legacy store, swallowing malformed input.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        match serde_json::from_slice(bytes) {
            Ok(file) => Some(file),
            Err(e) => {
                warn!(error = %e, "Codex auth file is not valid JSON");
                None
            }
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Trims a stored string, dropping it entirely when blank.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
