//! Claude OAuth usage client.
//!
//! # API Endpoints
//!
//! ```text
//! GET https://api.anthropic.com/api/oauth/usage
//! GET https://api.anthropic.com/api/oauth/profile
//! Authorization: Bearer <access_token>
//! anthropic-beta: oauth-2025-04-20
//! ```

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, warn};
use usagepanel_core::{ProviderKind, ProviderUsage, UsageWindow};
use usagepanel_fetch::{bearer_headers, FetchContext, UsageClient};

use super::parser::{parse_profile_email, parse_usage};
use crate::credentials::{resolve_credential, ResolvedCredential};
use crate::descriptor::descriptor;
use crate::error::ProviderError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the Anthropic API.
pub const API_BASE_URL: &str = "https://api.anthropic.com";

/// Usage endpoint.
pub const USAGE_ENDPOINT: &str = "/api/oauth/usage";

/// Profile endpoint.
pub const PROFILE_ENDPOINT: &str = "/api/oauth/profile";

/// Beta header required by the OAuth endpoints.
pub const BETA_HEADER: (&str, &str) = ("anthropic-beta", "oauth-2025-04-20");

// ============================================================================
// API Client
// ============================================================================

/// Claude usage client.
#[derive(Debug, Clone)]
pub struct ClaudeUsageClient {
    base_url: String,
}

impl Default for ClaudeUsageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaudeUsageClient {
    /// Create a new API client.
    pub fn new() -> Self {
        Self {
            base_url: API_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Looks up the account email. Any failure yields `None`.
    #[instrument(skip(self, credential, ctx))]
    async fn fetch_profile_email(
        &self,
        credential: &ResolvedCredential,
        ctx: &FetchContext,
    ) -> Option<String> {
        let url = format!("{}{}", self.base_url, PROFILE_ENDPOINT);
        let headers = bearer_headers(&credential.access_token, &[BETA_HEADER]).ok()?;

        match ctx.http.get(&url, headers, &ctx.cancel).await {
            Ok(response) if response.is_success() => parse_profile_email(&response.body),
            Ok(response) => {
                debug!(status = %response.status, "Profile lookup rejected");
                None
            }
            Err(e) => {
                debug!(error = %e, "Profile lookup failed");
                None
            }
        }
    }

    /// Queries the usage endpoint.
    #[instrument(skip(self, credential, ctx))]
    async fn fetch_windows(
        &self,
        credential: &ResolvedCredential,
        ctx: &FetchContext,
    ) -> Result<Vec<UsageWindow>, ProviderError> {
        let url = format!("{}{}", self.base_url, USAGE_ENDPOINT);
        debug!(url = %url, "Fetching usage from API");

        let headers = bearer_headers(&credential.access_token, &[BETA_HEADER])?;
        let response = ctx.http.get(&url, headers, &ctx.cancel).await?;

        if !response.is_success() {
            return Err(ProviderError::from_status(&response));
        }

        debug!(len = response.body.len(), "Received API response");
        parse_usage(&response.body, Utc::now())
    }
}

#[async_trait]
impl UsageClient for ClaudeUsageClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Claude
    }

    async fn fetch_usage(&self, ctx: &FetchContext) -> ProviderUsage {
        let desc = descriptor(self.kind());

        let Some(credential) = resolve_credential(self.kind(), &ctx.credentials) else {
            return ProviderUsage::failure(
                desc.display_name,
                ProviderError::CredentialsNotFound.to_string(),
                desc.links(),
            );
        };

        let account = match credential.token_email.clone() {
            Some(email) => Some(email),
            None => self
                .fetch_profile_email(&credential, ctx)
                .await
                .or_else(|| credential.account_hint.clone()),
        };

        match self.fetch_windows(&credential, ctx).await {
            Ok(windows) => {
                debug!(count = windows.len(), "Claude usage fetched");
                ProviderUsage::success(desc.display_name, windows, desc.links())
                    .with_account(account)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "Claude usage fetch failed");
                }
                ProviderUsage::failure(desc.display_name, e.to_string(), desc.links())
                    .with_account(account)
            }
        }
    }
}
