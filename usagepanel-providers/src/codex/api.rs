//! Codex (ChatGPT) usage client.
//!
//! # API Endpoint
//!
//! ```text
//! GET https://chatgpt.com/backend-api/wham/usage
//! Authorization: Bearer <access_token>
//! ChatGPT-Account-Id: <account id>      (when known)
//! ```

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, warn};
use usagepanel_core::{ProviderKind, ProviderUsage, UsageWindow};
use usagepanel_fetch::{bearer_headers, FetchContext, UsageClient};

use super::parser::parse_usage;
use crate::credentials::{resolve_credential, ResolvedCredential};
use crate::descriptor::descriptor;
use crate::error::ProviderError;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the ChatGPT backend.
pub const API_BASE_URL: &str = "https://chatgpt.com";

/// Usage endpoint.
pub const USAGE_ENDPOINT: &str = "/backend-api/wham/usage";

/// Header carrying the ChatGPT account id.
pub const ACCOUNT_HEADER: &str = "ChatGPT-Account-Id";

// ============================================================================
// API Client
// ============================================================================

/// Codex usage client.
#[derive(Debug, Clone)]
pub struct CodexUsageClient {
    base_url: String,
}

impl Default for CodexUsageClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CodexUsageClient {
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

    #[instrument(skip(self, credential, ctx))]
    async fn fetch_windows(
        &self,
        credential: &ResolvedCredential,
        ctx: &FetchContext,
    ) -> Result<(Option<String>, Vec<UsageWindow>), ProviderError> {
        let url = format!("{}{}", self.base_url, USAGE_ENDPOINT);
        debug!(url = %url, "Fetching usage from API");

        let extra: Vec<(&str, &str)> = credential
            .account_hint
            .as_deref()
            .map(|id| (ACCOUNT_HEADER, id))
            .into_iter()
            .collect();
        let headers = bearer_headers(&credential.access_token, &extra)?;
        let response = ctx.http.get(&url, headers, &ctx.cancel).await?;

        if !response.is_success() {
            return Err(ProviderError::from_status(&response));
        }

        debug!(len = response.body.len(), "Received API response");
        parse_usage(&response.body, Utc::now())
    }
}

#[async_trait]
impl UsageClient for CodexUsageClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Codex
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

        let account = credential
            .token_email
            .clone()
            .or_else(|| credential.account_hint.clone());

        match self.fetch_windows(&credential, ctx).await {
            Ok((plan, windows)) => {
                debug!(count = windows.len(), plan = ?plan, "Codex usage fetched");
                ProviderUsage::success(desc.display_name, windows, desc.links())
                    .with_account(account)
                    .with_plan(plan)
            }
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "Codex usage fetch failed");
                }
                ProviderUsage::failure(desc.display_name, e.to_string(), desc.links())
                    .with_account(account)
            }
        }
    }
}
