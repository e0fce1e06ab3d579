//! Usage normalization engine.
//!
//! Bundles one client per provider behind [`UsageClient`] and fetches them
//! concurrently. Results always come back in display order (Claude, then
//! Codex) regardless of which call settles first.

use tracing::{debug, instrument};
use usagepanel_core::ProviderUsage;
use usagepanel_fetch::{FetchContext, UsageClient};

use crate::claude::ClaudeUsageClient;
use crate::codex::CodexUsageClient;

// ============================================================================
// Usage Engine
// ============================================================================

/// Fetches and normalizes usage for every supported provider.
#[derive(Debug, Clone, Default)]
pub struct UsageEngine {
    claude: ClaudeUsageClient,
    codex: CodexUsageClient,
}

impl UsageEngine {
    /// Creates an engine talking to the production endpoints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine from explicit clients (e.g. pointed at a mock
    /// server).
    pub fn with_clients(claude: ClaudeUsageClient, codex: CodexUsageClient) -> Self {
        Self { claude, codex }
    }

    /// Fetches every provider concurrently on the current task.
    ///
    /// Never fails: per-provider failures are carried in each result.
    #[instrument(skip(self, ctx))]
    pub async fn fetch_all(&self, ctx: &FetchContext) -> Vec<ProviderUsage> {
        let (claude, codex) = tokio::join!(
            self.claude.fetch_usage(ctx),
            self.codex.fetch_usage(ctx),
        );

        debug!(
            claude_error = claude.is_error(),
            codex_error = codex.is_error(),
            "All providers settled"
        );
        vec![claude, codex]
    }
}
