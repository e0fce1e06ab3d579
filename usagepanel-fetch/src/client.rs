//! Provider client trait.

use async_trait::async_trait;
use usagepanel_core::{ProviderKind, ProviderUsage};

use crate::context::FetchContext;

/// A client that fetches and normalizes usage for one provider.
///
/// Implementations never fail: credential absence, HTTP errors, transport
/// errors and cancellation are all encoded in the returned
/// [`ProviderUsage`].
#[async_trait]
pub trait UsageClient: Send + Sync {
    /// Provider handled by this client.
    fn kind(&self) -> ProviderKind;

    /// Fetches usage for this provider.
    async fn fetch_usage(&self, ctx: &FetchContext) -> ProviderUsage;
}
