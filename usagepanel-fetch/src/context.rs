//! Fetch context shared by the provider clients.
//!
//! One context is created per panel invocation. It bundles the HTTP client,
//! the single cancellation token every network call listens to, and the
//! on-disk locations the credential resolver reads.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::host::http::HttpClient;

/// Domains the default HTTP client may talk to.
pub const DEFAULT_ALLOWED_DOMAINS: &[&str] = &["anthropic.com", "chatgpt.com"];

// ============================================================================
// Credential Paths
// ============================================================================

/// On-disk credential store locations. `None` means "no such location".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialPaths {
    /// Primary store, keyed by provider slug.
    pub auth_file: Option<PathBuf>,
    /// Codex home directory holding the legacy `auth.json`.
    pub codex_home: Option<PathBuf>,
}

impl CredentialPaths {
    /// Default locations: `~/.pi/agent/auth.json` and `$CODEX_HOME`
    /// (falling back to `~/.codex`).
    pub fn discover() -> Self {
        let home = dirs::home_dir();
        let codex_home = std::env::var_os("CODEX_HOME")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| home.as_ref().map(|h| h.join(".codex")));

        Self {
            auth_file: home.map(|h| h.join(".pi").join("agent").join("auth.json")),
            codex_home,
        }
    }

    /// Locations that resolve nothing. Useful in tests.
    pub fn none() -> Self {
        Self {
            auth_file: None,
            codex_home: None,
        }
    }

    /// Path of the legacy Codex store.
    pub fn codex_auth_file(&self) -> Option<PathBuf> {
        self.codex_home.as_ref().map(|h| h.join("auth.json"))
    }
}

impl Default for CredentialPaths {
    fn default() -> Self {
        Self::discover()
    }
}

// ============================================================================
// Fetch Settings
// ============================================================================

/// Settings for fetch operations.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
        }
    }
}

// ============================================================================
// Fetch Context
// ============================================================================

/// Context handed to every provider client for one panel invocation.
pub struct FetchContext {
    /// HTTP client with tracing and allowlist.
    pub http: Arc<HttpClient>,
    /// Cancelled when the panel closes.
    pub cancel: CancellationToken,
    /// Credential store locations.
    pub credentials: CredentialPaths,
    /// Fetch settings.
    pub settings: FetchSettings,
}

impl FetchContext {
    /// Creates a context with default host implementations.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a builder for customizing the context.
    pub fn builder() -> FetchContextBuilder {
        FetchContextBuilder::new()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.settings.timeout
    }
}

impl Default for FetchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FetchContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchContext")
            .field("credentials", &self.credentials)
            .field("settings", &self.settings)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Fetch Context Builder
// ============================================================================

/// Builder for constructing a `FetchContext`.
pub struct FetchContextBuilder {
    http: Option<Arc<HttpClient>>,
    cancel: Option<CancellationToken>,
    credentials: Option<CredentialPaths>,
    settings: FetchSettings,
}

impl FetchContextBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            http: None,
            cancel: None,
            credentials: None,
            settings: FetchSettings::default(),
        }
    }

    /// Sets the HTTP client.
    #[must_use]
    pub fn http(mut self, http: Arc<HttpClient>) -> Self {
        self.http = Some(http);
        self
    }

    /// Sets the cancellation token shared by every request.
    #[must_use]
    pub fn cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Sets the credential store locations.
    #[must_use]
    pub fn credentials(mut self, credentials: CredentialPaths) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.settings.timeout = timeout;
        self
    }

    /// Builds the fetch context.
    pub fn build(self) -> FetchContext {
        let timeout = self.settings.timeout;
        FetchContext {
            http: self.http.unwrap_or_else(|| {
                Arc::new(
                    HttpClient::with_timeout(timeout).allowed_domains(
                        DEFAULT_ALLOWED_DOMAINS.iter().map(ToString::to_string).collect(),
                    ),
                )
            }),
            cancel: self.cancel.unwrap_or_else(CancellationToken::new),
            credentials: self.credentials.unwrap_or_else(CredentialPaths::discover),
            settings: self.settings,
        }
    }
}

impl Default for FetchContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
