// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # usagepanel Providers
//!
//! Provider-specific usage clients and the engine that runs them.
//!
//! Each provider module includes:
//!
//! - **Client**: resolves credentials, queries the usage endpoint and maps
//!   every outcome into a [`ProviderUsage`](usagepanel_core::ProviderUsage)
//! - **Parser**: response parsing, one mapping per provider
//!
//! ## Supported Providers
//!
//! | Provider | Credential stores | Endpoint |
//! |----------|-------------------|----------|
//! | Claude (Anthropic) | primary | `api.anthropic.com/api/oauth/usage` |
//! | Codex (OpenAI) | primary, `~/.codex/auth.json` | `chatgpt.com/backend-api/wham/usage` |
//!
//! ## Usage
//!
//! ```ignore
//! use usagepanel_providers::UsageEngine;
//! use usagepanel_fetch::FetchContext;
//!
//! let ctx = FetchContext::new();
//! let results = UsageEngine::new().fetch_all(&ctx).await;
//! ```

pub mod credentials;
pub mod descriptor;
pub mod engine;
pub mod error;

// Provider modules
pub mod claude;
pub mod codex;

// Re-export key types
pub use claude::ClaudeUsageClient;
pub use codex::CodexUsageClient;
pub use credentials::{resolve_credential, CredentialAttempt, CredentialSource, ResolvedCredential};
pub use descriptor::{descriptor, ProviderDescriptor};
pub use engine::UsageEngine;
pub use error::ProviderError;
