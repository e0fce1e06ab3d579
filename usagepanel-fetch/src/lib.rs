// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # usagepanel Fetch
//!
//! Host APIs and the fetch context shared by the provider clients.
//!
//! ## Host APIs
//!
//! - [`host::http`] - HTTP client with tracing, a domain allowlist and
//!   cancellation-aware requests
//!
//! ## Fetch Context
//!
//! - [`context::FetchContext`] - HTTP client, cancellation token, settings
//!   and credential locations for one panel invocation
//! - [`client::UsageClient`] - Trait implemented by each provider client
//!
//! ## Example
//!
//! ```ignore
//! use usagepanel_fetch::FetchContext;
//!
//! let ctx = FetchContext::builder().build();
//! let usage = client.fetch_usage(&ctx).await;
//! ctx.cancel.cancel(); // closes every in-flight request promptly
//! ```

pub mod client;
pub mod context;
pub mod error;
pub mod host;

// Errors
pub use error::HttpError;

// Host APIs
pub use host::http::{bearer_headers, HttpClient, HttpResponse};
pub use reqwest::StatusCode;

// Context & client trait
pub use client::UsageClient;
pub use context::{CredentialPaths, FetchContext, FetchContextBuilder, FetchSettings};

// Cancellation token used across the workspace
pub use tokio_util::sync::CancellationToken;
