//! Host APIs for system interactions.
//!
//! - [`http`] - HTTP client with tracing, domain allowlist and cancellation

pub mod http;
