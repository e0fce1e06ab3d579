//! Fetch error types.

use thiserror::Error;

// ============================================================================
// HTTP Error
// ============================================================================

/// HTTP-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport failure or body read failure.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// Domain not allowed.
    #[error("Domain not allowed: {0}")]
    DomainNotAllowed(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header name or value with invalid characters.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The request was aborted through the cancellation token.
    #[error("Cancelled")]
    Cancelled,
}
