//! Provider error types.
//!
//! Every failure inside a provider client is converted into one of these
//! variants at the client boundary and then rendered into the result's
//! `error` string. Cancellation is its own variant so it is never confused
//! with a transport failure.

use thiserror::Error;
use usagepanel_fetch::{HttpError, HttpResponse};

/// Maximum number of body characters kept in an HTTP error message.
pub const ERROR_BODY_SNIPPET_CHARS: usize = 100;

/// Errors produced while fetching usage for one provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No usable token in any credential store.
    #[error("No OAuth credentials found")]
    CredentialsNotFound,

    /// The panel was closed before the request settled.
    #[error("Cancelled")]
    Cancelled,

    /// Non-2xx response.
    #[error("HTTP {status}: {snippet}")]
    Http {
        /// Status code.
        status: u16,
        /// Leading part of the response body.
        snippet: String,
    },

    /// Network failure.
    #[error("{0}")]
    Transport(String),

    /// Body could not be decoded into the expected shape.
    #[error("{0}")]
    Parse(String),
}

impl ProviderError {
    /// Returns true for user-initiated cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Builds the error for a non-2xx response.
    pub fn from_status(response: &HttpResponse) -> Self {
        Self::Http {
            status: response.status.as_u16(),
            snippet: response.snippet(ERROR_BODY_SNIPPET_CHARS),
        }
    }
}

impl From<HttpError> for ProviderError {
    fn from(e: HttpError) -> Self {
        match e {
            HttpError::Cancelled => ProviderError::Cancelled,
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::Parse(e.to_string())
    }
}
