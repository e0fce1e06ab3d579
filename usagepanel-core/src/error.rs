//! Core error types for `usagepanel`.

use thiserror::Error;

/// Core error type for `usagepanel` operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Timestamp could not be parsed.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
