//! Codex (OpenAI) provider implementation.
//!
//! ## OAuth Credentials
//!
//! The token is read from the `openai-codex` entry of the primary credential
//! store, falling back to the Codex CLI's own `$CODEX_HOME/auth.json`. The
//! account label is decoded from the token; there is no profile lookup.
//!
//! ## Windows
//!
//! - `rate_limit.primary_window` → `5h session`
//! - `rate_limit.secondary_window` → `Weekly`
//! - each used entry of `additional_rate_limits` → shortened model name
//! - `code_review_rate_limit`, when used → `Code Review`

mod api;
pub(crate) mod parser;

pub use api::{CodexUsageClient, ACCOUNT_HEADER, API_BASE_URL, USAGE_ENDPOINT};
pub use parser::{
    model_label, parse_usage, CodexAdditionalLimit, CodexRateLimit, CodexUsageResponse,
    CodexWindow,
};
