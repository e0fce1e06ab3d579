//! Claude (Anthropic) provider implementation.
//!
//! ## OAuth Credentials
//!
//! The token is read from the `anthropic` entry of the primary credential
//! store. When the token itself carries no email, the account label comes
//! from the profile endpoint.
//!
//! ## Windows
//!
//! | Response field | Label |
//! |----------------|-------|
//! | `five_hour` | `5h session` |
//! | `seven_day` | `Weekly` |
//! | `seven_day_opus` | `Weekly (Opus)` |
//! | `seven_day_sonnet` | `Weekly (Sonnet)` |
//!
//! ## Usage
//!
//! ```ignore
//! use usagepanel_providers::claude::ClaudeUsageClient;
//! use usagepanel_fetch::{FetchContext, UsageClient};
//!
//! let usage = ClaudeUsageClient::new().fetch_usage(&FetchContext::new()).await;
//! ```

mod api;
pub(crate) mod parser;

pub use api::{ClaudeUsageClient, API_BASE_URL, BETA_HEADER, PROFILE_ENDPOINT, USAGE_ENDPOINT};
pub use parser::{parse_profile_email, parse_usage, ClaudeUsageResponse, ClaudeWindow};
