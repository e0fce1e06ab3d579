//! HTTP client with tracing, domain allowlist and cancellation.
//!
//! This module provides a wrapped HTTP client that adds:
//! - Request/response tracing
//! - Domain allowlist for security
//! - Requests that settle promptly when the panel's cancellation token fires

use reqwest::{
    header::{self, HeaderMap, HeaderName, HeaderValue},
    Client, StatusCode,
};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};
use url::Url;

use crate::error::HttpError;

/// Default request timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// User agent string for usagepanel.
const USER_AGENT: &str = concat!("usagepanel/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// HTTP Client
// ============================================================================

/// HTTP client wrapper with tracing, domain allowlist and cancellation.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: Client,
    allowed_domains: Option<Vec<String>>,
}

impl HttpClient {
    /// Creates a new HTTP client with default settings.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a new HTTP client with a custom timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built. This should only occur
    /// if the system's TLS configuration is fundamentally broken, making
    /// network operations impossible.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                panic!(
                    "Failed to create HTTP client: {e}. \
                    This usually indicates a broken TLS configuration."
                )
            });

        Self {
            inner: client,
            allowed_domains: None,
        }
    }

    /// Restricts requests to the given domains and their subdomains.
    #[must_use]
    pub fn allowed_domains(mut self, domains: Vec<String>) -> Self {
        self.allowed_domains = Some(domains);
        self
    }

    /// Checks if a URL's domain is allowed.
    fn is_domain_allowed(&self, url: &str) -> Result<(), HttpError> {
        let Some(ref allowed) = self.allowed_domains else {
            return Ok(());
        };

        let parsed = Url::parse(url).map_err(|e| HttpError::InvalidUrl(e.to_string()))?;

        let host = parsed
            .host_str()
            .ok_or_else(|| HttpError::InvalidUrl("No host in URL".to_string()))?;

        let allowed = allowed
            .iter()
            .any(|domain| host == domain || host.ends_with(&format!(".{domain}")));

        if allowed {
            Ok(())
        } else {
            Err(HttpError::DomainNotAllowed(host.to_string()))
        }
    }

    /// Performs a GET request and reads the whole body.
    ///
    /// Both the request and the body read race against `cancel`; whichever
    /// finishes first wins, so a cancelled panel never waits on the network.
    ///
    /// # Errors
    ///
    /// Returns `HttpError::Cancelled` if the token fires first, or a
    /// transport error. Non-2xx statuses are not errors at this level.
    #[instrument(skip(self, headers, cancel), fields(url = %url))]
    pub async fn get(
        &self,
        url: &str,
        headers: HeaderMap,
        cancel: &CancellationToken,
    ) -> Result<HttpResponse, HttpError> {
        if cancel.is_cancelled() {
            debug!("Skipping request, already cancelled");
            return Err(HttpError::Cancelled);
        }
        self.is_domain_allowed(url)?;
        debug!("GET request");

        let request = async {
            let response = self.inner.get(url).headers(headers).send().await?;
            let status = response.status();
            debug!(status = %status, "Response received");
            let body = response.text().await?;
            Ok::<_, HttpError>(HttpResponse { status, body })
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!("Request cancelled");
                Err(HttpError::Cancelled)
            }
            result = request => result,
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Headers
// ============================================================================

/// Builds a header map carrying a bearer token plus extra headers.
///
/// The authorization value is marked sensitive so it never shows up in
/// debug output.
///
/// # Errors
///
/// Returns `HttpError::InvalidHeader` if a name or value contains
/// characters that are not allowed in HTTP headers.
pub fn bearer_headers(token: &str, extra: &[(&str, &str)]) -> Result<HeaderMap, HttpError> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
        .map_err(|_| HttpError::InvalidHeader("authorization".to_string()))?;
    auth.set_sensitive(true);
    headers.insert(header::AUTHORIZATION, auth);
    headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| HttpError::InvalidHeader((*name).to_string()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| HttpError::InvalidHeader(name.to_string()))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

// ============================================================================
// Response
// ============================================================================

/// A fully-read HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the first `max_chars` characters of the body.
    pub fn snippet(&self, max_chars: usize) -> String {
        self.body.chars().take(max_chars).collect()
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body does not match `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header as header_is, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_domain_allowlist() {
        let client = HttpClient::new()
            .allowed_domains(vec!["anthropic.com".to_string(), "chatgpt.com".to_string()]);

        assert!(client.is_domain_allowed("https://api.anthropic.com/api/oauth/usage").is_ok());
        assert!(client.is_domain_allowed("https://chatgpt.com/backend-api/wham/usage").is_ok());
        assert!(client.is_domain_allowed("https://evil.com/steal").is_err());
        assert!(client.is_domain_allowed("https://anthropic.com.evil.com").is_err());
    }

    #[test]
    fn test_no_domain_restrictions() {
        let client = HttpClient::new();
        assert!(client.is_domain_allowed("https://any.domain.com").is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = HttpClient::new().allowed_domains(vec!["example.com".to_string()]);
        assert!(matches!(
            client.is_domain_allowed("not-a-valid-url"),
            Err(HttpError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_bearer_headers() {
        let headers = bearer_headers("tok", &[("anthropic-beta", "oauth-2025-04-20")]).unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer tok");
        assert!(headers[header::AUTHORIZATION].is_sensitive());
        assert_eq!(headers["anthropic-beta"], "oauth-2025-04-20");

        assert!(matches!(
            bearer_headers("bad\ntoken", &[]),
            Err(HttpError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_snippet_counts_chars() {
        let response = HttpResponse {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "é".repeat(150),
        };
        assert_eq!(response.snippet(100).chars().count(), 100);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_get_already_cancelled() {
        let client = HttpClient::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = client
            .get("http://127.0.0.1:9/never", HeaderMap::new(), &cancel)
            .await;
        assert!(matches!(result, Err(HttpError::Cancelled)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_get_reads_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/usage"))
            .and(header_is("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let response = client
            .get(
                &format!("{}/usage", server.uri()),
                bearer_headers("tok", &[]).unwrap(),
                &CancellationToken::new(),
            )
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.body, "slow down");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_get_cancelled_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
            .mount(&server)
            .await;

        let client = HttpClient::new();
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        let result = client.get(&server.uri(), HeaderMap::new(), &cancel).await;

        assert!(matches!(result, Err(HttpError::Cancelled)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
