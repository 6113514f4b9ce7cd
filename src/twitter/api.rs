//! Core Twitter API utilities.
//!
//! This module contains the HTTP client used for every call to the Twitter
//! API and the helper that signs, sends and checks a request.

use log::{debug, error, info};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};

use crate::config::TwitterConfig;
use crate::error::BoxError;
use crate::oauth::{build_oauth1_header, percent_encode, OAuth1Credentials};

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// This function:
/// - Truncates long text to prevent log flooding
/// - Replaces control characters that could manipulate log output
/// - Escapes newlines to prevent log injection
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum length in characters before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Twitter/X v1.1 REST client authenticated as the bot account.
#[derive(Clone)]
pub struct TwitterClient {
    http: Client,
    base_url: String,
    credentials: OAuth1Credentials,
}

impl TwitterClient {
    /// Creates a client for `base_url`, e.g. `https://api.twitter.com/1.1`.
    pub fn new(config: &TwitterConfig, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("Twitter client targeting {}", base_url);
        Self {
            http: Client::new(),
            base_url,
            credentials: OAuth1Credentials::from(config),
        }
    }

    /// Signs and sends a request, returning the body of a successful response.
    ///
    /// # Parameters
    ///
    /// - `method`: HTTP method
    /// - `path`: endpoint path relative to the base URL, e.g. `search/tweets.json`
    /// - `params`: query string parameters, included in the signature
    /// - `operation_name`: Human-readable name for the operation (for logging)
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: The API response body on success
    /// - `Err(BoxError)`: On network errors or a non-2xx status
    pub(crate) async fn make_signed_request(
        &self,
        method: Method,
        path: &str,
        params: &[(String, String)],
        operation_name: &str,
    ) -> Result<String, BoxError> {
        let url = format!("{}/{}", self.base_url, path);
        let auth_header = build_oauth1_header(&self.credentials, method.as_str(), &url, params)?;

        let full_url = if params.is_empty() {
            url
        } else {
            let query = params
                .iter()
                .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
                .collect::<Vec<_>>()
                .join("&");
            format!("{}?{}", url, query)
        };

        debug!("{} {} for operation '{}'", method, full_url, operation_name);
        debug!("Request headers: Authorization: OAuth [REDACTED]");

        let response = self
            .http
            .request(method, &full_url)
            .header(AUTHORIZATION, auth_header)
            .send()
            .await?;

        let status = response.status();
        debug!(
            "Received response with status: {} for operation: {}",
            status, operation_name
        );

        let body = response.text().await?;
        if status.is_success() {
            debug!(
                "Response summary for '{}': {} bytes received",
                operation_name,
                body.len()
            );
            return Ok(body);
        }

        error!("Operation '{}' failed - Status: {}", operation_name, status);
        debug!(
            "Error response for '{}': {}",
            operation_name,
            sanitize_for_logging(&body, 200)
        );
        Err(format!(
            "Twitter API error for operation '{}' ({})",
            operation_name, status
        )
        .into())
    }
}
