//! OAuth 1.0a authentication module for Twitter/X API integration.
//!
//! The v1.1 search and retweet endpoints are called on behalf of the bot
//! account, which requires every request to carry an `Authorization: OAuth`
//! header signed with HMAC-SHA1 over the method, the URL and all request
//! parameters.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::Engine;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;

use crate::config::TwitterConfig;
use crate::error::BoxError;

type HmacSha1 = Hmac<Sha1>;

/// The four keys needed to sign a user context request.
#[derive(Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl From<&TwitterConfig> for OAuth1Credentials {
    fn from(config: &TwitterConfig) -> Self {
        Self {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            token: config.oauth_access_token.clone(),
            token_secret: config.oauth_access_token_secret.clone(),
        }
    }
}

/// Percent-encodes a string as required by RFC 5849 section 3.6.
///
/// Only `A-Z a-z 0-9 - . _ ~` are left as is.
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds the signature base string for a request.
///
/// `base_url` must not carry a query string; query and body parameters are
/// passed in `params` together with the `oauth_*` parameters.
pub fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let parameter_string = encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&parameter_string)
    )
}

/// Signs a base string with HMAC-SHA1 and returns the base64 signature.
pub fn sign(
    base_string: &str,
    consumer_secret: &str,
    token_secret: &str,
) -> Result<String, BoxError> {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret)
    );
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| format!("invalid HMAC key: {}", e))?;
    mac.update(base_string.as_bytes());
    let digest = mac.finalize().into_bytes();
    Ok(base64::engine::general_purpose::STANDARD.encode(digest))
}

/// Generates a random 32 character alphanumeric nonce.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Builds the Authorization header for an OAuth 1.0a user context request.
///
/// A fresh nonce and the current Unix time are used.
///
/// # Parameters
///
/// - `credentials`: consumer and access token keys of the bot
/// - `method`: HTTP method, e.g. `GET`
/// - `base_url`: request URL without query string
/// - `params`: query string and form body parameters of the request
pub fn build_oauth1_header(
    credentials: &OAuth1Credentials,
    method: &str,
    base_url: &str,
    params: &[(String, String)],
) -> Result<String, BoxError> {
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    build_oauth1_header_with(
        credentials,
        method,
        base_url,
        params,
        &generate_nonce(),
        timestamp,
    )
}

/// Same as [`build_oauth1_header`] with a caller-supplied nonce and timestamp.
pub fn build_oauth1_header_with(
    credentials: &OAuth1Credentials,
    method: &str,
    base_url: &str,
    params: &[(String, String)],
    nonce: &str,
    timestamp: u64,
) -> Result<String, BoxError> {
    let mut oauth_params: Vec<(String, String)> = vec![
        ("oauth_consumer_key".into(), credentials.consumer_key.clone()),
        ("oauth_nonce".into(), nonce.to_string()),
        ("oauth_signature_method".into(), "HMAC-SHA1".into()),
        ("oauth_timestamp".into(), timestamp.to_string()),
        ("oauth_token".into(), credentials.token.clone()),
        ("oauth_version".into(), "1.0".into()),
    ];

    let mut all_params = oauth_params.clone();
    all_params.extend(params.iter().cloned());

    let base_string = signature_base_string(method, base_url, &all_params);
    let signature = sign(
        &base_string,
        &credentials.consumer_secret,
        &credentials.token_secret,
    )?;

    oauth_params.push(("oauth_signature".into(), signature));
    oauth_params.sort();

    let fields = oauth_params
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(format!("OAuth {}", fields))
}
