//! Configuration module for the tweetbot.
//!
//! This module contains the settings structures decoded from `settings.yaml`
//! and the environment variable helpers that locate the files the bot reads
//! and writes.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

/// Default location of the settings file, relative to the working directory.
pub const DEFAULT_SETTINGS_PATH: &str = "settings.yaml";

/// Default location of the checkpoint file, relative to the working directory.
pub const DEFAULT_CHECKPOINT_PATH: &str = "lastTweetId";

/// Default base URL of the Twitter/X v1.1 REST API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/1.1";

/// Errors raised while loading `settings.yaml`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be opened or read.
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not YAML of the expected shape.
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Top-level shape of `settings.yaml`.
///
/// ```yaml
/// twitter:
///   oauth_access_token: "..."
///   oauth_access_token_secret: "..."
///   consumer_key: "..."
///   consumer_secret: "..."
///   hash:
///     - "#rustlang"
///     - "#golang"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default, deserialize_with = "null_as_default")]
    pub twitter: TwitterConfig,
}

/// Twitter/X credentials and the hashtags to track.
///
/// The four credentials are the OAuth 1.0a user context keys from the
/// Twitter Developer Portal. Hashtags are searched in the order listed.
///
/// Missing or empty keys decode to empty values. An empty credential is
/// reported at load time and rejected by the API; an empty hashtag list
/// makes the run a no-op.
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct TwitterConfig {
    /// Access token of the bot account
    #[serde(deserialize_with = "null_as_default")]
    pub oauth_access_token: String,
    /// Access token secret of the bot account
    #[serde(deserialize_with = "null_as_default")]
    pub oauth_access_token_secret: String,
    /// Consumer (API) key of the app
    #[serde(deserialize_with = "null_as_default")]
    pub consumer_key: String,
    /// Consumer (API) secret of the app
    #[serde(deserialize_with = "null_as_default")]
    pub consumer_secret: String,
    /// Search queries, one concurrent search per entry
    #[serde(deserialize_with = "null_as_default")]
    pub hash: Vec<String>,
}

/// Decodes an explicit YAML `null` (e.g. `twitter:` with nothing below it) as the default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Secrets never reach the logs through `{:?}`.
impl std::fmt::Debug for TwitterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterConfig")
            .field("oauth_access_token", &mask_secret(&self.oauth_access_token))
            .field(
                "oauth_access_token_secret",
                &mask_secret(&self.oauth_access_token_secret),
            )
            .field("consumer_key", &mask_secret(&self.consumer_key))
            .field("consumer_secret", &mask_secret(&self.consumer_secret))
            .field("hash", &self.hash)
            .finish()
    }
}

impl Settings {
    /// Loads and decodes the settings file at `path`.
    ///
    /// # Returns
    ///
    /// - `Ok(Settings)`: If the file was read and has the expected shape
    /// - `Err(ConfigError::Read)`: If the file cannot be opened or read
    /// - `Err(ConfigError::Parse)`: If the content is not valid settings YAML
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading settings from {}", path.display());

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings =
            Self::from_yaml_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        info!(
            "Settings loaded: tracking {} hashtag(s)",
            settings.twitter.hash.len()
        );
        Ok(settings)
    }

    /// Decodes settings from YAML text and logs what was found.
    ///
    /// An empty document yields default settings. Values of the wrong type,
    /// such as `twitter: 42`, are an error.
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = if content.trim().is_empty() {
            serde_yaml::Value::Null
        } else {
            serde_yaml::from_str(content)?
        };
        let settings: Settings = if value.is_null() {
            warn!("Settings document is empty");
            Settings::default()
        } else {
            serde_yaml::from_value(value)?
        };
        settings.twitter.log_summary();
        Ok(settings)
    }
}

impl TwitterConfig {
    fn log_summary(&self) {
        let credentials = [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("oauth_access_token", &self.oauth_access_token),
            ("oauth_access_token_secret", &self.oauth_access_token_secret),
        ];

        for (name, value) in credentials {
            if value.is_empty() {
                warn!("Credential {} is empty, API requests will be rejected", name);
            } else {
                debug!("{} (masked): {}", name, mask_secret(value));
            }
        }

        if self.hash.is_empty() {
            warn!("No hashtags configured, nothing will be searched");
        } else {
            debug!("Hashtags: {:?}", self.hash);
        }
    }
}

/// Masks a secret for logging, keeping at most the first and last 4 characters.
///
/// Short secrets are reduced to their first characters only.
///
/// # Example
///
/// ```rust
/// use tweetbot::config::mask_secret;
///
/// assert_eq!(mask_secret("abcdefghijklmnopqrst"), "abcd...qrst");
/// assert_eq!(mask_secret("abcdef"), "ab...");
/// assert_eq!(mask_secret(""), "...");
/// ```
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();

    if len > 16 {
        let prefix: String = chars[..4].iter().collect();
        let suffix: String = chars[len - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        let prefix: String = chars.iter().take(len / 3).collect();
        format!("{}...", prefix)
    }
}

/// Gets the settings file path from `TWEETBOT_SETTINGS` or returns the default.
pub fn get_settings_path() -> PathBuf {
    env::var("TWEETBOT_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH))
}

/// Gets the checkpoint file path from `TWEETBOT_CHECKPOINT` or returns the default.
pub fn get_checkpoint_path() -> PathBuf {
    env::var("TWEETBOT_CHECKPOINT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CHECKPOINT_PATH))
}

/// Gets the API base URL from `TWEETBOT_API_BASE` or returns the default.
///
/// A trailing slash is removed so endpoint paths can be appended directly.
pub fn get_api_base_url() -> String {
    env::var("TWEETBOT_API_BASE")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}
