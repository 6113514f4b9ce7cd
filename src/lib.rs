//! # Tweetbot Library
//!
//! A single-shot Twitter/X bot. Each run searches the configured hashtags,
//! retweets the new tweets that are not themselves retweets, and remembers
//! the highest tweet ID seen so the next run only fetches newer tweets.
//!
//! ## Features
//!
//! - Concurrent search of every configured hashtag
//! - Retweeting through the v1.1 API with OAuth 1.0a user authentication
//! - Checkpoint file so consecutive runs do not repeat work
//! - Logging via `log`/`env_logger`
//!
//! ## Configuration
//!
//! - `settings.yaml`: credentials and hashtags (path overridable with `TWEETBOT_SETTINGS`)
//! - `lastTweetId`: checkpoint file (path overridable with `TWEETBOT_CHECKPOINT`)
//! - `TWEETBOT_API_BASE`: API base URL (defaults to `https://api.twitter.com/1.1`)
//! - `RUST_LOG`: log level (defaults to `info`)

pub mod checkpoint;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod job;
pub mod oauth;
pub mod twitter;

// Re-export commonly used types and functions
pub use checkpoint::CheckpointStore;
pub use config::{get_api_base_url, get_checkpoint_path, get_settings_path, Settings, TwitterConfig};
pub use error::{BotError, BoxError};
pub use job::{run, run_once, RunSummary};
pub use twitter::{Search, SearchParams, Tweet, TweetApi, TwitterClient};
