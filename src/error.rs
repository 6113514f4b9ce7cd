//! Error types for the tweetbot run.
//!
//! Errors are split into two severities. Fatal errors are the variants of
//! [`BotError`] and end the process with a non-zero status. Everything else
//! (a failed search, a failed retweet, a missing checkpoint) is logged where
//! it happens and the run continues.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Boxed error used by the Twitter API layer.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal errors that abort a run.
#[derive(Error, Debug)]
pub enum BotError {
    /// The settings file could not be read or decoded.
    #[error("could not load settings: {0}")]
    Settings(#[from] ConfigError),

    /// The new checkpoint could not be persisted.
    #[error("could not write checkpoint to {path}: {source}")]
    CheckpointWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
