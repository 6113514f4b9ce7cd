//! Checkpoint persistence.
//!
//! The checkpoint is the largest tweet ID the bot has processed, stored as a
//! decimal string in a single file. It is used as the `since_id` lower bound
//! of the next run's searches.

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use thiserror::Error;

use crate::error::BotError;

/// Errors raised while reading the checkpoint file.
#[derive(Error, Debug)]
pub enum CheckpointError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse content of {path} as a 64-bit integer: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseIntError,
    },
}

impl CheckpointError {
    /// Returns true when the checkpoint file does not exist, as on a first run.
    pub fn is_missing(&self) -> bool {
        matches!(self, CheckpointError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// File-backed store for the last processed tweet ID.
#[derive(Debug, Clone)]
pub struct CheckpointStore {
    path: PathBuf,
}

impl CheckpointStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the checkpoint, surfacing a missing or corrupt file as an error.
    ///
    /// Surrounding whitespace (such as a trailing newline added by an editor)
    /// is ignored.
    pub fn read(&self) -> Result<i64, CheckpointError> {
        let content = fs::read_to_string(&self.path).map_err(|source| CheckpointError::Read {
            path: self.path.clone(),
            source,
        })?;

        content
            .trim()
            .parse::<i64>()
            .map_err(|source| CheckpointError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    /// Reads the checkpoint, treating a missing or corrupt file as zero.
    pub fn load(&self) -> i64 {
        match self.read() {
            Ok(id) => {
                info!("Last processed tweet ID: {}", id);
                id
            }
            Err(e) if e.is_missing() => {
                info!(
                    "No checkpoint at {}, searching without a lower bound",
                    self.path.display()
                );
                0
            }
            Err(e) => {
                warn!("Could not get last tweet ID, starting from zero: {}", e);
                0
            }
        }
    }

    /// Overwrites the checkpoint file with `id`.
    pub fn write(&self, id: i64) -> Result<(), BotError> {
        debug!("Writing checkpoint {} to {}", id, self.path.display());
        fs::write(&self.path, id.to_string()).map_err(|source| BotError::CheckpointWrite {
            path: self.path.clone(),
            source,
        })?;
        info!("Checkpoint updated to {}", id);
        Ok(())
    }
}

/// Computes the checkpoint to persist after a run.
///
/// Returns `None` when no tweet was processed, in which case the existing
/// file must be left untouched. Otherwise the result is never below
/// `previous`.
pub fn next_checkpoint(previous: i64, processed: &[i64]) -> Option<i64> {
    processed
        .iter()
        .copied()
        .max()
        .map(|latest| latest.max(previous))
}
