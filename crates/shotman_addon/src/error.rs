// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the add-on core.

use crate::host::{HostError, Overlay};
use crate::migration::PatchError;
use crate::version::DataVersion;
use shotman_interchange::InterchangeError;
use shotman_sequencer::{SceneId, SequencerError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by migration, import and export
#[derive(Debug, Error)]
pub enum AddonError {
    /// Edit file unreadable or not a recognized container
    #[error("Failed to read edit file {path:?}: {source}")]
    Parse {
        /// Edit file
        path: PathBuf,
        /// Codec error
        source: InterchangeError,
    },

    /// Export root missing or not a folder
    #[error("Invalid output root path: {0:?}")]
    InvalidPath(PathBuf),

    /// A data patch failed during migration
    #[error("Data patch to version {version} failed: {source}")]
    PatchFailure {
        /// Target version of the failed patch
        version: DataVersion,
        /// Patch error
        source: PatchError,
    },

    /// An overlay could not be turned back on after load
    #[error("Could not restore overlay {overlay:?}: {source}")]
    OverlayRestore {
        /// Overlay that failed
        overlay: Overlay,
        /// Host error
        source: HostError,
    },

    /// Scene ID unknown to the document
    #[error("Scene not found: {0:?}")]
    SceneNotFound(SceneId),

    /// Scene without shot manager data
    #[error("Scene {0:?} has no shot manager data")]
    NoShotManagerData(String),

    /// Current take index points nowhere
    #[error("Scene {0:?} has no current take")]
    NoCurrentTake(String),

    /// Version string not in `x.y.z` form
    #[error("Invalid version string: {0:?}")]
    InvalidVersion(String),

    /// Configuration file problem
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging already initialized or filter invalid
    #[error("Logging setup failed: {0}")]
    Logging(String),

    /// Host error
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Shot data error
    #[error("Shot data error: {0}")]
    Sequencer(#[from] SequencerError),

    /// Edit file could not be written
    #[error("Interchange error: {0}")]
    Interchange(#[from] InterchangeError),

    /// Document snapshot error
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for add-on operations
pub type Result<T> = std::result::Result<T, AddonError>;
