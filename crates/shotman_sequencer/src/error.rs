// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for the shot data model.

use thiserror::Error;

/// Errors raised when editing shots and takes
#[derive(Debug, Error)]
pub enum SequencerError {
    /// Range with `start > end`
    #[error("Invalid shot range: start {start} is after end {end}")]
    InvalidRange {
        /// Requested first frame
        start: i64,
        /// Requested last frame
        end: i64,
    },

    /// No take with that name
    #[error("Take not found: {0}")]
    TakeNotFound(String),

    /// Take name already used in the scene
    #[error("A take named {0:?} already exists")]
    DuplicateTakeName(String),

    /// Shot index past the end of the take
    #[error("Shot index {index} out of range (take has {len} shots)")]
    ShotIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of shots in the take
        len: usize,
    },

    /// Document could not be (de)serialized
    #[error("Document serialization error: {0}")]
    Serialization(String),

    /// Document file format newer than this build understands
    #[error("Document format version {found} is newer than supported version {supported}")]
    UnsupportedFormat {
        /// Version stored in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
