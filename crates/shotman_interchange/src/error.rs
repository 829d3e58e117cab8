// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for edit file reading and writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the interchange codec
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// File could not be read or written
    #[error("IO error on {path:?}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Content is not a valid timeline
    #[error("Malformed edit timeline: {0}")]
    Malformed(#[from] serde_json::Error),

    /// File extension is not a container this crate reads
    #[error("Unsupported edit file format: {0:?}")]
    UnsupportedFormat(String),
}

/// Result type for interchange operations
pub type Result<T> = std::result::Result<T, InterchangeError>;
