// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reading and writing `.otio` files.

use crate::error::{InterchangeError, Result};
use crate::timeline::EditTimeline;
use std::path::Path;

/// Extension of OpenTimelineIO JSON files
pub const OTIO_EXTENSION: &str = "otio";

/// Check that a path names a container this crate can read.
///
/// `.otio` and `.json` are accepted. `.xml` edits are not.
pub fn check_format(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        OTIO_EXTENSION | "json" => Ok(()),
        _ => Err(InterchangeError::UnsupportedFormat(extension)),
    }
}

/// Parse a timeline from JSON text
pub fn read_from_string(content: &str) -> Result<EditTimeline> {
    Ok(serde_json::from_str(content)?)
}

/// Read a timeline from a file
pub fn read_from_file(path: &Path) -> Result<EditTimeline> {
    check_format(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_from_string(&content)
}

/// Serialize a timeline to pretty JSON text
pub fn write_to_string(timeline: &EditTimeline) -> Result<String> {
    Ok(serde_json::to_string_pretty(timeline)?)
}

/// Write a timeline to a file. The parent folder must exist.
pub fn write_to_file(timeline: &EditTimeline, path: &Path) -> Result<()> {
    check_format(path)?;
    let content = write_to_string(timeline)?;
    std::fs::write(path, content).map_err(|source| InterchangeError::Io {
        path: path.to_path_buf(),
        source,
    })
}
