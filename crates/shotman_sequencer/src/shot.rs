// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot definitions for the sequencer.

use crate::camera::CameraId;
use crate::error::SequencerError;
use serde::{Deserialize, Serialize};

/// A contiguous frame range bound to a camera.
///
/// Shots have no identity of their own: they are addressed by their position
/// in the owning [`Take`](crate::take::Take).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Shot name
    pub name: String,
    /// First frame (inclusive)
    start: i64,
    /// Last frame (inclusive)
    end: i64,
    /// Camera used by this shot
    #[serde(default)]
    pub camera: Option<CameraId>,
    /// Whether the shot takes part in playback and export
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Display color
    #[serde(default = "default_color")]
    pub color: [u8; 3],
}

fn default_enabled() -> bool {
    true
}

fn default_color() -> [u8; 3] {
    [255, 100, 150]
}

impl Shot {
    /// Create a new enabled shot, ordering the bounds if needed
    pub fn new(name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            name: name.into(),
            start: start.min(end),
            end: start.max(end),
            camera: None,
            enabled: true,
            color: default_color(),
        }
    }

    /// Builder-style camera assignment
    pub fn with_camera(mut self, camera: CameraId) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Builder-style enabled flag
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// First frame of the shot
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Last frame of the shot
    pub fn end(&self) -> i64 {
        self.end
    }

    /// Number of frames covered by the shot (bounds included)
    pub fn duration(&self) -> i64 {
        self.end - self.start + 1
    }

    /// Set both bounds at once
    pub fn set_range(&mut self, start: i64, end: i64) -> Result<(), SequencerError> {
        if start > end {
            return Err(SequencerError::InvalidRange { start, end });
        }
        self.start = start;
        self.end = end;
        Ok(())
    }

    /// Whether the stored range violates `start <= end`.
    ///
    /// Only data deserialized from older documents can be in this state.
    pub fn has_inverted_range(&self) -> bool {
        self.start > self.end
    }

    /// Swap inverted bounds. Returns true if the range was changed.
    pub fn normalize_range(&mut self) -> bool {
        if self.has_inverted_range() {
            std::mem::swap(&mut self.start, &mut self.end);
            true
        } else {
            false
        }
    }

    /// Check if a frame lies inside the shot
    pub fn contains_frame(&self, frame: i64) -> bool {
        self.start <= frame && frame <= self.end
    }

    /// Move the shot by a frame delta, keeping its duration
    pub fn offset(&mut self, delta: i64) {
        self.start += delta;
        self.end += delta;
    }
}
