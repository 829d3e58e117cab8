// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cameras and their background video attachments.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Camera ID for shot binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraId(pub Uuid);

impl CameraId {
    /// Create a new random camera ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CameraId {
    fn default() -> Self {
        Self::new()
    }
}

/// Proxy size used when playing a background clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ProxyRenderSize {
    /// 25% proxy
    Proxy25,
    /// 50% proxy
    #[default]
    Proxy50,
    /// 75% proxy
    Proxy75,
    /// 100% proxy
    Proxy100,
    /// Full resolution, no proxy
    Full,
}

/// A movie clip displayed behind a camera view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundClip {
    /// Path to the media file
    pub media: PathBuf,
    /// Scene frame at which the first media frame is shown
    pub frame_start: i64,
    /// Opacity override (`None` keeps the host default)
    #[serde(default)]
    pub alpha: Option<f32>,
    /// Playback proxy size
    #[serde(default)]
    pub proxy: ProxyRenderSize,
}

impl BackgroundClip {
    /// Create a clip starting at the given frame
    pub fn new(media: impl Into<PathBuf>, frame_start: i64) -> Self {
        Self {
            media: media.into(),
            frame_start,
            alpha: None,
            proxy: ProxyRenderSize::default(),
        }
    }
}

/// A camera object in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Unique camera ID
    pub id: CameraId,
    /// Camera object name
    pub name: String,
    /// Background videos, in display order
    #[serde(default)]
    pub background_clips: Vec<BackgroundClip>,
}

impl Camera {
    /// Create a camera with a fresh ID
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CameraId::new(),
            name: name.into(),
            background_clips: Vec::new(),
        }
    }

    /// Whether any background clip is attached
    pub fn shows_background(&self) -> bool {
        !self.background_clips.is_empty()
    }
}
