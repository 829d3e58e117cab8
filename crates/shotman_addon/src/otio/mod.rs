// SPDX-License-Identifier: MIT OR Apache-2.0
//! Bridge between shot manager takes and OpenTimelineIO edits.
//!
//! Import turns the clips of an edit into shots of the current take, with
//! cameras and background videos. Export writes the enabled shots of the
//! current take as a single video track.

mod export;
mod import;
mod sound;

pub use export::{build_timeline, export_edit, export_file_path, ExportOptions};
pub use import::{import_edit, import_timeline, probe_edit_rate, ImportSummary, RateCheck};
pub use sound::{import_sound, import_sound_timeline, SoundImportSummary};

use crate::error::{AddonError, Result};
use crate::host::Host;
use serde::{Deserialize, Serialize};
use shotman_interchange::{file_path_from_uri, read_from_file, Clip, EditTimeline};
use shotman_sequencer::{SceneId, Take};
use std::path::{Path, PathBuf};

/// Name of the camera shared by all imported shots when cameras are not created per shot
pub const SHARED_CAMERA_NAME: &str = "Cam_ImportedEdit";

/// Clip metadata key holding the shot manager details of exported shots
pub(crate) const METADATA_KEY: &str = "shot_manager";

/// Options of the edit import dialog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Scene frame at which the edit starts
    pub import_at_frame: i64,
    /// Keep only the shot part of clip names
    pub reformat_shot_names: bool,
    /// Create one camera per new shot instead of sharing one
    pub create_cameras: bool,
    /// Show the clip media behind the shot cameras
    pub use_media_as_camera_bg: bool,
    /// Media files include handles before the first frame of the shot
    pub media_have_handles: bool,
    /// Length of the handles, in frames
    pub media_handles_duration: i64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            import_at_frame: 25,
            reformat_shot_names: true,
            create_cameras: true,
            use_media_as_camera_bg: true,
            media_have_handles: true,
            media_handles_duration: 10,
        }
    }
}

/// Read an edit file. Nothing is touched if this fails.
pub(crate) fn read_edit(path: &Path) -> Result<EditTimeline> {
    let timeline = read_from_file(path).map_err(|source| AddonError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(
        "Read edit {:?}: {} tracks, {} video clips",
        path,
        timeline.tracks().len(),
        timeline.video_clips().count()
    );
    Ok(timeline)
}

/// Current take of a scene's shot manager dataset
pub(crate) fn current_take_mut(host: &mut dyn Host, scene_id: SceneId) -> Result<&mut Take> {
    let scene = host
        .document_mut()
        .scene_mut(scene_id)
        .ok_or(AddonError::SceneNotFound(scene_id))?;
    let props = scene
        .shot_manager
        .as_mut()
        .ok_or_else(|| AddonError::NoShotManagerData(scene.name.clone()))?;
    props
        .current_take_mut()
        .ok_or_else(|| AddonError::NoCurrentTake(scene.name.clone()))
}

/// Filesystem path of a clip's media.
///
/// Relative paths are resolved against `media_root`, usually the folder of
/// the edit file.
pub(crate) fn clip_media_path(clip: &Clip, media_root: Option<&Path>) -> Option<PathBuf> {
    let url = clip.media()?.target_url()?;
    if url.is_empty() {
        return None;
    }

    let path = file_path_from_uri(url);
    match media_root {
        Some(root) if path.is_relative() => Some(root.join(path)),
        _ => Some(path),
    }
}
