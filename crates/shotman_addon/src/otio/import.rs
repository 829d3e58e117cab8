// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edit import: clips become shots of the current take.

use super::{
    clip_media_path, current_take_mut, read_edit, ImportOptions, METADATA_KEY, SHARED_CAMERA_NAME,
};
use crate::error::{AddonError, Result};
use crate::host::{Host, HostError};
use crate::version::ADDON_VERSION;
use shotman_interchange::{reformat_shot_name, Clip, EditTimeline, TimeRange};
use shotman_sequencer::{BackgroundClip, CameraId, SceneId, Shot, ShotManagerProps, Take};
use std::path::{Path, PathBuf};

/// Frame rate of a scene against the rate of an edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateCheck {
    /// Scene frame rate
    pub scene_fps: u32,
    /// Edit rate, if the edit has any timed content
    pub edit_rate: Option<f64>,
}

impl RateCheck {
    /// Compare a scene rate with a timeline
    pub fn new(scene_fps: u32, timeline: &EditTimeline) -> Self {
        Self {
            scene_fps,
            edit_rate: timeline.rate(),
        }
    }

    /// Whether frames of the edit map one to one onto scene frames
    pub fn matches(&self) -> bool {
        self.edit_rate
            .map_or(true, |rate| (rate - f64::from(self.scene_fps)).abs() < 0.01)
    }
}

/// What an import did
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// Rate comparison made before importing
    pub rate_check: RateCheck,
    /// Names of the shots added, in edit order
    pub created: Vec<String>,
    /// Names of the existing shots whose range was updated
    pub updated: Vec<String>,
    /// Clips without a usable range, or placed outside the frame range
    pub skipped_clips: Vec<String>,
    /// Number of camera objects created
    pub cameras_created: usize,
    /// Number of background videos attached or moved
    pub backgrounds_attached: usize,
    /// Media files referenced by the edit but not found
    pub missing_media: Vec<PathBuf>,
}

impl ImportSummary {
    fn new(rate_check: RateCheck) -> Self {
        Self {
            rate_check,
            created: Vec::new(),
            updated: Vec::new(),
            skipped_clips: Vec::new(),
            cameras_created: 0,
            backgrounds_attached: 0,
            missing_media: Vec::new(),
        }
    }
}

/// Read an edit and compare its rate with the scene's, without importing
pub fn probe_edit_rate(host: &dyn Host, scene_id: SceneId, path: &Path) -> Result<RateCheck> {
    let timeline = read_edit(path)?;
    let scene = host
        .document()
        .scene(scene_id)
        .ok_or(AddonError::SceneNotFound(scene_id))?;
    Ok(RateCheck::new(scene.fps, &timeline))
}

/// Import an edit file into the current take of a scene.
///
/// Media paths relative to the edit are resolved against its folder. The
/// document is left untouched if the file cannot be read.
pub fn import_edit(
    host: &mut dyn Host,
    scene_id: SceneId,
    path: &Path,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let timeline = read_edit(path)?;
    tracing::info!("Importing edit {:?} at frame {}", path, options.import_at_frame);
    import_timeline(host, scene_id, &timeline, path.parent(), options)
}

/// Import a parsed edit into the current take of a scene.
///
/// Each video clip gives a shot starting at `import_at_frame` plus the start
/// of the clip's source range. Shots not found in the edit are left as they
/// are, in place.
pub fn import_timeline(
    host: &mut dyn Host,
    scene_id: SceneId,
    timeline: &EditTimeline,
    media_root: Option<&Path>,
    options: &ImportOptions,
) -> Result<ImportSummary> {
    let scene = host
        .document()
        .scene(scene_id)
        .ok_or(AddonError::SceneNotFound(scene_id))?;
    let rate_check = RateCheck::new(scene.fps, timeline);
    if !rate_check.matches() {
        tracing::warn!(
            "Scene fps is {}, imported edit is {:.3}. Frames are not resampled",
            rate_check.scene_fps,
            rate_check.edit_rate.unwrap_or_default()
        );
    }

    prepare_take(host, scene_id)?;

    let mut summary = ImportSummary::new(rate_check);
    let mut shared_camera = None;

    for clip in timeline.video_clips() {
        let Some(range) = clip.trimmed_range() else {
            tracing::warn!("Clip {:?} has no source range, skipped", clip.name);
            summary.skipped_clips.push(clip.name.clone());
            continue;
        };

        let Some((start, end)) = shot_frames(options.import_at_frame, &range) else {
            tracing::warn!("Clip {:?} lies outside the scene frame range, skipped", clip.name);
            summary.skipped_clips.push(clip.name.clone());
            continue;
        };
        let name = shot_name(clip, options);

        let take = current_take_mut(host, scene_id)?;
        let existing = if options.reformat_shot_names {
            take.shot_index_by_name(&name)
        } else {
            None
        };

        let index = match existing {
            Some(index) => {
                if let Some(shot) = take.shot_mut(index) {
                    shot.set_range(start, end)?;
                }
                tracing::debug!("Updated shot {} to [{}, {}]", name, start, end);
                summary.updated.push(name);
                index
            }
            None => {
                let index = take.add_shot_unique(Shot::new(name, start, end));
                if let Some(shot) = take.shot(index) {
                    tracing::debug!("Created shot {} [{}, {}]", shot.name, start, end);
                    summary.created.push(shot.name.clone());
                }
                index
            }
        };

        let Some((shot_name, camera)) = take.shot(index).map(|s| (s.name.clone(), s.camera)) else {
            continue;
        };

        let camera = match camera {
            Some(camera) => camera,
            None => {
                let camera = if options.create_cameras {
                    let camera = host.create_camera(scene_id, &format!("Cam_{shot_name}"))?;
                    summary.cameras_created += 1;
                    camera
                } else {
                    shared_camera_id(host, scene_id, &mut shared_camera, &mut summary)?
                };
                if let Some(shot) = current_take_mut(host, scene_id)?.shot_mut(index) {
                    shot.camera = Some(camera);
                }
                camera
            }
        };

        if options.use_media_as_camera_bg {
            if let Some(media) = clip_media_path(clip, media_root) {
                let frame_start = if options.media_have_handles {
                    start.saturating_sub(options.media_handles_duration)
                } else {
                    start
                };
                attach_background(host, scene_id, camera, media, frame_start, &mut summary)?;
            }
        }
    }

    tracing::info!(
        "Edit import done: {} shots created, {} updated, {} clips skipped",
        summary.created.len(),
        summary.updated.len(),
        summary.skipped_clips.len()
    );
    Ok(summary)
}

/// First and last scene frames of a clip, if they fit in a frame number
fn shot_frames(import_at_frame: i64, range: &TimeRange) -> Option<(i64, i64)> {
    let start = import_at_frame.checked_add(range.start_time.to_frames())?;
    let end = start.checked_add(range.duration.to_frames().max(1) - 1)?;
    Some((start, end))
}

/// Shot name of a clip. Clips written by an export keep their shot name as is.
fn shot_name(clip: &Clip, options: &ImportOptions) -> String {
    let exported = clip
        .metadata
        .get(METADATA_KEY)
        .and_then(|m| m.get("name"))
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let name = if let Some(name) = exported {
        name.to_string()
    } else if options.reformat_shot_names {
        reformat_shot_name(&clip.name)
    } else {
        clip.name.trim().to_string()
    };
    if name.is_empty() {
        "Shot".to_string()
    } else {
        name
    }
}

/// Make sure the scene has a dataset with a current take
fn prepare_take(host: &mut dyn Host, scene_id: SceneId) -> Result<()> {
    let scene = host
        .document_mut()
        .scene_mut(scene_id)
        .ok_or(AddonError::SceneNotFound(scene_id))?;

    let props = scene.shot_manager.get_or_insert_with(|| {
        tracing::info!("Scene {} has no shot manager data, creating it", scene.name);
        ShotManagerProps::new(ADDON_VERSION.to_int())
    });
    if props.takes.is_empty() {
        props.takes.push(Take::default());
    }
    if props.current_take().is_none() {
        tracing::warn!("Scene {}: current take index out of range, using first take", scene.name);
        props.current_take_index = 0;
        props.current_shot_index = None;
    }
    Ok(())
}

fn shared_camera_id(
    host: &mut dyn Host,
    scene_id: SceneId,
    shared: &mut Option<CameraId>,
    summary: &mut ImportSummary,
) -> Result<CameraId> {
    if let Some(camera) = *shared {
        return Ok(camera);
    }

    let existing = host
        .document()
        .scene(scene_id)
        .and_then(|s| s.camera_by_name(SHARED_CAMERA_NAME))
        .map(|c| c.id);
    let camera = match existing {
        Some(camera) => camera,
        None => {
            let camera = host.create_camera(scene_id, SHARED_CAMERA_NAME)?;
            summary.cameras_created += 1;
            camera
        }
    };
    *shared = Some(camera);
    Ok(camera)
}

/// Attach the media behind the camera, or move it if the camera already shows it
fn attach_background(
    host: &mut dyn Host,
    scene_id: SceneId,
    camera_id: CameraId,
    media: PathBuf,
    frame_start: i64,
    summary: &mut ImportSummary,
) -> Result<()> {
    let existing = host
        .document_mut()
        .scene_mut(scene_id)
        .and_then(|s| s.camera_mut(camera_id))
        .and_then(|c| c.background_clips.iter_mut().find(|b| b.media == media));
    if let Some(clip) = existing {
        clip.frame_start = frame_start;
        summary.backgrounds_attached += 1;
        return Ok(());
    }

    match host.add_background_video(scene_id, camera_id, BackgroundClip::new(media, frame_start)) {
        Ok(()) => {
            summary.backgrounds_attached += 1;
            Ok(())
        }
        Err(HostError::MediaNotFound(path)) => {
            tracing::warn!("Media not found, no background attached: {:?}", path);
            summary.missing_media.push(path);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
