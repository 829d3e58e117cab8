// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edit export: the enabled shots of the current take as one video track.

use crate::config::AddonConfig;
use super::METADATA_KEY;
use crate::error::{AddonError, Result};
use serde_json::json;
use shotman_interchange::{
    check_format, uri_from_file_path, write_to_file, Clip, EditTimeline, MediaReference, RationalTime, TimeRange,
    Track, TrackKind, OTIO_EXTENSION,
};
use shotman_sequencer::{Document, Scene, SceneId, Take};
use std::path::{Path, PathBuf};

/// Extension of the rendered shot videos the exported clips point to
const SHOT_MEDIA_EXTENSION: &str = "mp4";

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Extension of the written edit file
    pub file_extension: String,
    /// Store shot manager details in clip metadata
    pub write_metadata: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            file_extension: OTIO_EXTENSION.to_string(),
            write_metadata: true,
        }
    }
}

impl From<&AddonConfig> for ExportOptions {
    fn from(config: &AddonConfig) -> Self {
        Self {
            file_extension: config.export_extension.clone(),
            ..Default::default()
        }
    }
}

/// File an export of `take` is written to: `<root>/<take>/<take>.<extension>`
pub fn export_file_path(output_root: &Path, take: &Take, extension: &str) -> PathBuf {
    let take_dir = take.path_name();
    output_root
        .join(&take_dir)
        .join(format!("{take_dir}.{extension}"))
}

/// Build the edit of a take.
///
/// Only enabled shots are written, in stored order. Each clip covers the
/// shot's frames at `fps` and points to the shot's render under
/// `output_root`.
pub fn build_timeline(
    scene: &Scene,
    take: &Take,
    output_root: &Path,
    fps: f64,
    options: &ExportOptions,
) -> EditTimeline {
    let take_dir = output_root.join(take.path_name());
    let mut track = Track::new("Shots", TrackKind::Video);

    for (_, shot) in take.enabled_shots() {
        let range = TimeRange::from_frames(shot.start(), shot.duration(), fps);
        let media = take_dir.join(format!("{}.{SHOT_MEDIA_EXTENSION}", shot.name));
        let mut clip = Clip::new(shot.name.as_str(), range).with_media(MediaReference::External {
            target_url: uri_from_file_path(&media),
            available_range: Some(range),
        });

        if options.write_metadata {
            let camera = shot
                .camera
                .and_then(|id| scene.camera(id))
                .map(|c| c.name.as_str());
            clip.metadata.insert(
                METADATA_KEY.to_string(),
                json!({
                    "name": shot.name,
                    "scene": scene.name,
                    "take": take.name,
                    "camera": camera,
                    "color": shot.color,
                }),
            );
        }
        track.push_clip(clip);
    }

    let mut timeline = EditTimeline::new(format!("{} - {}", scene.name, take.name));
    timeline.global_start_time = Some(RationalTime::from_frames(0, fps));
    timeline.add_track(track);
    timeline
}

/// Export the current take of a scene under `output_root`.
///
/// The root must be an existing folder; nothing is written otherwise.
/// Returns the path of the written file.
pub fn export_edit(
    document: &Document,
    scene_id: SceneId,
    output_root: &Path,
    fps: f64,
    options: &ExportOptions,
) -> Result<PathBuf> {
    if output_root.as_os_str().is_empty() || !output_root.is_dir() {
        tracing::error!("Edit export aborted before start: invalid root path {:?}", output_root);
        return Err(AddonError::InvalidPath(output_root.to_path_buf()));
    }

    let scene = document
        .scene(scene_id)
        .ok_or(AddonError::SceneNotFound(scene_id))?;
    let props = scene
        .shot_manager
        .as_ref()
        .ok_or_else(|| AddonError::NoShotManagerData(scene.name.clone()))?;
    let take = props
        .current_take()
        .ok_or_else(|| AddonError::NoCurrentTake(scene.name.clone()))?;

    let timeline = build_timeline(scene, take, output_root, fps, options);
    let path = export_file_path(output_root, take, &options.file_extension);
    check_format(&path)?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    write_to_file(&timeline, &path)?;

    tracing::info!(
        "Exported {} shots of take {} to {:?}",
        take.enabled_shots().count(),
        take.name,
        path
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotman_sequencer::{Shot, ShotManagerProps};

    fn scene() -> Scene {
        let mut scene = Scene::new("Scene", 25).with_shot_manager(ShotManagerProps::new(1_005_073));
        let camera = scene.add_camera("Cam_Sh010");
        if let Some(take) = scene.shot_manager.as_mut().and_then(|p| p.current_take_mut()) {
            take.add_shot(Shot::new("Sh010", 10, 29).with_camera(camera));
            take.add_shot(Shot::new("Sh020", 30, 39).with_enabled(false));
            take.add_shot(Shot::new("Sh030", 5, 9));
        }
        scene
    }

    #[test]
    fn test_build_timeline() {
        let scene = scene();
        let take = scene.shot_manager.as_ref().unwrap().current_take().unwrap();
        let timeline = build_timeline(&scene, take, Path::new("/renders"), 25.0, &ExportOptions::default());

        let clips: Vec<_> = timeline.video_clips().collect();
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[0].name, "Sh010");
        assert_eq!(clips[0].source_range, Some(TimeRange::from_frames(10, 20, 25.0)));
        assert_eq!(clips[1].name, "Sh030");
        assert_eq!(
            clips[0].media().and_then(MediaReference::target_url),
            Some("file:///renders/Main_Take/Sh010.mp4")
        );
        assert_eq!(clips[0].metadata["shot_manager"]["camera"], "Cam_Sh010");
        assert_eq!(clips[0].metadata["shot_manager"]["name"], "Sh010");
        assert_eq!(timeline.rate(), Some(25.0));
    }

    #[test]
    fn test_export_path_uses_take_folder() {
        let take = Take::new("Main Take");
        assert_eq!(
            export_file_path(Path::new("/renders"), &take, "otio"),
            PathBuf::from("/renders/Main_Take/Main_Take.otio")
        );
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(vec![scene()]);
        let scene_id = document.scenes[0].id;

        let path = export_edit(&document, scene_id, dir.path(), 25.0, &ExportOptions::default()).unwrap();
        assert_eq!(path, dir.path().join("Main_Take").join("Main_Take.otio"));

        let timeline = shotman_interchange::read_from_file(&path).unwrap();
        assert_eq!(timeline.video_clips().count(), 2);
    }

    #[test]
    fn test_invalid_root_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(vec![scene()]);
        let scene_id = document.scenes[0].id;
        let missing = dir.path().join("missing");

        let err = export_edit(&document, scene_id, &missing, 25.0, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, AddonError::InvalidPath(_)));
        assert!(!missing.exists());

        let err = export_edit(&document, scene_id, Path::new(""), 25.0, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, AddonError::InvalidPath(_)));
    }

    #[test]
    fn test_unsupported_extension_creates_no_folder() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(vec![scene()]);
        let scene_id = document.scenes[0].id;
        let options = ExportOptions {
            file_extension: "edl".to_string(),
            ..Default::default()
        };

        let err = export_edit(&document, scene_id, dir.path(), 25.0, &options).unwrap_err();
        assert!(matches!(
            err,
            AddonError::Interchange(shotman_interchange::InterchangeError::UnsupportedFormat(_))
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
