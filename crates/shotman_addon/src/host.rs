// SPDX-License-Identifier: MIT OR Apache-2.0
//! The host application as seen by the add-on.
//!
//! Every entry point receives a `&mut dyn Host`. The host owns the
//! document and performs the side effects the core cannot: creating camera
//! objects, attaching background videos, turning viewport overlays on and
//! showing messages to the user.

use shotman_sequencer::{BackgroundClip, CameraId, Document, SceneId, SoundStrip};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reported by the host
#[derive(Debug, Error)]
pub enum HostError {
    /// Scene ID unknown to the document
    #[error("Scene not found: {0:?}")]
    SceneNotFound(SceneId),

    /// Camera ID unknown to the scene
    #[error("Camera not found: {0:?}")]
    CameraNotFound(CameraId),

    /// Media file does not exist
    #[error("Media not found: {0:?}")]
    MediaNotFound(PathBuf),

    /// Overlay cannot be drawn in the current context
    #[error("Overlay {0:?} is not available")]
    OverlayUnavailable(Overlay),

    /// Document could not be opened or saved
    #[error("Document error: {0}")]
    Document(#[from] shotman_sequencer::SequencerError),
}

/// Always-on viewport overlays the host does not restore across loads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    /// Shot names drawn over cameras
    ShotNames,
    /// Heads-up display
    Hud,
}

/// Severity of a user-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportLevel {
    /// Information
    Info,
    /// Something the user should know but that did not stop the command
    Warning,
    /// The command was aborted
    Error,
}

/// A message box shown by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Severity
    pub level: ReportLevel,
    /// Message box title
    pub title: String,
    /// Message body
    pub message: String,
}

impl Report {
    /// Create a report
    pub fn new(level: ReportLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Services the host application provides to the add-on
pub trait Host {
    /// The open document
    fn document(&self) -> &Document;

    /// The open document, mutable
    fn document_mut(&mut self) -> &mut Document;

    /// Create a camera object in a scene
    fn create_camera(&mut self, scene: SceneId, name: &str) -> Result<CameraId, HostError>;

    /// Show a movie clip behind a camera view
    fn add_background_video(
        &mut self,
        scene: SceneId,
        camera: CameraId,
        clip: BackgroundClip,
    ) -> Result<(), HostError>;

    /// Place a sound in the scene's sequence editor
    fn add_sound_strip(&mut self, scene: SceneId, strip: SoundStrip) -> Result<(), HostError>;

    /// Turn a viewport overlay on
    fn activate_overlay(&mut self, overlay: Overlay) -> Result<(), HostError>;

    /// Show a message to the user
    fn report(&mut self, report: Report);
}

/// Host without a user interface, backed by a RON document file.
///
/// Reports and overlay activations are recorded so callers can inspect them.
#[derive(Debug)]
pub struct HeadlessHost {
    /// Open document
    document: Document,
    /// Messages shown so far
    reports: Vec<Report>,
    /// Overlays turned on
    active_overlays: Vec<Overlay>,
    /// Whether overlays can be drawn (false when running without a viewport)
    pub overlays_supported: bool,
}

impl HeadlessHost {
    /// Wrap an in-memory document
    pub fn new(document: Document) -> Self {
        Self {
            document,
            reports: Vec::new(),
            active_overlays: Vec::new(),
            overlays_supported: true,
        }
    }

    /// Open a document file
    pub fn open(path: &Path) -> Result<Self, HostError> {
        let document = Document::load(path)?;
        tracing::info!("Opened document {:?} ({} scenes)", path, document.scenes.len());
        Ok(Self::new(document))
    }

    /// Save the document to the file it was loaded from
    pub fn save(&mut self) -> Result<(), HostError> {
        let Some(path) = self.document.path.clone() else {
            return Err(HostError::Document(shotman_sequencer::SequencerError::Io(
                std::io::Error::new(std::io::ErrorKind::NotFound, "Document was never saved"),
            )));
        };
        self.save_as(&path)
    }

    /// Save the document to a new file
    pub fn save_as(&mut self, path: &Path) -> Result<(), HostError> {
        self.document.save(path)?;
        tracing::info!("Saved document {:?}", path);
        Ok(())
    }

    /// Messages shown so far
    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    /// Take and clear the recorded messages
    pub fn take_reports(&mut self) -> Vec<Report> {
        std::mem::take(&mut self.reports)
    }

    /// Overlays turned on so far
    pub fn active_overlays(&self) -> &[Overlay] {
        &self.active_overlays
    }
}

impl Host for HeadlessHost {
    fn document(&self) -> &Document {
        &self.document
    }

    fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    fn create_camera(&mut self, scene: SceneId, name: &str) -> Result<CameraId, HostError> {
        let scene = self
            .document
            .scene_mut(scene)
            .ok_or(HostError::SceneNotFound(scene))?;
        Ok(scene.add_camera(name))
    }

    fn add_background_video(
        &mut self,
        scene: SceneId,
        camera: CameraId,
        clip: BackgroundClip,
    ) -> Result<(), HostError> {
        if !clip.media.exists() {
            return Err(HostError::MediaNotFound(clip.media));
        }
        let scene = self
            .document
            .scene_mut(scene)
            .ok_or(HostError::SceneNotFound(scene))?;
        let camera = scene
            .camera_mut(camera)
            .ok_or(HostError::CameraNotFound(camera))?;
        camera.background_clips.push(clip);
        Ok(())
    }

    fn add_sound_strip(&mut self, scene: SceneId, strip: SoundStrip) -> Result<(), HostError> {
        if !strip.media.exists() {
            return Err(HostError::MediaNotFound(strip.media));
        }
        let scene = self
            .document
            .scene_mut(scene)
            .ok_or(HostError::SceneNotFound(scene))?;
        scene.sound_strips.push(strip);
        Ok(())
    }

    fn activate_overlay(&mut self, overlay: Overlay) -> Result<(), HostError> {
        if !self.overlays_supported {
            return Err(HostError::OverlayUnavailable(overlay));
        }
        if !self.active_overlays.contains(&overlay) {
            self.active_overlays.push(overlay);
        }
        Ok(())
    }

    fn report(&mut self, report: Report) {
        self.reports.push(report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotman_sequencer::Scene;

    #[test]
    fn test_background_video_requires_media() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = HeadlessHost::new(Document::default());
        let scene = host.document().scenes[0].id;
        let camera = host.create_camera(scene, "Cam").unwrap();

        let missing = BackgroundClip::new(dir.path().join("missing.mov"), 1);
        assert!(matches!(
            host.add_background_video(scene, camera, missing),
            Err(HostError::MediaNotFound(_))
        ));

        let media = dir.path().join("sh010.mov");
        std::fs::write(&media, b"").unwrap();
        host.add_background_video(scene, camera, BackgroundClip::new(&media, 1))
            .unwrap();
        let cam = host.document().scenes[0].camera(camera).unwrap();
        assert!(cam.shows_background());
    }

    #[test]
    fn test_unknown_scene() {
        let mut host = HeadlessHost::new(Document::default());
        let other = Scene::new("Other", 25).id;
        assert!(matches!(
            host.create_camera(other, "Cam"),
            Err(HostError::SceneNotFound(_))
        ));
    }

    #[test]
    fn test_overlays_recorded_once() {
        let mut host = HeadlessHost::new(Document::default());
        host.activate_overlay(Overlay::Hud).unwrap();
        host.activate_overlay(Overlay::Hud).unwrap();
        assert_eq!(host.active_overlays(), &[Overlay::Hud]);

        host.overlays_supported = false;
        assert!(host.activate_overlay(Overlay::ShotNames).is_err());
    }

    #[test]
    fn test_save_unsaved_document_fails() {
        let mut host = HeadlessHost::new(Document::default());
        assert!(host.save().is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.ron");
        host.save_as(&path).unwrap();
        host.save().unwrap();

        let reopened = HeadlessHost::open(&path).unwrap();
        assert_eq!(reopened.document().path.as_deref(), Some(path.as_path()));
    }
}
