// SPDX-License-Identifier: MIT OR Apache-2.0
//! Persisted document: scenes, their cameras and shot manager datasets.
//!
//! The document is owned by the host application. This crate only gives it
//! a concrete shape so it can be stored as RON and edited in place.

use crate::camera::{Camera, CameraId};
use crate::error::SequencerError;
use crate::naming::find_first_unique_name;
use crate::take::Take;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Current document file format version
pub const DOCUMENT_FORMAT_VERSION: u32 = 1;

/// Unique identifier for a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneId(pub Uuid);

impl SceneId {
    /// Create a new random scene ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneId {
    fn default() -> Self {
        Self::new()
    }
}

/// A sound placed in the scene's sequence editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoundStrip {
    /// Strip name
    pub name: String,
    /// Sound file
    pub media: PathBuf,
    /// Sequencer channel (1-based)
    pub channel: u32,
    /// First frame in the scene
    pub frame_start: i64,
    /// Length in frames
    pub duration: i64,
}

/// Shot manager data attached to a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotManagerProps {
    /// Data version stamped by the add-on; `<= 0` means never stamped
    #[serde(default)]
    pub data_version: i32,
    /// Takes, in display order
    #[serde(default)]
    pub takes: Vec<Take>,
    /// Index of the current take
    #[serde(default)]
    pub current_take_index: usize,
    /// Index of the current shot in the current take
    #[serde(default)]
    pub current_shot_index: Option<usize>,
    /// Root folder of render and export outputs
    #[serde(default)]
    pub render_root_path: PathBuf,
    /// Draw shot names over cameras in the 3D view
    #[serde(default)]
    pub display_shotname_in_3dviewport: bool,
    /// Draw the heads-up display in the 3D view
    #[serde(default)]
    pub display_hud_in_3dviewport: bool,
}

impl ShotManagerProps {
    /// Create a dataset stamped with `data_version` and one empty take
    pub fn new(data_version: i32) -> Self {
        Self {
            data_version,
            takes: vec![Take::default()],
            current_take_index: 0,
            current_shot_index: None,
            render_root_path: PathBuf::new(),
            display_shotname_in_3dviewport: false,
            display_hud_in_3dviewport: false,
        }
    }

    /// Get the current take
    pub fn current_take(&self) -> Option<&Take> {
        self.takes.get(self.current_take_index)
    }

    /// Get the current take, mutable
    pub fn current_take_mut(&mut self) -> Option<&mut Take> {
        self.takes.get_mut(self.current_take_index)
    }

    /// Find a take by name
    pub fn take_by_name(&self, name: &str) -> Option<&Take> {
        self.takes.iter().find(|t| t.name == name)
    }

    /// Add a take. Names must be unique within the scene.
    pub fn add_take(&mut self, take: Take) -> Result<usize, SequencerError> {
        if self.take_by_name(&take.name).is_some() {
            return Err(SequencerError::DuplicateTakeName(take.name));
        }
        self.takes.push(take);
        Ok(self.takes.len() - 1)
    }

    /// Make the named take current
    pub fn set_current_take(&mut self, name: &str) -> Result<(), SequencerError> {
        let index = self
            .takes
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| SequencerError::TakeNotFound(name.to_string()))?;
        self.current_take_index = index;
        self.current_shot_index = None;
        Ok(())
    }

    /// First free take name based on `name`
    pub fn unique_take_name(&self, name: &str) -> String {
        find_first_unique_name(name, self.takes.iter().map(|t| t.name.as_str()))
    }

    /// Check that the render root is an existing folder
    pub fn is_render_root_path_valid(&self) -> bool {
        !self.render_root_path.as_os_str().is_empty() && self.render_root_path.is_dir()
    }
}

impl Default for ShotManagerProps {
    fn default() -> Self {
        Self::new(0)
    }
}

/// A scene of the host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique scene ID
    pub id: SceneId,
    /// Scene name
    pub name: String,
    /// Scene frame rate
    pub fps: u32,
    /// Current frame
    #[serde(default)]
    pub frame_current: i64,
    /// Camera objects
    #[serde(default)]
    cameras: IndexMap<CameraId, Camera>,
    /// Sounds in the sequence editor
    #[serde(default)]
    pub sound_strips: Vec<SoundStrip>,
    /// Shot manager dataset, if the add-on was ever used in this scene
    #[serde(default)]
    pub shot_manager: Option<ShotManagerProps>,
}

impl Scene {
    /// Create a scene without shot manager data
    pub fn new(name: impl Into<String>, fps: u32) -> Self {
        Self {
            id: SceneId::new(),
            name: name.into(),
            fps,
            frame_current: 1,
            cameras: IndexMap::new(),
            sound_strips: Vec::new(),
            shot_manager: None,
        }
    }

    /// Builder-style dataset attachment
    pub fn with_shot_manager(mut self, props: ShotManagerProps) -> Self {
        self.shot_manager = Some(props);
        self
    }

    /// Add a camera, renaming it if the name is taken
    pub fn add_camera(&mut self, name: &str) -> CameraId {
        let name = find_first_unique_name(name, self.cameras.values().map(|c| c.name.as_str()));
        let camera = Camera::new(name);
        let id = camera.id;
        self.cameras.insert(id, camera);
        id
    }

    /// Get a camera
    pub fn camera(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.get(&id)
    }

    /// Get a mutable camera
    pub fn camera_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.get_mut(&id)
    }

    /// Find a camera by object name
    pub fn camera_by_name(&self, name: &str) -> Option<&Camera> {
        self.cameras.values().find(|c| c.name == name)
    }

    /// All cameras
    pub fn cameras(&self) -> impl Iterator<Item = &Camera> {
        self.cameras.values()
    }

    /// Get camera count
    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }
}

/// The host document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// File format version
    pub version: u32,
    /// File the document was loaded from; `None` for a never-saved document
    #[serde(skip)]
    pub path: Option<PathBuf>,
    /// Scenes in the document
    pub scenes: Vec<Scene>,
    /// Index of the scene shown in the UI
    #[serde(default)]
    pub current_scene: usize,
}

impl Document {
    /// Create an unsaved document
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            version: DOCUMENT_FORMAT_VERSION,
            path: None,
            scenes,
            current_scene: 0,
        }
    }

    /// Load a document from a RON file
    pub fn load(path: &Path) -> Result<Self, SequencerError> {
        let content = std::fs::read_to_string(path)?;
        let mut document = Self::from_ron(&content)?;

        if document.version > DOCUMENT_FORMAT_VERSION {
            return Err(SequencerError::UnsupportedFormat {
                found: document.version,
                supported: DOCUMENT_FORMAT_VERSION,
            });
        }

        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Save the document to a RON file and remember the path
    pub fn save(&mut self, path: &Path) -> Result<(), SequencerError> {
        std::fs::write(path, self.to_ron()?)?;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Serialize to RON text
    pub fn to_ron(&self) -> Result<String, SequencerError> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        ron::ser::to_string_pretty(self, config)
            .map_err(|e| SequencerError::Serialization(e.to_string()))
    }

    /// Parse RON text
    pub fn from_ron(content: &str) -> Result<Self, SequencerError> {
        ron::from_str(content).map_err(|e| SequencerError::Serialization(e.to_string()))
    }

    /// Whether the document was never written to disk
    pub fn is_unsaved(&self) -> bool {
        self.path.is_none()
    }

    /// Get a scene by ID
    pub fn scene(&self, id: SceneId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    /// Get a mutable scene by ID
    pub fn scene_mut(&mut self, id: SceneId) -> Option<&mut Scene> {
        self.scenes.iter_mut().find(|s| s.id == id)
    }

    /// Scene shown in the UI
    pub fn current_scene(&self) -> Option<&Scene> {
        self.scenes.get(self.current_scene)
    }

    /// Scene shown in the UI, mutable
    pub fn current_scene_mut(&mut self) -> Option<&mut Scene> {
        self.scenes.get_mut(self.current_scene)
    }

    /// Shot manager datasets of every scene that has one
    pub fn shot_manager_props_mut(&mut self) -> impl Iterator<Item = &mut ShotManagerProps> {
        self.scenes.iter_mut().filter_map(|s| s.shot_manager.as_mut())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(vec![Scene::new("Scene", 25)])
    }
}
