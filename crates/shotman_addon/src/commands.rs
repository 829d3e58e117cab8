// SPDX-License-Identifier: MIT OR Apache-2.0
//! User commands wrapping import and export.
//!
//! Commands never fail towards the host: errors are shown through
//! [`Host::report`] and the command returns [`CommandStatus::Cancelled`].

use crate::config::AddonConfig;
use crate::error::AddonError;
use crate::host::{Host, Report, ReportLevel};
use crate::otio::{export_edit, import_edit, import_sound, ExportOptions, ImportOptions};
use shotman_sequencer::SceneId;
use std::path::PathBuf;

const EXPORT_ABORTED: &str = "OpenTimelineIO Export Aborted";
const IMPORT_ABORTED: &str = "OpenTimelineIO Import Aborted";

/// Outcome of a command, as seen by the host's undo system
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The command ran; the document may have changed
    Finished,
    /// The command stopped without changing the document
    Cancelled,
}

/// A command the user can run from the shot manager panel
pub trait ShotManagerCommand {
    /// Get command description
    fn description(&self) -> &str;

    /// Execute the command
    fn execute(&self, host: &mut dyn Host, config: &AddonConfig) -> CommandStatus;
}

/// Scene a command works on: the given one or the current scene
fn target_scene(host: &dyn Host, scene: Option<SceneId>) -> Option<SceneId> {
    scene.or_else(|| host.document().current_scene().map(|s| s.id))
}

fn report_failure(host: &mut dyn Host, title: &str, error: &AddonError) -> CommandStatus {
    tracing::error!("{}: {}", title, error);
    host.report(Report::new(ReportLevel::Error, title, error.to_string()));
    CommandStatus::Cancelled
}

/// Export the current take to the render root folder
#[derive(Debug, Clone, Default)]
pub struct ExportEditCommand {
    /// Scene to export, the current scene if `None`
    pub scene: Option<SceneId>,
}

impl ShotManagerCommand for ExportEditCommand {
    fn description(&self) -> &str {
        "Export edit"
    }

    fn execute(&self, host: &mut dyn Host, config: &AddonConfig) -> CommandStatus {
        let Some(scene_id) = target_scene(host, self.scene) else {
            return CommandStatus::Cancelled;
        };
        let Some(scene) = host.document().scene(scene_id) else {
            return report_failure(host, EXPORT_ABORTED, &AddonError::SceneNotFound(scene_id));
        };

        let root_valid = scene
            .shot_manager
            .as_ref()
            .is_some_and(|p| p.is_render_root_path_valid());
        if !root_valid {
            tracing::error!("Edit export aborted before start: invalid root path");
            host.report(Report::new(
                ReportLevel::Error,
                EXPORT_ABORTED,
                "Render root path is invalid",
            ));
            return CommandStatus::Cancelled;
        }

        let root = scene
            .shot_manager
            .as_ref()
            .map(|p| p.render_root_path.clone())
            .unwrap_or_default();
        let fps = f64::from(scene.fps);

        match export_edit(host.document(), scene_id, &root, fps, &ExportOptions::from(config)) {
            Ok(path) => {
                host.report(Report::new(
                    ReportLevel::Info,
                    "OpenTimelineIO Export",
                    format!("Edit exported to {}", path.display()),
                ));
                CommandStatus::Finished
            }
            Err(e) => report_failure(host, EXPORT_ABORTED, &e),
        }
    }
}

/// Import or update shots from an edit file
#[derive(Debug, Clone)]
pub struct ImportEditCommand {
    /// Edit file
    pub path: PathBuf,
    /// Scene to import into, the current scene if `None`
    pub scene: Option<SceneId>,
    /// Import options, the configured defaults if `None`
    pub options: Option<ImportOptions>,
}

impl ImportEditCommand {
    /// Import `path` into the current scene with the configured options
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scene: None,
            options: None,
        }
    }

    /// Builder-style options
    pub fn with_options(mut self, options: ImportOptions) -> Self {
        self.options = Some(options);
        self
    }
}

impl ShotManagerCommand for ImportEditCommand {
    fn description(&self) -> &str {
        "Import/update shots from edit file"
    }

    fn execute(&self, host: &mut dyn Host, config: &AddonConfig) -> CommandStatus {
        let Some(scene_id) = target_scene(host, self.scene) else {
            return CommandStatus::Cancelled;
        };
        let options = self.options.as_ref().unwrap_or(&config.import);

        let summary = match import_edit(host, scene_id, &self.path, options) {
            Ok(summary) => summary,
            Err(e) => return report_failure(host, IMPORT_ABORTED, &e),
        };

        if !summary.rate_check.matches() {
            host.report(Report::new(
                ReportLevel::Warning,
                "OpenTimelineIO Import",
                format!(
                    "Scene fps is {}, imported edit is {}",
                    summary.rate_check.scene_fps,
                    summary.rate_check.edit_rate.unwrap_or_default()
                ),
            ));
        }
        if !summary.missing_media.is_empty() {
            host.report(Report::new(
                ReportLevel::Warning,
                "OpenTimelineIO Import",
                format!("{} media files not found", summary.missing_media.len()),
            ));
        }

        CommandStatus::Finished
    }
}

/// Import the sound tracks of an edit file
#[derive(Debug, Clone)]
pub struct ImportSoundCommand {
    /// Edit file
    pub path: PathBuf,
    /// Scene to import into, the current scene if `None`
    pub scene: Option<SceneId>,
}

impl ImportSoundCommand {
    /// Import the sounds of `path` into the current scene
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            scene: None,
        }
    }
}

impl ShotManagerCommand for ImportSoundCommand {
    fn description(&self) -> &str {
        "Import sound tracks from edit file"
    }

    fn execute(&self, host: &mut dyn Host, config: &AddonConfig) -> CommandStatus {
        let Some(scene_id) = target_scene(host, self.scene) else {
            return CommandStatus::Cancelled;
        };

        match import_sound(host, scene_id, &self.path, config.import.import_at_frame) {
            Ok(summary) => {
                if !summary.missing_media.is_empty() {
                    host.report(Report::new(
                        ReportLevel::Warning,
                        "OpenTimelineIO Sound Import",
                        format!("{} sound files not found", summary.missing_media.len()),
                    ));
                }
                CommandStatus::Finished
            }
            Err(e) => report_failure(host, IMPORT_ABORTED, &e),
        }
    }
}
