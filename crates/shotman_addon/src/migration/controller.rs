// SPDX-License-Identifier: MIT OR Apache-2.0
//! Migration controller run after a document is loaded.

use super::{builtin_patches, DataPatch};
use crate::config::AddonConfig;
use crate::error::{AddonError, Result};
use crate::snapshot::DocumentSnapshot;
use crate::version::{DataVersion, ADDON_VERSION, LATEST_PATCHABLE_VERSION};
use shotman_sequencer::{Document, SceneId};

/// What a migration pass would do, computed without touching the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPlan {
    /// Scenes older than the latest patchable version, in document order
    pub scenes_to_upgrade: Vec<SceneId>,
    /// Lowest data version among the scenes to upgrade
    pub lower_scene_version: Option<DataVersion>,
    /// Scenes that only need to be stamped with the current version
    pub scenes_to_restamp: Vec<SceneId>,
}

impl MigrationPlan {
    /// Whether the pass has nothing to do
    pub fn is_empty(&self) -> bool {
        self.scenes_to_upgrade.is_empty() && self.scenes_to_restamp.is_empty()
    }
}

/// Outcome of a migration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// The document was never saved and was left alone
    pub skipped: bool,
    /// Scenes that went through the patches
    pub scenes_to_upgrade: Vec<SceneId>,
    /// Lowest data version found before patching
    pub lower_scene_version: Option<DataVersion>,
    /// Versions of the patches applied, in order
    pub applied_patches: Vec<DataVersion>,
    /// Scenes stamped with the current version without patching
    pub restamped_scenes: Vec<SceneId>,
}

/// Brings shot manager data of every scene up to the current version
#[derive(Debug)]
pub struct MigrationController {
    patches: Vec<DataPatch>,
    latest_patchable: DataVersion,
    current: DataVersion,
    transactional: bool,
}

impl MigrationController {
    /// Controller with the built-in patches and the add-on's own versions
    pub fn new(config: &AddonConfig) -> Self {
        Self::with_patches(builtin_patches(), LATEST_PATCHABLE_VERSION, ADDON_VERSION.to_int())
            .transactional(config.transactional_migration)
    }

    /// Controller with a custom patch list. Patches are sorted by version.
    pub fn with_patches(
        mut patches: Vec<DataPatch>,
        latest_patchable: DataVersion,
        current: DataVersion,
    ) -> Self {
        patches.sort_by_key(|p| p.version);
        Self {
            patches,
            latest_patchable,
            current,
            transactional: false,
        }
    }

    /// Roll the whole document back when a patch fails
    pub fn transactional(mut self, enabled: bool) -> Self {
        self.transactional = enabled;
        self
    }

    /// Version scenes end up with
    pub fn current_version(&self) -> DataVersion {
        self.current
    }

    /// Classify the scenes of a document
    pub fn plan(&self, document: &Document) -> MigrationPlan {
        let mut plan = MigrationPlan::default();

        for scene in &document.scenes {
            let Some(props) = scene.shot_manager.as_ref() else {
                continue;
            };
            let version = props.data_version;

            if version <= 0 || version < self.latest_patchable {
                tracing::debug!("Scene {} needs upgrade from data version {}", scene.name, version);
                plan.scenes_to_upgrade.push(scene.id);
                plan.lower_scene_version = Some(match plan.lower_scene_version {
                    Some(lower) => lower.min(version),
                    None => version,
                });
            } else if version < self.current {
                plan.scenes_to_restamp.push(scene.id);
            }
        }

        plan
    }

    /// Run the migration pass.
    ///
    /// On patch failure the remaining patches are skipped and scenes keep the
    /// version of the last patch that succeeded, unless the controller is
    /// transactional, in which case the document is restored as it was.
    pub fn run(&self, document: &mut Document) -> Result<MigrationReport> {
        if document.is_unsaved() {
            tracing::debug!("Document was never saved, skipping data version check");
            return Ok(MigrationReport {
                skipped: true,
                ..Default::default()
            });
        }

        let plan = self.plan(document);
        let mut report = MigrationReport {
            scenes_to_upgrade: plan.scenes_to_upgrade.clone(),
            lower_scene_version: plan.lower_scene_version,
            ..Default::default()
        };
        if plan.is_empty() {
            return Ok(report);
        }

        let snapshot = if self.transactional && !plan.scenes_to_upgrade.is_empty() {
            Some(DocumentSnapshot::capture(document)?)
        } else {
            None
        };

        stamp(document, &plan.scenes_to_restamp, self.current);
        report.restamped_scenes = plan.scenes_to_restamp.clone();

        if let Some(mut lower) = plan.lower_scene_version {
            tracing::info!(
                "Upgrading shot manager data of {} scenes from version {}",
                plan.scenes_to_upgrade.len(),
                lower
            );

            for patch in &self.patches {
                if patch.version <= lower {
                    continue;
                }

                tracing::info!("Applying data patch {}: {}", patch.version, patch.description);
                if let Err(source) = patch.apply(document) {
                    tracing::error!("Data patch {} failed: {}", patch.version, source);
                    if let Some(snapshot) = &snapshot {
                        snapshot.restore(document)?;
                        tracing::warn!("Document restored to its state before migration");
                    }
                    return Err(AddonError::PatchFailure {
                        version: patch.version,
                        source,
                    });
                }

                stamp(document, &plan.scenes_to_upgrade, patch.version);
                lower = patch.version;
                report.applied_patches.push(patch.version);
            }

            if lower < self.current {
                stamp(document, &plan.scenes_to_upgrade, self.current);
            }
        }

        tracing::info!(
            "Shot manager data at version {} ({} patches applied)",
            self.current,
            report.applied_patches.len()
        );
        Ok(report)
    }
}

/// Raise the data version of the given scenes to `version`. Never lowers it.
fn stamp(document: &mut Document, scenes: &[SceneId], version: DataVersion) {
    for scene in document.scenes.iter_mut().filter(|s| scenes.contains(&s.id)) {
        if let Some(props) = scene.shot_manager.as_mut() {
            if props.data_version < version {
                props.data_version = version;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::migration::PatchError;
    use shotman_sequencer::{Scene, ShotManagerProps};
    use std::cell::RefCell;
    use std::path::PathBuf;
    use std::rc::Rc;

    const CURRENT: DataVersion = 1_005_073;

    fn saved_document(versions: &[DataVersion]) -> Document {
        let scenes = versions
            .iter()
            .enumerate()
            .map(|(i, v)| Scene::new(format!("Scene{i}"), 25).with_shot_manager(ShotManagerProps::new(*v)))
            .collect();
        let mut document = Document::new(scenes);
        document.path = Some(PathBuf::from("shots.ron"));
        document
    }

    fn versions(document: &Document) -> Vec<DataVersion> {
        document
            .scenes
            .iter()
            .filter_map(|s| s.shot_manager.as_ref().map(|p| p.data_version))
            .collect()
    }

    fn recording_patches(log: &Rc<RefCell<Vec<DataVersion>>>) -> Vec<DataPatch> {
        [1_003_061, 1_002_026, 1_003_016]
            .into_iter()
            .map(|version| {
                let log = log.clone();
                DataPatch::new(version, "record", move |_doc: &mut Document| {
                    log.borrow_mut().push(version);
                    Ok(())
                })
            })
            .collect()
    }

    #[test]
    fn test_unsaved_document_skipped() {
        let mut document = saved_document(&[0]);
        document.path = None;
        let controller = MigrationController::new(&AddonConfig::default());

        let report = controller.run(&mut document).unwrap();
        assert!(report.skipped);
        assert_eq!(versions(&document), vec![0]);
    }

    #[test]
    fn test_plan_classifies_scenes() {
        let mut document = saved_document(&[0, 1_003_016, 1_004_000, CURRENT]);
        document.scenes.push(Scene::new("NoData", 25));
        let controller = MigrationController::with_patches(Vec::new(), 1_003_061, CURRENT);

        let plan = controller.plan(&document);
        assert_eq!(plan.scenes_to_upgrade, vec![document.scenes[0].id, document.scenes[1].id]);
        assert_eq!(plan.lower_scene_version, Some(0));
        assert_eq!(plan.scenes_to_restamp, vec![document.scenes[2].id]);
    }

    #[test]
    fn test_patches_sorted_and_applied_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut document = saved_document(&[0, -1, 1_002_000]);
        let controller = MigrationController::with_patches(recording_patches(&log), 1_003_061, CURRENT);

        let report = controller.run(&mut document).unwrap();
        assert_eq!(*log.borrow(), vec![1_002_026, 1_003_016, 1_003_061]);
        assert_eq!(report.applied_patches, vec![1_002_026, 1_003_016, 1_003_061]);
        assert_eq!(versions(&document), vec![CURRENT; 3]);
    }

    #[test]
    fn test_only_newer_patches_run() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut document = saved_document(&[1_003_016]);
        let controller = MigrationController::with_patches(recording_patches(&log), 1_003_061, CURRENT);

        controller.run(&mut document).unwrap();
        assert_eq!(*log.borrow(), vec![1_003_061]);
    }

    #[test]
    fn test_failure_keeps_last_successful_version() {
        let patches = vec![
            DataPatch::new(1_002_026, "ok", |_: &mut Document| Ok(())),
            DataPatch::new(1_003_016, "fails", |_: &mut Document| {
                Err(PatchError::Invalid("broken take".to_string()))
            }),
            DataPatch::new(1_003_061, "never", |_: &mut Document| Ok(())),
        ];
        let mut document = saved_document(&[0]);
        let controller = MigrationController::with_patches(patches, 1_003_061, CURRENT);

        let err = controller.run(&mut document).unwrap_err();
        assert!(matches!(err, AddonError::PatchFailure { version: 1_003_016, .. }));
        assert_eq!(versions(&document), vec![1_002_026]);
    }

    #[test]
    fn test_transactional_failure_restores_document() {
        let patches = vec![
            DataPatch::new(1_002_026, "ok", |_: &mut Document| Ok(())),
            DataPatch::new(1_003_016, "fails", |_: &mut Document| {
                Err(PatchError::Invalid("broken take".to_string()))
            }),
        ];
        let mut document = saved_document(&[0, 1_004_000]);
        let controller =
            MigrationController::with_patches(patches, 1_003_061, CURRENT).transactional(true);

        assert!(controller.run(&mut document).is_err());
        assert_eq!(versions(&document), vec![0, 1_004_000]);
        assert_eq!(document.path, Some(PathBuf::from("shots.ron")));
    }
}
