// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in data patches.

use super::{DataPatch, PatchError};
use shotman_sequencer::{find_first_unique_name, Document, Shot, ShotManagerProps, Take};

/// Patches shipped with the add-on, in ascending version order
pub fn builtin_patches() -> Vec<DataPatch> {
    vec![
        DataPatch::new(1_002_026, "Ensure a current take", ensure_current_take),
        DataPatch::new(1_003_016, "Normalize inverted shot ranges", normalize_shot_ranges),
        DataPatch::new(1_003_061, "Make take and shot names unique", make_names_unique),
    ]
}

fn for_each_dataset(
    document: &mut Document,
    mut f: impl FnMut(&str, &mut ShotManagerProps) -> Result<(), PatchError>,
) -> Result<(), PatchError> {
    for scene in document.scenes.iter_mut() {
        if let Some(props) = scene.shot_manager.as_mut() {
            f(&scene.name, props)?;
        }
    }
    Ok(())
}

/// Datasets from before takes existed have none; indices may point past the end
fn ensure_current_take(document: &mut Document) -> Result<(), PatchError> {
    for_each_dataset(document, |scene, props| {
        if props.takes.is_empty() {
            tracing::info!("Scene {}: adding default take", scene);
            props.takes.push(Take::default());
        }
        if props.current_take_index >= props.takes.len() {
            tracing::warn!(
                "Scene {}: current take index {} out of range, reset to 0",
                scene,
                props.current_take_index
            );
            props.current_take_index = 0;
            props.current_shot_index = None;
        }

        let shot_count = props.current_take().map(Take::shot_count).unwrap_or(0);
        if props.current_shot_index.is_some_and(|i| i >= shot_count) {
            props.current_shot_index = None;
        }
        Ok(())
    })
}

fn normalize_shot_ranges(document: &mut Document) -> Result<(), PatchError> {
    for_each_dataset(document, |scene, props| {
        for take in props.takes.iter_mut() {
            let fixed = take
                .shots_mut()
                .iter_mut()
                .map(Shot::normalize_range)
                .filter(|changed| *changed)
                .count();
            if fixed > 0 {
                tracing::info!("Scene {}, take {}: fixed {} shot ranges", scene, take.name, fixed);
            }
        }
        Ok(())
    })
}

fn make_names_unique(document: &mut Document) -> Result<(), PatchError> {
    for_each_dataset(document, |scene, props| {
        let renamed = rename_duplicates(props.takes.iter_mut().map(|t| &mut t.name));
        if renamed > 0 {
            tracing::info!("Scene {}: renamed {} duplicate takes", scene, renamed);
        }

        for take in props.takes.iter_mut() {
            let renamed = rename_duplicates(take.shots_mut().iter_mut().map(|s| &mut s.name));
            if renamed > 0 {
                tracing::info!("Scene {}, take {}: renamed {} duplicate shots", scene, take.name, renamed);
            }
        }
        Ok(())
    })
}

/// Rename every name already used earlier in the list. The first one keeps its name.
fn rename_duplicates<'a>(names: impl Iterator<Item = &'a mut String>) -> usize {
    let mut names: Vec<&mut String> = names.collect();
    let mut renamed = 0;

    for i in 0..names.len() {
        let duplicate = names[..i].iter().any(|n| n.as_str() == names[i].as_str());
        if duplicate {
            let unique = find_first_unique_name(&names[i], names.iter().map(|n| n.as_str()));
            *names[i] = unique;
            renamed += 1;
        }
    }
    renamed
}
