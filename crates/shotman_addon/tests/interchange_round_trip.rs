// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edit export and import through `.otio` files.

use shotman_addon::otio::{export_edit, import_edit, probe_edit_rate, ExportOptions, ImportOptions};
use shotman_addon::{AddonError, HeadlessHost, Host};
use shotman_interchange::{
    read_from_file, write_to_file, Clip, EditTimeline, RationalTime, TimeRange, Track, TrackKind,
};
use shotman_sequencer::{Document, Scene, SceneId, Shot, ShotManagerProps};
use std::path::Path;

fn host_with_take(shots: Vec<Shot>) -> (HeadlessHost, SceneId) {
    let mut props = ShotManagerProps::new(1_005_073);
    if let Some(take) = props.current_take_mut() {
        for shot in shots {
            take.add_shot(shot);
        }
    }
    let host = HeadlessHost::new(Document::new(vec![Scene::new("Scene", 25).with_shot_manager(props)]));
    let scene = host.document().scenes[0].id;
    (host, scene)
}

fn empty_host() -> (HeadlessHost, SceneId) {
    let host = HeadlessHost::new(Document::new(vec![Scene::new("Scene", 25)]));
    let scene = host.document().scenes[0].id;
    (host, scene)
}

fn triples(host: &HeadlessHost) -> Vec<(String, i64, i64)> {
    host.document().scenes[0]
        .shot_manager
        .as_ref()
        .and_then(|p| p.current_take())
        .map(|t| t.shots().iter().map(|s| (s.name.clone(), s.start(), s.end())).collect())
        .unwrap_or_default()
}

fn plain_options(import_at_frame: i64) -> ImportOptions {
    ImportOptions {
        import_at_frame,
        create_cameras: false,
        use_media_as_camera_bg: false,
        ..Default::default()
    }
}

fn write_edit(dir: &Path, clips: &[(&str, i64, i64)], rate: f64) -> std::path::PathBuf {
    let mut track = Track::new("V1", TrackKind::Video);
    for (name, start, duration) in clips {
        track.push_clip(Clip::new(*name, TimeRange::from_frames(*start, *duration, rate)));
    }
    let mut timeline = EditTimeline::new("Edit");
    timeline.add_track(track);

    let path = dir.join("edit.otio");
    write_to_file(&timeline, &path).unwrap();
    path
}

#[test]
fn export_then_import_reproduces_enabled_shots() {
    let dir = tempfile::tempdir().unwrap();
    let (source, scene) = host_with_take(vec![
        Shot::new("Sh010", 0, 23),
        Shot::new("Sh020", 24, 59),
        Shot::new("Sh015", 60, 71),
    ]);

    let path = export_edit(source.document(), scene, dir.path(), 25.0, &ExportOptions::default()).unwrap();

    let (mut target, scene) = empty_host();
    import_edit(&mut target, scene, &path, &plain_options(100)).unwrap();

    let expected: Vec<_> = triples(&source)
        .into_iter()
        .map(|(name, start, end)| (name, start + 100, end + 100))
        .collect();
    assert_eq!(triples(&target), expected);
}

#[test]
fn export_then_import_keeps_generated_shot_names() {
    let dir = tempfile::tempdir().unwrap();
    let (mut source, scene) = host_with_take(vec![Shot::new("Sh010", 0, 9)]);
    if let Some(take) = source.document_mut().scenes[0]
        .shot_manager
        .as_mut()
        .and_then(|p| p.current_take_mut())
    {
        take.add_shot_unique(Shot::new("Sh010", 10, 19));
        take.add_shot(Shot::new("Intro_v2", 20, 29));
    }
    assert_eq!(
        triples(&source),
        vec![
            ("Sh010".to_string(), 0, 9),
            ("Sh010.000".to_string(), 10, 19),
            ("Intro_v2".to_string(), 20, 29),
        ]
    );

    let path = export_edit(source.document(), scene, dir.path(), 25.0, &ExportOptions::default()).unwrap();

    let (mut target, scene) = empty_host();
    let options = ImportOptions {
        import_at_frame: 0,
        ..Default::default()
    };
    let summary = import_edit(&mut target, scene, &path, &options).unwrap();

    assert!(summary.updated.is_empty());
    assert_eq!(triples(&target), triples(&source));
}

#[test]
fn clip_outside_frame_range_is_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let mut track = Track::new("V1", TrackKind::Video);
    track.push_clip(Clip::new("Sh010", TimeRange::from_frames(0, 10, 25.0)));
    track.push_clip(Clip::new(
        "Sh020",
        TimeRange::new(RationalTime::new(1e30, 25.0), RationalTime::new(10.0, 25.0)),
    ));
    let mut timeline = EditTimeline::new("Edit");
    timeline.add_track(track);
    let path = dir.path().join("edit.otio");
    write_to_file(&timeline, &path).unwrap();

    let (mut host, scene) = empty_host();
    let summary = import_edit(&mut host, scene, &path, &plain_options(25)).unwrap();

    assert_eq!(summary.skipped_clips, vec!["Sh020"]);
    assert_eq!(triples(&host), vec![("Sh010".to_string(), 25, 34)]);
}

#[test]
fn disabled_shots_are_not_exported() {
    let dir = tempfile::tempdir().unwrap();
    let (host, scene) = host_with_take(vec![
        Shot::new("Sh010", 1, 10),
        Shot::new("Sh020", 11, 20).with_enabled(false),
        Shot::new("Sh030", 21, 30),
    ]);

    let path = export_edit(host.document(), scene, dir.path(), 25.0, &ExportOptions::default()).unwrap();
    let timeline = read_from_file(&path).unwrap();

    let names: Vec<_> = timeline.video_clips().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Sh010", "Sh030"]);
    assert_eq!(
        timeline.video_clips().nth(1).and_then(|c| c.source_range),
        Some(TimeRange::from_frames(21, 10, 25.0))
    );
}

#[test]
fn import_keeps_shots_absent_from_edit_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let (mut host, scene) = host_with_take(vec![
        Shot::new("Sh005", 1, 5),
        Shot::new("Sh010", 6, 10),
        Shot::new("Sh099", 11, 20),
    ]);
    let path = write_edit(dir.path(), &[("Sh010", 0, 24), ("Sh020", 24, 12)], 25.0);

    import_edit(&mut host, scene, &path, &plain_options(25)).unwrap();

    assert_eq!(
        triples(&host),
        vec![
            ("Sh005".to_string(), 1, 5),
            ("Sh010".to_string(), 25, 48),
            ("Sh099".to_string(), 11, 20),
            ("Sh020".to_string(), 49, 60),
        ]
    );
}

#[test]
fn invalid_output_root_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (host, scene) = host_with_take(vec![Shot::new("Sh010", 1, 10)]);
    let root = dir.path().join("not_there");

    let err = export_edit(host.document(), scene, &root, 25.0, &ExportOptions::default()).unwrap_err();

    assert!(matches!(err, AddonError::InvalidPath(_)));
    assert!(!root.exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn five_clips_start_at_import_frame_plus_source_start() {
    let dir = tempfile::tempdir().unwrap();
    let clips = [
        ("Sh010", 0, 10),
        ("Sh020", 10, 15),
        ("Sh030", 25, 5),
        ("Sh040", 30, 40),
        ("Sh050", 70, 8),
    ];
    let path = write_edit(dir.path(), &clips, 25.0);
    let (mut host, scene) = empty_host();

    let summary = import_edit(&mut host, scene, &path, &plain_options(25)).unwrap();
    assert_eq!(summary.created.len(), 5);

    let starts: Vec<_> = triples(&host).iter().map(|(_, start, _)| *start).collect();
    let expected: Vec<_> = clips.iter().map(|(_, start, _)| 25 + start).collect();
    assert_eq!(starts, expected);
}

#[test]
fn unreadable_file_leaves_document_unmodified() {
    let dir = tempfile::tempdir().unwrap();
    let (mut host, scene) = host_with_take(vec![Shot::new("Sh010", 1, 10)]);
    let before = host.document().clone();

    let garbage = dir.path().join("edit.otio");
    std::fs::write(&garbage, "{ \"OTIO_SCHEMA\": ").unwrap();
    let err = import_edit(&mut host, scene, &garbage, &ImportOptions::default()).unwrap_err();
    assert!(matches!(err, AddonError::Parse { .. }));

    let xml = dir.path().join("edit.xml");
    std::fs::write(&xml, "<xmeml/>").unwrap();
    let err = import_edit(&mut host, scene, &xml, &ImportOptions::default()).unwrap_err();
    assert!(matches!(err, AddonError::Parse { .. }));

    assert_eq!(host.document(), &before);
}

#[test]
fn rate_mismatch_is_reported_but_imported() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_edit(dir.path(), &[("Sh010", 0, 24)], 24.0);
    let (mut host, scene) = empty_host();

    let check = probe_edit_rate(&host, scene, &path).unwrap();
    assert!(!check.matches());
    assert_eq!(check.scene_fps, 25);

    let summary = import_edit(&mut host, scene, &path, &plain_options(25)).unwrap();
    assert_eq!(summary.rate_check, check);
    assert_eq!(triples(&host), vec![("Sh010".to_string(), 25, 48)]);
}
