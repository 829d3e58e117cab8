// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sound import: audio tracks of an edit become sound strips.

use super::{clip_media_path, read_edit};
use crate::error::{AddonError, Result};
use crate::host::{Host, HostError};
use shotman_interchange::{EditTimeline, TrackKind};
use shotman_sequencer::{SceneId, SoundStrip};
use std::path::{Path, PathBuf};

/// What a sound import did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoundImportSummary {
    /// Number of strips added
    pub strips_added: usize,
    /// Media files referenced by the edit but not found
    pub missing_media: Vec<PathBuf>,
    /// Clips placed outside the frame range
    pub skipped_clips: Vec<String>,
}

/// Import the audio tracks of an edit file
pub fn import_sound(
    host: &mut dyn Host,
    scene_id: SceneId,
    path: &Path,
    import_at_frame: i64,
) -> Result<SoundImportSummary> {
    let timeline = read_edit(path)?;
    tracing::info!("Importing sound tracks of {:?}", path);
    import_sound_timeline(host, scene_id, &timeline, path.parent(), import_at_frame)
}

/// Import the audio tracks of a parsed edit.
///
/// Each audio track goes to its own channel, starting at channel 1. Strips
/// are placed at `import_at_frame` plus the clip position in its track.
pub fn import_sound_timeline(
    host: &mut dyn Host,
    scene_id: SceneId,
    timeline: &EditTimeline,
    media_root: Option<&Path>,
    import_at_frame: i64,
) -> Result<SoundImportSummary> {
    if host.document().scene(scene_id).is_none() {
        return Err(AddonError::SceneNotFound(scene_id));
    }

    let mut summary = SoundImportSummary::default();

    for (channel, track) in (1u32..).zip(timeline.tracks_of_kind(TrackKind::Audio)) {
        for (clip, range_in_track) in track.clips_with_range_in_track() {
            let Some(media) = clip_media_path(clip, media_root) else {
                tracing::debug!("Audio clip {:?} has no media file, skipped", clip.name);
                continue;
            };

            let Some(frame_start) = import_at_frame.checked_add(range_in_track.start_time.to_frames())
            else {
                tracing::warn!("Audio clip {:?} lies outside the scene frame range, skipped", clip.name);
                summary.skipped_clips.push(clip.name.clone());
                continue;
            };

            let strip = SoundStrip {
                name: clip.name.clone(),
                media,
                channel,
                frame_start,
                duration: range_in_track.duration.to_frames(),
            };

            match host.add_sound_strip(scene_id, strip) {
                Ok(()) => summary.strips_added += 1,
                Err(HostError::MediaNotFound(path)) => {
                    tracing::warn!("Sound file not found: {:?}", path);
                    summary.missing_media.push(path);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    tracing::info!("Added {} sound strips", summary.strips_added);
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::HeadlessHost;
    use shotman_interchange::{Clip, MediaReference, RationalTime, TimeRange, Track};
    use shotman_sequencer::Document;

    #[test]
    fn test_audio_clips_placed_by_track_position() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dialog.wav"), b"").unwrap();
        std::fs::write(dir.path().join("music.wav"), b"").unwrap();

        let mut dialog = Track::new("A1", TrackKind::Audio);
        dialog.push_gap(RationalTime::from_frames(12, 25.0));
        dialog.push_clip(
            Clip::new("dialog", TimeRange::from_frames(100, 50, 25.0))
                .with_media(MediaReference::external("dialog.wav")),
        );
        dialog.push_clip(
            Clip::new("lost", TimeRange::from_frames(0, 10, 25.0))
                .with_media(MediaReference::external("lost.wav")),
        );
        let mut music = Track::new("A2", TrackKind::Audio);
        music.push_clip(
            Clip::new("music", TimeRange::from_frames(0, 200, 25.0))
                .with_media(MediaReference::external("music.wav")),
        );

        let mut timeline = EditTimeline::new("Edit");
        timeline.add_track(Track::new("V1", TrackKind::Video));
        timeline.add_track(dialog);
        timeline.add_track(music);

        let mut host = HeadlessHost::new(Document::default());
        let scene = host.document().scenes[0].id;
        let summary = import_sound_timeline(&mut host, scene, &timeline, Some(dir.path()), 25).unwrap();

        assert_eq!(summary.strips_added, 2);
        assert_eq!(summary.missing_media, vec![dir.path().join("lost.wav")]);

        let strips = &host.document().scenes[0].sound_strips;
        assert_eq!((strips[0].channel, strips[0].frame_start, strips[0].duration), (1, 37, 50));
        assert_eq!((strips[1].channel, strips[1].frame_start, strips[1].duration), (2, 25, 200));
    }

    #[test]
    fn test_clip_after_huge_gap_is_skipped() {
        let mut track = Track::new("A1", TrackKind::Audio);
        track.push_gap(RationalTime::new(1e30, 25.0));
        track.push_clip(
            Clip::new("late", TimeRange::from_frames(0, 10, 25.0))
                .with_media(MediaReference::external("/sounds/late.wav")),
        );
        let mut timeline = EditTimeline::new("Edit");
        timeline.add_track(track);

        let mut host = HeadlessHost::new(Document::default());
        let scene = host.document().scenes[0].id;
        let summary = import_sound_timeline(&mut host, scene, &timeline, None, 25).unwrap();

        assert_eq!(summary.strips_added, 0);
        assert_eq!(summary.skipped_clips, vec!["late"]);
        assert!(host.document().scenes[0].sound_strips.is_empty());
    }
}
