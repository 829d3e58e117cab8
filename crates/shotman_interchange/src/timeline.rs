// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edit timeline: tracks of clips with source ranges and media references.
//!
//! The types mirror the OpenTimelineIO JSON schema closely enough to be
//! read from and written to `.otio` files directly.

use crate::time::{RationalTime, TimeRange};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key of the default entry in multi-reference clips
pub const DEFAULT_MEDIA_KEY: &str = "DEFAULT_MEDIA";

/// Free-form metadata attached to timeline objects
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Where a clip's media lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA")]
pub enum MediaReference {
    /// Media file addressed by URL
    #[serde(rename = "ExternalReference.1")]
    External {
        /// URL or path of the media
        target_url: String,
        /// Range of the media that is available
        #[serde(default, skip_serializing_if = "Option::is_none")]
        available_range: Option<TimeRange>,
    },
    /// Media that could not be found
    #[serde(rename = "MissingReference.1")]
    Missing,
    /// Generated media or unsupported reference types
    #[serde(other)]
    Unsupported,
}

impl MediaReference {
    /// External reference without an available range
    pub fn external(target_url: impl Into<String>) -> Self {
        Self::External {
            target_url: target_url.into(),
            available_range: None,
        }
    }

    /// Target URL, if the media is external
    pub fn target_url(&self) -> Option<&str> {
        match self {
            Self::External { target_url, .. } => Some(target_url),
            Self::Missing | Self::Unsupported => None,
        }
    }

    /// Range of the media that is available, if known
    pub fn available_range(&self) -> Option<TimeRange> {
        match self {
            Self::External {
                available_range, ..
            } => *available_range,
            Self::Missing | Self::Unsupported => None,
        }
    }
}

/// A segment of media placed on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    /// Clip name
    #[serde(default)]
    pub name: String,
    /// Used range of the media
    #[serde(default)]
    pub source_range: Option<TimeRange>,
    /// Media reference (single-reference schema)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_reference: Option<MediaReference>,
    /// Media references by key (multi-reference schema)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_references: Option<IndexMap<String, MediaReference>>,
    /// Key of the active entry in `media_references`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_media_reference_key: Option<String>,
    /// Metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Clip {
    /// Create a clip covering `source_range`
    pub fn new(name: impl Into<String>, source_range: TimeRange) -> Self {
        Self {
            name: name.into(),
            source_range: Some(source_range),
            media_reference: None,
            media_references: None,
            active_media_reference_key: None,
            metadata: Metadata::new(),
        }
    }

    /// Builder-style media reference
    pub fn with_media(mut self, media: MediaReference) -> Self {
        self.media_reference = Some(media);
        self
    }

    /// The media reference in use, whichever schema the clip came from
    pub fn media(&self) -> Option<&MediaReference> {
        if let Some(media) = &self.media_reference {
            return Some(media);
        }
        let references = self.media_references.as_ref()?;
        let key = self
            .active_media_reference_key
            .as_deref()
            .unwrap_or(DEFAULT_MEDIA_KEY);
        references.get(key)
    }

    /// Used range: the source range, or the whole available media
    pub fn trimmed_range(&self) -> Option<TimeRange> {
        self.source_range
            .or_else(|| self.media().and_then(MediaReference::available_range))
    }

    /// Rate of the clip's used range
    pub fn rate(&self) -> Option<f64> {
        self.trimmed_range().map(|r| r.rate())
    }

    /// Duration of the used range
    pub fn duration(&self) -> Option<RationalTime> {
        self.trimmed_range().map(|r| r.duration)
    }
}

/// Empty space on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    /// Gap name
    #[serde(default)]
    pub name: String,
    /// Length of the gap
    pub source_range: TimeRange,
}

/// Transition between two adjacent items. Takes no room on the track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// Transition name
    #[serde(default)]
    pub name: String,
    /// Transition kind, such as `SMPTE_Dissolve`
    #[serde(default)]
    pub transition_type: String,
    /// Overlap into the previous item
    pub in_offset: RationalTime,
    /// Overlap into the next item
    pub out_offset: RationalTime,
}

/// Anything that can be placed on a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA")]
pub enum Item {
    /// A clip
    #[serde(rename = "Clip.1", alias = "Clip.2")]
    Clip(Clip),
    /// A gap
    #[serde(rename = "Gap.1")]
    Gap(Gap),
    /// A transition
    #[serde(rename = "Transition.1")]
    Transition(Transition),
    /// Nested stacks and other composables
    #[serde(other)]
    Unsupported,
}

impl Item {
    /// Time the item occupies on its track
    pub fn duration(&self) -> Option<RationalTime> {
        match self {
            Self::Clip(clip) => clip.duration(),
            Self::Gap(gap) => Some(gap.source_range.duration),
            Self::Transition(_) | Self::Unsupported => None,
        }
    }
}

/// Kind of media a track carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrackKind {
    /// Picture
    #[default]
    Video,
    /// Sound
    Audio,
    /// Unknown kind
    #[serde(other)]
    Other,
}

/// An ordered sequence of items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Track.1")]
pub struct Track {
    /// Track name
    #[serde(default)]
    pub name: String,
    /// Media kind
    #[serde(default)]
    pub kind: TrackKind,
    /// Items in order
    #[serde(default)]
    pub children: Vec<Item>,
    /// Metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl Track {
    /// Create an empty track
    pub fn new(name: impl Into<String>, kind: TrackKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
            metadata: Metadata::new(),
        }
    }

    /// Append a clip
    pub fn push_clip(&mut self, clip: Clip) {
        self.children.push(Item::Clip(clip));
    }

    /// Append a gap of `duration`
    pub fn push_gap(&mut self, duration: RationalTime) {
        self.children.push(Item::Gap(Gap {
            name: String::new(),
            source_range: TimeRange::new(RationalTime::new(0.0, duration.rate), duration),
        }));
    }

    /// Clips in order
    pub fn clips(&self) -> impl Iterator<Item = &Clip> {
        self.children.iter().filter_map(|item| match item {
            Item::Clip(clip) => Some(clip),
            _ => None,
        })
    }

    /// Clips with the range each one occupies on the track
    pub fn clips_with_range_in_track(&self) -> Vec<(&Clip, TimeRange)> {
        let mut position: Option<RationalTime> = None;
        let mut result = Vec::new();

        for item in &self.children {
            let Some(duration) = item.duration() else {
                continue;
            };
            let start = position.unwrap_or_else(|| RationalTime::new(0.0, duration.rate));
            if let Item::Clip(clip) = item {
                result.push((clip, TimeRange::new(start, duration.rescaled_to(start.rate))));
            }
            position = Some(start.offset_by(&duration));
        }

        result
    }

    /// Total time taken by the items
    pub fn duration(&self) -> Option<RationalTime> {
        self.children
            .iter()
            .filter_map(Item::duration)
            .reduce(|acc, d| acc.offset_by(&d))
    }
}

/// The track container of a timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Stack.1")]
pub struct Stack {
    /// Stack name
    #[serde(default)]
    pub name: String,
    /// Tracks, bottom to top
    #[serde(default)]
    pub children: Vec<Track>,
}

impl Default for Stack {
    fn default() -> Self {
        Self {
            name: "tracks".to_string(),
            children: Vec::new(),
        }
    }
}

/// An edit: a named stack of tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "Timeline.1")]
pub struct EditTimeline {
    /// Timeline name
    #[serde(default)]
    pub name: String,
    /// Time of the first frame of the edit
    #[serde(default)]
    pub global_start_time: Option<RationalTime>,
    /// Tracks
    #[serde(default)]
    pub tracks: Stack,
    /// Metadata
    #[serde(default)]
    pub metadata: Metadata,
}

impl EditTimeline {
    /// Create an empty timeline
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global_start_time: None,
            tracks: Stack::default(),
            metadata: Metadata::new(),
        }
    }

    /// Append a track
    pub fn add_track(&mut self, track: Track) {
        self.tracks.children.push(track);
    }

    /// All tracks
    pub fn tracks(&self) -> &[Track] {
        &self.tracks.children
    }

    /// Tracks of the given kind
    pub fn tracks_of_kind(&self, kind: TrackKind) -> impl Iterator<Item = &Track> {
        self.tracks.children.iter().filter(move |t| t.kind == kind)
    }

    /// Video clips, track after track, in order
    pub fn video_clips(&self) -> impl Iterator<Item = &Clip> {
        self.tracks_of_kind(TrackKind::Video).flat_map(Track::clips)
    }

    /// Length of the longest track
    pub fn duration(&self) -> Option<RationalTime> {
        self.tracks
            .children
            .iter()
            .filter_map(Track::duration)
            .reduce(|a, b| if b.to_seconds() > a.to_seconds() { b } else { a })
    }

    /// Declared frame rate of the edit
    pub fn rate(&self) -> Option<f64> {
        self.global_start_time
            .map(|t| t.rate)
            .or_else(|| self.duration().map(|d| d.rate))
            .or_else(|| self.video_clips().find_map(Clip::rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clip(name: &str, start: i64, duration: i64) -> Clip {
        Clip::new(name, TimeRange::from_frames(start, duration, 24.0))
    }

    #[test]
    fn test_range_in_track_accounts_for_gaps() {
        let mut track = Track::new("V1", TrackKind::Video);
        track.push_clip(clip("a", 100, 10));
        track.push_gap(RationalTime::from_frames(5, 24.0));
        track.push_clip(clip("b", 0, 20));

        let ranges = track.clips_with_range_in_track();
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].1.start_time.to_frames(), 0);
        assert_eq!(ranges[1].1.start_time.to_frames(), 15);
        assert_eq!(track.duration().map(|d| d.to_frames()), Some(35));
    }

    #[test]
    fn test_timeline_rate_and_duration() {
        let mut timeline = EditTimeline::new("edit");
        assert_eq!(timeline.rate(), None);

        let mut video = Track::new("V1", TrackKind::Video);
        video.push_clip(clip("a", 0, 48));
        let mut audio = Track::new("A1", TrackKind::Audio);
        audio.push_clip(clip("s", 0, 24));
        timeline.add_track(video);
        timeline.add_track(audio);

        assert_eq!(timeline.rate(), Some(24.0));
        assert_eq!(timeline.duration().map(|d| d.to_frames()), Some(48));
        assert_eq!(timeline.video_clips().count(), 1);
    }

    #[test]
    fn test_multi_reference_clip_uses_active_key() {
        let mut references = IndexMap::new();
        references.insert("HIGH".to_string(), MediaReference::external("file:///high.mov"));
        references.insert(
            DEFAULT_MEDIA_KEY.to_string(),
            MediaReference::external("file:///default.mov"),
        );

        let mut c = clip("a", 0, 10);
        c.media_references = Some(references);
        assert_eq!(c.media().and_then(|m| m.target_url()), Some("file:///default.mov"));

        c.active_media_reference_key = Some("HIGH".to_string());
        assert_eq!(c.media().and_then(|m| m.target_url()), Some("file:///high.mov"));
    }

    #[test]
    fn test_clip_without_source_range_uses_available_range() {
        let mut c = clip("a", 0, 10);
        c.source_range = None;
        assert_eq!(c.duration(), None);

        c.media_reference = Some(MediaReference::External {
            target_url: "file:///a.mov".to_string(),
            available_range: Some(TimeRange::from_frames(0, 30, 25.0)),
        });
        assert_eq!(c.duration().map(|d| d.to_frames()), Some(30));
        assert_eq!(c.rate(), Some(25.0));
    }
}
