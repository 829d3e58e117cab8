// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edit interchange for the shot manager.
//!
//! This crate provides the edit timeline exchanged with editing tools:
//! - Rational times and ranges
//! - Tracks of clips, gaps and transitions
//! - Media references
//! - OpenTimelineIO JSON reading and writing
//!
//! ## Architecture
//!
//! The timeline types are serde models of the `.otio` schema, so the codec
//! is a thin layer over `serde_json`. Everything that maps timelines onto
//! shots lives in the add-on crate.
//!
//! Only the OpenTimelineIO JSON container is read and written. Final Cut
//! Pro XML and other editorial formats are rejected with
//! [`InterchangeError::UnsupportedFormat`]; convert them to `.otio` first.

pub mod codec;
pub mod error;
pub mod names;
pub mod time;
pub mod timeline;
pub mod uri;

pub use codec::{check_format, read_from_file, read_from_string, write_to_file, write_to_string, OTIO_EXTENSION};
pub use error::{InterchangeError, Result};
pub use names::reformat_shot_name;
pub use time::{RationalTime, TimeRange};
pub use timeline::{Clip, EditTimeline, Gap, Item, MediaReference, Metadata, Stack, Track, TrackKind, Transition};
pub use uri::{file_path_from_uri, uri_from_file_path};
