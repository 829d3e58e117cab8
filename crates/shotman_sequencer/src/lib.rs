// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot and take data model for the shot manager.
//!
//! This crate provides the persisted data the shot manager edits:
//! - Documents made of scenes
//! - Shot manager datasets stamped with a data version
//! - Takes holding ordered shots
//! - Cameras with background video clips
//!
//! ## Architecture
//!
//! The document belongs to the host application. Everything here is plain
//! serde data so the host can persist it as RON and the add-on can mutate
//! fields in place.

pub mod camera;
pub mod document;
pub mod error;
pub mod naming;
pub mod shot;
pub mod take;

pub use camera::{BackgroundClip, Camera, CameraId, ProxyRenderSize};
pub use document::{Document, Scene, SceneId, ShotManagerProps, SoundStrip, DOCUMENT_FORMAT_VERSION};
pub use error::SequencerError;
pub use naming::{find_first_unique_name, path_compliant_name};
pub use shot::Shot;
pub use take::Take;
