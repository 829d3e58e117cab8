// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shot manager add-on core.
//!
//! This crate provides the parts of the shot manager that do not depend on
//! the host's user interface:
//! - Data version migration when a document is loaded
//! - OpenTimelineIO edit import and export
//! - Sound track import
//! - Play mode that keeps playback inside shots
//!
//! ## Architecture
//!
//! The host application implements [`Host`] and owns an [`EventBus`].
//! [`ShotManagerAddon::register`] installs the add-on's listeners on the bus;
//! every other entry point receives the host explicitly.

pub mod addon;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod host;
pub mod logging;
pub mod migration;
pub mod otio;
pub mod play_mode;
pub mod snapshot;
pub mod version;

pub use addon::{handle_document_loaded, restore_overlays, ShotManagerAddon, MIGRATION_LISTENER};
pub use commands::{CommandStatus, ExportEditCommand, ImportEditCommand, ImportSoundCommand, ShotManagerCommand};
pub use config::AddonConfig;
pub use error::{AddonError, Result};
pub use events::{EventBus, EventKind, EventListener, HostEvent};
pub use host::{HeadlessHost, Host, HostError, Overlay, Report, ReportLevel};
pub use migration::{DataPatch, MigrationController, MigrationReport, PatchError};
pub use otio::{export_edit, import_edit, import_sound, probe_edit_rate, ImportOptions, ImportSummary};
pub use version::{AddonVersion, DataVersion, ADDON_VERSION, LATEST_PATCHABLE_VERSION};
