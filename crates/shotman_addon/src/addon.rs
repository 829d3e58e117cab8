// SPDX-License-Identifier: MIT OR Apache-2.0
//! Add-on registration and document load handling.

use crate::config::AddonConfig;
use crate::error::{AddonError, Result};
use crate::events::{EventBus, EventKind, EventListener, HostEvent};
use crate::host::{Host, Overlay, Report, ReportLevel};
use crate::migration::{MigrationController, MigrationReport};
use crate::play_mode::{select_shot_at_current_frame, JumpToShot, PLAY_MODE_LISTENER};

/// Name of the document load listener
pub const MIGRATION_LISTENER: &str = "shot_manager.check_data_version";

/// Overlays turned back on after a document is loaded
pub const PERSISTENT_OVERLAYS: [Overlay; 2] = [Overlay::ShotNames, Overlay::Hud];

/// The shot manager add-on.
///
/// Holds the preferences and installs the add-on's listeners on the
/// host's event bus.
#[derive(Debug, Clone, Default)]
pub struct ShotManagerAddon {
    config: AddonConfig,
}

impl ShotManagerAddon {
    /// Create the add-on with its preferences
    pub fn new(config: AddonConfig) -> Self {
        Self { config }
    }

    /// Preferences
    pub fn config(&self) -> &AddonConfig {
        &self.config
    }

    /// Subscribe the add-on's listeners. Registering twice is harmless.
    pub fn register(&self, bus: &mut EventBus) {
        bus.subscribe(
            MIGRATION_LISTENER,
            EventKind::LoadPost,
            Box::new(MigrationListener::new(self.config.clone())),
        );
        tracing::info!("Shot Manager v{} registered", env!("CARGO_PKG_VERSION"));
    }

    /// Remove every listener the add-on installed
    pub fn unregister(&self, bus: &mut EventBus) {
        bus.unsubscribe(MIGRATION_LISTENER);
        bus.unsubscribe(PLAY_MODE_LISTENER);
        tracing::info!("Shot Manager unregistered");
    }

    /// Turn play mode on or off for the current scene
    pub fn set_play_mode(&self, bus: &mut EventBus, host: &mut dyn Host, enabled: bool) {
        if enabled {
            bus.subscribe(PLAY_MODE_LISTENER, EventKind::FrameChangePre, Box::new(JumpToShot));
            if let Some(scene) = host.document_mut().current_scene_mut() {
                select_shot_at_current_frame(scene);
            }
        } else {
            bus.unsubscribe(PLAY_MODE_LISTENER);
        }
        tracing::debug!("Play mode {}", if enabled { "on" } else { "off" });
    }

    /// Whether play mode is on
    pub fn is_play_mode_on(&self, bus: &EventBus) -> bool {
        bus.is_subscribed(PLAY_MODE_LISTENER)
    }
}

/// Runs the migration when a document has been loaded
#[derive(Debug)]
pub struct MigrationListener {
    config: AddonConfig,
}

impl MigrationListener {
    /// Create the listener
    pub fn new(config: AddonConfig) -> Self {
        Self { config }
    }
}

impl EventListener for MigrationListener {
    fn on_event(&mut self, event: &HostEvent, host: &mut dyn Host) {
        if *event != HostEvent::DocumentLoaded {
            return;
        }
        // Failures are reported to the user by the handler
        let _ = handle_document_loaded(host, &self.config);
    }
}

/// Migrate the document's shot manager data, then restore the overlays.
///
/// A failing patch is shown to the user and returned. Overlays are restored
/// whatever the migration outcome.
pub fn handle_document_loaded(host: &mut dyn Host, config: &AddonConfig) -> Result<MigrationReport> {
    let result = MigrationController::new(config).run(host.document_mut());

    if let Err(e) = &result {
        tracing::error!("Shot manager data upgrade failed: {}", e);
        host.report(Report::new(
            ReportLevel::Error,
            "Shot Manager Data Upgrade Failed",
            e.to_string(),
        ));
    }

    restore_overlays(host);
    result
}

/// Turn the persistent overlays back on for the current scene.
///
/// Failures are logged and otherwise ignored. Returns the overlays that
/// were turned on.
pub fn restore_overlays(host: &mut dyn Host) -> Vec<Overlay> {
    let has_data = host
        .document()
        .current_scene()
        .is_some_and(|s| s.shot_manager.is_some());
    if !has_data {
        return Vec::new();
    }

    let mut restored = Vec::new();
    for overlay in PERSISTENT_OVERLAYS {
        match host.activate_overlay(overlay) {
            Ok(()) => restored.push(overlay),
            Err(source) => {
                let error = AddonError::OverlayRestore { overlay, source };
                tracing::warn!("{}", error);
            }
        }
    }
    restored
}
