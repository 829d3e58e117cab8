// SPDX-License-Identifier: MIT OR Apache-2.0
//! Add-on preferences.

use crate::error::{AddonError, Result};
use crate::otio::ImportOptions;
use serde::{Deserialize, Serialize};
use shotman_interchange::OTIO_EXTENSION;
use std::path::{Path, PathBuf};

/// Preferences file name inside the host's config folder
pub const CONFIG_FILE_NAME: &str = "shot_manager.ron";

/// Current preferences format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Add-on preferences, passed to every entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddonConfig {
    /// Preferences format version
    pub version: u32,
    /// Verbose logging for the add-on
    pub debug: bool,
    /// Extra `tracing` filter directives, e.g. `shotman_interchange=trace`
    pub log_filter: Option<String>,
    /// Restore the document when a data patch fails instead of keeping
    /// the patches that succeeded
    pub transactional_migration: bool,
    /// Defaults of the import dialog
    pub import: ImportOptions,
    /// Extension of exported edit files
    pub export_extension: String,
}

impl Default for AddonConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            debug: false,
            log_filter: None,
            transactional_migration: false,
            import: ImportOptions::default(),
            export_extension: OTIO_EXTENSION.to_string(),
        }
    }
}

impl AddonConfig {
    /// Load preferences from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AddonConfig =
            ron::from_str(&content).map_err(|e| AddonError::Config(e.to_string()))?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(AddonError::Config(format!(
                "Preferences version {} is newer than supported version {}",
                config.version, CONFIG_FORMAT_VERSION
            )));
        }

        Ok(config)
    }

    /// Load preferences from a folder, falling back to defaults if the file is missing
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let path = Self::config_file_path(config_dir);
        if path.exists() {
            Self::load(&path)
        } else {
            tracing::debug!("No preferences at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Save preferences to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);

        let content =
            ron::ser::to_string_pretty(self, config).map_err(|e| AddonError::Config(e.to_string()))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the preferences file path for a config folder
    pub fn config_file_path(config_dir: &Path) -> PathBuf {
        config_dir.join(CONFIG_FILE_NAME)
    }
}
