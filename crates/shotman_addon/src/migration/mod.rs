// SPDX-License-Identifier: MIT OR Apache-2.0
//! Data version migration.
//!
//! Every scene holding shot manager data is stamped with the add-on version
//! that last wrote it. When a document is loaded, scenes written by a
//! release older than [`LATEST_PATCHABLE_VERSION`](crate::version::LATEST_PATCHABLE_VERSION)
//! go through the data patches in ascending version order. Newer scenes are
//! only restamped.

mod controller;
mod patches;

pub use controller::{MigrationController, MigrationPlan, MigrationReport};
pub use patches::builtin_patches;

use crate::version::DataVersion;
use shotman_sequencer::{Document, SequencerError};
use std::fmt;
use thiserror::Error;

/// Errors raised by a data patch
#[derive(Debug, Error)]
pub enum PatchError {
    /// Shot data could not be fixed
    #[error("Shot data error: {0}")]
    Sequencer(#[from] SequencerError),

    /// Data is in a state the patch cannot handle
    #[error("Invalid data: {0}")]
    Invalid(String),
}

/// Patch body: fixes the whole document in place
pub type PatchFn = Box<dyn Fn(&mut Document) -> Result<(), PatchError>>;

/// A document fix tagged with the data version it brings scenes to.
///
/// The patch does not check versions itself; the controller decides when
/// to run it.
pub struct DataPatch {
    /// Version the patch upgrades to
    pub version: DataVersion,
    /// Short description for logs
    pub description: &'static str,
    apply: PatchFn,
}

impl DataPatch {
    /// Create a patch
    pub fn new(
        version: DataVersion,
        description: &'static str,
        apply: impl Fn(&mut Document) -> Result<(), PatchError> + 'static,
    ) -> Self {
        Self {
            version,
            description,
            apply: Box::new(apply),
        }
    }

    /// Run the patch on a document
    pub fn apply(&self, document: &mut Document) -> Result<(), PatchError> {
        (self.apply)(document)
    }
}

impl fmt::Debug for DataPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataPatch")
            .field("version", &self.version)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
