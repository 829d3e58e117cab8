// SPDX-License-Identifier: MIT OR Apache-2.0
//! Binary document snapshots used to roll back a failed migration.

use crate::error::Result;
use shotman_sequencer::Document;
use std::time::{SystemTime, UNIX_EPOCH};

/// Serialized copy of a document's scenes
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    /// Serialized document
    data: Vec<u8>,
    /// Timestamp when snapshot was taken
    pub timestamp: u64,
}

impl DocumentSnapshot {
    /// Capture the document
    pub fn capture(document: &Document) -> Result<Self> {
        let data = bincode::serialize(document)?;
        tracing::debug!("Captured document snapshot ({} bytes)", data.len());
        Ok(Self {
            data,
            timestamp: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs(),
        })
    }

    /// Size in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Put the captured state back into `document`.
    ///
    /// The file path is not part of the snapshot and is kept as is.
    pub fn restore(&self, document: &mut Document) -> Result<()> {
        let mut restored: Document = bincode::deserialize(&self.data)?;
        restored.path = document.path.take();
        *document = restored;
        Ok(())
    }
}
