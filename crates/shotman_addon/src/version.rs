// SPDX-License-Identifier: MIT OR Apache-2.0
//! Add-on version numbers.
//!
//! Versions are compared as integers: `x.y.z` becomes `x * 1_000_000 +
//! y * 1_000 + z`, so `1.3.61` is `1003061`. Data versions stamped in scenes
//! use the same encoding.

use crate::error::AddonError;
use std::fmt;
use std::str::FromStr;

/// Integer data version stamped in scenes
pub type DataVersion = i32;

/// Version of this add-on release
pub const ADDON_VERSION: AddonVersion = AddonVersion::new(1, 5, 73);

/// Last release that changed the data layout. Newer data only needs a restamp.
pub const LATEST_PATCHABLE_VERSION: DataVersion = 1_003_061;

/// Highest major number whose integer form fits a data version
pub const MAX_MAJOR: u32 = 2_146;

/// A `major.minor.patch` release version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddonVersion {
    /// Major number (0-2146)
    pub major: u32,
    /// Minor number (0-999)
    pub minor: u32,
    /// Patch number (0-999)
    pub patch: u32,
}

impl AddonVersion {
    /// Create a version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Integer form used for data versions. Saturates above `MAX_MAJOR`.
    pub const fn to_int(self) -> DataVersion {
        let version = self.major as u64 * 1_000_000 + self.minor as u64 * 1_000 + self.patch as u64;
        if version > DataVersion::MAX as u64 {
            DataVersion::MAX
        } else {
            version as DataVersion
        }
    }

    /// Decode an integer data version. Negative values decode as `0.0.0`.
    pub fn from_int(version: DataVersion) -> Self {
        let version = version.max(0) as u32;
        Self::new(version / 1_000_000, (version / 1_000) % 1_000, version % 1_000)
    }
}

impl fmt::Display for AddonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for AddonVersion {
    type Err = AddonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AddonError::InvalidVersion(s.to_string());

        let parts: Vec<u32> = s
            .trim()
            .split('.')
            .map(|p| p.parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<_, _>>()?;

        match parts.as_slice() {
            [major, minor, patch] if *major <= MAX_MAJOR && *minor < 1_000 && *patch < 1_000 => {
                Ok(Self::new(*major, *minor, *patch))
            }
            _ => Err(invalid()),
        }
    }
}
