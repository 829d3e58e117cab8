// SPDX-License-Identifier: MIT OR Apache-2.0
//! Take containing an ordered list of shots.

use crate::error::SequencerError;
use crate::naming::{find_first_unique_name, path_compliant_name};
use crate::shot::Shot;
use serde::{Deserialize, Serialize};

/// A named, ordered alternative sequence of shots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Take {
    /// Take name, unique within its scene
    pub name: String,
    /// Shots in playback order
    #[serde(default)]
    shots: Vec<Shot>,
}

impl Take {
    /// Create an empty take
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shots: Vec::new(),
        }
    }

    /// Take name usable as a folder name
    pub fn path_name(&self) -> String {
        path_compliant_name(&self.name)
    }

    /// Append a shot and return its index
    pub fn add_shot(&mut self, shot: Shot) -> usize {
        self.shots.push(shot);
        self.shots.len() - 1
    }

    /// Append a shot, renaming it if its name is already used in this take
    pub fn add_shot_unique(&mut self, mut shot: Shot) -> usize {
        shot.name = self.unique_shot_name(&shot.name);
        self.add_shot(shot)
    }

    /// First free shot name based on `name`
    pub fn unique_shot_name(&self, name: &str) -> String {
        find_first_unique_name(name, self.shots.iter().map(|s| s.name.as_str()))
    }

    /// Remove the shot at `index`, keeping the order of the others
    pub fn remove_shot(&mut self, index: usize) -> Result<Shot, SequencerError> {
        if index >= self.shots.len() {
            return Err(SequencerError::ShotIndexOutOfRange {
                index,
                len: self.shots.len(),
            });
        }
        Ok(self.shots.remove(index))
    }

    /// Get a shot
    pub fn shot(&self, index: usize) -> Option<&Shot> {
        self.shots.get(index)
    }

    /// Get a mutable shot
    pub fn shot_mut(&mut self, index: usize) -> Option<&mut Shot> {
        self.shots.get_mut(index)
    }

    /// All shots, in stored order
    pub fn shots(&self) -> &[Shot] {
        &self.shots
    }

    /// All shots, mutable
    pub fn shots_mut(&mut self) -> &mut [Shot] {
        &mut self.shots
    }

    /// Get shot count
    pub fn shot_count(&self) -> usize {
        self.shots.len()
    }

    /// Enabled shots with their index, in stored order
    pub fn enabled_shots(&self) -> impl Iterator<Item = (usize, &Shot)> {
        self.shots.iter().enumerate().filter(|(_, s)| s.enabled)
    }

    /// Index of the first shot with the given name
    pub fn shot_index_by_name(&self, name: &str) -> Option<usize> {
        self.shots.iter().position(|s| s.name == name)
    }

    /// Index of the first enabled shot containing `frame`
    pub fn enabled_shot_at_frame(&self, frame: i64) -> Option<usize> {
        self.enabled_shots()
            .find(|(_, s)| s.contains_frame(frame))
            .map(|(i, _)| i)
    }

    /// Index of the next enabled shot after `index`, wrapping to the first one
    pub fn next_enabled_shot(&self, index: usize) -> Option<usize> {
        self.enabled_shots()
            .find(|(i, _)| *i > index)
            .or_else(|| self.enabled_shots().next())
            .map(|(i, _)| i)
    }

    /// Frame range covered by enabled shots
    pub fn enabled_range(&self) -> Option<(i64, i64)> {
        self.enabled_shots().fold(None, |acc, (_, s)| match acc {
            None => Some((s.start(), s.end())),
            Some((lo, hi)) => Some((lo.min(s.start()), hi.max(s.end()))),
        })
    }
}

impl Default for Take {
    fn default() -> Self {
        Self::new("Main Take")
    }
}
