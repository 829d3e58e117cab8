// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rational times and time ranges.

use serde::{Deserialize, Serialize};

/// A point in time expressed as `value` units at `rate` units per second
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "RationalTime.1")]
pub struct RationalTime {
    /// Units per second
    pub rate: f64,
    /// Number of units
    pub value: f64,
}

impl RationalTime {
    /// Create a new time
    pub fn new(value: f64, rate: f64) -> Self {
        Self { rate, value }
    }

    /// Time at a whole frame number
    pub fn from_frames(frames: i64, rate: f64) -> Self {
        Self::new(frames as f64, rate)
    }

    /// Frame number at the time's own rate.
    ///
    /// The value is reinterpreted as frames without resampling.
    pub fn to_frames(&self) -> i64 {
        self.value.round() as i64
    }

    /// Same instant expressed at another rate
    pub fn rescaled_to(&self, rate: f64) -> Self {
        if self.rate == rate || self.rate == 0.0 {
            return Self::new(self.value, rate);
        }
        Self::new(self.value * rate / self.rate, rate)
    }

    /// Time in seconds
    pub fn to_seconds(&self) -> f64 {
        if self.rate == 0.0 {
            0.0
        } else {
            self.value / self.rate
        }
    }

    /// Sum of two times, at the rate of `self`
    pub fn offset_by(&self, other: &RationalTime) -> Self {
        Self::new(self.value + other.rescaled_to(self.rate).value, self.rate)
    }
}

/// A range of time: a start and a duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "OTIO_SCHEMA", rename = "TimeRange.1")]
pub struct TimeRange {
    /// Start of the range
    pub start_time: RationalTime,
    /// Length of the range
    pub duration: RationalTime,
}

impl TimeRange {
    /// Create a new range
    pub fn new(start_time: RationalTime, duration: RationalTime) -> Self {
        Self {
            start_time,
            duration,
        }
    }

    /// Range covering `duration` frames from frame `start`
    pub fn from_frames(start: i64, duration: i64, rate: f64) -> Self {
        Self::new(
            RationalTime::from_frames(start, rate),
            RationalTime::from_frames(duration, rate),
        )
    }

    /// Rate of the start time
    pub fn rate(&self) -> f64 {
        self.start_time.rate
    }

    /// First time after the range
    pub fn end_time_exclusive(&self) -> RationalTime {
        self.start_time.offset_by(&self.duration)
    }
}
