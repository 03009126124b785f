//! Half-open time intervals within a single calendar day.
//!
//! All arithmetic is in whole minutes since midnight. Two intervals overlap
//! iff `a.start < b.end && b.start < a.end` -- back-to-back intervals, where
//! one ends exactly when the other starts, do NOT overlap.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};

/// Minutes in one day. Interval bounds must stay within `0..=1440`.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A `[start, end)` interval in minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    start: u32,
    end: u32,
}

impl TimeInterval {
    /// Builds an interval from explicit minute bounds.
    ///
    /// # Errors
    /// `InvalidInterval` when `end <= start` or `end` exceeds 1440.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if end <= start {
            return Err(ScheduleError::InvalidInterval(format!(
                "end ({end}) must be after start ({start})"
            )));
        }
        if end > MINUTES_PER_DAY {
            return Err(ScheduleError::InvalidInterval(format!(
                "end ({end}) runs past midnight ({MINUTES_PER_DAY})"
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds an interval from a wall-clock start and a duration in minutes.
    ///
    /// # Errors
    /// `InvalidInterval` when the duration is zero or the interval would
    /// run past midnight.
    pub fn from_start_duration(start: NaiveTime, duration_minutes: u32) -> Result<Self> {
        if duration_minutes == 0 {
            return Err(ScheduleError::InvalidInterval(
                "duration must be positive".to_string(),
            ));
        }
        let start_minute = start.hour() * 60 + start.minute();
        Self::new(start_minute, start_minute + duration_minutes)
    }

    pub fn start_minute(&self) -> u32 {
        self.start
    }

    pub fn end_minute(&self) -> u32 {
        self.end
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end - self.start
    }

    /// Strict half-open overlap test.
    ///
    /// Two intervals overlap iff `a.start < b.end && b.start < a.end`.
    /// Adjacent intervals (`a.end == b.start`) do not overlap.
    pub fn overlaps(&self, other: &TimeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Overlap length in minutes: `min(ends) - max(starts)`, 0 when disjoint.
    pub fn overlap_minutes(&self, other: &TimeInterval) -> i64 {
        if !self.overlaps(other) {
            return 0;
        }
        let overlap_start = self.start.max(other.start);
        let overlap_end = self.end.min(other.end);
        i64::from(overlap_end - overlap_start)
    }
}

/// Parses an `HH:MM` wall-clock string (leading/trailing whitespace ignored).
///
/// # Errors
/// `InvalidInterval` when the string is not a valid 24-hour `HH:MM` time.
pub fn parse_hhmm(input: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M")
        .map_err(|e| ScheduleError::InvalidInterval(format!("bad time {input:?}: {e}")))
}
