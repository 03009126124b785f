//! Booking records and their lifecycle states.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::interval::TimeInterval;

/// Review state of a booking.
///
/// `Pending -> Approved | Rejected` is an administrative decision;
/// `Rejected` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl BookingStatus {
    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Rejected | BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Approved => "Approved",
            BookingStatus::Rejected => "Rejected",
            BookingStatus::Cancelled => "Cancelled",
        };
        f.write_str(name)
    }
}

/// Scheduling priority attached to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PriorityLevel {
    Low,
    #[default]
    Medium,
    High,
}

/// One reserved use of a room for a time interval on a given date.
///
/// The end time is always derived from `start_time + duration_minutes`;
/// it is never stored, so the two can never drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Assigned by the repository at save time; empty until then.
    #[serde(default)]
    pub id: String,
    /// Join key into the room directory.
    pub room_name: String,
    pub event_type: String,
    pub event_name: String,
    /// Course code, propagated from the enrollment for generated lectures.
    #[serde(default)]
    pub course_code: Option<String>,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub department: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_minutes: u32,
    #[serde(default)]
    pub priority_level: PriorityLevel,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub created_by: String,
    /// Contact address stamped by the batch generator.
    #[serde(default)]
    pub lecturer_email: String,
}

impl Booking {
    /// Creates a pending booking with empty defaults for the optional fields.
    pub fn new(
        room_name: impl Into<String>,
        event_type: impl Into<String>,
        event_name: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: String::new(),
            room_name: room_name.into(),
            event_type: event_type.into(),
            event_name: event_name.into(),
            course_code: None,
            faculty: String::new(),
            department: String::new(),
            date,
            start_time,
            duration_minutes,
            priority_level: PriorityLevel::default(),
            status: BookingStatus::default(),
            created_by: String::new(),
            lecturer_email: String::new(),
        }
    }

    /// Sets the priority level.
    pub fn with_priority(mut self, priority: PriorityLevel) -> Self {
        self.priority_level = priority;
        self
    }

    /// Sets the creator.
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = created_by.into();
        self
    }

    /// Sets the course code.
    pub fn with_course_code(mut self, code: impl Into<String>) -> Self {
        self.course_code = Some(code.into());
        self
    }

    /// The booking's time interval for its day.
    ///
    /// # Errors
    /// `InvalidInterval` when the duration is zero or the booking would run
    /// past midnight.
    pub fn interval(&self) -> Result<TimeInterval> {
        TimeInterval::from_start_duration(self.start_time, self.duration_minutes)
    }
}
