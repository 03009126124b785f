//! Deterministic round-robin batch assignment of enrollments onto slots.
//!
//! Index-driven: the success counter advances only when a booking is
//! actually placed, so skipped enrollments never rotate the catalog
//! unevenly. When the round-robin target is already claimed, a linear
//! probe walks the room × slot cross product; `rooms × slots` attempts
//! visit every combination, so exhaustion is provable rather than assumed.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, BookingStatus};
use crate::config::BookingDefaults;
use crate::error::{Result, ScheduleError};
use crate::model::{Enrollment, Lecturer, Room};
use crate::slot::{Slot, SlotCatalog, SlotClaims};

/// Why an enrollment could not be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnscheduledReason {
    /// Every (room, day, time) combination reachable by the probe was taken.
    NoSlotAvailable,
}

/// An enrollment the batch could not place, with the reason recorded.
///
/// Callers must not guess success from the absence of an error: every
/// enrollment that was attempted but not placed shows up here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unscheduled {
    pub enrollment: Enrollment,
    pub reason: UnscheduledReason,
}

/// Result of one batch run. Partial success is the contract: callers
/// decide what to do with the unscheduled remainder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub created: Vec<Booking>,
    pub unscheduled: Vec<Unscheduled>,
}

/// Round-robin slot allocator over a fixed catalog.
#[derive(Debug, Clone)]
pub struct SlotAllocator {
    catalog: SlotCatalog,
    defaults: BookingDefaults,
}

impl SlotAllocator {
    pub fn new(catalog: SlotCatalog) -> Self {
        Self {
            catalog,
            defaults: BookingDefaults::default(),
        }
    }

    /// Sets the defaults stamped onto generated bookings.
    pub fn with_defaults(mut self, defaults: BookingDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// Assigns each enrollment a (room, lecturer, slot) triple without
    /// collisions, best-effort.
    ///
    /// Enrollments with a blank course name are skipped silently -- a blank
    /// name is a valid "no event" signal. `week_start` anchors the
    /// catalog's weekdays to concrete dates: each booking lands on the
    /// first matching weekday on or after it. `claims` is owned by the
    /// caller: a fresh set isolates this batch, a shared set chains claims
    /// across batches.
    ///
    /// # Errors
    /// `NoAvailableRooms` when no room is assignable and
    /// `NoAvailableLecturers` when the roster is empty; both abort the
    /// whole batch with nothing placed.
    pub fn assign(
        &self,
        enrollments: &[Enrollment],
        rooms: &[Room],
        lecturers: &[Lecturer],
        week_start: NaiveDate,
        claims: &mut SlotClaims,
    ) -> Result<AssignmentOutcome> {
        let rooms: Vec<&Room> = rooms.iter().filter(|r| r.is_assignable()).collect();
        if rooms.is_empty() {
            return Err(ScheduleError::NoAvailableRooms);
        }
        if lecturers.is_empty() {
            return Err(ScheduleError::NoAvailableLecturers);
        }

        let mut outcome = AssignmentOutcome::default();
        // Advances only on successful placement, so a skipped enrollment
        // does not consume a rotation step.
        let mut placed = 0usize;

        for enrollment in enrollments {
            let Some(event_name) = enrollment.normalized_course_name() else {
                continue;
            };

            let Some((room, slot)) = self.find_free_target(&rooms, placed, claims) else {
                outcome.unscheduled.push(Unscheduled {
                    enrollment: enrollment.clone(),
                    reason: UnscheduledReason::NoSlotAvailable,
                });
                continue;
            };

            claims.claim(&room.room_name, &slot);
            let lecturer = &lecturers[placed % lecturers.len()];
            outcome
                .created
                .push(self.build_booking(enrollment, event_name, room, lecturer, &slot, week_start));
            placed += 1;
        }

        Ok(outcome)
    }

    /// The round-robin target for success index `i`, falling back to a
    /// linear probe over the room × slot cross product.
    ///
    /// The probe maps index `c` to `slot = catalog[c % S]`,
    /// `room = rooms[(c / S) % R]`: any window of `S × R` consecutive
    /// indices covers every combination, so `S × R` attempts exhaust the
    /// space.
    fn find_free_target<'r>(
        &self,
        rooms: &[&'r Room],
        i: usize,
        claims: &SlotClaims,
    ) -> Option<(&'r Room, Slot)> {
        let slot_count = self.catalog.len();
        let room_count = rooms.len();
        if slot_count == 0 {
            return None;
        }

        // Attempt 0: the round-robin rotation itself.
        let room = rooms[i % room_count];
        let slot = *self.catalog.get(i % slot_count)?;
        if !claims.is_claimed(&room.room_name, &slot) {
            return Some((room, slot));
        }

        let max_attempts = slot_count * room_count;
        for attempt in 1..=max_attempts {
            let c = i + attempt;
            let slot = *self.catalog.get(c % slot_count)?;
            let room = rooms[(c / slot_count) % room_count];
            if !claims.is_claimed(&room.room_name, &slot) {
                return Some((room, slot));
            }
        }

        None
    }

    fn build_booking(
        &self,
        enrollment: &Enrollment,
        event_name: String,
        room: &Room,
        lecturer: &Lecturer,
        slot: &Slot,
        week_start: NaiveDate,
    ) -> Booking {
        Booking {
            // The repository assigns the id at save time.
            id: String::new(),
            room_name: room.room_name.clone(),
            event_type: self.defaults.event_type.clone(),
            event_name,
            course_code: Some(enrollment.course_code.clone()),
            faculty: self.defaults.faculty.clone(),
            department: self.defaults.department.clone(),
            date: date_for_weekday(week_start, slot.day),
            start_time: slot.start,
            duration_minutes: self.defaults.duration_minutes,
            priority_level: self.defaults.priority,
            status: BookingStatus::Pending,
            created_by: self.defaults.created_by.clone(),
            lecturer_email: lecturer.contact_email().to_string(),
        }
    }
}

/// First date on or after `week_start` that falls on `day`.
pub fn date_for_weekday(week_start: NaiveDate, day: Weekday) -> NaiveDate {
    let offset = (day.num_days_from_monday() + 7 - week_start.weekday().num_days_from_monday()) % 7;
    week_start + Days::new(u64::from(offset))
}
