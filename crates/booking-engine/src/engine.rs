//! The schedule engine facade: propose, reschedule, cancel, review, and
//! batch auto-assignment.
//!
//! Every conflict-check-then-write sequence for one (room, date) runs under
//! a per-key lock, so two concurrent proposals for the same room-day cannot
//! both observe "no conflict" and both commit. The batch generator
//! snapshots its inputs once and runs single-threaded; callers must not
//! interleave manual writes for the same rooms mid-batch.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::allocator::{AssignmentOutcome, SlotAllocator};
use crate::booking::{Booking, BookingStatus};
use crate::config::EngineConfig;
use crate::conflict::{check_booking, ConflictOutcome};
use crate::error::{Result, ScheduleError};
use crate::repository::{BookingRepository, DirectoryProvider};
use crate::slot::{SlotCatalog, SlotClaims};

/// Fields a reschedule may change. Everything else on the booking is fixed;
/// in particular the room is not reschedulable -- cancel and re-propose to
/// move a booking to another room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReschedulePatch {
    pub date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub duration_minutes: Option<u32>,
}

impl ReschedulePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn with_duration_minutes(mut self, duration_minutes: u32) -> Self {
        self.duration_minutes = Some(duration_minutes);
        self
    }
}

/// Facade over the repository and directory collaborators.
pub struct ScheduleEngine<R, D> {
    repository: R,
    directory: D,
    config: EngineConfig,
    room_day_locks: Mutex<HashMap<(String, NaiveDate), Arc<Mutex<()>>>>,
}

impl<R, D> ScheduleEngine<R, D>
where
    R: BookingRepository,
    D: DirectoryProvider,
{
    pub fn new(repository: R, directory: D) -> Self {
        Self {
            repository,
            directory,
            config: EngineConfig::default(),
            room_day_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Replaces the default configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Serialization point for one (room, date). The returned guard must be
    /// held across the conflict check and the persisting write.
    fn room_day_lock(&self, room_name: &str, date: NaiveDate) -> Arc<Mutex<()>> {
        let mut table = self
            .room_day_locks
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        table
            .entry((room_name.to_string(), date))
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    fn lock_guard(key_lock: &Arc<Mutex<()>>) -> MutexGuard<'_, ()> {
        key_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Validates and persists a manual booking request.
    ///
    /// # Errors
    /// `InvalidInterval` for malformed times, `UnknownRoom` when the room
    /// name resolves to nothing, `RoomUnavailable` for rooms under
    /// maintenance, `Conflict` on overlap with a stored booking, and
    /// `RepositoryUnavailable` for infrastructure failures. Rejected
    /// bookings are never persisted.
    pub fn propose_booking(&self, booking: Booking) -> Result<Booking> {
        booking.interval()?;

        let room = self
            .directory
            .room_by_name(&booking.room_name)?
            .ok_or_else(|| ScheduleError::UnknownRoom {
                room: booking.room_name.clone(),
            })?;

        let key_lock = self.room_day_lock(&booking.room_name, booking.date);
        let _guard = Self::lock_guard(&key_lock);

        let existing = self
            .repository
            .find_by_room_and_date(&booking.room_name, booking.date)?;
        match check_booking(&booking, &room, &existing)? {
            ConflictOutcome::Clear => Ok(self.repository.save(booking)?),
            ConflictOutcome::Conflict {
                with,
                overlap_minutes,
            } => Err(ScheduleError::Conflict {
                with,
                overlap_minutes,
            }),
            ConflictOutcome::RoomUnavailable => Err(ScheduleError::RoomUnavailable {
                room: room.room_name,
            }),
        }
    }

    /// Moves a stored booking to a new date, time, or duration, re-validated
    /// against every other booking before anything changes.
    ///
    /// # Errors
    /// `NotFound` for a missing id; otherwise the same taxonomy as
    /// [`propose_booking`](Self::propose_booking). On rejection the stored
    /// record is left untouched.
    pub fn reschedule_booking(&self, id: &str, patch: &ReschedulePatch) -> Result<Booking> {
        let stored = self
            .repository
            .find_by_id(id)?
            .ok_or_else(|| ScheduleError::NotFound { id: id.to_string() })?;

        let mut patched = stored;
        if let Some(date) = patch.date {
            patched.date = date;
        }
        if let Some(start_time) = patch.start_time {
            patched.start_time = start_time;
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            patched.duration_minutes = duration_minutes;
        }
        patched.interval()?;

        let room = self
            .directory
            .room_by_name(&patched.room_name)?
            .ok_or_else(|| ScheduleError::UnknownRoom {
                room: patched.room_name.clone(),
            })?;

        let key_lock = self.room_day_lock(&patched.room_name, patched.date);
        let _guard = Self::lock_guard(&key_lock);

        let existing = self
            .repository
            .find_by_room_and_date(&patched.room_name, patched.date)?;
        match check_booking(&patched, &room, &existing)? {
            ConflictOutcome::Clear => Ok(self.repository.save(patched)?),
            ConflictOutcome::Conflict {
                with,
                overlap_minutes,
            } => Err(ScheduleError::Conflict {
                with,
                overlap_minutes,
            }),
            ConflictOutcome::RoomUnavailable => Err(ScheduleError::RoomUnavailable {
                room: room.room_name,
            }),
        }
    }

    /// Cancels (deletes) a stored booking.
    ///
    /// # Errors
    /// `NotFound` when absent; `InvalidTransition` for a `Rejected`
    /// booking, which is terminal.
    pub fn cancel_booking(&self, id: &str) -> Result<Booking> {
        let stored = self
            .repository
            .find_by_id(id)?
            .ok_or_else(|| ScheduleError::NotFound { id: id.to_string() })?;

        if stored.status == BookingStatus::Rejected {
            return Err(ScheduleError::InvalidTransition {
                from: stored.status,
                to: BookingStatus::Cancelled,
            });
        }

        self.repository
            .delete_by_id(id)?
            .ok_or_else(|| ScheduleError::NotFound { id: id.to_string() })
    }

    /// Applies the administrative review decision.
    ///
    /// Only `Pending -> Approved` and `Pending -> Rejected` are valid;
    /// cancellation is a delete ([`cancel_booking`](Self::cancel_booking)),
    /// not a status write.
    ///
    /// # Errors
    /// `NotFound` when absent, `InvalidTransition` for anything but the two
    /// review transitions.
    pub fn set_status(&self, id: &str, to: BookingStatus) -> Result<Booking> {
        let mut stored = self
            .repository
            .find_by_id(id)?
            .ok_or_else(|| ScheduleError::NotFound { id: id.to_string() })?;

        let allowed = stored.status == BookingStatus::Pending
            && matches!(to, BookingStatus::Approved | BookingStatus::Rejected);
        if !allowed {
            return Err(ScheduleError::InvalidTransition {
                from: stored.status,
                to,
            });
        }

        stored.status = to;
        Ok(self.repository.save(stored)?)
    }

    /// Runs the batch auto-generator: snapshot the directory once, assign
    /// every enrollment, commit the created bookings in one call.
    ///
    /// An empty enrollment list returns the empty outcome without touching
    /// the repository, so repeated runs are idempotent.
    ///
    /// # Errors
    /// `NoAvailableRooms` / `NoAvailableLecturers` abort the batch with
    /// nothing persisted; `RepositoryUnavailable` likewise.
    pub fn run_auto_assignment(
        &self,
        week_start: NaiveDate,
        catalog_override: Option<SlotCatalog>,
    ) -> Result<AssignmentOutcome> {
        let enrollments = self.directory.enrollments()?;
        if enrollments.is_empty() {
            return Ok(AssignmentOutcome::default());
        }

        let rooms = self.directory.rooms()?;
        let lecturers = self.directory.lecturers()?;

        let catalog = catalog_override.unwrap_or_else(|| self.config.slot_catalog.clone());
        let allocator =
            SlotAllocator::new(catalog).with_defaults(self.config.defaults.clone());

        let mut claims = SlotClaims::new();
        let mut outcome =
            allocator.assign(&enrollments, &rooms, &lecturers, week_start, &mut claims)?;

        if !outcome.created.is_empty() {
            outcome.created = self.repository.save_all(outcome.created)?;
        }
        Ok(outcome)
    }
}
