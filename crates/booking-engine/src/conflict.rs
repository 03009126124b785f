//! Conflict detection for proposed bookings.
//!
//! Only bookings in the same room on the same calendar date can conflict;
//! the comparison itself is the half-open interval overlap from
//! [`TimeInterval`](crate::interval::TimeInterval). A room under
//! maintenance rejects before any interval work.

use crate::booking::Booking;
use crate::error::Result;
use crate::model::Room;

/// Outcome of checking one proposed booking against existing bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConflictOutcome {
    /// No overlap with any existing booking.
    Clear,
    /// Overlaps the first conflicting booking in stored order.
    Conflict { with: String, overlap_minutes: i64 },
    /// The room is under maintenance; time was never compared.
    RoomUnavailable,
}

/// Checks a proposed booking against the existing bookings for its room.
///
/// `existing` may contain bookings for other rooms or dates; they are
/// filtered out here so callers can pass a coarse query result. When the
/// proposed booking carries an id (a reschedule), the stored record with
/// that id is skipped. The first overlapping booking in stored order wins,
/// so the result is deterministic rather than "any conflicting booking".
///
/// # Errors
/// `InvalidInterval` when the proposed booking or a stored candidate has a
/// zero duration or runs past midnight.
pub fn check_booking(
    proposed: &Booking,
    room: &Room,
    existing: &[Booking],
) -> Result<ConflictOutcome> {
    if !room.is_assignable() {
        return Ok(ConflictOutcome::RoomUnavailable);
    }

    let proposed_interval = proposed.interval()?;

    for candidate in existing {
        if candidate.room_name != proposed.room_name || candidate.date != proposed.date {
            continue;
        }
        if !proposed.id.is_empty() && candidate.id == proposed.id {
            continue;
        }

        let candidate_interval = candidate.interval()?;
        if proposed_interval.overlaps(&candidate_interval) {
            return Ok(ConflictOutcome::Conflict {
                with: candidate.id.clone(),
                overlap_minutes: proposed_interval.overlap_minutes(&candidate_interval),
            });
        }
    }

    Ok(ConflictOutcome::Clear)
}
