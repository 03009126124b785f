//! Error types for booking-engine operations.

use thiserror::Error;

use crate::booking::BookingStatus;

/// Failure modes of the conflict engine.
///
/// The engine never retries internally. Each variant tells the caller
/// whether retrying the call can help: only `RepositoryUnavailable` is
/// retryable, because no partial state was committed. Everything else is a
/// caller error or a business outcome that needs a user decision.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// Malformed time or duration. Reject the input; retrying cannot help.
    #[error("invalid interval: {0}")]
    InvalidInterval(String),

    /// The proposed time overlaps an existing booking in the same room
    /// on the same date.
    #[error("conflicts with booking {with} ({overlap_minutes} min overlap)")]
    Conflict { with: String, overlap_minutes: i64 },

    /// The room is under maintenance and cannot be booked at any time.
    #[error("room {room} is unavailable (needs repair)")]
    RoomUnavailable { room: String },

    /// The booking names a room the directory does not know.
    #[error("unknown room: {room}")]
    UnknownRoom { room: String },

    /// No booking with this id exists.
    #[error("booking not found: {id}")]
    NotFound { id: String },

    /// The requested status change is not allowed from the booking's
    /// current status.
    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    /// Batch precondition: every room is under maintenance, or none exist.
    #[error("no available rooms")]
    NoAvailableRooms,

    /// Batch precondition: the lecturer roster is empty.
    #[error("no available lecturers")]
    NoAvailableLecturers,

    /// Malformed configuration document.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The storage layer failed or timed out. The whole call is safe to
    /// retry: this engine commits nothing before the repository succeeds.
    #[error("repository unavailable: {0}")]
    RepositoryUnavailable(#[from] RepositoryError),
}

/// Infrastructure failure reported by a repository or directory provider.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(String),

    #[error("timed out after {0} ms")]
    Timeout(u64),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
