//! # booking-engine
//!
//! Room-schedule conflict engine for university timetabling: validates
//! proposed room bookings against existing ones and batch-assigns course
//! enrollments across rooms, weekdays, and time slots without collisions.
//!
//! Persistence and the roster of rooms/lecturers/enrollments live behind
//! the [`repository`] traits; the engine itself is synchronous and holds no
//! global state.
//!
//! ## Modules
//!
//! - [`interval`] -- half-open time intervals in minutes since midnight
//! - [`booking`] -- booking records and lifecycle states
//! - [`model`] -- rooms, lecturers, enrollments
//! - [`slot`] -- the (day, time) slot catalog and per-batch claim set
//! - [`config`] -- slot catalog + generated-booking defaults, JSON-loadable
//! - [`conflict`] -- accept/reject decision for a proposed booking
//! - [`allocator`] -- deterministic round-robin batch assignment
//! - [`repository`] -- persistence seams and in-memory implementations
//! - [`engine`] -- the facade tying it all together
//! - [`error`] -- error types

pub mod allocator;
pub mod booking;
pub mod config;
pub mod conflict;
pub mod engine;
pub mod error;
pub mod interval;
pub mod model;
pub mod repository;
pub mod slot;

pub use allocator::{AssignmentOutcome, SlotAllocator, Unscheduled, UnscheduledReason};
pub use booking::{Booking, BookingStatus, PriorityLevel};
pub use config::{BookingDefaults, EngineConfig};
pub use conflict::{check_booking, ConflictOutcome};
pub use engine::{ReschedulePatch, ScheduleEngine};
pub use error::{RepositoryError, Result, ScheduleError};
pub use interval::{parse_hhmm, TimeInterval};
pub use model::{Enrollment, Lecturer, Room, RoomCondition};
pub use repository::{
    BookingRepository, DirectoryProvider, InMemoryDirectory, InMemoryRepository,
};
pub use slot::{Slot, SlotCatalog, SlotClaims};
