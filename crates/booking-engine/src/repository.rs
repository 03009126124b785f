//! Persistence seams and their in-memory implementations.
//!
//! The engine treats storage as a synchronous request/response
//! collaborator: load and save operations only, with a bounded timeout on
//! the other side of the trait. Any infrastructure failure surfaces as a
//! [`RepositoryError`] and aborts the current operation; this engine never
//! commits anything before the repository call succeeds.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use chrono::NaiveDate;

use crate::booking::Booking;
use crate::error::RepositoryError;
use crate::model::{Enrollment, Lecturer, Room};

pub type RepoResult<T> = std::result::Result<T, RepositoryError>;

/// Persistence of booking records.
pub trait BookingRepository {
    /// All bookings for one room on one calendar date, in stored order.
    fn find_by_room_and_date(&self, room_name: &str, date: NaiveDate) -> RepoResult<Vec<Booking>>;

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>>;

    /// Persists a booking, assigning its id when empty. Returns the stored
    /// record.
    fn save(&self, booking: Booking) -> RepoResult<Booking>;

    /// Persists a batch in one commit: either every booking is stored or
    /// none are.
    fn save_all(&self, bookings: Vec<Booking>) -> RepoResult<Vec<Booking>>;

    /// Removes a booking. Returns the removed record, `None` when absent.
    fn delete_by_id(&self, id: &str) -> RepoResult<Option<Booking>>;

    fn list_all(&self) -> RepoResult<Vec<Booking>>;
}

/// Read-only source of rooms, lecturers, and enrollments.
pub trait DirectoryProvider {
    fn rooms(&self) -> RepoResult<Vec<Room>>;

    fn room_by_name(&self, room_name: &str) -> RepoResult<Option<Room>>;

    fn lecturers(&self) -> RepoResult<Vec<Lecturer>>;

    fn enrollments(&self) -> RepoResult<Vec<Enrollment>>;
}

/// In-memory booking store, insertion-ordered.
///
/// Assigns sequential ids (`bk-1`, `bk-2`, ...) at save time. Insertion
/// order is preserved so conflict checks see bookings in stored order.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    bookings: Mutex<Vec<Booking>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store, minting ids for records that lack one.
    pub fn with_bookings(bookings: Vec<Booking>) -> Self {
        let store = Self::new();
        let mut seeded = Vec::with_capacity(bookings.len());
        for mut booking in bookings {
            if booking.id.is_empty() {
                booking.id = store.mint_id();
            }
            seeded.push(booking);
        }
        *store.bookings.lock().unwrap_or_else(|e| e.into_inner()) = seeded;
        store
    }

    fn mint_id(&self) -> String {
        format!("bk-{}", self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Booking>> {
        // A poisoned lock only means another thread panicked mid-write;
        // the Vec itself is still structurally sound.
        self.bookings.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BookingRepository for InMemoryRepository {
    fn find_by_room_and_date(&self, room_name: &str, date: NaiveDate) -> RepoResult<Vec<Booking>> {
        Ok(self
            .lock()
            .iter()
            .filter(|b| b.room_name == room_name && b.date == date)
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        Ok(self.lock().iter().find(|b| b.id == id).cloned())
    }

    fn save(&self, mut booking: Booking) -> RepoResult<Booking> {
        let mut bookings = self.lock();
        if booking.id.is_empty() {
            booking.id = self.mint_id();
            bookings.push(booking.clone());
        } else if let Some(stored) = bookings.iter_mut().find(|b| b.id == booking.id) {
            *stored = booking.clone();
        } else {
            bookings.push(booking.clone());
        }
        Ok(booking)
    }

    fn save_all(&self, bookings: Vec<Booking>) -> RepoResult<Vec<Booking>> {
        let mut saved = Vec::with_capacity(bookings.len());
        let mut store = self.lock();
        for mut booking in bookings {
            if booking.id.is_empty() {
                booking.id = self.mint_id();
            }
            store.push(booking.clone());
            saved.push(booking);
        }
        Ok(saved)
    }

    fn delete_by_id(&self, id: &str) -> RepoResult<Option<Booking>> {
        let mut bookings = self.lock();
        match bookings.iter().position(|b| b.id == id) {
            Some(index) => Ok(Some(bookings.remove(index))),
            None => Ok(None),
        }
    }

    fn list_all(&self) -> RepoResult<Vec<Booking>> {
        Ok(self.lock().clone())
    }
}

/// Fixed in-memory directory snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    rooms: Vec<Room>,
    lecturers: Vec<Lecturer>,
    enrollments: Vec<Enrollment>,
}

impl InMemoryDirectory {
    pub fn new(rooms: Vec<Room>, lecturers: Vec<Lecturer>, enrollments: Vec<Enrollment>) -> Self {
        Self {
            rooms,
            lecturers,
            enrollments,
        }
    }
}

impl DirectoryProvider for InMemoryDirectory {
    fn rooms(&self) -> RepoResult<Vec<Room>> {
        Ok(self.rooms.clone())
    }

    fn room_by_name(&self, room_name: &str) -> RepoResult<Option<Room>> {
        Ok(self.rooms.iter().find(|r| r.room_name == room_name).cloned())
    }

    fn lecturers(&self) -> RepoResult<Vec<Lecturer>> {
        Ok(self.lecturers.clone())
    }

    fn enrollments(&self) -> RepoResult<Vec<Enrollment>> {
        Ok(self.enrollments.clone())
    }
}
