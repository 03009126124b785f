//! The slot catalog: enumerable (day, time) pairs for round-robin
//! assignment, and the claim set that tracks which keys a batch has taken.

use std::collections::HashSet;

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// A (day-of-week, start time) pair drawn from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub day: Weekday,
    pub start: NaiveTime,
}

impl Slot {
    pub fn new(day: Weekday, start: NaiveTime) -> Self {
        Self { day, start }
    }
}

/// The ordered catalog of assignable slots.
///
/// This is configuration, not business logic: load one from JSON or take
/// the default teaching grid. The allocator only ever indexes into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotCatalog {
    slots: Vec<Slot>,
}

impl SlotCatalog {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }
}

impl Default for SlotCatalog {
    /// The default teaching grid: Mon-Fri at 09:00, 11:00, 13:00, 15:00.
    fn default() -> Self {
        let days = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ];
        let times = [(9, 0), (11, 0), (13, 0), (15, 0)];

        let mut slots = Vec::with_capacity(days.len() * times.len());
        for day in days {
            for (hour, minute) in times {
                // Hour/minute literals above are in range; from_hms_opt
                // cannot fail for them.
                if let Some(start) = NaiveTime::from_hms_opt(hour, minute, 0) {
                    slots.push(Slot::new(day, start));
                }
            }
        }
        Self { slots }
    }
}

/// Slot claims made during one batch run.
///
/// Owned by the caller and threaded through `SlotAllocator::assign`, never
/// process-global: independent batches over different room pools cannot
/// interfere, and a shared set chains batches when the caller wants that.
#[derive(Debug, Clone, Default)]
pub struct SlotClaims {
    claimed: HashSet<(String, Weekday, NaiveTime)>,
}

impl SlotClaims {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the (room, day, time) key is already taken.
    pub fn is_claimed(&self, room_name: &str, slot: &Slot) -> bool {
        self.claimed
            .contains(&(room_name.to_string(), slot.day, slot.start))
    }

    /// Claims the key. Returns `false` when it was already taken.
    pub fn claim(&mut self, room_name: &str, slot: &Slot) -> bool {
        self.claimed
            .insert((room_name.to_string(), slot.day, slot.start))
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
