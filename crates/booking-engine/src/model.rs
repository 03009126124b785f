//! Rooms, lecturers, and enrollments -- the read-only inputs to scheduling.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fallback contact for generated bookings when a lecturer has no address.
const SYSTEM_EMAIL: &str = "noreply@system.com";

/// Physical state of a lecture room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomCondition {
    Excellent,
    Good,
    #[serde(rename = "Needs Repair")]
    NeedsRepair,
}

/// A bookable lecture room. `room_name` is the unique join key bookings use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub id: String,
    pub room_name: String,
    pub capacity: u32,
    pub condition: RoomCondition,
    /// Fixed equipment present in the room.
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Unit counts per equipment item.
    #[serde(default)]
    pub equipment_quantity: HashMap<String, u32>,
}

impl Room {
    /// Creates a room in `Good` condition with no equipment.
    pub fn new(room_name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: String::new(),
            room_name: room_name.into(),
            capacity,
            condition: RoomCondition::Good,
            equipment: Vec::new(),
            equipment_quantity: HashMap::new(),
        }
    }

    /// Sets the room condition.
    pub fn with_condition(mut self, condition: RoomCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Adds an equipment item with its unit count.
    pub fn with_equipment(mut self, name: impl Into<String>, quantity: u32) -> Self {
        let name = name.into();
        self.equipment_quantity.insert(name.clone(), quantity);
        self.equipment.push(name);
        self
    }

    /// A room under maintenance is never assignable.
    pub fn is_assignable(&self) -> bool {
        self.condition != RoomCondition::NeedsRepair
    }
}

/// A lecturer who can be rostered onto generated bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lecturer {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Lecturer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Contact address for generated bookings, with the system fallback
    /// when the lecturer record carries no address.
    pub fn contact_email(&self) -> &str {
        if self.email.trim().is_empty() {
            SYSTEM_EMAIL
        } else {
            &self.email
        }
    }
}

/// One student's enrollment in a course -- the demand signal for batch
/// assignment. Not owned by this engine; read-only input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: String,
    pub course_code: String,
    pub course_name: String,
}

impl Enrollment {
    pub fn new(
        student_id: impl Into<String>,
        course_code: impl Into<String>,
        course_name: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            course_code: course_code.into(),
            course_name: course_name.into(),
        }
    }

    /// Trimmed, lowercased course name, or `None` when blank.
    ///
    /// A blank course name is a valid "no event" signal, not an error.
    pub fn normalized_course_name(&self) -> Option<String> {
        let trimmed = self.course_name.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}
