//! Engine configuration: the slot catalog plus the defaults stamped onto
//! generated bookings. Loadable from JSON so deployments can swap the
//! teaching grid without a code change.

use serde::{Deserialize, Serialize};

use crate::booking::PriorityLevel;
use crate::error::{Result, ScheduleError};
use crate::slot::SlotCatalog;

/// Defaults stamped onto bookings created by the batch generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDefaults {
    pub event_type: String,
    pub faculty: String,
    pub department: String,
    pub duration_minutes: u32,
    pub priority: PriorityLevel,
    pub created_by: String,
}

impl Default for BookingDefaults {
    fn default() -> Self {
        Self {
            event_type: "Lecture".to_string(),
            faculty: "Auto-Generated".to_string(),
            department: "Default".to_string(),
            duration_minutes: 120,
            priority: PriorityLevel::Medium,
            created_by: "System".to_string(),
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub slot_catalog: SlotCatalog,
    pub defaults: BookingDefaults,
}

impl EngineConfig {
    /// Loads configuration from a JSON document. Absent fields fall back
    /// to the defaults.
    ///
    /// # Errors
    /// `InvalidConfig` when the document does not parse.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ScheduleError::InvalidConfig(e.to_string()))
    }
}
