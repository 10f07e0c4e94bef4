//! Lookup request payload.

use serde::{Deserialize, Serialize};

/// Identifies the partition whose latest object is requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupEvent {
    pub unit_id: String,
    pub sensor: String,
}

impl LookupEvent {
    pub fn new(unit_id: impl Into<String>, sensor: impl Into<String>) -> Self {
        Self {
            unit_id: unit_id.into(),
            sensor: sensor.into(),
        }
    }
}
