//! Parsed record content and the lookup response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Title carried by every lookup response.
pub const RESPONSE_TITLE: &str = "Last uploaded S3 object";

/// One line of an object's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    pub timestamp: String,
    pub data: String,
}

impl DataRecord {
    pub fn new(timestamp: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            data: data.into(),
        }
    }
}

/// The result of a lookup: which object was newest and what it starts with.
///
/// `last_modified` serializes as an RFC 3339 timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub title: String,
    pub bucket: String,
    pub key: String,
    pub last_modified: DateTime<Utc>,
    pub contents: Vec<DataRecord>,
}
