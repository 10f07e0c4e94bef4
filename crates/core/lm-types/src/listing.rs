//! Listing types produced by object store collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of keys the object store returns in a single listing page.
pub const MAX_KEYS_PER_PAGE: i32 = 1000;

/// A single stored object as reported by a listing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// The object key (full path within the bucket)
    pub key: String,

    /// Last modified timestamp
    pub last_modified: DateTime<Utc>,

    /// Size of the object in bytes
    pub size: u64,
}

impl ObjectSummary {
    pub fn new(key: impl Into<String>, last_modified: DateTime<Utc>, size: u64) -> Self {
        Self {
            key: key.into(),
            last_modified,
            size,
        }
    }
}

/// One page of a paginated listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Entries in the order the store returned them (not necessarily sorted)
    pub entries: Vec<ObjectSummary>,

    /// Cursor for the next page, if any
    pub continuation_token: Option<String>,

    /// Whether more pages follow this one
    pub truncated: bool,

    /// Number of entries the store returned, before any were dropped
    pub listed: usize,
}

impl ListingPage {
    /// Create a final (non-truncated) page.
    pub fn last(entries: Vec<ObjectSummary>) -> Self {
        Self {
            listed: entries.len(),
            entries,
            continuation_token: None,
            truncated: false,
        }
    }

    /// Create a page that is followed by another page reachable through `token`.
    pub fn truncated(entries: Vec<ObjectSummary>, token: impl Into<String>) -> Self {
        Self {
            listed: entries.len(),
            entries,
            continuation_token: Some(token.into()),
            truncated: true,
        }
    }

    /// Whether the store returned nothing at all for this page.
    ///
    /// A page whose entries were all dropped (e.g. directory markers) is not
    /// empty.
    pub fn is_empty(&self) -> bool {
        self.listed == 0 && self.entries.is_empty()
    }
}
