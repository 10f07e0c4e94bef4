//! Lookup configuration.
//!
//! Built once at process start and shared read-only by every lookup.

use lm_error::{LmError, Result};
use serde::{Deserialize, Serialize};

/// Default number of records returned from the latest object.
pub const DEFAULT_MAX_RECORDS: usize = 5;

/// How the key prefix for a lookup is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrefixStrategy {
    /// `{environment}/unit={unit_id}/sensor={sensor}/year=YYYY/month=MM/day=DD`,
    /// built from the request event and today's UTC date
    Partitioned { environment: String },

    /// A fixed prefix; request events are ignored
    Static { prefix: String },
}

/// Configuration shared by all lookups of a process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// S3 bucket name
    pub bucket: String,

    /// AWS region
    pub region: String,

    /// Prefix derivation
    pub strategy: PrefixStrategy,

    /// Maximum number of records to read from the latest object
    pub max_records: usize,
}

impl LookupConfig {
    /// Configuration for event-driven lookups under `environment`.
    pub fn partitioned(
        bucket: impl Into<String>,
        region: impl Into<String>,
        environment: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            strategy: PrefixStrategy::Partitioned {
                environment: environment.into(),
            },
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    /// Configuration for lookups under one fixed prefix.
    pub fn with_static_prefix(
        bucket: impl Into<String>,
        region: impl Into<String>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            strategy: PrefixStrategy::Static {
                prefix: prefix.into(),
            },
            max_records: DEFAULT_MAX_RECORDS,
        }
    }

    /// Set the record cap.
    pub fn with_max_records(mut self, max_records: usize) -> Self {
        self.max_records = max_records;
        self
    }

    /// Check that every required setting is present.
    pub fn validate(&self) -> Result<()> {
        if self.bucket.trim().is_empty() {
            return Err(LmError::Configuration("bucket name is empty".to_string()));
        }
        if self.region.trim().is_empty() {
            return Err(LmError::Configuration("region is empty".to_string()));
        }
        match &self.strategy {
            PrefixStrategy::Partitioned { environment } if environment.trim().is_empty() => {
                return Err(LmError::Configuration(
                    "environment name is empty".to_string(),
                ));
            }
            PrefixStrategy::Static { prefix } if prefix.trim().is_empty() => {
                return Err(LmError::Configuration("static prefix is empty".to_string()));
            }
            _ => {}
        }
        if self.max_records == 0 {
            return Err(LmError::Configuration(
                "max_records must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
