//! lm-lookup - "latest data for partition X".
//!
//! Ties the pieces together for one request:
//!
//! 1. resolve the key prefix ([`lm_locator::resolve_prefix`])
//! 2. find the newest object under it ([`lm_locator::find_latest`])
//! 3. read its first records ([`lm_reader_ndjson::read_records`])
//! 4. assemble the [`ResultEnvelope`](lm_types::ResultEnvelope) ([`assemble`])
//!
//! # Example
//!
//! ```ignore
//! use lm_lookup::{LatestObjectLookup, OutputFormat, encode};
//! use lm_types::{LookupConfig, LookupEvent};
//! use tokio_util::sync::CancellationToken;
//!
//! let config = LookupConfig::partitioned("sensor-data", "eu-west-1", "prod");
//! let lookup = LatestObjectLookup::from_s3_client(config.into(), client);
//!
//! let event = LookupEvent::new("42", "temp");
//! let envelope = lookup.run(Some(&event), &CancellationToken::new()).await?;
//! println!("{}", encode(&envelope, OutputFormat::Json)?);
//! ```

pub mod lookup;
pub mod response;

pub use lookup::LatestObjectLookup;
pub use response::{OutputFormat, assemble, decode, encode};
