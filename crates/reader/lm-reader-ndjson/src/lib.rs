//! Bounded reader for gzip-compressed NDJSON objects.
//!
//! Opens an object through an [`lm_traits::ObjectFetcher`], decompresses it as
//! it streams in and parses at most `max_records` lines into
//! [`lm_types::DataRecord`]s. Only as much of the object as those lines need
//! is downloaded.
//!
//! # Example
//!
//! ```ignore
//! use lm_reader_ndjson::{S3Fetcher, read_records};
//! use tokio_util::sync::CancellationToken;
//!
//! let fetcher = S3Fetcher::new(client);
//! let records = read_records(&fetcher, "sensor-data", &key, 5, &CancellationToken::new()).await?;
//! for record in &records {
//!     println!("{} {}", record.timestamp, record.data);
//! }
//! ```

mod reader;
mod s3;

pub use reader::{read_records, read_records_from};
pub use s3::S3Fetcher;
