//! lm-locator - finding the newest object under a partition prefix.
//!
//! This crate provides:
//!
//! - Prefix resolution from a lookup event and the current UTC date
//! - Latest-object selection across a paginated listing
//! - The S3 implementation of [`lm_traits::ObjectLister`] and client setup
//!
//! # Example
//!
//! ```ignore
//! use lm_locator::{find_latest, resolve_prefix, today_utc};
//! use lm_locator::s3::{S3Config, S3Lister, create_s3_client};
//! use tokio_util::sync::CancellationToken;
//!
//! let client = create_s3_client(&S3Config::new("eu-west-1")).await?;
//! let lister = S3Lister::new(client);
//!
//! let prefix = resolve_prefix(&config.strategy, Some(&event), today_utc())?;
//! let latest = find_latest(&lister, "sensor-data", &prefix, &CancellationToken::new()).await?;
//! println!("{} @ {}", latest.key, latest.last_modified);
//! ```

pub mod locator;
pub mod prefix;
pub mod s3;

pub use locator::find_latest;
pub use prefix::{resolve_prefix, today_utc};
pub use s3::{S3Config, S3Lister, create_s3_client};
