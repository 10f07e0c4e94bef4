//! S3 client and listing functionality.
//!
//! This module provides the S3 side of latest-object location:
//! - Client configuration with LocalStack support
//! - A page-at-a-time [`lm_traits::ObjectLister`] over `ListObjectsV2`

mod client;
mod list;

pub use client::{S3Config, create_s3_client};
pub use list::{S3Lister, page_from_output};
