//! `ListObjectsV2` adapter.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use chrono::DateTime;
use lm_error::{LmError, Result};
use lm_traits::ObjectLister;
use lm_types::{ListingPage, ObjectSummary};
use tracing::{trace, warn};

/// [`ObjectLister`] backed by S3 `ListObjectsV2`.
#[derive(Debug, Clone)]
pub struct S3Lister {
    client: Client,
}

impl S3Lister {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectLister for S3Lister {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> Result<ListingPage> {
        trace!(
            bucket = bucket,
            prefix = prefix,
            continuation_token = ?continuation_token,
            "ListObjectsV2"
        );

        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .max_keys(max_keys)
            .set_continuation_token(continuation_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| {
                LmError::List(format!(
                    "s3://{}/{}: {}",
                    bucket,
                    prefix,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(page_from_output(output))
    }
}

/// Convert a `ListObjectsV2` response into a [`ListingPage`].
///
/// Directory markers (keys ending with `/`) and entries missing a key or a
/// timestamp are dropped, but still counted in [`ListingPage::listed`]. A
/// missing size is reported as 0.
pub fn page_from_output(output: ListObjectsV2Output) -> ListingPage {
    let truncated = output.is_truncated.unwrap_or(false);
    let continuation_token = output.next_continuation_token;
    let contents = output.contents.unwrap_or_default();
    let listed = contents.len();

    let entries = contents
        .into_iter()
        .filter_map(|obj| {
            let key = obj.key?;
            if key.is_empty() || key.ends_with('/') {
                return None;
            }

            let Some(last_modified) = obj
                .last_modified
                .and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
            else {
                warn!(key = %key, "Skipping listed object without a usable timestamp");
                return None;
            };

            Some(ObjectSummary {
                key,
                last_modified,
                size: obj.size.unwrap_or(0).max(0) as u64,
            })
        })
        .collect();

    ListingPage {
        entries,
        continuation_token,
        truncated,
        listed,
    }
}
