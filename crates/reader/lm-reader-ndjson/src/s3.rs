//! S3 `GetObject` adapter.

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use lm_error::{LmError, Result};
use lm_traits::{ObjectBody, ObjectFetcher};
use tracing::debug;

/// [`ObjectFetcher`] backed by S3 `GetObject`.
///
/// The returned body streams from the open HTTP response; nothing is
/// buffered beyond the reader's internal buffer.
#[derive(Debug, Clone)]
pub struct S3Fetcher {
    client: Client,
}

impl S3Fetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectFetcher for S3Fetcher {
    async fn open(&self, bucket: &str, key: &str) -> Result<ObjectBody> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                LmError::Get(format!(
                    "s3://{}/{}: {}",
                    bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(
            bucket = bucket,
            key = key,
            content_length = ?output.content_length,
            content_encoding = ?output.content_encoding,
            "Opened object"
        );

        Ok(Box::pin(output.body.into_async_read()))
    }
}
