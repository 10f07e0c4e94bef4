//! Object retrieval trait.

use async_trait::async_trait;
use lm_error::Result;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::AsyncBufRead;

/// Raw (still compressed) body of an object.
///
/// Dropping the body releases the underlying connection.
pub type ObjectBody = Pin<Box<dyn AsyncBufRead + Send>>;

/// Opens stored objects for streaming reads.
#[async_trait]
pub trait ObjectFetcher: Send + Sync {
    /// Open `key` in `bucket`.
    ///
    /// Failures are reported as [`lm_error::LmError::Get`].
    async fn open(&self, bucket: &str, key: &str) -> Result<ObjectBody>;
}

#[async_trait]
impl<T: ObjectFetcher + ?Sized> ObjectFetcher for Arc<T> {
    async fn open(&self, bucket: &str, key: &str) -> Result<ObjectBody> {
        (**self).open(bucket, key).await
    }
}
