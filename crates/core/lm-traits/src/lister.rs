//! Paginated listing trait.

use async_trait::async_trait;
use lm_error::Result;
use lm_types::ListingPage;
use std::sync::Arc;

/// Lists objects under a prefix one page at a time.
///
/// Implementations issue exactly one request per call and never retry.
/// Failures are reported as [`lm_error::LmError::List`].
#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Fetch one page of object summaries.
    ///
    /// # Arguments
    ///
    /// * `bucket` - Bucket to list
    /// * `prefix` - Key prefix to filter on
    /// * `continuation_token` - Token returned by the previous page, `None` for the first page
    /// * `max_keys` - Upper bound on entries in the returned page
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> Result<ListingPage>;
}

#[async_trait]
impl<T: ObjectLister + ?Sized> ObjectLister for Arc<T> {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        continuation_token: Option<&str>,
        max_keys: i32,
    ) -> Result<ListingPage> {
        (**self)
            .list_page(bucket, prefix, continuation_token, max_keys)
            .await
    }
}
