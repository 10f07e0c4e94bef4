//! Latest-object selection over a paginated listing.

use lm_error::{LmError, Result};
use lm_traits::ObjectLister;
use lm_types::{ListingPage, MAX_KEYS_PER_PAGE, ObjectSummary};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Find the most recently modified object under `prefix`.
///
/// Walks every page of the listing, one call per page, and keeps a running
/// maximum of `last_modified`. Entries are not assumed to be sorted. When
/// several entries share the maximal timestamp, the first one seen wins.
///
/// Only a first page on which the store returned nothing ends the walk early.
/// A first page of directory markers keeps paging.
///
/// Each listing call is raced against `cancel`.
///
/// # Errors
///
/// - [`LmError::NotFound`] if the first page is empty (no further calls are made)
/// - [`LmError::List`] if a listing call fails, or a truncated page has no continuation token
/// - [`LmError::Cancelled`] if `cancel` fires while a page is outstanding
pub async fn find_latest<L>(
    lister: &L,
    bucket: &str,
    prefix: &str,
    cancel: &CancellationToken,
) -> Result<ObjectSummary>
where
    L: ObjectLister + ?Sized,
{
    let mut best: Option<ObjectSummary> = None;
    let mut token: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        page_number += 1;

        let page = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LmError::Cancelled("listing")),
            page = lister.list_page(bucket, prefix, token.as_deref(), MAX_KEYS_PER_PAGE) => page?,
        };

        debug!(
            bucket = bucket,
            prefix = prefix,
            page = page_number,
            entries = page.entries.len(),
            truncated = page.truncated,
            "Listed page"
        );

        if page_number == 1 && page.is_empty() {
            return Err(not_found(bucket, prefix));
        }

        let ListingPage {
            entries,
            continuation_token,
            truncated,
            ..
        } = page;

        for entry in entries {
            if best
                .as_ref()
                .is_none_or(|current| entry.last_modified > current.last_modified)
            {
                best = Some(entry);
            }
        }

        if !truncated {
            break;
        }

        match continuation_token {
            Some(next) => token = Some(next),
            None => {
                return Err(LmError::List(format!(
                    "page {page_number} for s3://{bucket}/{prefix} is truncated but has no continuation token"
                )));
            }
        }
    }

    let latest = best.ok_or_else(|| not_found(bucket, prefix))?;

    info!(
        bucket = bucket,
        key = %latest.key,
        last_modified = %latest.last_modified,
        pages = page_number,
        "Selected latest object"
    );

    Ok(latest)
}

fn not_found(bucket: &str, prefix: &str) -> LmError {
    LmError::NotFound {
        bucket: bucket.to_string(),
        prefix: prefix.to_string(),
    }
}
