//! The lookup pipeline.

use crate::response::assemble;
use chrono::NaiveDate;
use lm_error::Result;
use lm_locator::{S3Lister, find_latest, resolve_prefix, today_utc};
use lm_reader_ndjson::{S3Fetcher, read_records};
use lm_traits::{ObjectFetcher, ObjectLister};
use lm_types::{LookupConfig, LookupEvent, ResultEnvelope};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Finds and reads the latest object for a partition.
///
/// One instance serves any number of lookups; it holds only read-only
/// configuration and the store collaborators. Each lookup runs
/// resolve → locate → read → assemble sequentially and stops at the first
/// error.
#[derive(Clone)]
pub struct LatestObjectLookup {
    config: Arc<LookupConfig>,
    lister: Arc<dyn ObjectLister>,
    fetcher: Arc<dyn ObjectFetcher>,
}

impl LatestObjectLookup {
    pub fn new(
        config: Arc<LookupConfig>,
        lister: Arc<dyn ObjectLister>,
        fetcher: Arc<dyn ObjectFetcher>,
    ) -> Self {
        Self {
            config,
            lister,
            fetcher,
        }
    }

    /// Lookup against S3 using one shared client for listing and fetching.
    pub fn from_s3_client(config: Arc<LookupConfig>, client: aws_sdk_s3::Client) -> Self {
        Self::new(
            config,
            Arc::new(S3Lister::new(client.clone())),
            Arc::new(S3Fetcher::new(client)),
        )
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Run a lookup for today's (UTC) partition.
    pub async fn run(
        &self,
        event: Option<&LookupEvent>,
        cancel: &CancellationToken,
    ) -> Result<ResultEnvelope> {
        self.run_on(event, today_utc(), cancel).await
    }

    /// Run a lookup for the partition of `date`.
    pub async fn run_on(
        &self,
        event: Option<&LookupEvent>,
        date: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<ResultEnvelope> {
        let started = Instant::now();
        let bucket = self.config.bucket.as_str();

        let prefix = resolve_prefix(&self.config.strategy, event, date)?;
        info!(bucket = bucket, prefix = %prefix, "Starting lookup");

        let latest = find_latest(self.lister.as_ref(), bucket, &prefix, cancel).await?;

        let records = read_records(
            self.fetcher.as_ref(),
            bucket,
            &latest.key,
            self.config.max_records,
            cancel,
        )
        .await?;

        let envelope = assemble(bucket, latest, records);

        info!(
            key = %envelope.key,
            records = envelope.contents.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Lookup completed"
        );

        Ok(envelope)
    }
}
