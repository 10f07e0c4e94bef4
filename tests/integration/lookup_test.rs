//! End-to-end lookup tests against LocalStack S3.

use crate::common::{LocalStackTestContext, generate_test_records};
use chrono::NaiveDate;
use lm_error::LmError;
use lm_locator::{S3Config, S3Lister, create_s3_client, find_latest};
use lm_lookup::LatestObjectLookup;
use lm_reader_ndjson::{S3Fetcher, read_records};
use lm_traits::ObjectLister;
use lm_types::{LookupConfig, LookupEvent};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const TEST_BUCKET: &str = "lastmod-integration";

async fn setup() -> Option<(LocalStackTestContext, aws_sdk_s3::Client)> {
    let ctx = LocalStackTestContext::new().await;
    if !ctx.is_available().await {
        eprintln!("LocalStack not available at {}, skipping", ctx.endpoint);
        return None;
    }
    ctx.create_bucket(TEST_BUCKET)
        .await
        .expect("Failed to create bucket");

    let client = create_s3_client(
        &S3Config::new(ctx.region.clone())
            .with_endpoint(ctx.endpoint.clone())
            .with_credentials("test", "test"),
    )
    .await
    .expect("Failed to create S3 client");

    Some((ctx, client))
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_latest_upload_is_returned() {
    let Some((ctx, client)) = setup().await else {
        return;
    };
    let prefix = "it-latest/unit=7/sensor=temp/year=2024/month=03/day=01";
    ctx.clear_prefix(TEST_BUCKET, "it-latest/").await.unwrap();

    ctx.upload_gzipped_ndjson(
        TEST_BUCKET,
        &format!("{prefix}/older.json.gz"),
        &generate_test_records(3, "older"),
    )
    .await
    .unwrap();

    // LastModified has one-second resolution
    tokio::time::sleep(Duration::from_millis(1100)).await;

    ctx.upload_gzipped_ndjson(
        TEST_BUCKET,
        &format!("{prefix}/newer.json.gz"),
        &generate_test_records(10, "newer"),
    )
    .await
    .unwrap();

    let config = LookupConfig::partitioned(TEST_BUCKET, ctx.region.clone(), "it-latest");
    let lookup = LatestObjectLookup::from_s3_client(config.into(), client);
    let event = LookupEvent::new("7", "temp");

    let envelope = lookup
        .run_on(Some(&event), test_date(), &CancellationToken::new())
        .await
        .expect("lookup should succeed");

    assert_eq!(envelope.bucket, TEST_BUCKET);
    assert_eq!(envelope.key, format!("{prefix}/newer.json.gz"));
    assert_eq!(envelope.contents.len(), 5);
    assert_eq!(envelope.contents[0].data, "newer-0");
    assert_eq!(envelope.contents[4].data, "newer-4");
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_empty_partition_is_not_found() {
    let Some((_ctx, client)) = setup().await else {
        return;
    };

    let config = LookupConfig::partitioned(TEST_BUCKET, "us-east-1", "it-missing");
    let lookup = LatestObjectLookup::from_s3_client(config.into(), client);
    let event = LookupEvent::new("1", "none");

    let result = lookup
        .run_on(Some(&event), test_date(), &CancellationToken::new())
        .await;

    match result {
        Err(LmError::NotFound { bucket, prefix }) => {
            assert_eq!(bucket, TEST_BUCKET);
            assert_eq!(prefix, "it-missing/unit=1/sensor=none/year=2024/month=03/day=01");
        }
        other => panic!("Expected NotFound, got: {:?}", other),
    }
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_static_prefix_without_event() {
    let Some((ctx, client)) = setup().await else {
        return;
    };
    ctx.clear_prefix(TEST_BUCKET, "it-static/").await.unwrap();
    ctx.upload_gzipped_ndjson(
        TEST_BUCKET,
        "it-static/feed/only.json.gz",
        &generate_test_records(2, "static"),
    )
    .await
    .unwrap();

    let config = LookupConfig::with_static_prefix(TEST_BUCKET, "us-east-1", "it-static/feed")
        .with_max_records(10);
    let lookup = LatestObjectLookup::from_s3_client(config.into(), client);

    let envelope = lookup
        .run(None, &CancellationToken::new())
        .await
        .expect("lookup should succeed");

    assert_eq!(envelope.key, "it-static/feed/only.json.gz");
    assert_eq!(envelope.contents.len(), 2);
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_non_gzip_object_is_decompress_error() {
    let Some((ctx, client)) = setup().await else {
        return;
    };
    ctx.clear_prefix(TEST_BUCKET, "it-plain/").await.unwrap();
    ctx.upload(
        TEST_BUCKET,
        "it-plain/feed/plain.json",
        generate_test_records(2, "plain").into_bytes(),
    )
    .await
    .unwrap();

    let config = LookupConfig::with_static_prefix(TEST_BUCKET, "us-east-1", "it-plain/feed");
    let lookup = LatestObjectLookup::from_s3_client(config.into(), client);

    let result = lookup.run(None, &CancellationToken::new()).await;
    assert!(matches!(result, Err(LmError::Decompress(_))), "got {:?}", result);
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_listing_follows_continuation_tokens() {
    let Some((ctx, client)) = setup().await else {
        return;
    };
    ctx.clear_prefix(TEST_BUCKET, "it-pages/").await.unwrap();
    for i in 0..5 {
        ctx.upload_gzipped_ndjson(
            TEST_BUCKET,
            &format!("it-pages/obj-{i}.json.gz"),
            &generate_test_records(1, "page"),
        )
        .await
        .unwrap();
    }

    let lister = S3Lister::new(client);
    let mut token: Option<String> = None;
    let mut seen = 0;
    let mut pages = 0;

    loop {
        let page = lister
            .list_page(TEST_BUCKET, "it-pages/", token.as_deref(), 2)
            .await
            .expect("listing should succeed");
        pages += 1;
        seen += page.entries.len();
        if !page.truncated {
            break;
        }
        token = page.continuation_token;
        assert!(token.is_some());
    }

    assert_eq!(seen, 5);
    assert_eq!(pages, 3);

    let latest = find_latest(&lister, TEST_BUCKET, "it-pages/", &CancellationToken::new())
        .await
        .unwrap();
    assert!(latest.key.starts_with("it-pages/obj-"));
}

#[tokio::test]
#[ignore = "requires LocalStack"]
async fn test_fetcher_reads_capped_records() {
    let Some((ctx, client)) = setup().await else {
        return;
    };
    ctx.clear_prefix(TEST_BUCKET, "it-fetch/").await.unwrap();
    ctx.upload_gzipped_ndjson(
        TEST_BUCKET,
        "it-fetch/big.json.gz",
        &generate_test_records(500, "fetch"),
    )
    .await
    .unwrap();

    let fetcher = S3Fetcher::new(client);
    let records = read_records(
        &fetcher,
        TEST_BUCKET,
        "it-fetch/big.json.gz",
        3,
        &CancellationToken::new(),
    )
    .await
    .expect("read should succeed");

    assert_eq!(records.len(), 3);
    assert_eq!(records[2].data, "fetch-2");

    let missing = read_records(
        &fetcher,
        TEST_BUCKET,
        "it-fetch/absent.json.gz",
        3,
        &CancellationToken::new(),
    )
    .await;
    assert!(matches!(missing, Err(LmError::Get(_))), "got {:?}", missing);
}
