//! LocalStack test context and utilities.

use aws_sdk_s3::Client as S3Client;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// LocalStack test context providing an S3 client.
pub struct LocalStackTestContext {
    pub s3: S3Client,
    pub endpoint: String,
    pub region: String,
}

impl LocalStackTestContext {
    /// Create a new LocalStack test context.
    ///
    /// Uses the `LOCALSTACK_ENDPOINT` environment variable if set,
    /// otherwise defaults to `http://localhost:4566`.
    pub async fn new() -> Self {
        let endpoint = std::env::var("LOCALSTACK_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:4566".to_string());
        let region = "us-east-1".to_string();

        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(region.clone()))
            .endpoint_url(&endpoint)
            .credentials_provider(aws_sdk_s3::config::Credentials::new(
                "test", "test", None, None, "localstack",
            ))
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(true)
            .build();

        Self {
            s3: S3Client::from_conf(s3_config),
            endpoint,
            region,
        }
    }

    /// Check if LocalStack is available and healthy.
    pub async fn is_available(&self) -> bool {
        self.s3.list_buckets().send().await.is_ok()
    }

    /// Create an S3 bucket for testing.
    pub async fn create_bucket(&self, name: &str) -> Result<(), aws_sdk_s3::Error> {
        let buckets = self.s3.list_buckets().send().await?;
        let exists = buckets
            .buckets()
            .iter()
            .any(|b| b.name().unwrap_or_default() == name);

        if !exists {
            self.s3.create_bucket().bucket(name).send().await?;
        }
        Ok(())
    }

    /// Upload raw bytes to S3.
    pub async fn upload(&self, bucket: &str, key: &str, data: Vec<u8>) -> Result<(), aws_sdk_s3::Error> {
        self.s3
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(data.into())
            .send()
            .await?;
        Ok(())
    }

    /// Upload NDJSON content gzip-compressed.
    pub async fn upload_gzipped_ndjson(
        &self,
        bucket: &str,
        key: &str,
        content: &str,
    ) -> Result<(), aws_sdk_s3::Error> {
        self.upload(bucket, key, gzip(content)).await
    }

    /// Delete every object under `prefix`.
    pub async fn clear_prefix(&self, bucket: &str, prefix: &str) -> Result<(), aws_sdk_s3::Error> {
        let listed = self
            .s3
            .list_objects_v2()
            .bucket(bucket)
            .prefix(prefix)
            .send()
            .await?;

        for key in listed.contents().iter().filter_map(|o| o.key()) {
            self.s3.delete_object().bucket(bucket).key(key).send().await?;
        }
        Ok(())
    }
}

/// Gzip-compress `content`.
pub fn gzip(content: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(content.as_bytes())
        .expect("Failed to compress test data");
    encoder.finish().expect("Failed to finish gzip stream")
}

/// Generate NDJSON records with a trailing newline.
pub fn generate_test_records(num_records: usize, tag: &str) -> String {
    (0..num_records)
        .map(|i| {
            format!(
                r#"{{"timestamp":"2024-03-01T00:00:{:02}Z","data":"{}-{}"}}"#,
                i % 60,
                tag,
                i
            ) + "\n"
        })
        .collect()
}
