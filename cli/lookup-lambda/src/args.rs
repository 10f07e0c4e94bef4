//! Environment configuration for the Lambda function.

use clap::Parser;
use lm_cli_common::LogLevel;
use lm_locator::S3Config;
use lm_types::LookupConfig;

/// Latest-object lookup as an AWS Lambda function.
///
/// Configured entirely from the function's environment; the invocation
/// payload carries only the partition (`{"unit_id": .., "sensor": ..}`).
#[derive(Parser, Debug)]
#[command(name = "lm-lookup-lambda")]
#[command(version, about, long_about = None)]
pub struct LambdaArgs {
    /// S3 bucket name
    #[arg(long, env = "BUCKET_NAME")]
    pub bucket: String,

    /// AWS region
    #[arg(long, env = "REGION")]
    pub region: String,

    /// Environment segment of partitioned prefixes
    #[arg(long, env = "ENVIRONMENT_NAME", required_unless_present = "prefix")]
    pub environment: Option<String>,

    /// Static prefix to search instead of a partition
    #[arg(long, env = "PREFIX")]
    pub prefix: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// Maximum number of records to return
    #[arg(long, env = "MAX_RECORDS", default_value = "5")]
    pub max_records: usize,

    /// Per-request S3 timeout in seconds
    #[arg(long, env = "S3_TIMEOUT_SECS", default_value = "30")]
    pub s3_timeout_secs: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl LambdaArgs {
    /// Build and validate the lookup configuration.
    pub fn lookup_config(&self) -> lm_error::Result<LookupConfig> {
        let config = match (&self.prefix, &self.environment) {
            (Some(prefix), _) => {
                LookupConfig::with_static_prefix(&self.bucket, &self.region, prefix)
            }
            (None, environment) => LookupConfig::partitioned(
                &self.bucket,
                &self.region,
                environment.as_deref().unwrap_or_default(),
            ),
        }
        .with_max_records(self.max_records);

        config.validate()?;
        Ok(config)
    }

    pub fn s3_config(&self) -> S3Config {
        let s3_config = S3Config::new(&self.region).with_timeout(self.s3_timeout_secs);
        match &self.s3_endpoint {
            Some(endpoint) => s3_config.with_endpoint(endpoint),
            None => s3_config,
        }
    }
}
