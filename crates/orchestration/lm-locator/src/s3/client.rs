//! S3 client configuration and creation.

use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_s3::Client;
use lm_error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for S3 access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    /// AWS region
    pub region: String,

    /// Custom endpoint URL (for LocalStack)
    pub endpoint: Option<String>,

    /// Explicit AWS access key (optional)
    pub access_key: Option<String>,

    /// Explicit AWS secret key (optional)
    pub secret_key: Option<String>,

    /// AWS profile name (optional)
    pub profile: Option<String>,

    /// Per-operation timeout in seconds
    pub timeout_secs: u64,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            region: String::new(),
            endpoint: None,
            access_key: None,
            secret_key: None,
            profile: None,
            timeout_secs: 30,
        }
    }
}

impl S3Config {
    /// Create a new S3Config for the given region.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            ..Default::default()
        }
    }

    /// Set a custom endpoint (for LocalStack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set explicit credentials.
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = Some(access_key.into());
        self.secret_key = Some(secret_key.into());
        self
    }

    /// Set the AWS profile.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Set the per-operation timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

/// Create an S3 client from configuration.
pub async fn create_s3_client(config: &S3Config) -> Result<Client> {
    use aws_config::Region;

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .timeout_config(
            TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(config.timeout_secs))
                .build(),
        );

    if let Some(endpoint) = &config.endpoint {
        loader = loader.endpoint_url(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&config.access_key, &config.secret_key) {
        let credentials =
            aws_sdk_s3::config::Credentials::new(access_key, secret_key, None, None, "lastmod");
        loader = loader.credentials_provider(credentials);
    }

    if let Some(profile) = &config.profile {
        loader = loader.profile_name(profile);
    }

    let aws_config = loader.load().await;

    // LocalStack only serves path-style requests
    let s3_config_builder = aws_sdk_s3::config::Builder::from(&aws_config);
    let s3_config = if config.endpoint.is_some() {
        s3_config_builder.force_path_style(true).build()
    } else {
        s3_config_builder.build()
    };

    debug!(
        region = %config.region,
        endpoint = ?config.endpoint,
        "Created S3 client"
    );

    Ok(Client::from_conf(s3_config))
}
