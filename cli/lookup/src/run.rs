//! Main execution logic for lm-lookup CLI.

use anyhow::{Context, Result};
use aws_lambda_events::apigw::ApiGatewayProxyResponse;
use lm_cli_common::to_gateway_response;
use lm_locator::{S3Config, create_s3_client};
use lm_lookup::LatestObjectLookup;
use lm_types::{LookupConfig, LookupEvent};
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::args::Cli;

/// Execute one lookup with the provided arguments.
///
/// Configuration problems are returned as errors before any request is made;
/// everything after that is reported through the gateway response.
pub async fn execute(args: Cli) -> Result<ApiGatewayProxyResponse> {
    let config = build_config(&args)?;
    let event = read_event(&args, std::io::stdin())?;

    let client = create_s3_client(&build_s3_config(&args)).await?;
    let lookup = LatestObjectLookup::from_s3_client(Arc::new(config), client);

    let cancel = CancellationToken::new();
    let _cancel_on_exit = cancel.clone().drop_guard();
    spawn_cancel_triggers(&cancel, args.timeout_secs);

    let result = lookup.run(event.as_ref(), &cancel).await;

    Ok(to_gateway_response(result, args.output_format.into()))
}

/// Build and validate the lookup configuration.
///
/// A static prefix takes precedence over the environment name.
pub fn build_config(args: &Cli) -> Result<LookupConfig> {
    let config = match (&args.prefix, &args.environment) {
        (Some(prefix), _) => LookupConfig::with_static_prefix(&args.bucket, &args.region, prefix),
        (None, Some(environment)) => {
            LookupConfig::partitioned(&args.bucket, &args.region, environment)
        }
        (None, None) => {
            anyhow::bail!("either --environment (ENVIRONMENT_NAME) or --prefix (PREFIX) is required")
        }
    }
    .with_max_records(args.max_records);

    config.validate()?;
    debug!(config = ?config, "Loaded configuration");

    Ok(config)
}

/// Build the S3 client configuration.
pub fn build_s3_config(args: &Cli) -> S3Config {
    let mut s3_config = S3Config::new(&args.region).with_timeout(args.s3_timeout_secs);

    if let Some(endpoint) = &args.s3_endpoint {
        s3_config = s3_config.with_endpoint(endpoint);
    }

    if let (Some(access_key), Some(secret_key)) = (&args.access_key, &args.secret_key) {
        s3_config = s3_config.with_credentials(access_key, secret_key);
    }

    if let Some(profile) = &args.profile {
        s3_config = s3_config.with_profile(profile);
    }

    s3_config
}

/// Read the request event from flags, inline JSON, a file or stdin.
pub fn read_event(args: &Cli, stdin: impl Read) -> Result<Option<LookupEvent>> {
    if let (Some(unit_id), Some(sensor)) = (&args.unit_id, &args.sensor) {
        return Ok(Some(LookupEvent::new(unit_id, sensor)));
    }

    let Some(source) = args.event.as_deref() else {
        return Ok(None);
    };

    let json = if source == "-" {
        let mut buf = String::new();
        let mut stdin = stdin;
        stdin
            .read_to_string(&mut buf)
            .context("Failed to read event from stdin")?;
        buf
    } else if let Some(path) = source.strip_prefix('@') {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file '{path}'"))?
    } else {
        source.to_string()
    };

    let event = serde_json::from_str(&json).context("Invalid event JSON")?;
    Ok(Some(event))
}

/// Cancel the lookup on Ctrl-C or when the deadline passes.
fn spawn_cancel_triggers(cancel: &CancellationToken, timeout_secs: u64) {
    let token = cancel.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            signal = tokio::signal::ctrl_c() => {
                if signal.is_ok() {
                    warn!("Interrupted, cancelling lookup");
                    token.cancel();
                }
            }
        }
    });

    if timeout_secs > 0 {
        let token = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(Duration::from_secs(timeout_secs)) => {
                    warn!(timeout_secs = timeout_secs, "Deadline reached, cancelling lookup");
                    token.cancel();
                }
            }
        });
    }
}
