//! lm-lookup-lambda
//!
//! Serves latest-object lookups as an AWS Lambda function behind API Gateway.

use clap::Parser;
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use lm_cli_common::{LogFormat, init_logging};
use lm_locator::create_s3_client;
use lm_lookup::LatestObjectLookup;
use std::sync::Arc;
use tracing::info;

mod args;
mod handler;

use args::LambdaArgs;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = LambdaArgs::parse();

    init_logging(args.log_level, LogFormat::Json)?;

    // Configuration problems stop the function before it serves anything
    let config = args.lookup_config()?;
    let client = create_s3_client(&args.s3_config()).await?;
    let lookup = LatestObjectLookup::from_s3_client(Arc::new(config), client);

    info!(bucket = %lookup.config().bucket, "Lambda ready");

    run(service_fn(|event: LambdaEvent<serde_json::Value>| {
        handler::function_handler(event, &lookup)
    }))
    .await
}
