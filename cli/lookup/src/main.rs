//! lm-lookup CLI
//!
//! Prints the newest object's first records for a partition.

use clap::Parser;
use lm_cli_common::{body_text, init_logging, is_success};

mod args;
mod run;

use args::{Cli, ResponseShape};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr; stdout carries only the response
    init_logging(args.log_level, args.log_format)?;

    let shape = args.response_shape;
    let response = run::execute(args).await?;

    let success = is_success(&response);
    match shape {
        ResponseShape::Gateway => println!("{}", serde_json::to_string(&response)?),
        ResponseShape::Body if success => println!("{}", body_text(&response)),
        ResponseShape::Body => eprintln!("Error ({}): {}", response.status_code, body_text(&response)),
    }

    if !success {
        std::process::exit(1);
    }

    Ok(())
}
