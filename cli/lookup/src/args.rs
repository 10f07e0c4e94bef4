//! CLI argument definitions for lm-lookup.

use clap::{Parser, ValueEnum};
use lm_cli_common::{LogFormat, LogLevel};

/// Latest-object lookup for partitioned S3 data.
///
/// Finds the most recently modified object under today's partition for a
/// unit and sensor, and prints its first records as JSON.
///
/// ## Examples
///
/// Event given as flags:
///   lm-lookup -b sensor-data --region eu-west-1 -e prod --unit-id 42 --sensor temp
///
/// Event given as JSON on stdin:
///   echo '{"unit_id":"42","sensor":"temp"}' | lm-lookup --event -
///
/// Fixed prefix instead of a partition:
///   lm-lookup -b sensor-data --region eu-west-1 --prefix exports/latest/
#[derive(Parser, Debug)]
#[command(name = "lm-lookup")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Store Configuration ===
    /// S3 bucket name
    #[arg(short, long, env = "BUCKET_NAME")]
    pub bucket: String,

    /// AWS region
    #[arg(long, env = "REGION")]
    pub region: String,

    /// Environment segment of partitioned prefixes
    #[arg(short, long, env = "ENVIRONMENT_NAME", required_unless_present = "prefix")]
    pub environment: Option<String>,

    /// Static prefix to search instead of a partition (takes precedence over --environment)
    #[arg(short, long, env = "PREFIX")]
    pub prefix: Option<String>,

    /// Custom S3 endpoint URL (for LocalStack)
    #[arg(long, env = "S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    /// AWS access key ID
    #[arg(long, env = "AWS_ACCESS_KEY_ID")]
    pub access_key: Option<String>,

    /// AWS secret access key
    #[arg(long, env = "AWS_SECRET_ACCESS_KEY")]
    pub secret_key: Option<String>,

    /// AWS profile name
    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    // === Request ===
    /// Unit identifier of the partition
    #[arg(long, requires = "sensor", conflicts_with = "event")]
    pub unit_id: Option<String>,

    /// Sensor name of the partition
    #[arg(long, requires = "unit_id", conflicts_with = "event")]
    pub sensor: Option<String>,

    /// Request event as JSON, `-` to read it from stdin, or `@path` to read a file
    #[arg(long)]
    pub event: Option<String>,

    // === Lookup Options ===
    /// Maximum number of records to return (must be >= 1)
    #[arg(long, env = "MAX_RECORDS", default_value = "5", value_parser = parse_positive_usize)]
    pub max_records: usize,

    /// Abort the lookup after this many seconds (0 = no deadline)
    #[arg(long, env = "LOOKUP_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,

    /// Per-request S3 timeout in seconds
    #[arg(long, default_value = "30")]
    pub s3_timeout_secs: u64,

    // === Output Options ===
    /// JSON layout of the lookup result
    #[arg(long, value_enum, default_value = "json")]
    pub output_format: OutputFormatArg,

    /// What to print on stdout
    #[arg(long, value_enum, default_value = "body")]
    pub response_shape: ResponseShape,

    // === Logging ===
    /// Log level
    #[arg(long, env = "LOG_LEVEL", value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log layout
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,
}

/// Output format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Single-line JSON
    Json,
    /// Indented JSON
    Pretty,
}

impl From<OutputFormatArg> for lm_lookup::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => lm_lookup::OutputFormat::Json,
            OutputFormatArg::Pretty => lm_lookup::OutputFormat::Pretty,
        }
    }
}

/// Shape of the printed response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResponseShape {
    /// Only the response body
    Body,
    /// API-gateway style `{statusCode, headers, body}` wrapper
    Gateway,
}

/// Parse a positive usize (>= 1).
fn parse_positive_usize(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if value == 0 {
        return Err("value must be at least 1".to_string());
    }
    Ok(value)
}
