//! Shared utilities for lastmod binaries.
//!
//! - Log level/format arguments and subscriber setup
//! - Mapping lookup results onto API Gateway proxy responses

pub mod args;
pub mod logging;
pub mod response;

pub use args::{LogFormat, LogLevel};
pub use logging::init_logging;
pub use response::{body_text, is_success, status_for, to_gateway_response};
