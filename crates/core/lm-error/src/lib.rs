//! Error types and classification for lastmod.
//!
//! This crate provides:
//! - [`LmError`] - Error enum covering every failure of a lookup
//! - [`ErrorDisposition`] for mapping failures onto user-visible responses
//!
//! Nothing in lastmod retries: every error aborts the current lookup and is
//! returned whole to the caller, which decides what the user sees.

use thiserror::Error;

/// Top-level error type for lastmod.
#[derive(Error, Debug)]
pub enum LmError {
    /// A required setting is missing or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A listing call against the object store failed
    #[error("List failed: {0}")]
    List(String),

    /// No object exists under the requested prefix
    #[error("No object found. bucket: {bucket}, prefix: {prefix}")]
    NotFound { bucket: String, prefix: String },

    /// The object could not be fetched or its body could not be read
    #[error("Get failed: {0}")]
    Get(String),

    /// The object body is not valid gzip content
    #[error("Decompression failed: {0}")]
    Decompress(String),

    /// A line of the object is not a valid record
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// The response could not be encoded
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// The caller cancelled the lookup
    #[error("Lookup cancelled during {0}")]
    Cancelled(&'static str),
}

impl LmError {
    /// Returns true if no object was found under the prefix.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// How a failed lookup should be surfaced.
///
/// The core never decides the user-visible outcome; it only classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDisposition {
    /// Nothing to return: present as an empty result rather than a failure
    EmptyResult,

    /// The request or the stored data is unusable
    ///
    /// Examples: missing setting, corrupt gzip, malformed record line
    BadInput,

    /// The object store failed
    Upstream,

    /// Failure inside the service itself
    Internal,

    /// The caller gave up before the lookup completed
    Cancelled,
}

/// Classifies an error for the response boundary.
pub fn classify_error(error: &LmError) -> ErrorDisposition {
    match error {
        LmError::NotFound { .. } => ErrorDisposition::EmptyResult,
        LmError::Configuration(_) => ErrorDisposition::BadInput,
        LmError::Decompress(_) => ErrorDisposition::BadInput,
        LmError::Parse { .. } => ErrorDisposition::BadInput,
        LmError::List(_) => ErrorDisposition::Upstream,
        LmError::Get(_) => ErrorDisposition::Upstream,
        LmError::Serialization(_) => ErrorDisposition::Internal,
        LmError::Cancelled(_) => ErrorDisposition::Cancelled,
    }
}

/// Result type alias using LmError.
pub type Result<T> = std::result::Result<T, LmError>;
