//! Core types for lastmod.
//!
//! This crate provides the foundational types used throughout the system:
//! - [`ObjectSummary`] / [`ListingPage`] - Listing results from the object store
//! - [`DataRecord`] / [`ResultEnvelope`] - Parsed content and the lookup response
//! - [`LookupEvent`] - The partition a lookup is asked about
//! - [`LookupConfig`] - Process-wide, read-only lookup configuration

pub mod config;
pub mod event;
pub mod listing;
pub mod record;

pub use config::*;
pub use event::*;
pub use listing::*;
pub use record::*;
