//! Core traits for lastmod.
//!
//! The lookup core talks to the object store only through these traits:
//! - [`ObjectLister`] - Paginated key listing under a prefix
//! - [`ObjectFetcher`] - Opening an object's body as a byte stream

pub mod fetcher;
pub mod lister;

pub use fetcher::*;
pub use lister::*;
