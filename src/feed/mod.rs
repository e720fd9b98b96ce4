//! Feed definitions and per-feed extraction results
//!
//! The set of feeds is fixed at compile time ([`FeedKind`]); only their URLs
//! can be changed at startup.

mod types;

pub use types::{ExtractionResult, FeedKind, FeedResults, FeedTarget, RowRecord};
