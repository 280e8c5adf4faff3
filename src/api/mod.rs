//! Listing API module.
//!
//! This module provides:
//! - HTTP client for the public listing endpoint
//! - Listing query construction
//! - Listing response types

pub mod client;
pub mod query;
pub mod types;

pub use client::{ListingOutcome, ListingPage, RedditApi, Selection, MAX_RATE_LIMIT_RETRIES};
pub use query::{ListingQuery, MAX_PAGE_SIZE};
pub use types::RawEntry;
