//! Deduplication module.
//!
//! Tracks which upstream identifiers are already on disk. The output
//! directory doubles as the index between runs.

pub mod index;

pub use index::DeduplicationIndex;
