//! Configuration module for the reddit-image-scraper.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Sort and time window definitions
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{Config, FilterConfig, NetworkConfig, ScraperConfig};
pub use modes::{SortMode, TimeWindow};
pub use validation::{normalize_collection, validate_collection, validate_config};
