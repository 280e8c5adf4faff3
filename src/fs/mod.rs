//! Filesystem module.
//!
//! Provides:
//! - Collection folder management
//! - Filename generation and identifier recovery

pub mod naming;
pub mod paths;

pub use naming::{
    derive_filename, extension_from_url, identifier_from_filename, is_partial_download,
    partial_path, sanitize_path_component, sanitize_title,
};
pub use paths::{ensure_dir, get_collection_folder};
