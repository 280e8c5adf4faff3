//! Path and directory management.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::fs::naming::sanitize_path_component;
use crate::error::Result;

/// Get the folder that holds a collection's downloads.
pub fn get_collection_folder(config: &Config) -> Result<PathBuf> {
    let folder = sanitize_path_component(&config.scraper.collection)?;
    Ok(config.scraper.output_directory.join(folder))
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_collection_folder() {
        let mut config = Config::default();
        config.scraper.output_directory = PathBuf::from("/downloads");
        config.scraper.collection = "wallpapers".to_string();

        let path = get_collection_folder(&config).unwrap();
        assert_eq!(path, PathBuf::from("/downloads/wallpapers"));
    }

    #[test]
    fn test_rejects_traversal() {
        let mut config = Config::default();
        config.scraper.collection = "..".to_string();
        assert!(get_collection_folder(&config).is_err());
    }

    #[test]
    fn test_ensure_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        ensure_dir(&nested).unwrap();
    }
}
