//! Identifier-based deduplication.

use std::collections::HashSet;
use std::path::Path;

use crate::error::Result;
use crate::fs::naming::{identifier_from_filename, is_partial_download};

/// Upstream identifiers already materialized on disk.
#[derive(Debug, Default, Clone)]
pub struct DeduplicationIndex {
    known: HashSet<String>,
}

impl DeduplicationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from the files already present in a directory.
    ///
    /// A missing directory yields an empty index.
    pub fn scan_directory(dir: &Path) -> Result<Self> {
        let mut index = Self::new();

        if !dir.exists() {
            return Ok(index);
        }

        let mut filenames = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                filenames.push(name.to_string());
            }
        }

        index.seed(&filenames);
        tracing::debug!(
            "Indexed {} identifiers from {}",
            index.len(),
            dir.display()
        );

        Ok(index)
    }

    /// Record the identifier prefix of each filename.
    pub fn seed<S: AsRef<str>, I: IntoIterator<Item = S>>(&mut self, filenames: I) {
        for name in filenames {
            let name = name.as_ref();
            if is_partial_download(name) {
                continue;
            }
            if let Some(id) = identifier_from_filename(name) {
                self.known.insert(id.to_string());
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.known.contains(id)
    }

    /// Mark an identifier as materialized. Returns `false` if it was already known.
    pub fn mark(&mut self, id: impl Into<String>) -> bool {
        self.known.insert(id.into())
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_counts_distinct_prefixes() {
        let mut index = DeduplicationIndex::new();
        index.seed([
            "aaa_first.jpg",
            "aaa_first copy.png",
            "bbb_second.gif",
            "ccc_.jpg",
            "ddd.webp",
        ]);

        assert_eq!(index.len(), 4);
        for id in ["aaa", "bbb", "ccc", "ddd"] {
            assert!(index.contains(id), "missing {}", id);
        }
        assert!(!index.contains("zzz"));
        assert!(!index.contains(&uuid::Uuid::new_v4().simple().to_string()));
    }

    #[test]
    fn test_seed_ignores_partials() {
        let mut index = DeduplicationIndex::new();
        index.seed([".0b1c.part", "eee_title.jpg.part"]);
        assert!(index.is_empty());
    }

    #[test]
    fn test_mark() {
        let mut index = DeduplicationIndex::new();
        assert!(index.mark("abc"));
        assert!(!index.mark("abc"));
        assert!(index.contains("abc"));
    }

    #[test]
    fn test_scan_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("k1_Sunset.jpg"), b"x").unwrap();
        std::fs::write(dir.path().join("k2_Forest.png"), b"x").unwrap();
        std::fs::write(dir.path().join(".tmp.part"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("k3_subdir")).unwrap();

        let index = DeduplicationIndex::scan_directory(dir.path()).unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.contains("k1"));
        assert!(index.contains("k2"));
        assert!(!index.contains("k3"));
    }

    #[test]
    fn test_scan_missing_directory() {
        let index = DeduplicationIndex::scan_directory(Path::new("/nonexistent/dir")).unwrap();
        assert!(index.is_empty());
    }
}
