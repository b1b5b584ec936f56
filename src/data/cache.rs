//! Table Cache Module
//! Load results keyed by file path + content digest, with explicit
//! invalidation. Reloading an unchanged file is free.

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::data::loader::DataLoadError;
use crate::data::table::SalesTable;

pub type ContentDigest = [u8; 32];

struct CacheEntry {
    digest: ContentDigest,
    table: Arc<SalesTable>,
}

/// Cache of loaded tables. A cached entry is reused only while the file
/// content still hashes to the same digest.
#[derive(Default)]
pub struct TableCache {
    entries: HashMap<PathBuf, CacheEntry>,
}

impl TableCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// SHA-256 of the file's current content.
    pub fn digest_of(path: &Path) -> Result<ContentDigest, DataLoadError> {
        let bytes = std::fs::read(path).map_err(|source| DataLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Sha256::digest(&bytes).into())
    }

    /// Digest of the entry currently cached for `path`, if any.
    pub fn cached_digest(&self, path: &Path) -> Option<ContentDigest> {
        self.entries.get(path).map(|e| e.digest)
    }

    /// Cached table for `path`, provided the content digest still matches.
    pub fn lookup(&self, path: &Path, digest: ContentDigest) -> Option<Arc<SalesTable>> {
        self.entries
            .get(path)
            .filter(|e| e.digest == digest)
            .map(|e| Arc::clone(&e.table))
    }

    /// Store a freshly loaded table, replacing any stale entry for the path.
    pub fn store(
        &mut self,
        path: &Path,
        digest: ContentDigest,
        table: SalesTable,
    ) -> Arc<SalesTable> {
        let table = Arc::new(table);
        debug!(path = %path.display(), rows = table.len(), "caching sales table");
        self.entries.insert(
            path.to_path_buf(),
            CacheEntry {
                digest,
                table: Arc::clone(&table),
            },
        );
        table
    }

    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::SalesRecord;
    use chrono::NaiveDate;

    fn sample_table() -> SalesTable {
        SalesTable::new(vec![SalesRecord::new(
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "US",
            "Espresso",
            2,
            3.0,
            1.0,
        )])
    }

    #[test]
    fn unchanged_content_hits_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let mut cache = TableCache::new();
        let digest = TableCache::digest_of(&path).unwrap();
        assert!(cache.lookup(&path, digest).is_none());

        let stored = cache.store(&path, digest, sample_table());
        let hit = cache.lookup(&path, digest).unwrap();
        assert!(Arc::ptr_eq(&stored, &hit));
        assert_eq!(cache.cached_digest(&path), Some(digest));
    }

    #[test]
    fn changed_content_misses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let mut cache = TableCache::new();
        let digest = TableCache::digest_of(&path).unwrap();
        cache.store(&path, digest, sample_table());

        std::fs::write(&path, "a,b\n1,3\n").unwrap();
        let new_digest = TableCache::digest_of(&path).unwrap();
        assert_ne!(digest, new_digest);
        assert!(cache.lookup(&path, new_digest).is_none());
    }

    #[test]
    fn invalidate_drops_the_entry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        std::fs::write(&path, "a,b\n1,2\n").unwrap();

        let mut cache = TableCache::new();
        let digest = TableCache::digest_of(&path).unwrap();
        cache.store(&path, digest, sample_table());
        cache.invalidate(&path);
        assert!(cache.lookup(&path, digest).is_none());
        assert!(cache.cached_digest(&path).is_none());
    }

    #[test]
    fn digest_of_missing_file_is_an_io_error() {
        let err = TableCache::digest_of(Path::new("/nonexistent/sales.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }
}
