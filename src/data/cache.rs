use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{load_file, LoadError};
use super::model::ListingTable;

// ---------------------------------------------------------------------------
// DatasetCache – loaded tables keyed by source path
// ---------------------------------------------------------------------------

/// Loaded tables keyed by the path they were read from.
///
/// Created once at start-up and owned by the application state. Entries
/// live until [`DatasetCache::invalidate`] or [`DatasetCache::clear`] is
/// called; failed loads are never stored.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<ListingTable>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `path`, reading the file only on a miss.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<ListingTable>, LoadError> {
        if let Some(table) = self.entries.get(path) {
            log::debug!("Cache hit for {}", path.display());
            return Ok(Arc::clone(table));
        }

        log::info!("Cache miss for {}, loading", path.display());
        let table = Arc::new(load_file(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&table));
        Ok(table)
    }

    /// Forget the table loaded from `path`. Returns whether it was cached.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        let removed = self.entries.remove(path).is_some();
        if removed {
            log::info!("Invalidated cached table for {}", path.display());
        }
        removed
    }

    /// Forget every table. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.entries.len();
        self.entries.clear();
        log::info!("Cleared {dropped} cached tables");
        dropped
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write csv");
        path
    }

    #[test]
    fn repeated_loads_do_not_reread_the_file() {
        let dir = tempdir().expect("temp dir");
        let path = write(dir.path(), "a.csv", "price\n1\n2\n");
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(&path).expect("first load");
        std::fs::remove_file(&path).expect("remove");
        let second = cache.get_or_load(&path).expect("cached load");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn different_paths_are_cached_separately() {
        let dir = tempdir().expect("temp dir");
        let a = write(dir.path(), "a.csv", "price\n1\n");
        let b = write(dir.path(), "b.csv", "price\n1\n2\n3\n");
        let mut cache = DatasetCache::new();

        assert_eq!(cache.get_or_load(&a).expect("a").len(), 1);
        assert_eq!(cache.get_or_load(&b).expect("b").len(), 3);
        assert!(cache.contains(&a) && cache.contains(&b));
    }

    #[test]
    fn invalidate_forces_a_reread() {
        let dir = tempdir().expect("temp dir");
        let path = write(dir.path(), "a.csv", "price\n1\n");
        let mut cache = DatasetCache::new();
        assert_eq!(cache.get_or_load(&path).expect("load").len(), 1);

        write(dir.path(), "a.csv", "price\n1\n2\n");
        assert_eq!(cache.get_or_load(&path).expect("cached").len(), 1);

        assert!(cache.invalidate(&path));
        assert_eq!(cache.get_or_load(&path).expect("reload").len(), 2);
        assert!(!cache.invalidate(&dir.path().join("other.csv")));
    }

    #[test]
    fn failed_loads_are_not_cached() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("late.csv");
        let mut cache = DatasetCache::new();

        assert!(matches!(
            cache.get_or_load(&path),
            Err(LoadError::NotFound { .. })
        ));
        assert!(cache.is_empty());

        write(dir.path(), "late.csv", "price\n5\n");
        assert_eq!(cache.get_or_load(&path).expect("load").len(), 1);

        assert_eq!(cache.clear(), 1);
        assert!(cache.is_empty());
    }
}
