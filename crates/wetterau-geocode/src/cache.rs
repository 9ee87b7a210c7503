//! Persistent geocode cache.
//!
//! A flat JSON object mapping the exact address string to a `[lat, lon]`
//! pair, kept human-readable so entries can be inspected or hand-pruned.
//! The cache is the union of all successful resolutions across all runs:
//! it is loaded fully at startup and flushed after every new entry so a
//! crash mid-run loses at most the entry currently in flight.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use wetterau_core::models::Coordinate;
use wetterau_core::{Result, WetterauError};

pub struct GeocodeCache {
    path: PathBuf,
    entries: HashMap<String, Coordinate>,
}

impl GeocodeCache {
    /// Load the cache from `path`.
    ///
    /// A missing file is an empty cache. A corrupt file is discarded with a
    /// warning and treated as empty; the next flush recreates it. Loading
    /// never fails on bad content.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = read_entries(&path)
            .into_iter()
            .map(|(addr, pair)| (addr, Coordinate::from(pair)))
            .collect();
        Self { path, entries }
    }

    /// Create an empty cache that will persist to `path`.
    pub fn empty(path: impl AsRef<Path>) -> Self {
        Self { path: path.as_ref().to_path_buf(), entries: HashMap::new() }
    }

    pub fn get(&self, address: &str) -> Option<Coordinate> {
        self.entries.get(address).copied()
    }

    pub fn contains(&self, address: &str) -> bool {
        self.entries.contains_key(address)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, address: impl Into<String>, coord: Coordinate) {
        self.entries.insert(address.into(), coord);
    }

    /// Persist the cache, merged with whatever is currently on disk.
    ///
    /// Reads the file again before writing and takes the union, with the
    /// in-process entries winning on key conflict. This keeps the persisted
    /// cache append-only even if another run wrote entries in the meantime
    /// or a previous run was interrupted.
    pub fn flush(&self) -> Result<()> {
        let mut merged = read_entries(&self.path);
        for (addr, coord) in &self.entries {
            merged.insert(addr.clone(), (*coord).into());
        }

        let json = serde_json::to_string_pretty(&merged)
            .map_err(|e| WetterauError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| WetterauError::CacheWrite {
                    path: self.path.clone(),
                    reason: e.to_string(),
                })?;
            }
        }

        fs::write(&self.path, json).map_err(|e| WetterauError::CacheWrite {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

fn read_entries(path: &Path) -> HashMap<String, [f64; 2]> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        // Not created yet; first flush will write it.
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(e) => {
            tracing::warn!(
                "Could not read geocode cache at {}: {}",
                path.display(),
                e
            );
            return HashMap::new();
        }
    };

    match serde_json::from_str(&content) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(
                "Discarding corrupt geocode cache at {}: {}",
                path.display(),
                e
            );
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache_path(dir: &TempDir) -> PathBuf {
        dir.path().join("geocode_cache.json")
    }

    #[test]
    fn test_missing_file_is_empty_cache() {
        let dir = TempDir::new().unwrap();
        let cache = GeocodeCache::load(cache_path(&dir));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_flush_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(&dir);

        let mut cache = GeocodeCache::load(&path);
        cache.insert("Hauptstraße 1, 61169 Friedberg", Coordinate::new(50.33, 8.75));
        cache.flush().unwrap();

        let reloaded = GeocodeCache::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(
            reloaded.get("Hauptstraße 1, 61169 Friedberg"),
            Some(Coordinate::new(50.33, 8.75))
        );
    }

    #[test]
    fn test_flush_merges_with_disk_instead_of_overwriting() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(&dir);

        let mut first = GeocodeCache::load(&path);
        first.insert("X", Coordinate::new(1.0, 2.0));
        first.flush().unwrap();

        // A second cache instance that never saw X must not drop it.
        let mut second = GeocodeCache::empty(&path);
        second.insert("Y", Coordinate::new(3.0, 4.0));
        second.flush().unwrap();

        let reloaded = GeocodeCache::load(&path);
        assert_eq!(reloaded.get("X"), Some(Coordinate::new(1.0, 2.0)));
        assert_eq!(reloaded.get("Y"), Some(Coordinate::new(3.0, 4.0)));
    }

    #[test]
    fn test_in_process_entry_wins_on_key_conflict() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(&dir);

        let mut first = GeocodeCache::load(&path);
        first.insert("X", Coordinate::new(1.0, 2.0));
        first.flush().unwrap();

        let mut second = GeocodeCache::empty(&path);
        second.insert("X", Coordinate::new(9.0, 9.0));
        second.flush().unwrap();

        let reloaded = GeocodeCache::load(&path);
        assert_eq!(reloaded.get("X"), Some(Coordinate::new(9.0, 9.0)));
    }

    #[test]
    fn test_corrupt_file_yields_empty_cache() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(&dir);
        fs::write(&path, "{ \"truncated\": [50.1,").unwrap();

        let cache = GeocodeCache::load(&path);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_flush_recreates_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = cache_path(&dir);
        fs::write(&path, "not json at all").unwrap();

        let mut cache = GeocodeCache::load(&path);
        cache.insert("X", Coordinate::new(1.0, 2.0));
        cache.flush().unwrap();

        let reloaded = GeocodeCache::load(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.get("X"), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn test_flush_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("cache.json");

        let mut cache = GeocodeCache::load(&path);
        cache.insert("X", Coordinate::new(1.0, 2.0));
        cache.flush().unwrap();

        assert!(path.exists());
    }
}
