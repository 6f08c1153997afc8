//! Result store for persisting upstream search results to disk
//!
//! Provides a `ResultStore` that memoizes serializable result sets as JSON
//! files with an absolute expiry timestamp. Expiry is lazy: an expired entry
//! is deleted on the next read attempt, there is no background sweep.

use chrono::{DateTime, Duration, Utc};
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Default time-to-live for cached entries (7 days)
///
/// Upstream inventory changes slowly, so a long horizon trades staleness for
/// fewer upstream calls. The TTL is fixed per store, not per entry.
const DEFAULT_TTL_HOURS: i64 = 7 * 24;

/// Per-process counter distinguishing temp files of concurrent writers
static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Wrapper struct for cached data stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// The cached data
    data: T,
    /// When the data was cached
    cached_at: DateTime<Utc>,
    /// When the cache entry expires
    expires_at: DateTime<Utc>,
}

/// Manages reading and writing cached result sets to disk
///
/// The store keeps one JSON file per key in an XDG-compliant cache directory
/// (`~/.cache/stayscout/` on Linux). A read never returns an entry past its
/// expiry: expired or unparsable entries are removed and treated as a miss,
/// so callers fall back to the upstream source. Writes overwrite the whole
/// entry and go through a temporary file plus rename so a concurrent reader
/// never observes a partial write.
#[derive(Debug, Clone)]
pub struct ResultStore {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    /// Fixed TTL applied to every entry written through this store
    ttl: Duration,
}

impl ResultStore {
    /// Creates a new ResultStore using the XDG-compliant cache directory
    ///
    /// Uses `~/.cache/stayscout/` on Linux, or the equivalent XDG path on
    /// other platforms. Returns `None` if the cache directory cannot be
    /// determined (e.g., no home directory).
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "stayscout")?;
        let cache_dir = project_dirs.cache_dir().to_path_buf();
        Some(Self {
            cache_dir,
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
        })
    }

    /// Creates a new ResultStore with a custom cache directory
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    /// Overrides the store-wide TTL
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Returns the path to a cache file for the given key
    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Ensures the cache directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.cache_dir)
    }

    /// Writes a result set to the cache, overwriting any existing entry
    ///
    /// The entry gets a fresh `cached_at` timestamp and expires `ttl` later.
    /// The JSON is written to a temporary file unique to this write and
    /// renamed into place, so concurrent writers interleave at entry
    /// granularity (last write wins) rather than at the byte level.
    ///
    /// # Arguments
    /// * `key` - Unique identifier for the cache entry (e.g., "hotels_NYC_16")
    /// * `data` - The result set to cache (must implement Serialize)
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if directory creation or file writing fails
    pub fn put<T: Serialize>(&self, key: &str, data: &T) -> std::io::Result<()> {
        self.ensure_dir()?;

        let now = Utc::now();
        let entry = CacheEntry {
            data,
            cached_at: now,
            expires_at: now + self.ttl,
        };

        let json = serde_json::to_string_pretty(&entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let final_path = self.cache_path(key);
        // Temp name carries pid + nonce so same-key writers never share it
        let tmp_path = self.cache_dir.join(format!(
            "{}.{}.{}.tmp",
            key,
            process::id(),
            TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::write(&tmp_path, json)?;
        match fs::rename(&tmp_path, &final_path) {
            Ok(()) => Ok(()),
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                Err(e)
            }
        }
    }

    /// Reads a result set from the cache
    ///
    /// A cache miss is not an error: callers treat absence as "must fetch".
    /// An entry past its `expires_at` is deleted and reported as absent; a
    /// corrupted or unparsable entry is likewise discarded and treated as a
    /// miss so the caller re-fetches and overwrites it.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    ///
    /// # Returns
    /// * `Some(T)` if the entry exists, parses, and has not expired
    /// * `None` otherwise
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.cache_path(key);
        let content = fs::read_to_string(&path).ok()?;

        let entry: CacheEntry<T> = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key, error = %e, "discarding unparsable cache entry");
                let _ = fs::remove_file(&path);
                return None;
            }
        };

        if Utc::now() > entry.expires_at {
            debug!(key, expired_at = %entry.expires_at, "cache entry expired");
            let _ = fs::remove_file(&path);
            return None;
        }

        debug!(key, cached_at = %entry.cached_at, "cache hit");
        Some(entry.data)
    }

    /// Removes a single entry
    ///
    /// # Returns
    /// The number of entries removed (0 or 1), for observability.
    pub fn delete(&self, key: &str) -> usize {
        match fs::remove_file(self.cache_path(key)) {
            Ok(()) => 1,
            Err(_) => 0,
        }
    }

    /// Removes every entry in the store
    ///
    /// Temp files orphaned by a crashed write are swept as well, but only
    /// real entries count toward the returned total.
    ///
    /// # Returns
    /// * `Ok(count)` - the number of entries removed
    /// * `Err` if the cache directory cannot be read
    pub fn delete_all(&self) -> std::io::Result<usize> {
        let mut removed = 0;

        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            // A store that was never written to has nothing to clear.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
                removed += 1;
            } else if path.extension().is_some_and(|ext| ext == "tmp") {
                fs::remove_file(&path)?;
            }
        }

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::thread;
    use std::time::Duration as StdDuration;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct TestRecord {
        name: String,
        price: i32,
    }

    fn create_test_store() -> (ResultStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = ResultStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn sample_records() -> Vec<TestRecord> {
        vec![
            TestRecord {
                name: "alpha".to_string(),
                price: 120,
            },
            TestRecord {
                name: "beta".to_string(),
                price: 250,
            },
        ]
    }

    #[test]
    fn test_put_creates_file_in_cache_directory() {
        let (store, temp_dir) = create_test_store();

        store
            .put("hotels_NYC_16", &sample_records())
            .expect("Put should succeed");

        let expected_path = temp_dir.path().join("hotels_NYC_16.json");
        assert!(expected_path.exists(), "Cache file should exist");

        // Verify the file contains valid JSON with our fields
        let content = fs::read_to_string(&expected_path).expect("Should read file");
        assert!(content.contains("\"name\""));
        assert!(content.contains("\"alpha\""));
        assert!(content.contains("\"expires_at\""));
    }

    #[test]
    fn test_put_leaves_no_temp_file_behind() {
        let (store, temp_dir) = create_test_store();

        store
            .put("hotels_NYC_16", &sample_records())
            .expect("Put should succeed");

        let leftover_tmp = fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.path().extension().is_some_and(|ext| ext == "tmp"));
        assert!(!leftover_tmp, "Temporary file should be renamed away");
    }

    #[test]
    fn test_concurrent_same_key_puts_never_fail_or_corrupt() {
        let (store, _temp_dir) = create_test_store();
        let first = vec![TestRecord {
            name: "writer_one".to_string(),
            price: 1,
        }];
        let second = vec![TestRecord {
            name: "writer_two".to_string(),
            price: 2,
        }];

        // Two writers race on the same key; each write must succeed because
        // every put goes through its own temp file. Last write wins at
        // entry granularity, so the surviving entry parses as one of the
        // two record sets, never a byte-level mix.
        for _ in 0..200 {
            std::thread::scope(|scope| {
                let a = scope.spawn(|| store.put("hotels_NYC_16", &first));
                let b = scope.spawn(|| store.put("hotels_NYC_16", &second));
                a.join().expect("writer panicked").expect("Put should succeed");
                b.join().expect("writer panicked").expect("Put should succeed");
            });

            let result: Vec<TestRecord> =
                store.get("hotels_NYC_16").expect("entry should parse");
            assert!(
                result == first || result == second,
                "entry must be one whole write, got {:?}",
                result
            );
        }
    }

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let (store, _temp_dir) = create_test_store();

        let result: Option<Vec<TestRecord>> = store.get("nonexistent_key");

        assert!(result.is_none(), "Should return None for missing key");
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let (store, _temp_dir) = create_test_store();
        let records = sample_records();

        store.put("roundtrip_key", &records).expect("Put should succeed");

        let result: Vec<TestRecord> = store.get("roundtrip_key").expect("Should read fresh cache");

        assert_eq!(result, records, "Records should survive roundtrip");
    }

    #[test]
    fn test_get_deletes_expired_entry_and_returns_none() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        // Zero TTL: entries expire immediately
        let store = ResultStore::with_dir(temp_dir.path().to_path_buf())
            .with_ttl(Duration::zero());

        store
            .put("expired_key", &sample_records())
            .expect("Put should succeed");

        // Small delay to ensure expiry
        thread::sleep(StdDuration::from_millis(10));

        let result: Option<Vec<TestRecord>> = store.get("expired_key");

        assert!(result.is_none(), "Expired entry should be a miss");
        assert!(
            !temp_dir.path().join("expired_key.json").exists(),
            "Expired entry should be removed from disk"
        );
    }

    #[test]
    fn test_get_treats_corrupted_entry_as_miss_and_discards_it() {
        let (store, temp_dir) = create_test_store();
        let path = temp_dir.path().join("corrupt_key.json");
        fs::create_dir_all(temp_dir.path()).unwrap();
        fs::write(&path, "{ not valid json").unwrap();

        let result: Option<Vec<TestRecord>> = store.get("corrupt_key");

        assert!(result.is_none(), "Corrupted entry should be a miss");
        assert!(!path.exists(), "Corrupted entry should be discarded");
    }

    #[test]
    fn test_overwrite_replaces_whole_entry() {
        let (store, _temp_dir) = create_test_store();
        let first = vec![TestRecord {
            name: "first".to_string(),
            price: 1,
        }];
        let second = vec![TestRecord {
            name: "second".to_string(),
            price: 2,
        }];

        store.put("overwrite_key", &first).expect("First put should succeed");
        store.put("overwrite_key", &second).expect("Second put should succeed");

        let result: Vec<TestRecord> = store.get("overwrite_key").expect("Should read cache");

        assert_eq!(result, second, "Cache should contain latest data only");
    }

    #[test]
    fn test_delete_returns_count_removed() {
        let (store, _temp_dir) = create_test_store();

        store.put("gone_key", &sample_records()).expect("Put should succeed");

        assert_eq!(store.delete("gone_key"), 1, "Existing entry counts as 1");
        assert_eq!(store.delete("gone_key"), 0, "Second delete finds nothing");

        let result: Option<Vec<TestRecord>> = store.get("gone_key");
        assert!(result.is_none());
    }

    #[test]
    fn test_delete_all_removes_every_entry() {
        let (store, _temp_dir) = create_test_store();

        store.put("hotels_NYC_16", &sample_records()).expect("Put should succeed");
        store.put("hotels_PAR_16", &sample_records()).expect("Put should succeed");
        store.put("hotels_LON_8", &sample_records()).expect("Put should succeed");

        let removed = store.delete_all().expect("delete_all should succeed");
        assert_eq!(removed, 3);

        for key in ["hotels_NYC_16", "hotels_PAR_16", "hotels_LON_8"] {
            let result: Option<Vec<TestRecord>> = store.get(key);
            assert!(result.is_none(), "{} should be absent after delete_all", key);
        }
    }

    #[test]
    fn test_delete_all_sweeps_orphaned_temp_files() {
        let (store, temp_dir) = create_test_store();

        store.put("hotels_NYC_16", &sample_records()).expect("Put should succeed");
        // A crashed writer leaves its temp file behind
        let orphan = temp_dir.path().join("hotels_PAR_16.4242.0.tmp");
        fs::write(&orphan, "half-written").unwrap();

        let removed = store.delete_all().expect("delete_all should succeed");

        assert_eq!(removed, 1, "only real entries count toward the total");
        assert!(!orphan.exists(), "orphaned temp file should be swept");
    }

    #[test]
    fn test_delete_all_on_empty_store_returns_zero() {
        let (store, _temp_dir) = create_test_store();
        // Directory exists but holds nothing
        let removed = store.delete_all().expect("delete_all should succeed");
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_delete_all_on_never_written_store_returns_zero() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = ResultStore::with_dir(temp_dir.path().join("never_created"));

        let removed = store.delete_all().expect("delete_all should succeed");
        assert_eq!(removed, 0);
    }

    #[test]
    fn test_put_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested_path = temp_dir.path().join("nested").join("cache").join("dir");
        let store = ResultStore::with_dir(nested_path.clone());

        store
            .put("nested_key", &sample_records())
            .expect("Put should succeed");

        assert!(nested_path.exists(), "Nested directory should be created");
        assert!(nested_path.join("nested_key.json").exists(), "Cache file should exist");
    }

    #[test]
    fn test_new_creates_xdg_compliant_path() {
        if let Some(store) = ResultStore::new() {
            let path_str = store.cache_dir.to_string_lossy();
            assert!(
                path_str.contains("stayscout"),
                "Cache path should contain project name"
            );
        }
        // Test passes if new() returns None (e.g., no home directory in CI)
    }
}
