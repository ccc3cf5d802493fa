//! In-memory snapshot cache
//!
//! Time-boxed memoization of fetch results, keyed by rounded coordinates.
//! The cache is an explicitly owned object injected into the weather
//! service; nothing here persists across process restarts.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::CacheConfig;
use crate::models::{Location, WeatherSnapshot};

struct CacheEntry {
    snapshot: WeatherSnapshot,
    expires_at: Instant,
}

/// Per-coordinate cache with a freshness window
pub struct SnapshotCache {
    freshness: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl SnapshotCache {
    /// Create a cache with the given freshness window
    #[must_use]
    pub fn new(freshness: Duration) -> Self {
        Self {
            freshness,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Create a cache from configuration
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(Duration::from_secs(config.freshness_minutes * 60))
    }

    /// Retrieve a fresh snapshot for a location, if one is cached.
    ///
    /// Expired entries are removed on access and report a miss.
    pub fn get(&self, location: &Location) -> Option<WeatherSnapshot> {
        let key = location.cache_key();
        let mut entries = self.lock();

        match entries.get(&key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!(%key, "Snapshot cache hit");
                Some(entry.snapshot.clone())
            }
            Some(_) => {
                debug!(%key, "Snapshot cache entry expired");
                entries.remove(&key);
                None
            }
            None => None,
        }
    }

    /// Store a snapshot for a location
    pub fn put(&self, location: &Location, snapshot: &WeatherSnapshot) {
        let key = location.cache_key();
        debug!(%key, "Caching snapshot");
        self.lock().insert(
            key,
            CacheEntry {
                snapshot: snapshot.clone(),
                expires_at: Instant::now() + self.freshness,
            },
        );
    }

    /// Drop the entry for a location, forcing the next fetch to the network
    pub fn invalidate(&self, location: &Location) {
        self.lock().remove(&location.cache_key());
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Drop entries past their freshness window
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.lock().retain(|_, entry| entry.expires_at > now);
    }

    /// Number of cached entries, expired or not
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}
