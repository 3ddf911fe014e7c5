//! Keyed get-or-create cache with single construction per key

use crate::logging::Timer;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Cache statistics for monitoring
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub constructions: u64,
    pub failures: u64,
}

#[derive(Debug, Default)]
struct Counters {
    hits: AtomicU64,
    misses: AtomicU64,
    constructions: AtomicU64,
    failures: AtomicU64,
}

/// Lazily populated map from key to shared value.
///
/// Entries are never removed. For any key the factory passed to
/// [`get_or_create`](Self::get_or_create) runs at most once successfully:
/// the shard holding the key stays write-locked while the factory runs, so
/// concurrent first requests wait and then observe the winner's value.
///
/// The factory must not call back into the same cache. Nothing in here
/// emits `tracing` events while that lock is held, so subscriber layers may
/// request loggers.
pub struct LoggerCache<K, V> {
    entries: DashMap<K, Arc<V>>,
    counters: Counters,
}

impl<K, V> LoggerCache<K, V>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            counters: Counters::default(),
        }
    }

    /// Return the value for `key`, constructing it with `factory` if absent.
    ///
    /// A factory error is returned as-is and leaves no entry behind, so the
    /// next call for the same key tries again.
    pub fn get_or_create<E, F>(&self, key: K, factory: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        // Fast path: shard read lock only
        let cached = self.entries.get(&key).map(|value| value.clone());
        if let Some(value) = cached {
            self.counters.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(key = %key, "Logger cache hit");
            return Ok(value);
        }

        tracing::debug!(key = %key, "Logger cache miss, constructing");

        // No tracing events while the shard is write-locked: a subscriber
        // that asks this cache for a logger would block on the same shard.
        // The timer only logs when dropped, after the lock is released.
        let (outcome, timer) = match self.entries.entry(key) {
            // Another caller won the race between our read and the write lock
            Entry::Occupied(entry) => (Ok(entry.get().clone()), None),
            Entry::Vacant(entry) => {
                let timer = Timer::new("construct_logger", entry.key().to_string());
                let outcome = factory(entry.key()).map(|value| {
                    let value = Arc::new(value);
                    entry.insert(value.clone());
                    value
                });
                (outcome, Some(timer))
            }
        };

        match (&outcome, &timer) {
            (Ok(_), None) => {
                self.counters.hits.fetch_add(1, Ordering::Relaxed);
            }
            (Ok(_), Some(_)) => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                self.counters.constructions.fetch_add(1, Ordering::Relaxed);
            }
            (Err(_), _) => {
                self.counters.misses.fetch_add(1, Ordering::Relaxed);
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
            }
        }
        drop(timer);

        outcome
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.entries.get(key).map(|v| v.clone())
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.counters.hits.load(Ordering::Relaxed),
            misses: self.counters.misses.load(Ordering::Relaxed),
            constructions: self.counters.constructions.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }

    /// Log cache statistics (for periodic monitoring)
    pub fn log_stats(&self) {
        let stats = self.stats();
        let lookups = stats.hits + stats.misses;
        let hit_rate = if lookups > 0 {
            (stats.hits as f32 / lookups as f32 * 100.0) as u32
        } else {
            0
        };

        tracing::info!(
            loggers_cached = self.len(),
            hits = stats.hits,
            misses = stats.misses,
            constructions = stats.constructions,
            failures = stats.failures,
            hit_rate = hit_rate,
            "Logger cache statistics"
        );
    }
}

impl<K, V> Default for LoggerCache<K, V>
where
    K: Eq + Hash + Clone + Display,
{
    fn default() -> Self {
        Self::new()
    }
}
