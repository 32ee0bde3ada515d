//! Cache Store Module
//!
//! Bounded key/value store combining HashMap storage with LRU tracking and
//! an aggregate weight budget.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, info, warn};

use crate::cache::{CacheEntry, CacheStats, EntryWeight, LruTracker};

// == Bounded Cache ==
/// Key/value store holding at most `max_weight` units of entry data,
/// evicting least recently used entries to stay within budget.
///
/// The cache is a best-effort layer: no operation returns an error, and a
/// lookup miss is always a safe outcome for the caller. One instance is
/// expected per logical partition, shared behind `Arc<RwLock<_>>`; every
/// operation (including `get`, which refreshes recency) requires `&mut self`
/// so callers cannot skip the lock.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Weight units currently accounted for
    current_weight: usize,
    /// Maximum aggregate weight allowed
    max_weight: usize,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone + Debug + EntryWeight,
    V: Clone + EntryWeight,
{
    // == Constructor ==
    /// Creates a new BoundedCache with the given aggregate weight budget.
    pub fn new(max_weight: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            current_weight: 0,
            max_weight,
        }
    }

    // == Get ==
    /// Returns the stored value if present and marks the entry most
    /// recently used. A miss has no effect beyond the miss counter.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            let value = entry.value.clone();
            self.stats.record_hit();
            self.lru.touch(key);
            debug!("cache hit for key: {:?}", key);
            Some(value)
        } else {
            self.stats.record_miss();
            debug!("cache miss for key: {:?}", key);
            None
        }
    }

    // == Put ==
    /// Stores a key-value pair, evicting least recently used entries until
    /// the new entry fits the budget.
    ///
    /// The entry's weight is computed exactly once here and recorded beside
    /// the value; all later accounting reuses the recorded figure. An entry
    /// whose weight alone exceeds the budget is dropped silently: storing
    /// nothing just means the next read is a miss.
    pub fn put(&mut self, key: K, value: V) {
        let entry_weight = key.weight() + value.weight();
        if entry_weight > self.max_weight {
            warn!(
                "entry weight {} exceeds cache budget {}, not storing key: {:?}",
                entry_weight, self.max_weight, key
            );
            return;
        }

        // Replacing an existing entry releases its recorded weight first
        if let Some(previous) = self.entries.remove(&key) {
            self.current_weight -= previous.weight;
            self.lru.remove(&key);
        }

        while self.current_weight + entry_weight > self.max_weight {
            match self.lru.evict_oldest() {
                Some(oldest) => {
                    if let Some(evicted) = self.entries.remove(&oldest) {
                        self.current_weight -= evicted.weight;
                        self.stats.record_eviction();
                        info!("evicting entry {:?} to make room", oldest);
                    }
                }
                None => break,
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, entry_weight));
        self.current_weight += entry_weight;
        self.lru.touch(&key);
        self.sync_occupancy();
        debug!("cache put for key: {:?}", key);
    }

    // == Evict ==
    /// Removes the entry if present, subtracting exactly the weight that
    /// was recorded at insertion. No-op if the key is absent.
    pub fn evict(&mut self, key: &K) {
        if let Some(entry) = self.entries.remove(key) {
            self.current_weight -= entry.weight;
            self.lru.remove(key);
            self.sync_occupancy();
            debug!("cache evict for key: {:?}", key);
        }
    }

    // == Clear ==
    /// Removes all entries and resets the weight counter to zero.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.current_weight = 0;
        self.sync_occupancy();
        info!("cache cleared");
    }

    // == Weight ==
    /// Returns the weight units currently accounted for.
    pub fn weight(&self) -> usize {
        self.current_weight
    }

    /// Returns the configured aggregate weight budget.
    pub fn max_weight(&self) -> usize {
        self.max_weight
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Contains ==
    /// Checks membership without touching recency or the hit counters.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_occupancy(self.entries.len(), self.current_weight);
        stats
    }

    fn sync_occupancy(&mut self) {
        self.stats
            .set_occupancy(self.entries.len(), self.current_weight);
    }
}
