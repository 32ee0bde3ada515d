//! Cache Module
//!
//! Bounded in-memory caching with LRU eviction under an aggregate weight
//! budget, plus the key derivation and invalidation protocol that keep the
//! cache partitions consistent with the authoritative registries.

mod entry;
mod invalidation;
pub mod keys;
mod lru;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::{CacheEntry, EntryWeight};
pub use invalidation::{partition, InvalidationCoordinator, SharedCache};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::BoundedCache;
