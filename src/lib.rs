//! Rate Hub - an in-memory CRUD backend for banks, currencies and
//! exchange rates with bounded response caching.
//!
//! The cache layer holds per-resource partitions with LRU eviction under
//! an aggregate weight budget; an invalidation coordinator keeps them
//! consistent with the authoritative registries across writes.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod tasks;
pub mod visits;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_stats_reporter;
