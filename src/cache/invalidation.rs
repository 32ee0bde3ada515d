//! Invalidation Coordinator Module
//!
//! Applies the invalidation policy that keeps cached read results
//! consistent with the authoritative registries. Two granularities coexist:
//! coarse collection-level `clear()` on every partition that can hold a
//! view derived from the mutated collection, and fine point-level `evict()`
//! of individual rate-value keys.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{BoundedCache, EntryWeight};
use crate::models::{BankResponse, CurrencyResponse, ExchangeRateResponse};

/// Shared handle to one cache partition.
///
/// All operations, `get` included, go through the write half of the lock:
/// recency tracking makes every cache access a mutation.
pub type SharedCache<V> = Arc<RwLock<BoundedCache<String, V>>>;

/// Creates a fresh partition with the given weight budget.
pub fn partition<V: Clone + EntryWeight>(max_weight: usize) -> SharedCache<V> {
    Arc::new(RwLock::new(BoundedCache::new(max_weight)))
}

// == Invalidation Coordinator ==
/// Clears or evicts cache entries after a successful registry write.
///
/// Mutation handlers call exactly one method here, strictly after the
/// authoritative write and strictly before responding. The cache operations
/// themselves cannot fail, so invalidation never fails the triggering
/// write.
#[derive(Clone)]
pub struct InvalidationCoordinator {
    banks: SharedCache<Vec<BankResponse>>,
    currencies: SharedCache<Vec<CurrencyResponse>>,
    rates: SharedCache<Vec<ExchangeRateResponse>>,
    rate_values: SharedCache<f64>,
}

impl InvalidationCoordinator {
    // == Constructor ==
    /// Builds a coordinator over the four application partitions.
    pub fn new(
        banks: SharedCache<Vec<BankResponse>>,
        currencies: SharedCache<Vec<CurrencyResponse>>,
        rates: SharedCache<Vec<ExchangeRateResponse>>,
        rate_values: SharedCache<f64>,
    ) -> Self {
        Self {
            banks,
            currencies,
            rates,
            rate_values,
        }
    }

    // == Bank Mutations ==
    /// Coarse invalidation after a bank create/update/delete.
    ///
    /// Rate listings and point values carry the bank id, so they go too;
    /// deleting a bank also cascades to its rates in the registry.
    pub async fn bank_collection_changed(&self) {
        self.banks.write().await.clear();
        self.rates.write().await.clear();
        self.rate_values.write().await.clear();
        debug!("invalidated bank, rate and rate-value partitions");
    }

    // == Currency Mutations ==
    /// Coarse invalidation after a currency create/update/delete.
    ///
    /// Bank listings embed exchange rates keyed by currency codes, so every
    /// partition except none is affected here.
    pub async fn currency_collection_changed(&self) {
        self.currencies.write().await.clear();
        self.rates.write().await.clear();
        self.rate_values.write().await.clear();
        self.banks.write().await.clear();
        debug!("invalidated all partitions after currency mutation");
    }

    // == Exchange Rate Mutations ==
    /// Coarse plus fine invalidation after an exchange-rate write.
    ///
    /// `point_keys` carries every identity-tuple key touched by the write;
    /// an update passes both the pre-update and post-update keys, since the
    /// identifying attributes themselves may have changed.
    pub async fn rate_written(&self, point_keys: &[String]) {
        {
            let mut rate_values = self.rate_values.write().await;
            for key in point_keys {
                rate_values.evict(key);
            }
        }
        self.rates.write().await.clear();
        // Bank listings embed exchange-rate data
        self.banks.write().await.clear();
        debug!("invalidated rate listings and {} point keys", point_keys.len());
    }
}
