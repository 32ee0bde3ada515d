//! Application State Module
//!
//! Wires the shared pieces every handler needs: the authoritative
//! registries, one cache partition per cached value type, the
//! invalidation coordinator over those partitions, and the visit counter.

use crate::cache::{partition, InvalidationCoordinator, SharedCache};
use crate::config::Config;
use crate::models::{BankResponse, CurrencyResponse, ExchangeRateResponse};
use crate::registry::{BankRegistry, CurrencyRegistry, RateRegistry};
use crate::visits::VisitCounter;

// == App State ==
/// Application state shared across all handlers.
///
/// Each cache partition is constructed exactly once here and handed out by
/// cloning `Arc` handles; the coordinator holds clones of the same four
/// partitions, so a write-path invalidation is visible to every read path.
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration, including the per-consumer cache flags
    pub config: Config,
    /// Authoritative bank table
    pub banks: BankRegistry,
    /// Authoritative currency table
    pub currencies: CurrencyRegistry,
    /// Authoritative exchange-rate table
    pub rates: RateRegistry,
    /// Partition for bank listing responses
    pub bank_cache: SharedCache<Vec<BankResponse>>,
    /// Partition for currency listing responses
    pub currency_cache: SharedCache<Vec<CurrencyResponse>>,
    /// Partition for exchange-rate listing responses
    pub rate_cache: SharedCache<Vec<ExchangeRateResponse>>,
    /// Point partition for single rate values
    pub rate_value_cache: SharedCache<f64>,
    /// Applies the invalidation policy after registry writes
    pub coordinator: InvalidationCoordinator,
    /// Per-URI request counter
    pub visits: VisitCounter,
}

impl AppState {
    /// Creates the application state from configuration.
    ///
    /// Every partition gets the same aggregate weight budget.
    pub fn new(config: Config) -> Self {
        let bank_cache = partition(config.cache_max_weight);
        let currency_cache = partition(config.cache_max_weight);
        let rate_cache = partition(config.cache_max_weight);
        let rate_value_cache = partition(config.cache_max_weight);

        let coordinator = InvalidationCoordinator::new(
            bank_cache.clone(),
            currency_cache.clone(),
            rate_cache.clone(),
            rate_value_cache.clone(),
        );

        Self {
            config,
            banks: BankRegistry::new(),
            currencies: CurrencyRegistry::new(),
            rates: RateRegistry::new(),
            bank_cache,
            currency_cache,
            rate_cache,
            rate_value_cache,
            coordinator,
            visits: VisitCounter::new(),
        }
    }

    /// Creates a new AppState from borrowed configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.clone())
    }
}
