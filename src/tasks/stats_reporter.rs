//! Cache Stats Reporter Task
//!
//! Background task that periodically logs per-partition cache statistics.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{EntryWeight, SharedCache};
use crate::models::{BankResponse, CurrencyResponse, ExchangeRateResponse};

/// Logs one partition's occupancy and hit rate.
async fn report<V: Clone + EntryWeight>(name: &str, cache: &SharedCache<V>) {
    let cache = cache.read().await;
    let stats = cache.stats();
    info!(
        "cache partition {}: {} entries, {}/{} weight, {:.0}% hit rate ({} evictions)",
        name,
        stats.total_entries,
        stats.current_weight,
        cache.max_weight(),
        stats.hit_rate() * 100.0,
        stats.evictions,
    );
}

/// Spawns a background task that logs cache statistics at a fixed interval.
///
/// Returns a JoinHandle so the task can be aborted during graceful
/// shutdown.
pub fn spawn_stats_reporter(
    banks: SharedCache<Vec<BankResponse>>,
    currencies: SharedCache<Vec<CurrencyResponse>>,
    rates: SharedCache<Vec<ExchangeRateResponse>>,
    rate_values: SharedCache<f64>,
    interval_secs: u64,
) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs);

    tokio::spawn(async move {
        info!(
            "Starting cache stats reporter with interval of {} seconds",
            interval_secs
        );

        loop {
            tokio::time::sleep(interval).await;

            report("banks", &banks).await;
            report("currencies", &currencies).await;
            report("rates", &rates).await;
            report("rate_values", &rate_values).await;
        }
    })
}
