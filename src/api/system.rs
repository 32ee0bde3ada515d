//! System Handlers Module
//!
//! Health, cache statistics and visit counter endpoints.

use axum::{extract::State, Json};

use crate::api::AppState;
use crate::models::{CacheStatsResponse, HealthResponse, PartitionStats, VisitsResponse};

// == Cache Stats ==
/// Handler for GET /cache/stats
///
/// Reports hits, misses, evictions, occupancy and hit rate per partition.
pub async fn cache_stats(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let banks = {
        let cache = state.bank_cache.read().await;
        PartitionStats::new(cache.stats(), cache.max_weight())
    };
    let currencies = {
        let cache = state.currency_cache.read().await;
        PartitionStats::new(cache.stats(), cache.max_weight())
    };
    let rates = {
        let cache = state.rate_cache.read().await;
        PartitionStats::new(cache.stats(), cache.max_weight())
    };
    let rate_values = {
        let cache = state.rate_value_cache.read().await;
        PartitionStats::new(cache.stats(), cache.max_weight())
    };

    Json(CacheStatsResponse {
        banks,
        currencies,
        rates,
        rate_values,
    })
}

// == Visits ==
/// Handler for GET /visits
pub async fn visits(State(state): State<AppState>) -> Json<VisitsResponse> {
    Json(VisitsResponse {
        total: state.visits.total().await,
        by_uri: state.visits.snapshot().await,
    })
}

// == Health ==
/// Handler for GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
