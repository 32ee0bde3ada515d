//! API Routes
//!
//! Configures the Axum router with all resource endpoints, the visit
//! counting middleware, CORS and request tracing.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::banks::{
    banks_by_currency, create_bank, delete_bank, get_bank, list_banks, update_bank,
};
use crate::api::currencies::{
    create_currency, delete_currency, get_currency, list_currencies, update_currency,
};
use crate::api::rates::{
    convert, create_rate, create_rates_bulk, delete_rate, get_rate, list_rates, min_rate,
    rate_value, update_rate,
};
use crate::api::system::{cache_stats, health, visits};
use crate::api::AppState;
use crate::visits::track_visits;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST/GET /banks`, `GET/PUT/DELETE /banks/:id`,
///   `GET /banks/by-currency/:code`
/// - `POST/GET /currencies`, `GET/PUT/DELETE /currencies/:id`
/// - `POST/GET /exchange-rates`, `GET/PUT/DELETE /exchange-rates/:id`,
///   `POST /exchange-rates/bulk`, `GET /exchange-rates/value`,
///   `GET /exchange-rates/min-rate`, `GET /exchange-rates/convert`
/// - `GET /cache/stats`, `GET /visits`, `GET /health`
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/banks", post(create_bank).get(list_banks))
        .route("/banks/by-currency/:code", get(banks_by_currency))
        .route(
            "/banks/:id",
            get(get_bank).put(update_bank).delete(delete_bank),
        )
        .route("/currencies", post(create_currency).get(list_currencies))
        .route(
            "/currencies/:id",
            get(get_currency).put(update_currency).delete(delete_currency),
        )
        .route("/exchange-rates", post(create_rate).get(list_rates))
        .route("/exchange-rates/bulk", post(create_rates_bulk))
        .route("/exchange-rates/value", get(rate_value))
        .route("/exchange-rates/min-rate", get(min_rate))
        .route("/exchange-rates/convert", get(convert))
        .route(
            "/exchange-rates/:id",
            get(get_rate).put(update_rate).delete(delete_rate),
        )
        .route("/cache/stats", get(cache_stats))
        .route("/visits", get(visits))
        .route("/health", get(health))
        .layer(middleware::from_fn_with_state(
            state.visits.clone(),
            track_visits,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
