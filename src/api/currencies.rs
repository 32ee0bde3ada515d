//! Currency Handlers Module
//!
//! HTTP handlers for the currency resource.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::AppState;
use crate::cache::keys;
use crate::error::{ApiError, Result};
use crate::models::{CurrencyRequest, CurrencyResponse};

// == Create ==
/// Handler for POST /currencies
pub async fn create_currency(
    State(state): State<AppState>,
    Json(req): Json<CurrencyRequest>,
) -> Result<(StatusCode, Json<CurrencyResponse>)> {
    if let Some(error) = req.validate() {
        return Err(ApiError::Validation(error));
    }

    let currency = state.currencies.create(req.code, req.name).await?;
    state.coordinator.currency_collection_changed().await;

    Ok((StatusCode::CREATED, Json(CurrencyResponse::from(currency))))
}

// == List ==
/// Handler for GET /currencies
pub async fn list_currencies(
    State(state): State<AppState>,
) -> Result<Json<Vec<CurrencyResponse>>> {
    let key = keys::currencies();

    if state.config.cache_currencies_enabled {
        if let Some(cached) = state.currency_cache.write().await.get(&key) {
            return Ok(Json(cached));
        }
    }

    let listing: Vec<CurrencyResponse> = state
        .currencies
        .list()
        .await
        .into_iter()
        .map(CurrencyResponse::from)
        .collect();

    if state.config.cache_currencies_enabled {
        state
            .currency_cache
            .write()
            .await
            .put(key, listing.clone());
    }
    Ok(Json(listing))
}

// == Get ==
/// Handler for GET /currencies/:id
pub async fn get_currency(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<CurrencyResponse>> {
    let key = keys::currency(id);

    if state.config.cache_currencies_enabled {
        if let Some(cached) = state.currency_cache.write().await.get(&key) {
            if let Some(currency) = cached.into_iter().next() {
                return Ok(Json(currency));
            }
        }
    }

    let currency = state
        .currencies
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Currency not found with id: {}", id)))?;
    let response = CurrencyResponse::from(currency);

    if state.config.cache_currencies_enabled {
        state
            .currency_cache
            .write()
            .await
            .put(key, vec![response.clone()]);
    }
    Ok(Json(response))
}

// == Update ==
/// Handler for PUT /currencies/:id
pub async fn update_currency(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<CurrencyRequest>,
) -> Result<Json<CurrencyResponse>> {
    if let Some(error) = req.validate() {
        return Err(ApiError::Validation(error));
    }

    let currency = state.currencies.update(id, req.code, req.name).await?;
    state.coordinator.currency_collection_changed().await;

    Ok(Json(CurrencyResponse::from(currency)))
}

// == Delete ==
/// Handler for DELETE /currencies/:id
pub async fn delete_currency(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode> {
    if !state.currencies.delete(id).await {
        return Err(ApiError::NotFound(format!(
            "Currency not found with id: {}",
            id
        )));
    }
    state.coordinator.currency_collection_changed().await;

    Ok(StatusCode::NO_CONTENT)
}
