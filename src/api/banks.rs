//! Bank Handlers Module
//!
//! HTTP handlers for the bank resource. Reads go through the bank cache
//! partition when enabled; every mutation invalidates through the
//! coordinator after the registry write succeeds and before responding.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::AppState;
use crate::cache::keys;
use crate::error::{ApiError, Result};
use crate::models::{BankRequest, BankResponse};

/// Assembles the full response for one bank, rates included.
async fn bank_response(state: &AppState, bank: crate::registry::Bank) -> BankResponse {
    let rates = state.rates.list_by_bank(bank.id).await;
    BankResponse::from_parts(bank, rates)
}

// == Create ==
/// Handler for POST /banks
pub async fn create_bank(
    State(state): State<AppState>,
    Json(req): Json<BankRequest>,
) -> Result<(StatusCode, Json<BankResponse>)> {
    if let Some(error) = req.validate() {
        return Err(ApiError::Validation(error));
    }

    let bank = state.banks.create(req.name).await?;
    state.coordinator.bank_collection_changed().await;

    Ok((
        StatusCode::CREATED,
        Json(BankResponse::from_parts(bank, Vec::new())),
    ))
}

// == List ==
/// Handler for GET /banks
pub async fn list_banks(State(state): State<AppState>) -> Result<Json<Vec<BankResponse>>> {
    let key = keys::banks();

    if state.config.cache_banks_enabled {
        if let Some(cached) = state.bank_cache.write().await.get(&key) {
            return Ok(Json(cached));
        }
    }

    let mut listing = Vec::new();
    for bank in state.banks.list().await {
        listing.push(bank_response(&state, bank).await);
    }

    if state.config.cache_banks_enabled {
        state.bank_cache.write().await.put(key, listing.clone());
    }
    Ok(Json(listing))
}

// == Get ==
/// Handler for GET /banks/:id
///
/// Single-bank lookups share the listing partition; the cached value is a
/// one-element listing under the bank's own key.
pub async fn get_bank(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<BankResponse>> {
    let key = keys::bank(id);

    if state.config.cache_banks_enabled {
        if let Some(cached) = state.bank_cache.write().await.get(&key) {
            if let Some(bank) = cached.into_iter().next() {
                return Ok(Json(bank));
            }
        }
    }

    let bank = state
        .banks
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Bank not found with id: {}", id)))?;
    let response = bank_response(&state, bank).await;

    if state.config.cache_banks_enabled {
        state
            .bank_cache
            .write()
            .await
            .put(key, vec![response.clone()]);
    }
    Ok(Json(response))
}

// == Banks By Currency ==
/// Handler for GET /banks/by-currency/:code
///
/// Lists the banks quoting at least one rate touching the given currency.
pub async fn banks_by_currency(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<BankResponse>>> {
    let key = keys::banks_by_currency(&code);

    if state.config.cache_banks_enabled {
        if let Some(cached) = state.bank_cache.write().await.get(&key) {
            return Ok(Json(cached));
        }
    }

    let mut listing = Vec::new();
    for bank_id in state.rates.banks_quoting(&code).await {
        if let Some(bank) = state.banks.get(bank_id).await {
            listing.push(bank_response(&state, bank).await);
        }
    }

    if state.config.cache_banks_enabled {
        state.bank_cache.write().await.put(key, listing.clone());
    }
    Ok(Json(listing))
}

// == Update ==
/// Handler for PUT /banks/:id
pub async fn update_bank(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<BankRequest>,
) -> Result<Json<BankResponse>> {
    if let Some(error) = req.validate() {
        return Err(ApiError::Validation(error));
    }

    let bank = state.banks.update(id, req.name).await?;
    state.coordinator.bank_collection_changed().await;

    Ok(Json(bank_response(&state, bank).await))
}

// == Delete ==
/// Handler for DELETE /banks/:id
///
/// Deleting a bank cascades to its exchange rates before invalidation.
pub async fn delete_bank(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    if !state.banks.delete(id).await {
        return Err(ApiError::NotFound(format!("Bank not found with id: {}", id)));
    }
    state.rates.delete_by_bank(id).await;
    state.coordinator.bank_collection_changed().await;

    Ok(StatusCode::NO_CONTENT)
}
