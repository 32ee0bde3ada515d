//! Exchange Rate Handlers Module
//!
//! HTTP handlers for the exchange-rate resource, including the point
//! rate-value lookup that reads through the point cache partition. Every
//! mutation evicts the touched identity-tuple keys and clears the listing
//! partitions that embed rate data, after the registry write and before
//! the response.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::api::AppState;
use crate::cache::keys;
use crate::error::{ApiError, Result};
use crate::models::{
    ConversionResponse, ConvertQuery, CreateExchangeRateRequest, ExchangeRateResponse,
    MinRateQuery, RateListQuery, RateValueQuery, RateValueResponse, UpdateExchangeRateRequest,
};
use crate::registry::ExchangeRate;

/// Rejects currency codes absent from the authoritative currency table.
async fn ensure_currency_known(state: &AppState, code: &str) -> Result<()> {
    if state.currencies.find_by_code(code).await.is_none() {
        return Err(ApiError::Validation(format!(
            "Unknown currency code: {}",
            code
        )));
    }
    Ok(())
}

/// Point key for a rate row's identity tuple.
fn point_key(rate: &ExchangeRate) -> String {
    keys::rate_value(rate.bank_id, &rate.from_currency_code, &rate.to_currency_code)
}

/// Resolves one rate value, reading through the point cache partition.
///
/// The same derivation feeds the read path here and the write-time
/// eviction in the mutation handlers, so the keys always line up.
async fn point_rate(state: &AppState, bank_id: u64, from: &str, to: &str) -> Result<f64> {
    let key = keys::rate_value(bank_id, from, to);

    if state.config.cache_rates_enabled {
        if let Some(rate) = state.rate_value_cache.write().await.get(&key) {
            return Ok(rate);
        }
    }

    let row = state
        .rates
        .find_by_tuple(bank_id, from, to)
        .await
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No exchange rate from {} to {} for bank {}",
                from, to, bank_id
            ))
        })?;

    if state.config.cache_rates_enabled {
        state.rate_value_cache.write().await.put(key, row.rate);
    }
    Ok(row.rate)
}

/// Shared validation ahead of any rate write.
async fn check_rate_write(state: &AppState, bank_id: u64, from: &str, to: &str) -> Result<()> {
    if !state.banks.exists(bank_id).await {
        return Err(ApiError::NotFound(format!(
            "Bank not found with id: {}",
            bank_id
        )));
    }
    ensure_currency_known(state, from).await?;
    ensure_currency_known(state, to).await?;
    Ok(())
}

// == Create ==
/// Handler for POST /exchange-rates
pub async fn create_rate(
    State(state): State<AppState>,
    Json(req): Json<CreateExchangeRateRequest>,
) -> Result<(StatusCode, Json<ExchangeRateResponse>)> {
    if let Some(error) = req.validate() {
        return Err(ApiError::Validation(error));
    }
    check_rate_write(&state, req.bank_id, &req.from_currency_code, &req.to_currency_code).await?;

    let row = state
        .rates
        .create(
            req.bank_id,
            req.from_currency_code,
            req.to_currency_code,
            req.rate,
        )
        .await?;
    state.coordinator.rate_written(&[point_key(&row)]).await;

    Ok((StatusCode::CREATED, Json(ExchangeRateResponse::from(row))))
}

// == Bulk Create ==
/// Handler for POST /exchange-rates/bulk
///
/// Creates rates in request order. On the first failure the remaining
/// items are skipped, but rows already written stay written, so the
/// invalidation for them still runs before the error is returned.
pub async fn create_rates_bulk(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreateExchangeRateRequest>>,
) -> Result<(StatusCode, Json<Vec<ExchangeRateResponse>>)> {
    let mut created = Vec::new();
    let mut touched_keys = Vec::new();
    let mut failure = None;

    for req in requests {
        if let Some(error) = req.validate() {
            failure = Some(ApiError::Validation(error));
            break;
        }
        if let Err(error) =
            check_rate_write(&state, req.bank_id, &req.from_currency_code, &req.to_currency_code)
                .await
        {
            failure = Some(error);
            break;
        }

        match state
            .rates
            .create(
                req.bank_id,
                req.from_currency_code,
                req.to_currency_code,
                req.rate,
            )
            .await
        {
            Ok(row) => {
                touched_keys.push(point_key(&row));
                created.push(ExchangeRateResponse::from(row));
            }
            Err(error) => {
                failure = Some(error);
                break;
            }
        }
    }

    if !touched_keys.is_empty() {
        state.coordinator.rate_written(&touched_keys).await;
    }
    if let Some(error) = failure {
        return Err(error);
    }
    Ok((StatusCode::CREATED, Json(created)))
}

// == List ==
/// Handler for GET /exchange-rates
pub async fn list_rates(
    State(state): State<AppState>,
    Query(query): Query<RateListQuery>,
) -> Result<Json<Vec<ExchangeRateResponse>>> {
    let key = match query.bank_id {
        Some(bank_id) => keys::rates_by_bank(bank_id),
        None => keys::rates(),
    };

    if state.config.cache_rates_enabled {
        if let Some(cached) = state.rate_cache.write().await.get(&key) {
            return Ok(Json(cached));
        }
    }

    let rows = match query.bank_id {
        Some(bank_id) => state.rates.list_by_bank(bank_id).await,
        None => state.rates.list().await,
    };
    let listing: Vec<ExchangeRateResponse> =
        rows.into_iter().map(ExchangeRateResponse::from).collect();

    if state.config.cache_rates_enabled {
        state.rate_cache.write().await.put(key, listing.clone());
    }
    Ok(Json(listing))
}

// == Get ==
/// Handler for GET /exchange-rates/:id
pub async fn get_rate(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ExchangeRateResponse>> {
    let key = keys::rate(id);

    if state.config.cache_rates_enabled {
        if let Some(cached) = state.rate_cache.write().await.get(&key) {
            if let Some(rate) = cached.into_iter().next() {
                return Ok(Json(rate));
            }
        }
    }

    let row = state
        .rates
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Exchange rate not found with id: {}", id)))?;
    let response = ExchangeRateResponse::from(row);

    if state.config.cache_rates_enabled {
        state
            .rate_cache
            .write()
            .await
            .put(key, vec![response.clone()]);
    }
    Ok(Json(response))
}

// == Update ==
/// Handler for PUT /exchange-rates/:id
///
/// The identifying currency codes may change, so both the pre-update and
/// post-update point keys are evicted.
pub async fn update_rate(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<UpdateExchangeRateRequest>,
) -> Result<Json<ExchangeRateResponse>> {
    if let Some(error) = req.validate() {
        return Err(ApiError::Validation(error));
    }
    ensure_currency_known(&state, &req.from_currency_code).await?;
    ensure_currency_known(&state, &req.to_currency_code).await?;

    let (before, after) = state
        .rates
        .update(id, req.from_currency_code, req.to_currency_code, req.rate)
        .await?;
    state
        .coordinator
        .rate_written(&[point_key(&before), point_key(&after)])
        .await;

    Ok(Json(ExchangeRateResponse::from(after)))
}

// == Delete ==
/// Handler for DELETE /exchange-rates/:id
pub async fn delete_rate(State(state): State<AppState>, Path(id): Path<u64>) -> Result<StatusCode> {
    let removed = state.rates.delete(id).await.ok_or_else(|| {
        ApiError::NotFound(format!("Exchange rate not found with id: {}", id))
    })?;
    state.coordinator.rate_written(&[point_key(&removed)]).await;

    Ok(StatusCode::NO_CONTENT)
}

// == Rate Value ==
/// Handler for GET /exchange-rates/value
///
/// Point lookup of a single rate by its identity tuple, served from the
/// point cache partition when possible.
pub async fn rate_value(
    State(state): State<AppState>,
    Query(query): Query<RateValueQuery>,
) -> Result<Json<RateValueResponse>> {
    if let Some(error) = query.validate() {
        return Err(ApiError::Validation(error));
    }

    let rate = point_rate(&state, query.bank_id, &query.from, &query.to).await?;
    Ok(Json(RateValueResponse {
        bank_id: query.bank_id,
        from_currency_code: query.from,
        to_currency_code: query.to,
        rate,
    }))
}

// == Min Rate ==
/// Handler for GET /exchange-rates/min-rate
///
/// Returns the lowest rate quoted for the pair across all banks.
pub async fn min_rate(
    State(state): State<AppState>,
    Query(query): Query<MinRateQuery>,
) -> Result<Json<ExchangeRateResponse>> {
    if let Some(error) = query.validate() {
        return Err(ApiError::Validation(error));
    }
    let key = keys::min_rate(&query.from, &query.to);

    if state.config.cache_rates_enabled {
        if let Some(cached) = state.rate_cache.write().await.get(&key) {
            if let Some(rate) = cached.into_iter().next() {
                return Ok(Json(rate));
            }
        }
    }

    let row = state
        .rates
        .min_rate(&query.from, &query.to)
        .await
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No exchange rate from {} to {}",
                query.from, query.to
            ))
        })?;
    let response = ExchangeRateResponse::from(row);

    if state.config.cache_rates_enabled {
        state
            .rate_cache
            .write()
            .await
            .put(key, vec![response.clone()]);
    }
    Ok(Json(response))
}

// == Convert ==
/// Handler for GET /exchange-rates/convert
///
/// Converts an amount at one bank's rate, resolved through the same point
/// cache as the rate-value lookup.
pub async fn convert(
    State(state): State<AppState>,
    Query(query): Query<ConvertQuery>,
) -> Result<Json<ConversionResponse>> {
    if let Some(error) = query.validate() {
        return Err(ApiError::Validation(error));
    }

    let rate = point_rate(&state, query.bank_id, &query.from, &query.to).await?;
    Ok(Json(ConversionResponse::compute(
        query.from,
        query.to,
        query.amount,
        rate,
    )))
}
