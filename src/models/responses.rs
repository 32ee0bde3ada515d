//! Response DTOs for the rate hub API
//!
//! Defines the structure of outgoing HTTP response bodies. The listing and
//! point DTOs also implement `EntryWeight`, since they are exactly what
//! the cache partitions store.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::{CacheStats, EntryWeight};
use crate::registry::{Bank, Currency, ExchangeRate};

/// A bank together with the rates it quotes, as in listing responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankResponse {
    pub id: u64,
    pub name: String,
    /// Rates quoted by this bank; their presence is why rate mutations
    /// must clear the bank partition
    pub exchange_rates: Vec<ExchangeRateResponse>,
}

impl BankResponse {
    /// Assembles the response from a bank row and its rates.
    pub fn from_parts(bank: Bank, rates: Vec<ExchangeRate>) -> Self {
        Self {
            id: bank.id,
            name: bank.name,
            exchange_rates: rates.into_iter().map(ExchangeRateResponse::from).collect(),
        }
    }
}

impl EntryWeight for BankResponse {
    fn weight(&self) -> usize {
        std::mem::size_of::<u64>() + self.name.len() + self.exchange_rates.weight()
    }
}

/// A currency row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyResponse {
    pub id: u64,
    pub code: String,
    pub name: String,
}

impl From<Currency> for CurrencyResponse {
    fn from(currency: Currency) -> Self {
        Self {
            id: currency.id,
            code: currency.code,
            name: currency.name,
        }
    }
}

impl EntryWeight for CurrencyResponse {
    fn weight(&self) -> usize {
        std::mem::size_of::<u64>() + self.code.len() + self.name.len()
    }
}

/// An exchange rate row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeRateResponse {
    pub id: u64,
    pub bank_id: u64,
    pub from_currency_code: String,
    pub to_currency_code: String,
    pub rate: f64,
}

impl From<ExchangeRate> for ExchangeRateResponse {
    fn from(rate: ExchangeRate) -> Self {
        Self {
            id: rate.id,
            bank_id: rate.bank_id,
            from_currency_code: rate.from_currency_code,
            to_currency_code: rate.to_currency_code,
            rate: rate.rate,
        }
    }
}

impl EntryWeight for ExchangeRateResponse {
    fn weight(&self) -> usize {
        2 * std::mem::size_of::<u64>()
            + self.from_currency_code.len()
            + self.to_currency_code.len()
            + std::mem::size_of::<f64>()
    }
}

/// Response body for the point rate-value lookup.
#[derive(Debug, Clone, Serialize)]
pub struct RateValueResponse {
    pub bank_id: u64,
    pub from_currency_code: String,
    pub to_currency_code: String,
    pub rate: f64,
}

/// Response body for amount conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionResponse {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub converted_amount: f64,
}

impl ConversionResponse {
    /// Converts `amount` at `rate`, rounding to three decimal places.
    pub fn compute(from: String, to: String, amount: f64, rate: f64) -> Self {
        let converted = (amount * rate * 1000.0).round() / 1000.0;
        Self {
            from_currency: from,
            to_currency: to,
            amount,
            converted_amount: converted,
        }
    }
}

/// Statistics for one cache partition.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    pub current_weight: usize,
    pub max_weight: usize,
    pub hit_rate: f64,
}

impl PartitionStats {
    pub fn new(stats: CacheStats, max_weight: usize) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
            current_weight: stats.current_weight,
            max_weight,
        }
    }
}

/// Response body for the cache statistics endpoint, one entry per
/// partition.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub banks: PartitionStats,
    pub currencies: PartitionStats,
    pub rates: PartitionStats,
    pub rate_values: PartitionStats,
}

/// Response body for the visit counter endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct VisitsResponse {
    pub total: u64,
    /// Per-URI counts, ordered for stable output
    pub by_uri: BTreeMap<String, u64>,
}

/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}
