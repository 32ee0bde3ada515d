//! Exchange Rate Registry Module
//!
//! Authoritative in-memory store for exchange rates. The identity of a
//! rate is the `(bank_id, from_currency_code, to_currency_code)` tuple,
//! unique across the table; the same tuple also drives point-level cache
//! keying upstream.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

// == Exchange Rate Row ==
/// An exchange rate quoted by one bank.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub id: u64,
    pub bank_id: u64,
    pub from_currency_code: String,
    pub to_currency_code: String,
    pub rate: f64,
}

#[derive(Debug, Default)]
struct RateTable {
    rows: HashMap<u64, ExchangeRate>,
    next_id: u64,
}

impl RateTable {
    fn tuple_taken(&self, bank_id: u64, from: &str, to: &str, except: Option<u64>) -> bool {
        self.rows.values().any(|rate| {
            Some(rate.id) != except
                && rate.bank_id == bank_id
                && rate.from_currency_code == from
                && rate.to_currency_code == to
        })
    }
}

// == Rate Registry ==
/// Shared handle to the exchange-rate table.
#[derive(Clone, Default)]
pub struct RateRegistry {
    inner: Arc<RwLock<RateTable>>,
}

impl RateRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Create ==
    /// Inserts a new rate; the identity tuple must be free.
    pub async fn create(
        &self,
        bank_id: u64,
        from_currency_code: String,
        to_currency_code: String,
        rate: f64,
    ) -> Result<ExchangeRate> {
        let mut table = self.inner.write().await;
        if table.tuple_taken(bank_id, &from_currency_code, &to_currency_code, None) {
            warn!(
                "duplicate exchange rate rejected for bank {}: {} -> {}",
                bank_id, from_currency_code, to_currency_code
            );
            return Err(ApiError::Conflict(format!(
                "Exchange rate from {} to {} already exists for this bank",
                from_currency_code, to_currency_code
            )));
        }

        table.next_id += 1;
        let row = ExchangeRate {
            id: table.next_id,
            bank_id,
            from_currency_code,
            to_currency_code,
            rate,
        };
        table.rows.insert(row.id, row.clone());
        debug!("created exchange rate with id: {}", row.id);
        Ok(row)
    }

    // == Get ==
    pub async fn get(&self, id: u64) -> Option<ExchangeRate> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    // == List ==
    /// Returns all rates ordered by id.
    pub async fn list(&self) -> Vec<ExchangeRate> {
        let table = self.inner.read().await;
        let mut rates: Vec<ExchangeRate> = table.rows.values().cloned().collect();
        rates.sort_by_key(|rate| rate.id);
        rates
    }

    // == List By Bank ==
    pub async fn list_by_bank(&self, bank_id: u64) -> Vec<ExchangeRate> {
        let table = self.inner.read().await;
        let mut rates: Vec<ExchangeRate> = table
            .rows
            .values()
            .filter(|rate| rate.bank_id == bank_id)
            .cloned()
            .collect();
        rates.sort_by_key(|rate| rate.id);
        rates
    }

    // == Find By Tuple ==
    /// Point lookup by the identity tuple.
    pub async fn find_by_tuple(&self, bank_id: u64, from: &str, to: &str) -> Option<ExchangeRate> {
        self.inner
            .read()
            .await
            .rows
            .values()
            .find(|rate| {
                rate.bank_id == bank_id
                    && rate.from_currency_code == from
                    && rate.to_currency_code == to
            })
            .cloned()
    }

    // == Min Rate ==
    /// Returns the lowest rate quoted for the currency pair across banks.
    pub async fn min_rate(&self, from: &str, to: &str) -> Option<ExchangeRate> {
        self.inner
            .read()
            .await
            .rows
            .values()
            .filter(|rate| rate.from_currency_code == from && rate.to_currency_code == to)
            .min_by(|a, b| a.rate.total_cmp(&b.rate))
            .cloned()
    }

    // == Update ==
    /// Rewrites a rate's identifying codes and value in place.
    ///
    /// Returns the pre-update and post-update rows; the caller needs both
    /// identity tuples for point-level cache eviction. If the tuple changes
    /// onto one already taken by another row, the update is rejected.
    pub async fn update(
        &self,
        id: u64,
        from_currency_code: String,
        to_currency_code: String,
        rate: f64,
    ) -> Result<(ExchangeRate, ExchangeRate)> {
        let mut table = self.inner.write().await;
        let before = table
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Exchange rate not found with id: {}", id)))?;

        if table.tuple_taken(
            before.bank_id,
            &from_currency_code,
            &to_currency_code,
            Some(id),
        ) {
            warn!(
                "update would duplicate exchange rate for bank {}: {} -> {}",
                before.bank_id, from_currency_code, to_currency_code
            );
            return Err(ApiError::Conflict(format!(
                "Another exchange rate from {} to {} already exists for this bank",
                from_currency_code, to_currency_code
            )));
        }

        let row = table.rows.get_mut(&id).expect("presence checked above");
        row.from_currency_code = from_currency_code;
        row.to_currency_code = to_currency_code;
        row.rate = rate;
        let after = row.clone();
        debug!("updated exchange rate with id: {}", id);
        Ok((before, after))
    }

    // == Delete ==
    /// Removes a rate, returning the removed row so the caller can evict
    /// its point key.
    pub async fn delete(&self, id: u64) -> Option<ExchangeRate> {
        let removed = self.inner.write().await.rows.remove(&id);
        if removed.is_some() {
            debug!("deleted exchange rate with id: {}", id);
        }
        removed
    }

    // == Delete By Bank ==
    /// Cascade used by bank deletion. Returns the number of rows removed.
    pub async fn delete_by_bank(&self, bank_id: u64) -> usize {
        let mut table = self.inner.write().await;
        let doomed: Vec<u64> = table
            .rows
            .values()
            .filter(|rate| rate.bank_id == bank_id)
            .map(|rate| rate.id)
            .collect();
        for id in &doomed {
            table.rows.remove(id);
        }
        if !doomed.is_empty() {
            debug!("deleted {} exchange rates for bank {}", doomed.len(), bank_id);
        }
        doomed.len()
    }

    // == Banks Quoting ==
    /// Ids of banks quoting at least one rate touching the given currency.
    pub async fn banks_quoting(&self, code: &str) -> Vec<u64> {
        let table = self.inner.read().await;
        let mut bank_ids: Vec<u64> = table
            .rows
            .values()
            .filter(|rate| rate.from_currency_code == code || rate.to_currency_code == code)
            .map(|rate| rate.bank_id)
            .collect();
        bank_ids.sort_unstable();
        bank_ids.dedup();
        bank_ids
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded() -> RateRegistry {
        let registry = RateRegistry::new();
        registry
            .create(1, "USD".to_string(), "EUR".to_string(), 0.92)
            .await
            .unwrap();
        registry
            .create(1, "EUR".to_string(), "USD".to_string(), 1.08)
            .await
            .unwrap();
        registry
            .create(2, "USD".to_string(), "EUR".to_string(), 0.91)
            .await
            .unwrap();
        registry
    }

    #[tokio::test]
    async fn test_duplicate_tuple_is_rejected() {
        let registry = seeded().await;

        let result = registry
            .create(1, "USD".to_string(), "EUR".to_string(), 0.95)
            .await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));

        // Same pair at another bank is a different tuple
        assert!(registry
            .create(3, "USD".to_string(), "EUR".to_string(), 0.95)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_find_by_tuple() {
        let registry = seeded().await;

        let found = registry.find_by_tuple(1, "USD", "EUR").await.unwrap();
        assert_eq!(found.rate, 0.92);
        assert!(registry.find_by_tuple(1, "USD", "GBP").await.is_none());
    }

    #[tokio::test]
    async fn test_min_rate_picks_lowest_across_banks() {
        let registry = seeded().await;

        let min = registry.min_rate("USD", "EUR").await.unwrap();
        assert_eq!(min.bank_id, 2);
        assert_eq!(min.rate, 0.91);

        assert!(registry.min_rate("GBP", "JPY").await.is_none());
    }

    #[tokio::test]
    async fn test_update_returns_before_and_after() {
        let registry = seeded().await;

        let (before, after) = registry
            .update(1, "GBP".to_string(), "USD".to_string(), 1.27)
            .await
            .unwrap();

        assert_eq!(before.from_currency_code, "USD");
        assert_eq!(before.to_currency_code, "EUR");
        assert_eq!(after.from_currency_code, "GBP");
        assert_eq!(after.to_currency_code, "USD");
        assert_eq!(after.rate, 1.27);
    }

    #[tokio::test]
    async fn test_update_onto_taken_tuple_is_rejected() {
        let registry = seeded().await;

        // Row 1 is (1, USD, EUR); row 2 is (1, EUR, USD)
        let result = registry
            .update(1, "EUR".to_string(), "USD".to_string(), 1.10)
            .await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_keeping_own_tuple_is_allowed() {
        let registry = seeded().await;

        let (_, after) = registry
            .update(1, "USD".to_string(), "EUR".to_string(), 0.93)
            .await
            .unwrap();
        assert_eq!(after.rate, 0.93);
    }

    #[tokio::test]
    async fn test_delete_returns_removed_row() {
        let registry = seeded().await;

        let removed = registry.delete(1).await.unwrap();
        assert_eq!(removed.from_currency_code, "USD");
        assert!(registry.delete(1).await.is_none());
    }

    #[tokio::test]
    async fn test_delete_by_bank_cascades() {
        let registry = seeded().await;

        assert_eq!(registry.delete_by_bank(1).await, 2);
        assert!(registry.list_by_bank(1).await.is_empty());
        assert_eq!(registry.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_banks_quoting_currency() {
        let registry = seeded().await;

        assert_eq!(registry.banks_quoting("USD").await, vec![1, 2]);
        assert_eq!(registry.banks_quoting("EUR").await, vec![1, 2]);
        assert!(registry.banks_quoting("GBP").await.is_empty());
    }
}
