//! Currency Registry Module
//!
//! Authoritative in-memory store for currencies.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

// == Currency Row ==
/// A currency in the authoritative store.
#[derive(Debug, Clone, PartialEq)]
pub struct Currency {
    pub id: u64,
    /// ISO-style three-letter code, unique across the table
    pub code: String,
    pub name: String,
}

#[derive(Debug, Default)]
struct CurrencyTable {
    rows: HashMap<u64, Currency>,
    next_id: u64,
}

// == Currency Registry ==
/// Shared handle to the currency table.
#[derive(Clone, Default)]
pub struct CurrencyRegistry {
    inner: Arc<RwLock<CurrencyTable>>,
}

impl CurrencyRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Create ==
    /// Inserts a new currency. Codes are unique across the table.
    pub async fn create(&self, code: String, name: String) -> Result<Currency> {
        let mut table = self.inner.write().await;
        if table.rows.values().any(|currency| currency.code == code) {
            warn!("duplicate currency code rejected: {}", code);
            return Err(ApiError::Conflict(format!(
                "Currency with code '{}' already exists",
                code
            )));
        }

        table.next_id += 1;
        let currency = Currency {
            id: table.next_id,
            code,
            name,
        };
        table.rows.insert(currency.id, currency.clone());
        debug!("created currency with id: {}", currency.id);
        Ok(currency)
    }

    // == Get ==
    pub async fn get(&self, id: u64) -> Option<Currency> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    // == Find By Code ==
    pub async fn find_by_code(&self, code: &str) -> Option<Currency> {
        self.inner
            .read()
            .await
            .rows
            .values()
            .find(|currency| currency.code == code)
            .cloned()
    }

    // == List ==
    /// Returns all currencies ordered by id.
    pub async fn list(&self) -> Vec<Currency> {
        let table = self.inner.read().await;
        let mut currencies: Vec<Currency> = table.rows.values().cloned().collect();
        currencies.sort_by_key(|currency| currency.id);
        currencies
    }

    // == Update ==
    /// Replaces code and name, keeping code uniqueness.
    pub async fn update(&self, id: u64, code: String, name: String) -> Result<Currency> {
        let mut table = self.inner.write().await;
        if !table.rows.contains_key(&id) {
            return Err(ApiError::NotFound(format!(
                "Currency not found with id: {}",
                id
            )));
        }
        if table
            .rows
            .values()
            .any(|currency| currency.id != id && currency.code == code)
        {
            return Err(ApiError::Conflict(format!(
                "Currency with code '{}' already exists",
                code
            )));
        }

        let currency = table.rows.get_mut(&id).expect("presence checked above");
        currency.code = code;
        currency.name = name;
        Ok(currency.clone())
    }

    // == Delete ==
    pub async fn delete(&self, id: u64) -> bool {
        let removed = self.inner.write().await.rows.remove(&id).is_some();
        if removed {
            debug!("deleted currency with id: {}", id);
        }
        removed
    }
}
