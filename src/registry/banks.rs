//! Bank Registry Module
//!
//! Authoritative in-memory store for banks.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};

// == Bank Row ==
/// A bank in the authoritative store.
#[derive(Debug, Clone, PartialEq)]
pub struct Bank {
    pub id: u64,
    /// Unique display name
    pub name: String,
}

#[derive(Debug, Default)]
struct BankTable {
    rows: HashMap<u64, Bank>,
    next_id: u64,
}

// == Bank Registry ==
/// Shared handle to the bank table. Cloning shares the underlying rows.
#[derive(Clone, Default)]
pub struct BankRegistry {
    inner: Arc<RwLock<BankTable>>,
}

impl BankRegistry {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Create ==
    /// Inserts a new bank. Names are unique across the table.
    pub async fn create(&self, name: String) -> Result<Bank> {
        let mut table = self.inner.write().await;
        if table.rows.values().any(|bank| bank.name == name) {
            warn!("duplicate bank name rejected: {}", name);
            return Err(ApiError::Conflict(format!(
                "Bank with name '{}' already exists",
                name
            )));
        }

        table.next_id += 1;
        let bank = Bank {
            id: table.next_id,
            name,
        };
        table.rows.insert(bank.id, bank.clone());
        debug!("created bank with id: {}", bank.id);
        Ok(bank)
    }

    // == Get ==
    pub async fn get(&self, id: u64) -> Option<Bank> {
        self.inner.read().await.rows.get(&id).cloned()
    }

    // == List ==
    /// Returns all banks ordered by id.
    pub async fn list(&self) -> Vec<Bank> {
        let table = self.inner.read().await;
        let mut banks: Vec<Bank> = table.rows.values().cloned().collect();
        banks.sort_by_key(|bank| bank.id);
        banks
    }

    // == Update ==
    /// Renames a bank, keeping the uniqueness constraint.
    pub async fn update(&self, id: u64, name: String) -> Result<Bank> {
        let mut table = self.inner.write().await;
        if !table.rows.contains_key(&id) {
            return Err(ApiError::NotFound(format!("Bank not found with id: {}", id)));
        }
        if table
            .rows
            .values()
            .any(|bank| bank.id != id && bank.name == name)
        {
            return Err(ApiError::Conflict(format!(
                "Bank with name '{}' already exists",
                name
            )));
        }

        let bank = table.rows.get_mut(&id).expect("presence checked above");
        bank.name = name;
        Ok(bank.clone())
    }

    // == Delete ==
    /// Removes a bank. Returns false if the id is unknown.
    pub async fn delete(&self, id: u64) -> bool {
        let removed = self.inner.write().await.rows.remove(&id).is_some();
        if removed {
            debug!("deleted bank with id: {}", id);
        }
        removed
    }

    // == Exists ==
    pub async fn exists(&self, id: u64) -> bool {
        self.inner.read().await.rows.contains_key(&id)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let registry = BankRegistry::new();

        let first = registry.create("Alfa".to_string()).await.unwrap();
        let second = registry.create("Belarusbank".to_string()).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let registry = BankRegistry::new();
        registry.create("Alfa".to_string()).await.unwrap();

        let result = registry.create("Alfa".to_string()).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let registry = BankRegistry::new();
        registry.create("B".to_string()).await.unwrap();
        registry.create("A".to_string()).await.unwrap();
        registry.create("C".to_string()).await.unwrap();

        let ids: Vec<u64> = registry.list().await.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_renames() {
        let registry = BankRegistry::new();
        let bank = registry.create("Alfa".to_string()).await.unwrap();

        let updated = registry.update(bank.id, "Alfa-Bank".to_string()).await.unwrap();
        assert_eq!(updated.name, "Alfa-Bank");
        assert_eq!(registry.get(bank.id).await.unwrap().name, "Alfa-Bank");
    }

    #[tokio::test]
    async fn test_update_unknown_id() {
        let registry = BankRegistry::new();
        let result = registry.update(99, "Ghost".to_string()).await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_to_taken_name_is_rejected() {
        let registry = BankRegistry::new();
        registry.create("Alfa".to_string()).await.unwrap();
        let other = registry.create("Belarusbank".to_string()).await.unwrap();

        let result = registry.update(other.id, "Alfa".to_string()).await;
        assert!(matches!(result, Err(ApiError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let registry = BankRegistry::new();
        let bank = registry.create("Alfa".to_string()).await.unwrap();

        assert!(registry.delete(bank.id).await);
        assert!(!registry.delete(bank.id).await);
        assert!(registry.get(bank.id).await.is_none());
    }
}
