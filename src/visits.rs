//! Visit Counter Module
//!
//! Counts requests per URI via router middleware. Purely observational;
//! independent of the cache partitions.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tokio::sync::RwLock;
use tracing::trace;

// == Visit Counter ==
/// Shared per-URI request counter.
#[derive(Clone, Default)]
pub struct VisitCounter {
    counts: Arc<RwLock<HashMap<String, u64>>>,
}

impl VisitCounter {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Record ==
    /// Increments the counter for one URI.
    pub async fn record(&self, uri: &str) {
        let mut counts = self.counts.write().await;
        *counts.entry(uri.to_string()).or_insert(0) += 1;
        trace!("incremented visit count for uri: {}", uri);
    }

    // == Total ==
    /// Sum of all per-URI counts.
    pub async fn total(&self) -> u64 {
        self.counts.read().await.values().sum()
    }

    // == Snapshot ==
    /// Ordered copy of the per-URI counts.
    pub async fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counts
            .read()
            .await
            .iter()
            .map(|(uri, count)| (uri.clone(), *count))
            .collect()
    }
}

// == Middleware ==
/// Router middleware recording every request path before it is handled.
pub async fn track_visits(
    State(counter): State<VisitCounter>,
    request: Request,
    next: Next,
) -> Response {
    counter.record(request.uri().path()).await;
    next.run(request).await
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_record_and_total() {
        let counter = VisitCounter::new();

        counter.record("/banks").await;
        counter.record("/banks").await;
        counter.record("/health").await;

        assert_eq!(counter.total().await, 3);

        let snapshot = counter.snapshot().await;
        assert_eq!(snapshot.get("/banks"), Some(&2));
        assert_eq!(snapshot.get("/health"), Some(&1));
    }

    #[tokio::test]
    async fn test_clones_share_counts() {
        let counter = VisitCounter::new();
        let clone = counter.clone();

        counter.record("/visits").await;
        clone.record("/visits").await;

        assert_eq!(counter.total().await, 2);
    }
}
