use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use crate::models::{PersistedRecommendation, SizeLabel};

/// Errors that can occur when reading or writing recommendations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored value: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// Keyed store holding one recommendation per owner
///
/// A save replaces any previous record for the same owner; there is no
/// history. Concurrent saves for one owner are last-write-wins.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn save(
        &self,
        owner_id: &str,
        raw_answers: &serde_json::Value,
        recommended_size: SizeLabel,
    ) -> Result<PersistedRecommendation, StoreError>;

    async fn get(&self, owner_id: &str) -> Result<PersistedRecommendation, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

/// Process-local store, used in tests and when no database is configured
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<HashMap<String, PersistedRecommendation>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl RecommendationStore for InMemoryStore {
    async fn save(
        &self,
        owner_id: &str,
        raw_answers: &serde_json::Value,
        recommended_size: SizeLabel,
    ) -> Result<PersistedRecommendation, StoreError> {
        let mut records = self.records.write().await;

        // last_updated strictly increases per owner, in write order
        let mut last_updated = chrono::Utc::now();
        if let Some(previous) = records.get(owner_id) {
            if previous.last_updated >= last_updated {
                last_updated = previous.last_updated + chrono::Duration::microseconds(1);
            }
        }

        let record = PersistedRecommendation {
            owner_id: owner_id.to_string(),
            raw_answers: raw_answers.clone(),
            recommended_size,
            last_updated,
        };
        records.insert(owner_id.to_string(), record.clone());

        tracing::debug!("Saved recommendation {} for owner {}", recommended_size, owner_id);

        Ok(record)
    }

    async fn get(&self, owner_id: &str) -> Result<PersistedRecommendation, StoreError> {
        self.records
            .read()
            .await
            .get(owner_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(owner_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_round_trip() {
        let store = InMemoryStore::new();
        let before = chrono::Utc::now();

        store
            .save("owner-1", &serde_json::json!({"fit": "regular"}), SizeLabel::M)
            .await
            .unwrap();
        let record = store.get("owner-1").await.unwrap();

        assert_eq!(record.recommended_size, SizeLabel::M);
        assert!(record.last_updated >= before);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let store = InMemoryStore::new();
        store.save("owner-1", &serde_json::json!({}), SizeLabel::S).await.unwrap();
        store.save("owner-1", &serde_json::json!({"v": 2}), SizeLabel::L).await.unwrap();

        assert_eq!(store.len().await, 1);
        let record = store.get("owner-1").await.unwrap();
        assert_eq!(record.recommended_size, SizeLabel::L);
        assert_eq!(record.raw_answers["v"], 2);
    }

    #[tokio::test]
    async fn test_last_updated_increases_per_owner() {
        let store = InMemoryStore::new();
        let mut previous = store.save("owner-1", &serde_json::json!({}), SizeLabel::S).await.unwrap();

        for size in SizeLabel::ALL {
            let record = store.save("owner-1", &serde_json::json!({}), size).await.unwrap();
            assert!(record.last_updated > previous.last_updated);
            previous = record;
        }
    }

    #[tokio::test]
    async fn test_missing_owner() {
        let store = InMemoryStore::new();
        let err = store.get("nobody").await.unwrap_err();
        assert!(err.is_not_found());
    }
}
