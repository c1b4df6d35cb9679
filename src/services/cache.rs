use async_trait::async_trait;
use moka::ops::compute::{CompResult, Op};
use std::sync::Arc;
use std::time::Duration;
use crate::models::{PersistedRecommendation, SizeLabel};
use crate::services::store::{RecommendationStore, StoreError};

/// Read-through L1 cache in front of a recommendation store
///
/// `get` fills the cache from the backing store, `save` writes through. Both
/// go through `put_newest`, so a slow read finishing after a save cannot
/// replace the saved record. Entries expire after the configured TTL, which
/// bounds staleness when several instances share one database.
pub struct CachedStore {
    inner: Arc<dyn RecommendationStore>,
    l1_cache: moka::future::Cache<String, PersistedRecommendation>,
}

impl CachedStore {
    pub fn new(inner: Arc<dyn RecommendationStore>, l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner, l1_cache }
    }

    /// Drop an owner's cached entry
    pub async fn invalidate(&self, owner_id: &str) {
        self.l1_cache.invalidate(owner_id).await;
    }

    /// Cache `record` unless the entry already holds a newer one, and return
    /// whichever record the cache ends up with
    ///
    /// On equal timestamps a save replaces the entry and a read fill does not.
    async fn put_newest(
        &self,
        owner_id: &str,
        record: PersistedRecommendation,
        replace_on_tie: bool,
    ) -> PersistedRecommendation {
        let incoming = record.clone();
        let result = self
            .l1_cache
            .entry_by_ref(owner_id)
            .and_compute_with(|existing| {
                let op = match existing {
                    Some(entry)
                        if entry.value().last_updated > incoming.last_updated
                            || (!replace_on_tie
                                && entry.value().last_updated == incoming.last_updated) =>
                    {
                        Op::Nop
                    }
                    _ => Op::Put(incoming),
                };
                std::future::ready(op)
            })
            .await;

        match result {
            CompResult::Unchanged(entry) => {
                tracing::trace!("Kept newer cached record: {}", owner_id);
                entry.into_value()
            }
            _ => record,
        }
    }
}

#[async_trait]
impl RecommendationStore for CachedStore {
    async fn save(
        &self,
        owner_id: &str,
        raw_answers: &serde_json::Value,
        recommended_size: SizeLabel,
    ) -> Result<PersistedRecommendation, StoreError> {
        let record = match self.inner.save(owner_id, raw_answers, recommended_size).await {
            Ok(record) => record,
            Err(e) => {
                // The backing store may or may not have applied the write
                self.invalidate(owner_id).await;
                return Err(e);
            }
        };

        self.put_newest(owner_id, record.clone(), true).await;

        Ok(record)
    }

    async fn get(&self, owner_id: &str) -> Result<PersistedRecommendation, StoreError> {
        if let Some(record) = self.l1_cache.get(owner_id).await {
            tracing::trace!("L1 cache hit: {}", owner_id);
            return Ok(record);
        }

        tracing::trace!("Cache miss: {}", owner_id);
        let record = self.inner.get(owner_id).await?;

        Ok(self.put_newest(owner_id, record, false).await)
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        self.inner.health_check().await
    }
}
