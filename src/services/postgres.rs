use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use crate::models::{PersistedRecommendation, SizeLabel};
use crate::services::store::{RecommendationStore, StoreError};

/// PostgreSQL-backed recommendation store
///
/// One row per owner in `size_recommendations`; saves are upserts so the
/// table never holds history.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new store from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

}

fn record_from_row(row: &PgRow) -> Result<PersistedRecommendation, StoreError> {
    let size: String = row.try_get("recommended_size")?;
    let recommended_size = size
        .parse::<SizeLabel>()
        .map_err(|e| StoreError::Corrupt(e.to_string()))?;

    Ok(PersistedRecommendation {
        owner_id: row.try_get("owner_id")?,
        raw_answers: row.try_get("raw_answers")?,
        recommended_size,
        last_updated: row.try_get("last_updated")?,
    })
}

#[async_trait]
impl RecommendationStore for PostgresStore {
    /// Upsert the owner's recommendation
    ///
    /// Uses INSERT ... ON CONFLICT so a second save replaces the first. The
    /// update runs under the row lock and keeps last_updated strictly
    /// increasing in commit order, which the read cache relies on.
    async fn save(
        &self,
        owner_id: &str,
        raw_answers: &serde_json::Value,
        recommended_size: SizeLabel,
    ) -> Result<PersistedRecommendation, StoreError> {
        let query = r#"
            INSERT INTO size_recommendations (owner_id, raw_answers, recommended_size, last_updated)
            VALUES ($1, $2, $3, clock_timestamp())
            ON CONFLICT (owner_id)
            DO UPDATE SET
                raw_answers = EXCLUDED.raw_answers,
                recommended_size = EXCLUDED.recommended_size,
                last_updated = GREATEST(
                    clock_timestamp(),
                    size_recommendations.last_updated + INTERVAL '1 microsecond'
                )
            RETURNING owner_id, raw_answers, recommended_size, last_updated
        "#;

        let row = sqlx::query(query)
            .bind(owner_id)
            .bind(raw_answers)
            .bind(recommended_size.as_str())
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Saved recommendation {} for owner {}", recommended_size, owner_id);

        record_from_row(&row)
    }

    async fn get(&self, owner_id: &str) -> Result<PersistedRecommendation, StoreError> {
        let query = r#"
            SELECT owner_id, raw_answers, recommended_size, last_updated
            FROM size_recommendations
            WHERE owner_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(owner_id.to_string()))?;

        record_from_row(&row)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
