use crate::models::ScoredPosting;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),
}

/// A logged recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRecord {
    pub senior_id: String,
    pub job_id: String,
    pub compatibility_score: i32,
    pub match_tier: String,
    pub recommended_at: chrono::DateTime<chrono::Utc>,
}

/// PostgreSQL client for the recommendation log
///
/// Keeps the most recent compatibility score for every (senior, job) pair
/// that was ever recommended. Ranking never reads from it.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_secs: u64,
        idle_timeout_secs: u64,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_secs))
            .idle_timeout(Duration::from_secs(idle_timeout_secs))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        settings: &crate::config::DatabaseSettings,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL recommendation log");

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            settings.acquire_timeout_secs.unwrap_or(5),
            settings.idle_timeout_secs.unwrap_or(600),
        )
        .await
    }

    /// Record the scores of a recommendation run
    ///
    /// Uses INSERT ... ON CONFLICT so each pair keeps only its latest score.
    pub async fn record_recommendations(
        &self,
        senior_id: &str,
        recommendations: &[ScoredPosting],
    ) -> Result<u64, PostgresError> {
        let query = r#"
            INSERT INTO recommendations (id, senior_id, job_id, compatibility_score, match_tier, recommended_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            ON CONFLICT (senior_id, job_id)
            DO UPDATE SET
                compatibility_score = EXCLUDED.compatibility_score,
                match_tier = EXCLUDED.match_tier,
                recommended_at = EXCLUDED.recommended_at
        "#;

        let mut tx = self.pool.begin().await?;
        let mut written = 0;

        for scored in recommendations {
            let result = sqlx::query(query)
                .bind(uuid::Uuid::new_v4())
                .bind(senior_id)
                .bind(&scored.posting.id)
                .bind(i32::from(scored.match_score))
                .bind(scored.match_tier.code())
                .execute(&mut *tx)
                .await?;
            written += result.rows_affected();
        }

        tx.commit().await?;

        tracing::debug!(
            "Logged {} recommendations for senior {}",
            written,
            senior_id
        );

        Ok(written)
    }

    /// Get the most recent logged recommendations for a senior
    pub async fn get_history(
        &self,
        senior_id: &str,
        limit: usize,
    ) -> Result<Vec<RecommendationRecord>, PostgresError> {
        let query = r#"
            SELECT senior_id, job_id, compatibility_score, match_tier, recommended_at
            FROM recommendations
            WHERE senior_id = $1
            ORDER BY recommended_at DESC, compatibility_score DESC
            LIMIT $2
        "#;

        let rows = sqlx::query(query)
            .bind(senior_id)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        let records = rows
            .iter()
            .map(|row| RecommendationRecord {
                senior_id: row.get("senior_id"),
                job_id: row.get("job_id"),
                compatibility_score: row.get("compatibility_score"),
                match_tier: row.get("match_tier"),
                recommended_at: row.get("recommended_at"),
            })
            .collect();

        Ok(records)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
