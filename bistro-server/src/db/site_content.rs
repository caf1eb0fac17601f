//! Site copy (key/value text shown on the public pages)

use shared::models::SiteContentEntry;
use sqlx::{PgExecutor, PgPool};

pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<SiteContentEntry>, sqlx::Error> {
    sqlx::query_as("SELECT key, value, updated_at FROM site_content ORDER BY key")
        .fetch_all(executor)
        .await
}

pub async fn upsert(
    pool: &PgPool,
    key: &str,
    value: &str,
    now: i64,
) -> Result<SiteContentEntry, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO site_content (key, value, updated_at) VALUES ($1, $2, $3)
         ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = EXCLUDED.updated_at
         RETURNING key, value, updated_at",
    )
    .bind(key)
    .bind(value)
    .bind(now)
    .fetch_one(pool)
    .await
}
