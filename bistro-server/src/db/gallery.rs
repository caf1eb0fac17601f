//! Gallery images

use shared::models::{GalleryImage, GalleryImageCreate};
use sqlx::{PgExecutor, PgPool};

pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<GalleryImage>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, image_url, alt_text, display_order, created_at
         FROM gallery_images ORDER BY display_order, id",
    )
    .fetch_all(executor)
    .await
}

pub async fn create(
    pool: &PgPool,
    data: &GalleryImageCreate,
    now: i64,
) -> Result<GalleryImage, sqlx::Error> {
    sqlx::query_as(
        "INSERT INTO gallery_images (image_url, alt_text, display_order, created_at)
         VALUES ($1, $2, $3, $4)
         RETURNING id, image_url, alt_text, display_order, created_at",
    )
    .bind(data.image_url.trim())
    .bind(data.alt_text.trim())
    .bind(data.display_order.unwrap_or(0))
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Returns `false` when nothing was deleted
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM gallery_images WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
