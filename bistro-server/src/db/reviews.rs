//! Review database operations

use shared::models::{ImportCandidate, Review, ReviewDraft, ReviewSource};
use sqlx::{PgExecutor, PgPool};

const COLUMNS: &str = "id, customer_name, rating, comment, is_approved, source, \
                       google_review_id, review_date, profile_photo_url, created_at";

#[derive(sqlx::FromRow)]
struct ReviewRow {
    id: i64,
    customer_name: String,
    rating: i32,
    comment: String,
    is_approved: bool,
    source: String,
    google_review_id: Option<String>,
    review_date: Option<i64>,
    profile_photo_url: Option<String>,
    created_at: i64,
}

impl ReviewRow {
    fn into_review(self) -> Review {
        let source = self.source.parse::<ReviewSource>().unwrap_or_else(|_| {
            tracing::warn!(id = self.id, source = %self.source, "Invalid review source, defaulting to manual");
            ReviewSource::Manual
        });

        Review {
            id: self.id,
            customer_name: self.customer_name,
            rating: self.rating,
            comment: self.comment,
            is_approved: self.is_approved,
            source,
            google_review_id: self.google_review_id,
            review_date: self.review_date,
            profile_photo_url: self.profile_photo_url,
            created_at: self.created_at,
        }
    }
}

/// Newest first. Only approved reviews unless `include_pending`.
pub async fn list(
    executor: impl PgExecutor<'_>,
    include_pending: bool,
) -> Result<Vec<Review>, sqlx::Error> {
    let rows: Vec<ReviewRow> = sqlx::query_as(&format!(
        "SELECT {COLUMNS} FROM reviews WHERE ($1 OR is_approved) ORDER BY created_at DESC, id DESC"
    ))
    .bind(include_pending)
    .fetch_all(executor)
    .await?;
    Ok(rows.into_iter().map(ReviewRow::into_review).collect())
}

/// Store a public submission; always pending, always manual
pub async fn create_pending(
    pool: &PgPool,
    draft: &ReviewDraft,
    now: i64,
) -> Result<Review, sqlx::Error> {
    let row: ReviewRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO reviews (customer_name, rating, comment, is_approved, source, created_at)
        VALUES ($1, $2, $3, FALSE, $4, $5)
        RETURNING {COLUMNS}
        "#
    ))
    .bind(&draft.customer_name)
    .bind(draft.rating)
    .bind(&draft.comment)
    .bind(ReviewSource::Manual.as_str())
    .bind(now)
    .fetch_one(pool)
    .await?;
    Ok(row.into_review())
}

/// Idempotent. `None` when the review does not exist.
pub async fn approve(pool: &PgPool, id: i64) -> Result<Option<Review>, sqlx::Error> {
    let row: Option<ReviewRow> = sqlx::query_as(&format!(
        "UPDATE reviews SET is_approved = TRUE WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(ReviewRow::into_review))
}

/// Returns `false` when nothing was deleted
pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn exists_by_google_id(pool: &PgPool, google_review_id: &str) -> Result<bool, sqlx::Error> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT id FROM reviews WHERE google_review_id = $1")
        .bind(google_review_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.is_some())
}

/// Insert an imported review as approved. Returns `false` if another
/// writer got there first.
pub async fn insert_imported(
    pool: &PgPool,
    candidate: &ImportCandidate,
    now: i64,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO reviews (
            customer_name, rating, comment, is_approved, source,
            google_review_id, review_date, profile_photo_url, created_at
        )
        VALUES ($1, $2, $3, TRUE, $4, $5, $6, $7, $8)
        ON CONFLICT (google_review_id) WHERE google_review_id IS NOT NULL DO NOTHING
        "#,
    )
    .bind(&candidate.customer_name)
    .bind(candidate.rating)
    .bind(&candidate.comment)
    .bind(ReviewSource::Google.as_str())
    .bind(&candidate.google_review_id)
    .bind(candidate.review_date)
    .bind(&candidate.profile_photo_url)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Storage a review import writes through
pub trait ImportStore {
    fn exists_by_google_id(
        &self,
        google_review_id: &str,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;

    fn insert_imported(
        &self,
        candidate: &ImportCandidate,
        now: i64,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send;
}

impl ImportStore for PgPool {
    fn exists_by_google_id(
        &self,
        google_review_id: &str,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send {
        exists_by_google_id(self, google_review_id)
    }

    fn insert_imported(
        &self,
        candidate: &ImportCandidate,
        now: i64,
    ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send {
        insert_imported(self, candidate, now)
    }
}
