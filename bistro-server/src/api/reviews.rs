//! Review endpoints: public submission, moderation, Google import

use axum::{extract::State, http::HeaderMap};
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{
    ImportCandidate, ImportSummary, Review, ReviewSubmit, SETTING_GOOGLE_API_KEY,
    SETTING_GOOGLE_PLACE_ID, plan_import,
};
use sqlx::PgPool;

use crate::auth::session::current_admin;
use crate::db;
use crate::db::reviews::ImportStore;
use crate::google;
use crate::state::AppState;

use super::ApiResult;
use super::extract::{Json, Path};

#[derive(Serialize)]
pub struct ReviewsPayload {
    pub reviews: Vec<Review>,
}

#[derive(Serialize)]
pub struct ReviewPayload {
    pub review: Review,
}

fn review_not_found() -> AppError {
    AppError::new(ErrorCode::ReviewNotFound)
}

/// GET /api/reviews
///
/// Approved reviews only, unless the caller holds an admin session.
pub async fn list(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<ReviewsPayload> {
    let include_pending = current_admin(&headers, &state.session_secret).is_ok();
    let reviews = db::reviews::list(&state.pool, include_pending).await?;
    Ok(ApiResponse::success(ReviewsPayload { reviews }))
}

/// POST /api/reviews
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<ReviewSubmit>,
) -> ApiResult<ReviewPayload> {
    let draft = req.validate()?;
    let review =
        db::reviews::create_pending(&state.pool, &draft, shared::util::now_millis()).await?;

    tracing::info!(id = review.id, rating = review.rating, "Review submitted");
    Ok(ApiResponse::success_with_message(
        "Thank you for your review! It will be published after approval.",
        ReviewPayload { review },
    ))
}

/// PUT /api/reviews/{id}/approve
pub async fn approve(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<ReviewPayload> {
    let review = db::reviews::approve(&state.pool, id)
        .await?
        .ok_or_else(review_not_found)?;
    Ok(ApiResponse::success_with_message("Review approved", ReviewPayload { review }))
}

/// DELETE /api/reviews/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    if !db::reviews::delete(&state.pool, id).await? {
        return Err(review_not_found().into());
    }
    Ok(ApiResponse::ok_with_message("Review deleted"))
}

/// Import a batch of external reviews.
///
/// One bad record never aborts the batch: lookup and insert failures are
/// logged and the candidate skipped.
pub async fn import_reviews<S: ImportStore>(
    store: &S,
    batch: Vec<ImportCandidate>,
) -> ImportSummary {
    let plan = plan_import(batch);
    let now = shared::util::now_millis();
    let mut imported = 0;

    for candidate in &plan.candidates {
        match store.exists_by_google_id(&candidate.google_review_id).await {
            Ok(true) => continue,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(google_review_id = %candidate.google_review_id, "Review lookup failed, skipping: {e}");
                continue;
            }
        }

        match store.insert_imported(candidate, now).await {
            Ok(true) => imported += 1,
            Ok(false) => {}
            Err(e) => {
                tracing::warn!(google_review_id = %candidate.google_review_id, "Review insert failed, skipping: {e}");
            }
        }
    }

    ImportSummary {
        imported,
        total: plan.total,
    }
}

async fn required_setting(pool: &PgPool, key: &str) -> Result<String, crate::error::ServiceError> {
    db::settings::get(pool, key)
        .await?
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::ReviewSourceNotConfigured,
                "Google API key and Place ID must be configured in settings",
            )
            .with_detail("setting", key)
            .into()
        })
}

/// POST /api/reviews/fetch-from-google
pub async fn fetch_from_google(State(state): State<AppState>) -> ApiResult<ImportSummary> {
    let api_key = required_setting(&state.pool, SETTING_GOOGLE_API_KEY).await?;
    let place_id = required_setting(&state.pool, SETTING_GOOGLE_PLACE_ID).await?;

    let candidates = google::fetch_reviews(
        &state.http,
        &state.google_places_base_url,
        &api_key,
        &place_id,
    )
    .await
    .map_err(|e| {
        tracing::error!("Google Places fetch failed: {e}");
        AppError::with_message(ErrorCode::ReviewSourceFailed, e.to_string())
    })?;

    let summary = import_reviews(&state.pool, candidates).await;
    tracing::info!(
        imported = summary.imported,
        total = summary.total,
        "Google review import finished"
    );

    Ok(ApiResponse::success_with_message(
        format!("Imported {} new review(s) from Google", summary.imported),
        summary,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// In-memory store; ids listed in `broken_*` fail that step
    #[derive(Default)]
    struct FakeStore {
        stored: Mutex<HashSet<String>>,
        broken_lookup: HashSet<String>,
        broken_insert: HashSet<String>,
    }

    impl ImportStore for FakeStore {
        fn exists_by_google_id(
            &self,
            google_review_id: &str,
        ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send {
            let result = if self.broken_lookup.contains(google_review_id) {
                Err(sqlx::Error::PoolTimedOut)
            } else {
                Ok(self.stored.lock().unwrap().contains(google_review_id))
            };
            std::future::ready(result)
        }

        fn insert_imported(
            &self,
            candidate: &ImportCandidate,
            _now: i64,
        ) -> impl Future<Output = Result<bool, sqlx::Error>> + Send {
            let result = if self.broken_insert.contains(&candidate.google_review_id) {
                Err(sqlx::Error::PoolTimedOut)
            } else {
                Ok(self
                    .stored
                    .lock()
                    .unwrap()
                    .insert(candidate.google_review_id.clone()))
            };
            std::future::ready(result)
        }
    }

    fn candidate(id: &str, rating: i32) -> ImportCandidate {
        ImportCandidate {
            google_review_id: id.into(),
            customer_name: "Ana".into(),
            rating,
            comment: "Great service!".into(),
            review_date: None,
            profile_photo_url: None,
        }
    }

    #[tokio::test]
    async fn test_import_skips_ids_from_earlier_batch() {
        let store = FakeStore::default();

        let first = import_reviews(&store, vec![candidate("a", 5), candidate("b", 4)]).await;
        assert_eq!(first, ImportSummary { imported: 2, total: 2 });

        let second = import_reviews(&store, vec![candidate("a", 5), candidate("c", 5)]).await;
        assert_eq!(second, ImportSummary { imported: 1, total: 2 });
        assert_eq!(store.stored.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_record_does_not_abort_batch() {
        let store = FakeStore {
            broken_lookup: HashSet::from(["x".to_string()]),
            broken_insert: HashSet::from(["y".to_string()]),
            ..Default::default()
        };

        let summary = import_reviews(
            &store,
            vec![candidate("x", 5), candidate("y", 5), candidate("z", 4), candidate("low", 2)],
        )
        .await;
        assert_eq!(summary, ImportSummary { imported: 1, total: 3 });

        let stored = store.stored.lock().unwrap();
        assert!(stored.contains("z"));
        assert!(!stored.contains("x"));
        assert!(!stored.contains("y"));
    }

    #[tokio::test]
    async fn test_in_batch_duplicates_insert_once() {
        let store = FakeStore::default();
        let summary = import_reviews(&store, vec![candidate("a", 5), candidate("a", 5)]).await;
        assert_eq!(summary, ImportSummary { imported: 1, total: 2 });
    }
}
