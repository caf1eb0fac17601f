//! Editable site copy (flat key/value)

use std::collections::BTreeMap;

use axum::extract::State;
use serde::Serialize;
use shared::error::ApiResponse;
use shared::models::{SiteContentUpdate, validate_key};

use crate::db;
use crate::state::AppState;

use super::ApiResult;
use super::extract::{Json, Path};

#[derive(Serialize)]
pub struct ContentPayload {
    pub content: BTreeMap<String, String>,
}

/// GET /api/site-content
pub async fn list(State(state): State<AppState>) -> ApiResult<ContentPayload> {
    let content = db::site_content::list(&state.pool)
        .await?
        .into_iter()
        .map(|entry| (entry.key, entry.value))
        .collect();
    Ok(ApiResponse::success(ContentPayload { content }))
}

/// PUT /api/site-content/{key}
pub async fn upsert(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SiteContentUpdate>,
) -> ApiResult<()> {
    validate_key(&key)?;
    db::site_content::upsert(&state.pool, key.trim(), &req.value, shared::util::now_millis())
        .await?;
    Ok(ApiResponse::ok_with_message("Content updated"))
}
