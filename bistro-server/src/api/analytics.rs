//! Dashboard analytics

use axum::extract::State;
use serde::Serialize;
use shared::error::ApiResponse;
use shared::models::Analytics;

use crate::db;
use crate::state::AppState;

use super::ApiResult;

#[derive(Serialize)]
pub struct AnalyticsPayload {
    pub analytics: Analytics,
}

/// GET /api/analytics
pub async fn get_analytics(State(state): State<AppState>) -> ApiResult<AnalyticsPayload> {
    let analytics = db::analytics::summary(&state.pool).await?;
    Ok(ApiResponse::success(AnalyticsPayload { analytics }))
}
