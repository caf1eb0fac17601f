//! Site-wide switches

use axum::extract::State;
use serde::{Deserialize, Serialize};
use shared::error::ApiResponse;
use shared::models::{SETTING_ORDERING_ENABLED, parse_flag};

use crate::db;
use crate::state::AppState;

use super::ApiResult;
use super::extract::Json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderingPayload {
    pub ordering_enabled: bool,
}

#[derive(Deserialize)]
pub struct OrderingRequest {
    pub enabled: bool,
}

/// GET /api/settings/ordering-enabled
///
/// Never fails: a missing setting or a store error both read as enabled.
pub async fn get_ordering_enabled(State(state): State<AppState>) -> ApiResponse<OrderingPayload> {
    let stored = db::settings::get(&state.pool, SETTING_ORDERING_ENABLED)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!("Failed to read ordering flag, defaulting to enabled: {e}");
            None
        });

    ApiResponse::success(OrderingPayload {
        ordering_enabled: parse_flag(stored.as_deref()),
    })
}

/// POST /api/settings/ordering-enabled
pub async fn set_ordering_enabled(
    State(state): State<AppState>,
    Json(req): Json<OrderingRequest>,
) -> ApiResult<OrderingPayload> {
    let value = if req.enabled { "true" } else { "false" };
    db::settings::set(&state.pool, SETTING_ORDERING_ENABLED, value).await?;

    tracing::info!(enabled = req.enabled, "Ordering switch updated");
    Ok(ApiResponse::success_with_message(
        if req.enabled { "Ordering enabled" } else { "Ordering disabled" },
        OrderingPayload {
            ordering_enabled: req.enabled,
        },
    ))
}
