//! Backup download

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use serde::Serialize;
use shared::error::ApiResponse;
use shared::models::Backup;

use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BackupPayload {
    pub backup: Backup,
    /// RFC 3339
    pub timestamp: String,
}

fn attachment_header(now_millis: i64) -> String {
    format!("attachment; filename=\"bistro-backup-{now_millis}.json\"")
}

/// GET /api/backup/export
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let backup = db::backup::export(&state.pool).await?;
    let now = shared::util::now_millis();

    tracing::info!(
        menu_items = backup.menu_items.len(),
        reviews = backup.reviews.len(),
        "Backup exported"
    );

    let body = ApiResponse::success(BackupPayload {
        backup,
        timestamp: shared::util::millis_to_rfc3339(now),
    });
    Ok(([(header::CONTENT_DISPOSITION, attachment_header(now))], body))
}
