//! Gallery endpoints

use axum::extract::State;
use serde::Serialize;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{GalleryImage, GalleryImageCreate};

use crate::db;
use crate::state::AppState;

use super::ApiResult;
use super::extract::{Json, Path};

#[derive(Serialize)]
pub struct ImagesPayload {
    pub images: Vec<GalleryImage>,
}

#[derive(Serialize)]
pub struct ImagePayload {
    pub image: GalleryImage,
}

/// GET /api/gallery-images
pub async fn list(State(state): State<AppState>) -> ApiResult<ImagesPayload> {
    let images = db::gallery::list(&state.pool).await?;
    Ok(ApiResponse::success(ImagesPayload { images }))
}

/// POST /api/gallery-images
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<GalleryImageCreate>,
) -> ApiResult<ImagePayload> {
    req.validate()?;
    let image = db::gallery::create(&state.pool, &req, shared::util::now_millis()).await?;
    Ok(ApiResponse::success_with_message("Image added to gallery", ImagePayload { image }))
}

/// DELETE /api/gallery-images/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    if !db::gallery::delete(&state.pool, id).await? {
        return Err(AppError::new(ErrorCode::GalleryImageNotFound).into());
    }
    Ok(ApiResponse::ok_with_message("Image removed from gallery"))
}
