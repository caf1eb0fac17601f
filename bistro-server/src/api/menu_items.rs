//! Menu item endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{Category, MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::db;
use crate::state::AppState;

use super::ApiResult;
use super::extract::{Json, Path, Query};

#[derive(Serialize)]
pub struct ItemsPayload {
    pub items: Vec<MenuItem>,
}

#[derive(Serialize)]
pub struct ItemPayload {
    pub item: MenuItem,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub available_only: bool,
}

fn item_not_found() -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound)
}

/// GET /api/menu-items
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<ItemsPayload> {
    let items = db::menu_items::list(&state.pool, query.available_only).await?;
    Ok(ApiResponse::success(ItemsPayload { items }))
}

/// GET /api/menu-items/featured
pub async fn list_featured(State(state): State<AppState>) -> ApiResult<ItemsPayload> {
    let items = db::menu_items::list_featured(&state.pool).await?;
    Ok(ApiResponse::success(ItemsPayload { items }))
}

/// GET /api/menu-items/category/{category}
pub async fn list_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<ItemsPayload> {
    let category = category.parse::<Category>().map_err(|e| {
        AppError::new(ErrorCode::MenuCategoryInvalid).with_detail("category", e.0)
    })?;
    let items = db::menu_items::list_by_category(&state.pool, category).await?;
    Ok(ApiResponse::success(ItemsPayload { items }))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<MenuItemCreate>,
) -> ApiResult<ItemPayload> {
    let draft = req.validate()?;
    let now = shared::util::now_millis();
    let item = db::menu_items::create(&state.pool, &draft, now).await?;

    tracing::info!(id = item.id, name = %item.name, "Menu item created");
    Ok(ApiResponse::success_with_message("Item created", ItemPayload { item }))
}

/// PUT /api/menu-items/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<MenuItemUpdate>,
) -> ApiResult<ItemPayload> {
    let now = shared::util::now_millis();
    let item = db::menu_items::update(&state.pool, id, patch, now).await?;
    Ok(ApiResponse::success_with_message("Item updated", ItemPayload { item }))
}

/// DELETE /api/menu-items/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<()> {
    if !db::menu_items::delete(&state.pool, id).await? {
        return Err(item_not_found().into());
    }
    tracing::info!(id, "Menu item deleted");
    Ok(ApiResponse::ok_with_message("Item deleted"))
}
