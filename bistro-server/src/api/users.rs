//! Admin user management

use axum::extract::State;
use serde::Serialize;
use shared::error::{ApiResponse, AppError};
use shared::models::{User, UserCreate};

use crate::db;
use crate::error::unique_or_db;
use crate::state::AppState;
use crate::util::hash_password;

use super::ApiResult;
use super::extract::Json;

#[derive(Serialize)]
pub struct UsersPayload {
    pub users: Vec<User>,
}

#[derive(Serialize)]
pub struct UserPayload {
    pub user: User,
}

/// GET /api/users
pub async fn list(State(state): State<AppState>) -> ApiResult<UsersPayload> {
    let users = db::users::list(&state.pool).await?;
    Ok(ApiResponse::success(UsersPayload { users }))
}

/// POST /api/users
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> ApiResult<UserPayload> {
    req.validate()?;

    let hashed = hash_password(&req.password).map_err(|e| {
        tracing::error!("Password hashing failed: {e}");
        AppError::internal("Failed to create user")
    })?;

    let user = db::users::create(&state.pool, req.username.trim(), &hashed)
        .await
        .map_err(|e| unique_or_db(e, AppError::already_exists("Username")))?;

    tracing::info!(username = %user.username, "Admin user created");
    Ok(ApiResponse::success_with_message("User created", UserPayload { user }))
}
