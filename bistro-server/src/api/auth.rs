//! Authentication endpoints: login, logout, session

use axum::{
    Extension,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use shared::error::{ApiResponse, AppError, ErrorCode};

use crate::auth::AdminIdentity;
use crate::auth::rate_limit::ClientIp;
use crate::auth::session::{clear_session_cookie, create_token, current_admin, session_cookie};
use crate::db;
use crate::error::ServiceError;
use crate::state::AppState;
use crate::util::verify_password;

use super::ApiResult;
use super::extract::Json;

/// POST /api/auth/login
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Serialize)]
pub struct SessionPayload {
    pub user: AdminIdentity,
}

pub async fn login(
    State(state): State<AppState>,
    client_ip: Option<Extension<ClientIp>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    let username = req.username.trim();
    if username.is_empty() || req.password.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::ValidationFailed,
            "Username and password are required",
        )
        .into());
    }

    let user = db::users::find_by_username(&state.pool, username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(&req.password, &user.hashed_password) {
        tracing::info!(username = %username, "Login rejected: bad password");
        return Err(AppError::invalid_credentials().into());
    }

    let token = create_token(&user.id, &user.username, &state.session_secret).map_err(|e| {
        tracing::error!("Session token creation failed: {e}");
        AppError::internal("Failed to create session")
    })?;

    if let Some(Extension(ClientIp(ip))) = client_ip {
        state.rate_limiter.reset(&ip).await;
    }

    tracing::info!(username = %user.username, "Admin logged in");

    let cookie = session_cookie(&token, state.secure_cookies);
    let body = ApiResponse::success_with_message(
        "Login successful",
        SessionPayload {
            user: AdminIdentity {
                id: user.id,
                username: user.username,
            },
        },
    );
    Ok(([(header::SET_COOKIE, cookie)], body))
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::SET_COOKIE, clear_session_cookie(state.secure_cookies))],
        ApiResponse::ok_with_message("Logged out"),
    )
}

/// GET /api/auth/session
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<SessionPayload> {
    let user = current_admin(&headers, &state.session_secret)?;
    Ok(ApiResponse::success(SessionPayload { user }))
}
