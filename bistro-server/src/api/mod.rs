//! HTTP API for bistro-server

pub mod analytics;
pub mod auth;
pub mod backup;
pub mod coupons;
pub mod extract;
pub mod gallery;
pub mod health;
pub mod menu_items;
pub mod reviews;
pub mod settings;
pub mod site_content;
pub mod upload;
pub mod users;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::{Router, middleware};
use shared::error::ApiResponse;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::rate_limit::login_rate_limit;
use crate::auth::session::admin_auth_middleware;
use crate::error::ServiceError;
use crate::state::AppState;

/// Handler result: an envelope on success, a rendered error otherwise
pub type ApiResult<T> = Result<ApiResponse<T>, ServiceError>;

/// Body limit for the upload route (file plus multipart framing)
const UPLOAD_BODY_LIMIT: usize = upload::MAX_FILE_SIZE + 64 * 1024;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    // Login (rate limited per client IP)
    let login = Router::new()
        .route("/api/auth/login", post(auth::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            login_rate_limit,
        ));

    // Public
    let public = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/session", get(auth::session))
        .route("/api/settings/ordering-enabled", get(settings::get_ordering_enabled))
        .route("/api/menu-items", get(menu_items::list))
        .route("/api/menu-items/featured", get(menu_items::list_featured))
        .route("/api/menu-items/category/{category}", get(menu_items::list_by_category))
        .route("/api/gallery-images", get(gallery::list))
        .route("/api/site-content", get(site_content::list))
        .route("/api/coupons/validate", post(coupons::validate))
        .route("/api/reviews", get(reviews::list).post(reviews::submit));

    // Admin (session required)
    let admin = Router::new()
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/settings/ordering-enabled", post(settings::set_ordering_enabled))
        .route("/api/menu-items", post(menu_items::create))
        .route("/api/menu-items/{id}", put(menu_items::update).delete(menu_items::delete))
        .route(
            "/api/upload",
            post(upload::upload_image).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/api/gallery-images", post(gallery::create))
        .route("/api/gallery-images/{id}", delete(gallery::delete))
        .route("/api/site-content/{key}", put(site_content::upsert))
        .route("/api/coupons", get(coupons::list).post(coupons::create))
        .route("/api/coupons/redeem", post(coupons::redeem))
        .route("/api/coupons/{id}", put(coupons::update).delete(coupons::delete))
        .route("/api/reviews/{id}/approve", put(reviews::approve))
        .route("/api/reviews/{id}", delete(reviews::delete))
        .route("/api/reviews/fetch-from-google", post(reviews::fetch_from_google))
        .route("/api/analytics", get(analytics::get_analytics))
        .route("/api/backup/export", get(backup::export))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth_middleware,
        ));

    let uploads = ServeDir::new(&state.upload_dir);

    Router::new()
        .route("/health", get(health::health_check))
        .merge(login)
        .merge(public)
        .merge(admin)
        .nest_service("/uploads", uploads)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
