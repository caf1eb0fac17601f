//! bistro-server: backend for the restaurant site
//!
//! Serves the public menu, gallery, reviews and coupon check, plus the
//! session-guarded admin API used by the dashboard.

mod api;
mod auth;
mod config;
mod db;
mod error;
mod google;
mod state;
mod util;

use std::net::SocketAddr;

use config::Config;
use error::BoxError;
use state::AppState;

/// Username of the account created on first start
const ADMIN_USERNAME: &str = "admin";

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bistro_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting bistro-server (env: {})", config.environment);
    if config.trust_proxy {
        tracing::info!("TRUST_PROXY set: login limiter keys by the last X-Forwarded-For hop");
    }

    // Initialize application state
    let state = AppState::new(&config).await?;

    seed_admin(&state, &config).await?;

    // Periodic rate limiter cleanup
    auth::rate_limit::spawn_cleanup(state.rate_limiter.clone());

    let app = api::create_router(state);

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("bistro-server listening on {addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Create the `admin` account if it does not exist yet
async fn seed_admin(state: &AppState, config: &Config) -> Result<(), BoxError> {
    if db::users::find_by_username(&state.pool, ADMIN_USERNAME)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let password = config
        .admin_password
        .as_deref()
        .ok_or("ADMIN_PASSWORD must be set to create the initial admin user")?;

    let hashed = util::hash_password(password).map_err(|e| format!("Password hashing failed: {e}"))?;
    db::users::create(&state.pool, ADMIN_USERNAME, &hashed).await?;

    tracing::info!("Seeded initial admin user");
    Ok(())
}
