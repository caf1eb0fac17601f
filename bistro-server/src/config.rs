//! Server configuration

use crate::error::BoxError;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Max pooled database connections
    pub database_max_connections: u32,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Secret used to sign session tokens
    pub session_secret: String,
    /// Password for the seeded `admin` user (only needed on first start)
    pub admin_password: Option<String>,
    /// Directory uploaded images are written to and served from
    pub upload_dir: String,
    /// Google Places API base URL
    pub google_places_base_url: String,
    /// Key the login limiter by the last X-Forwarded-For hop (behind a reverse proxy)
    pub trust_proxy: bool,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                tracing::warn!(
                    "{name} not set; using a random per-process value (sessions end on restart)"
                );
                random_secret()
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;
        if !is_postgres_url(&database_url) {
            return Err(
                "DATABASE_URL must be a PostgreSQL URL (postgres:// or postgresql://)".into(),
            );
        }

        Ok(Self {
            database_url,
            database_max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            session_secret: Self::require_secret("SESSION_SECRET", &environment)?,
            environment,
            admin_password: std::env::var("ADMIN_PASSWORD")
                .ok()
                .filter(|s| !s.is_empty()),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()),
            google_places_base_url: std::env::var("GOOGLE_PLACES_BASE_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api/place".into()),
            trust_proxy: std::env::var("TRUST_PROXY")
                .map(|v| is_truthy(&v))
                .unwrap_or(false),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn is_postgres_url(url: &str) -> bool {
    url.starts_with("postgres://") || url.starts_with("postgresql://")
}

/// Two v4 UUIDs (244 random bits), hex encoded
fn random_secret() -> String {
    format!(
        "{}{}",
        uuid::Uuid::new_v4().simple(),
        uuid::Uuid::new_v4().simple()
    )
}

fn is_truthy(val: &str) -> bool {
    matches!(val.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_postgres_url() {
        assert!(is_postgres_url("postgres://u:p@localhost/bistro"));
        assert!(is_postgres_url("postgresql://localhost/bistro"));
        assert!(!is_postgres_url("mysql://localhost/bistro"));
        assert!(!is_postgres_url("bistro.db"));
    }

    #[test]
    fn test_is_truthy() {
        assert!(is_truthy("true"));
        assert!(is_truthy(" 1 "));
        assert!(is_truthy("YES"));
        assert!(!is_truthy("false"));
        assert!(!is_truthy(""));
    }

    #[test]
    fn test_require_secret_development_fallback() {
        let val = Config::require_secret("BISTRO_TEST_UNSET_SECRET", "development").unwrap();
        assert_eq!(val.len(), 64);
        assert!(!val.contains("BISTRO_TEST_UNSET_SECRET"));

        // Fresh per call, never a guessable constant
        let again = Config::require_secret("BISTRO_TEST_UNSET_SECRET", "development").unwrap();
        assert_ne!(val, again);
        assert!(Config::require_secret("BISTRO_TEST_UNSET_SECRET", "production").is_err());
    }
}
