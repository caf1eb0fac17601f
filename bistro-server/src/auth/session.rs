//! Admin session: signed JWT carried in an HttpOnly cookie
//!
//! The admin middleware also accepts `Authorization: Bearer <token>` so
//! scripts can call the admin API without a cookie jar.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use shared::error::AppError;

use crate::state::AppState;

/// Session cookie name
pub const SESSION_COOKIE: &str = "bistro_session";

const SESSION_EXPIRY_HOURS: i64 = 24;

/// JWT claims for an admin session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: String,
    pub username: String,
    /// Expiration (Unix timestamp seconds)
    pub exp: usize,
    /// Issued at (Unix timestamp seconds)
    pub iat: usize,
}

/// Authenticated admin extracted from the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminIdentity {
    pub id: String,
    pub username: String,
}

/// Create a session token for a user
pub fn create_token(
    user_id: &str,
    username: &str,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp: (now + chrono::Duration::hours(SESSION_EXPIRY_HOURS)).timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a session token
pub fn verify_token(token: &str, secret: &str) -> Result<AdminIdentity, AppError> {
    let token_data = jsonwebtoken::decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Session token rejected: {e}");
        match e.kind() {
            ErrorKind::ExpiredSignature => AppError::session_expired(),
            _ => AppError::not_authenticated(),
        }
    })?;

    Ok(AdminIdentity {
        id: token_data.claims.sub,
        username: token_data.claims.username,
    })
}

/// Pull the session token from the cookie, or from a Bearer header
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|v| !v.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}

/// Resolve the current session, if any
pub fn current_admin(headers: &HeaderMap, secret: &str) -> Result<AdminIdentity, AppError> {
    let token = token_from_headers(headers).ok_or_else(AppError::not_authenticated)?;
    verify_token(&token, secret)
}

/// `Set-Cookie` value carrying a fresh session
pub fn session_cookie(token: &str, secure: bool) -> String {
    let max_age = SESSION_EXPIRY_HOURS * 3600;
    let mut cookie =
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Middleware guarding every admin route
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, Response> {
    let identity = current_admin(request.headers(), &state.session_secret)
        .map_err(IntoResponse::into_response)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use shared::error::ErrorCode;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_round_trip() {
        let token = create_token("u-1", "admin", SECRET).unwrap();
        let identity = verify_token(&token, SECRET).unwrap();
        assert_eq!(
            identity,
            AdminIdentity {
                id: "u-1".into(),
                username: "admin".into()
            }
        );
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token("u-1", "admin", SECRET).unwrap();
        let err = verify_token(&token, "other-secret").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = SessionClaims {
            sub: "u-1".into(),
            username: "admin".into(),
            exp: 1_000,
            iat: 0,
        };
        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        let err = verify_token(&token, SECRET).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionExpired);
    }

    #[test]
    fn test_token_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; bistro_session=abc.def.ghi; lang=sr"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_token_from_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer xyz"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("xyz"));
        assert!(token_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = session_cookie("tok", false);
        assert!(cookie.starts_with("bistro_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Secure"));
        assert!(session_cookie("tok", true).ends_with("; Secure"));
        assert!(clear_session_cookie(false).contains("Max-Age=0"));
    }
}
