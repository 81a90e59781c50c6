// SPDX-License-Identifier: MIT

//! JWT authentication middleware and token issuance.
//!
//! Access tokens (24h) and refresh tokens (7d) are both HS256 JWTs but
//! are signed with distinct secrets, so a refresh token can never pass
//! `require_auth` and an access token is useless at the refresh endpoint.

use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Access token lifetime: 24 hours.
pub const ACCESS_TOKEN_TTL_SECS: usize = 24 * 60 * 60;
/// Refresh token lifetime: 7 days.
pub const REFRESH_TOKEN_TTL_SECS: usize = 7 * 24 * 60 * 60;

/// Session cookie name (set by the admin dashboard; mobile uses the header).
pub const TOKEN_COOKIE: &str = "gymdesk_token";

/// Access token claims.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// User email
    pub email: String,
    /// User role ("member" or "admin")
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Refresh token claims. Deliberately minimal: the user row is re-read
/// on refresh so role/email changes take effect.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RefreshClaims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Authenticated user extracted from the access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
    pub email: String,
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Middleware that requires a valid access token.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    // Try cookie first, then header
    let token = if let Some(cookie) = jar.get(TOKEN_COOKIE) {
        cookie.value().to_string()
    } else {
        let auth_header = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        match auth_header {
            Some(h) if h.starts_with("Bearer ") => h[7..].to_string(),
            _ => return Err(StatusCode::UNAUTHORIZED),
        }
    };

    let key = DecodingKey::from_secret(&state.config.jwt_secret);
    let validation = Validation::new(Algorithm::HS256);

    let token_data =
        decode::<Claims>(&token, &key, &validation).map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user_id: i64 = token_data
        .claims
        .sub
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let auth_user = AuthUser {
        user_id,
        email: token_data.claims.email,
        role: token_data.claims.role,
    };
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

/// Create an access token for a user session.
pub fn create_access_token(
    user_id: i64,
    email: &str,
    role: &str,
    secret: &[u8],
) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = unix_now()?;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        role: role.to_string(),
        iat: now,
        exp: now + ACCESS_TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Create a refresh token for a user session.
pub fn create_refresh_token(user_id: i64, secret: &[u8]) -> anyhow::Result<String> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let now = unix_now()?;
    let claims = RefreshClaims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + REFRESH_TOKEN_TTL_SECS,
    };

    Ok(encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret),
    )?)
}

/// Decode a refresh token, returning the user id it was issued for.
pub fn decode_refresh_token(token: &str, secret: &[u8]) -> Option<i64> {
    let key = DecodingKey::from_secret(secret);
    let validation = Validation::new(Algorithm::HS256);

    let token_data = decode::<RefreshClaims>(token, &key, &validation).ok()?;
    token_data.claims.sub.parse().ok()
}

fn unix_now() -> anyhow::Result<usize> {
    use std::time::{SystemTime, UNIX_EPOCH};
    Ok(SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_token_roundtrip() {
        let secret = b"refresh_secret_32_bytes_minimum!";
        let token = create_refresh_token(42, secret).unwrap();

        assert_eq!(decode_refresh_token(&token, secret), Some(42));
    }

    #[test]
    fn test_refresh_token_wrong_secret_rejected() {
        let token = create_refresh_token(42, b"refresh_secret_32_bytes_minimum!").unwrap();
        assert_eq!(
            decode_refresh_token(&token, b"a_different_secret_32_bytes_long"),
            None
        );
    }

    #[test]
    fn test_access_token_rejected_as_refresh_token() {
        // An access token lacks nothing structurally (RefreshClaims is a
        // subset of Claims), so the secret separation is what protects
        // the refresh endpoint.
        let secret = b"access_secret_32_bytes_minimum!!";
        let access = create_access_token(42, "a@b.com", "member", secret).unwrap();

        assert_eq!(
            decode_refresh_token(&access, b"refresh_secret_32_bytes_minimum!"),
            None
        );
    }
}
