// SPDX-License-Identifier: MIT

//! User registration, login, token refresh and profile routes.

use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{
    create_access_token, create_refresh_token, decode_refresh_token, AuthUser,
};
use crate::models::{NewUser, UserProfile};
use crate::password::{hash_password, verify_password};
use crate::AppState;

/// Public auth routes.
pub fn auth_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/refresh", post(refresh))
}

/// Profile routes (auth middleware applied in routes/mod.rs).
pub fn profile_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/profile", get(get_profile))
}

// ─── Register ────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be 8-128 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    /// Optional membership tier to subscribe to at signup
    pub membership_id: Option<i64>,
}

/// Token pair + profile returned by register, login and refresh.
#[derive(Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub refresh_token: String,
    pub user: UserProfile,
}

/// Register a new user account.
///
/// A duplicate email comes back from the database as a unique violation
/// and maps to 409; there is no read-then-insert race window.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>> {
    req.validate()?;

    let password_hash = hash_password(&req.password)?;

    let new_user = NewUser {
        email: req.email.trim().to_lowercase(),
        password_hash,
        first_name: req.first_name.trim().to_string(),
        last_name: req.last_name.trim().to_string(),
        // Accounts created through the public API are always members;
        // admins are promoted directly in the database.
        role: "member".to_string(),
        membership_id: req.membership_id,
    };

    let user = state.db.insert_user(&new_user).await?;

    tracing::info!(user_id = user.id, "User registered");

    issue_session(&state, user.id, &user.email, &user.role, user.profile())
}

// ─── Login ───────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Log in with email and password.
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>> {
    req.validate()?;

    // Unknown email and wrong password must be indistinguishable
    let user = state
        .db
        .get_user_by_email(req.email.trim())
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !verify_password(&req.password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Login failed: bad password");
        return Err(AppError::Unauthorized);
    }

    tracing::info!(user_id = user.id, "User logged in");

    issue_session(&state, user.id, &user.email, &user.role, user.profile())
}

// ─── Refresh ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Exchange a refresh token for a new access/refresh pair.
///
/// The user row is re-read so a role change or deleted account takes
/// effect at the next refresh instead of living on in old claims.
async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<SessionResponse>> {
    let user_id = decode_refresh_token(&req.refresh_token, &state.config.jwt_refresh_secret)
        .ok_or(AppError::InvalidToken)?;

    let user = state
        .db
        .get_user(user_id)
        .await?
        .ok_or(AppError::InvalidToken)?;

    tracing::debug!(user_id = user.id, "Session refreshed");

    issue_session(&state, user.id, &user.email, &user.role, user.profile())
}

// ─── Profile ─────────────────────────────────────────────────

/// Get current user profile.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .db
        .get_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?
        .profile();

    Ok(Json(profile))
}

/// Sign an access/refresh token pair for a user.
fn issue_session(
    state: &Arc<AppState>,
    user_id: i64,
    email: &str,
    role: &str,
    profile: UserProfile,
) -> Result<Json<SessionResponse>> {
    let token = create_access_token(user_id, email, role, &state.config.jwt_secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;
    let refresh_token = create_refresh_token(user_id, &state.config.jwt_refresh_secret)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    Ok(Json(SessionResponse {
        token,
        refresh_token,
        user: profile,
    }))
}
