// SPDX-License-Identifier: MIT

//! Membership tier routes.
//!
//! Tiers are readable by any authenticated user (the mobile signup flow
//! lists them); create/update/delete are admin-only.

use axum::{
    extract::{Path, State},
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{Membership, NewMembership};
use crate::routes::exercises::ensure_admin;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/memberships",
            get(list_memberships).post(create_membership),
        )
        .route(
            "/api/memberships/{id}",
            get(get_membership)
                .put(update_membership)
                .delete(delete_membership),
        )
}

#[derive(Deserialize, Validate)]
pub struct MembershipRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0, message = "price cannot be negative"))]
    pub price: f64,
    #[validate(range(min = 1, max = 3650))]
    pub duration_days: i32,
    /// One feature per element (the admin UI splits a textarea)
    #[serde(default)]
    pub features: Vec<String>,
}

impl MembershipRequest {
    fn into_new_membership(self) -> NewMembership {
        NewMembership {
            name: self.name.trim().to_string(),
            price: self.price,
            duration_days: self.duration_days,
            features: self
                .features
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

async fn list_memberships(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Membership>>> {
    Ok(Json(state.db.list_memberships().await?))
}

async fn get_membership(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Membership>> {
    state
        .db
        .get_membership(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Membership {} not found", id)))
}

async fn create_membership(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<MembershipRequest>,
) -> Result<Json<Membership>> {
    ensure_admin(&user)?;
    req.validate()?;

    let membership = state
        .db
        .insert_membership(&req.into_new_membership())
        .await?;
    tracing::info!(membership_id = membership.id, "Membership tier created");

    Ok(Json(membership))
}

async fn update_membership(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<MembershipRequest>,
) -> Result<Json<Membership>> {
    ensure_admin(&user)?;
    req.validate()?;

    state
        .db
        .update_membership(id, &req.into_new_membership())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Membership {} not found", id)))
}

/// Delete a membership tier.
///
/// Users still referencing the tier surface a foreign-key violation,
/// which maps to 400 rather than cascading.
async fn delete_membership(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ensure_admin(&user)?;

    if !state.db.delete_membership(id).await? {
        return Err(AppError::NotFound(format!("Membership {} not found", id)));
    }

    tracing::info!(membership_id = id, "Membership tier deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}
