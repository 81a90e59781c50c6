// SPDX-License-Identifier: MIT

//! Admin dashboard routes.
//!
//! The old dashboard shipped hard-coded sample arrays; this computes the
//! numbers from the database with concurrent count-only queries.

use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::stats::window_start;
use crate::models::DashboardStats;
use crate::routes::exercises::ensure_admin;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/dashboard/stats", get(get_stats))
}

/// Get aggregate counts for the admin dashboard.
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<DashboardStats>> {
    ensure_admin(&user)?;

    let now = chrono::Utc::now();
    let week_start = window_start(now, 7);
    let month_start = window_start(now, 30);

    let stats = state.db.dashboard_counts(&week_start, &month_start).await?;

    tracing::debug!(
        total_users = stats.total_users,
        total_workouts = stats.total_workouts,
        "Dashboard stats computed"
    );

    Ok(Json(stats))
}
