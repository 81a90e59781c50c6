// SPDX-License-Identifier: MIT

//! Workout log routes.
//!
//! Workouts are scoped to their owner: a member only ever sees their own
//! rows, while an admin may pass `user_id` to inspect another member's log.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::workout::WorkoutChanges;
use crate::models::{NewWorkout, NewWorkoutEntry, Workout, WorkoutEntry};
use crate::AppState;

const MAX_PER_PAGE: u32 = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route(
            "/api/workouts/{id}",
            get(get_workout).put(update_workout).delete(delete_workout),
        )
}

// ─── Create ──────────────────────────────────────────────────

#[derive(Deserialize, Validate)]
pub struct EntryRequest {
    pub exercise_id: i64,
    #[validate(range(min = 1, max = 100))]
    pub sets: i32,
    #[validate(range(min = 1, max = 1000))]
    pub reps: i32,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub weight_kg: Option<f64>,
}

#[derive(Deserialize, Validate)]
pub struct WorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    /// When the workout was performed (RFC 3339)
    pub performed_at: String,
    #[validate(nested)]
    #[serde(default)]
    pub entries: Vec<EntryRequest>,
}

/// Workout with its entries, as returned by the API.
#[derive(Serialize)]
pub struct WorkoutResponse {
    #[serde(flatten)]
    pub workout: Workout,
    pub entries: Vec<WorkoutEntry>,
}

/// Log a new workout with its per-exercise entries.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<WorkoutRequest>,
) -> Result<Json<WorkoutResponse>> {
    req.validate()?;
    let performed_at = parse_rfc3339(&req.performed_at, "performed_at")?;

    let workout = state
        .db
        .insert_workout(&NewWorkout {
            user_id: user.user_id,
            name: req.name.trim().to_string(),
            notes: req.notes.clone(),
            performed_at: performed_at.to_rfc3339(),
        })
        .await?;

    // Entry inserts reference the new workout id. A failure here leaves
    // a workout without entries, which the owner can delete or re-edit;
    // Postgres FK checks reject entries with an unknown exercise (400).
    let new_entries: Vec<NewWorkoutEntry> = req
        .entries
        .iter()
        .map(|e| NewWorkoutEntry {
            workout_id: workout.id,
            exercise_id: e.exercise_id,
            sets: e.sets,
            reps: e.reps,
            weight_kg: e.weight_kg,
        })
        .collect();

    let entries = state.db.insert_workout_entries(&new_entries).await?;

    tracing::info!(
        workout_id = workout.id,
        user_id = user.user_id,
        entry_count = entries.len(),
        "Workout logged"
    );

    Ok(Json(WorkoutResponse { workout, entries }))
}

// ─── List ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WorkoutsQuery {
    /// Filter by performed_at lower bound (RFC 3339)
    from: Option<String>,
    /// Admin-only: list another user's workouts
    user_id: Option<i64>,
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    50
}

#[derive(Serialize)]
pub struct WorkoutsResponse {
    pub workouts: Vec<Workout>,
    pub page: u32,
    pub per_page: u32,
}

/// List workouts with optional date filter and pagination.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<WorkoutsQuery>,
) -> Result<Json<WorkoutsResponse>> {
    if params.page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }
    let limit = params.per_page.min(MAX_PER_PAGE);

    let from = params
        .from
        .as_deref()
        .map(|raw| parse_rfc3339(raw, "from").map(|dt| dt.to_rfc3339()))
        .transpose()?;

    let target_user = match params.user_id {
        Some(other) if other != user.user_id => {
            if !user.is_admin() {
                return Err(AppError::Forbidden(
                    "cannot list another user's workouts".to_string(),
                ));
            }
            other
        }
        _ => user.user_id,
    };

    // Use checked multiplication to prevent overflow and cast safely
    let offset = (params.page - 1)
        .checked_mul(limit)
        .ok_or_else(|| AppError::BadRequest("Page number causes overflow".to_string()))?;

    tracing::debug!(
        user_id = target_user,
        page = params.page,
        per_page = limit,
        from = ?from,
        "Fetching workouts"
    );

    let workouts = state
        .db
        .list_workouts_for_user(target_user, from.as_deref(), limit, offset)
        .await?;

    Ok(Json(WorkoutsResponse {
        workouts,
        page: params.page,
        per_page: limit,
    }))
}

// ─── Single Workout ──────────────────────────────────────────

async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<WorkoutResponse>> {
    let workout = fetch_owned_workout(&state, &user, id).await?;
    let entries = state.db.get_workout_entries(id).await?;

    Ok(Json(WorkoutResponse { workout, entries }))
}

#[derive(Deserialize, Validate)]
pub struct UpdateWorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    pub performed_at: String,
}

async fn update_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateWorkoutRequest>,
) -> Result<Json<Workout>> {
    req.validate()?;
    let performed_at = parse_rfc3339(&req.performed_at, "performed_at")?;

    // Ownership check before the write
    fetch_owned_workout(&state, &user, id).await?;

    let changes = WorkoutChanges {
        name: req.name.trim().to_string(),
        notes: req.notes,
        performed_at: performed_at.to_rfc3339(),
    };

    state
        .db
        .update_workout(id, &changes)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))
}

async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    fetch_owned_workout(&state, &user, id).await?;

    if !state.db.delete_workout(id).await? {
        return Err(AppError::NotFound(format!("Workout {} not found", id)));
    }

    tracing::info!(workout_id = id, user_id = user.user_id, "Workout deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Fetch a workout, enforcing that it belongs to the caller (or the
/// caller is an admin). A foreign user's workout reads as 404, not 403,
/// so ids cannot be probed.
async fn fetch_owned_workout(
    state: &Arc<AppState>,
    user: &AuthUser,
    id: i64,
) -> Result<Workout> {
    let workout = state
        .db
        .get_workout(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;

    if workout.user_id != user.user_id && !user.is_admin() {
        return Err(AppError::NotFound(format!("Workout {} not found", id)));
    }

    Ok(workout)
}

fn parse_rfc3339(raw: &str, field: &str) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| {
            AppError::BadRequest(format!("Invalid '{}': must be RFC3339 datetime", field))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339_accepts_offsets() {
        let dt = parse_rfc3339("2026-02-01T18:30:00+02:00", "performed_at").unwrap();
        assert_eq!(dt.to_rfc3339(), "2026-02-01T16:30:00+00:00");
    }

    #[test]
    fn test_parse_rfc3339_rejects_garbage() {
        let err = parse_rfc3339("yesterday", "from").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
