// SPDX-License-Identifier: MIT

//! Exercise catalog routes.
//!
//! Reads are open to any authenticated user; mutations are admin-only.

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
use crate::models::{Exercise, NewExercise};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/exercises", get(list_exercises).post(create_exercise))
        .route(
            "/api/exercises/{id}",
            get(get_exercise)
                .put(update_exercise)
                .delete(delete_exercise),
        )
}

#[derive(Deserialize, Validate)]
pub struct ExerciseRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub muscle_group: String,
    #[validate(custom(function = validate_difficulty))]
    pub difficulty: String,
    pub equipment: Option<String>,
    /// One instruction step per element (the admin UI splits a textarea)
    #[serde(default)]
    pub instructions: Vec<String>,
}

fn validate_difficulty(value: &str) -> std::result::Result<(), validator::ValidationError> {
    match value {
        "beginner" | "intermediate" | "advanced" => Ok(()),
        _ => Err(validator::ValidationError::new("difficulty")),
    }
}

impl ExerciseRequest {
    fn into_new_exercise(self) -> NewExercise {
        NewExercise {
            name: self.name.trim().to_string(),
            muscle_group: self.muscle_group,
            difficulty: self.difficulty,
            equipment: self.equipment,
            instructions: self
                .instructions
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

async fn list_exercises(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Exercise>>> {
    Ok(Json(state.db.list_exercises().await?))
}

async fn get_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Exercise>> {
    state
        .db
        .get_exercise(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Exercise {} not found", id)))
}

async fn create_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<ExerciseRequest>,
) -> Result<Json<Exercise>> {
    ensure_admin(&user)?;
    req.validate()?;

    let exercise = state.db.insert_exercise(&req.into_new_exercise()).await?;
    tracing::info!(exercise_id = exercise.id, "Exercise created");

    Ok(Json(exercise))
}

async fn update_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(req): Json<ExerciseRequest>,
) -> Result<Json<Exercise>> {
    ensure_admin(&user)?;
    req.validate()?;

    state
        .db
        .update_exercise(id, &req.into_new_exercise())
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Exercise {} not found", id)))
}

async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    ensure_admin(&user)?;

    if !state.db.delete_exercise(id).await? {
        return Err(AppError::NotFound(format!("Exercise {} not found", id)));
    }

    tracing::info!(exercise_id = id, "Exercise deleted");
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Catalog mutations require the admin role.
pub(crate) fn ensure_admin(user: &AuthUser) -> Result<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin role required".to_string()))
    }
}
