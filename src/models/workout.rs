//! Workout log models.

use serde::{Deserialize, Serialize};

/// Workout row in the `workouts` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    pub id: i64,
    /// Owning user
    pub user_id: i64,
    pub name: String,
    pub notes: Option<String>,
    /// When the workout was performed (RFC 3339)
    pub performed_at: String,
    pub created_at: String,
}

/// Per-exercise entry in the `workout_entries` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    pub id: i64,
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: Option<f64>,
}

/// Insert payload for the `workouts` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewWorkout {
    pub user_id: i64,
    pub name: String,
    pub notes: Option<String>,
    pub performed_at: String,
}

/// Update payload for the `workouts` table. The owner never changes.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutChanges {
    pub name: String,
    pub notes: Option<String>,
    pub performed_at: String,
}

/// Insert payload for the `workout_entries` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewWorkoutEntry {
    pub workout_id: i64,
    pub exercise_id: i64,
    pub sets: i32,
    pub reps: i32,
    pub weight_kg: Option<f64>,
}
