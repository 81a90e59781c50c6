//! Exercise catalog model.

use serde::{Deserialize, Serialize};

/// Exercise row in the `exercises` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: i64,
    pub name: String,
    /// Primary muscle group ("chest", "back", "legs", ...)
    pub muscle_group: String,
    /// "beginner", "intermediate" or "advanced"
    pub difficulty: String,
    /// Required equipment, if any
    pub equipment: Option<String>,
    /// Step-by-step instructions (stored as text[])
    #[serde(default)]
    pub instructions: Vec<String>,
    pub created_at: String,
}

/// Insert/update payload for the `exercises` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewExercise {
    pub name: String,
    pub muscle_group: String,
    pub difficulty: String,
    pub equipment: Option<String>,
    pub instructions: Vec<String>,
}
