//! Database layer (Supabase/PostgREST).

pub mod supabase;

pub use supabase::SupabaseDb;

/// Table names as constants.
pub mod tables {
    pub const USERS: &str = "users";
    pub const EXERCISES: &str = "exercises";
    pub const MEMBERSHIPS: &str = "memberships";
    pub const WORKOUTS: &str = "workouts";
    /// Per-exercise rows belonging to a workout
    pub const WORKOUT_ENTRIES: &str = "workout_entries";
}
