// SPDX-License-Identifier: MIT

//! Supabase client wrapper with typed table operations.
//!
//! Talks to the project's PostgREST endpoint (`/rest/v1`) with the
//! service-role key. Provides high-level operations for:
//! - Users (auth + profile)
//! - Exercises (catalog)
//! - Memberships (pricing tiers)
//! - Workouts and their entries
//! - Dashboard count aggregates

use crate::db::tables;
use crate::error::AppError;
use crate::models::workout::WorkoutChanges;
use crate::models::{
    DashboardStats, Exercise, Membership, NewExercise, NewMembership, NewUser, NewWorkout,
    NewWorkoutEntry, User, Workout, WorkoutEntry,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Supabase database client.
#[derive(Clone)]
pub struct SupabaseDb {
    http: reqwest::Client,
    /// PostgREST base URL; `None` in offline mode (tests)
    rest_url: Option<String>,
    service_key: String,
}

/// Error body returned by PostgREST for failed statements.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: String,
    message: String,
}

impl SupabaseDb {
    /// Create a new client for a Supabase project.
    pub fn new(project_url: &str, service_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            rest_url: Some(format!("{}/rest/v1", project_url.trim_end_matches('/'))),
            service_key: service_key.to_string(),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            rest_url: None,
            service_key: String::new(),
        }
    }

    /// Helper to get the REST base URL or an error if offline.
    fn rest_url(&self) -> Result<&str, AppError> {
        self.rest_url
            .as_deref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn request(&self, method: reqwest::Method, table: &str) -> Result<reqwest::RequestBuilder, AppError> {
        let url = format!("{}/{}", self.rest_url()?, table);
        Ok(self
            .http
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key))
    }

    /// Check response status, translating PostgREST error bodies.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        // PostgREST surfaces the Postgres error code (23505, 23503, ...)
        if let Ok(pg) = serde_json::from_str::<PostgrestError>(&body) {
            return Err(AppError::from_pg_code(&pg.code, pg.message));
        }

        Err(AppError::Database(format!(
            "PostgREST request failed ({}): {}",
            status, body
        )))
    }

    // ─── Generic Table Operations ────────────────────────────────

    /// SELECT rows matching the given query parameters.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .request(reqwest::Method::GET, table)?
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Self::check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("Failed to decode {} rows: {}", table, e)))
    }

    /// SELECT a single row by primary key.
    async fn select_by_id<T: DeserializeOwned>(
        &self,
        table: &str,
        id: i64,
    ) -> Result<Option<T>, AppError> {
        let rows: Vec<T> = self
            .select(table, &[("id", format!("eq.{}", id)), ("limit", "1".to_string())])
            .await?;
        Ok(rows.into_iter().next())
    }

    /// INSERT a single row, returning the stored representation.
    async fn insert<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self
            .request(reqwest::Method::POST, table)?
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<T> = Self::check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("Failed to decode inserted row: {}", e)))?;

        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Database(format!("Insert into {} returned no rows", table)))
    }

    /// INSERT multiple rows in one statement.
    async fn insert_many<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &[B],
    ) -> Result<Vec<T>, AppError> {
        let response = self
            .request(reqwest::Method::POST, table)?
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Self::check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("Failed to decode inserted rows: {}", e)))
    }

    /// UPDATE a row by primary key. Returns `None` if no row matched.
    async fn update_by_id<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: i64,
        body: &B,
    ) -> Result<Option<T>, AppError> {
        let response = self
            .request(reqwest::Method::PATCH, table)?
            .query(&[("id", format!("eq.{}", id))])
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<T> = Self::check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("Failed to decode updated row: {}", e)))?;

        Ok(rows.into_iter().next())
    }

    /// DELETE rows matching the query. Returns the number of rows removed.
    async fn delete_where(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<usize, AppError> {
        let response = self
            .request(reqwest::Method::DELETE, table)?
            .query(query)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let rows: Vec<serde_json::Value> = Self::check_response(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("Failed to decode deleted rows: {}", e)))?;

        Ok(rows.len())
    }

    /// Count rows matching the query without fetching them.
    ///
    /// Uses a HEAD request with `Prefer: count=exact` and parses the
    /// total from the `Content-Range` header ("0-24/3573" or "*/0").
    async fn count_where(&self, table: &str, query: &[(&str, String)]) -> Result<u64, AppError> {
        let response = self
            .request(reqwest::Method::HEAD, table)?
            .query(query)
            .header("Prefer", "count=exact")
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let response = Self::check_response(response).await?;
        let range = response
            .headers()
            .get("content-range")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AppError::Database("Missing Content-Range header".to_string()))?;

        parse_content_range_total(range)
            .ok_or_else(|| AppError::Database(format!("Unparseable Content-Range: {}", range)))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by id.
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        self.select_by_id(tables::USERS, user_id).await
    }

    /// Get a user by email (case-insensitive match on the unique index).
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let rows: Vec<User> = self
            .select(
                tables::USERS,
                &[
                    ("email", format!("eq.{}", email.to_lowercase())),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Insert a new user. A duplicate email surfaces as `AppError::Conflict`
    /// via the unique-violation translation.
    pub async fn insert_user(&self, user: &NewUser) -> Result<User, AppError> {
        self.insert(tables::USERS, user).await
    }

    // ─── Exercise Operations ─────────────────────────────────────

    /// List the whole exercise catalog, ordered by name.
    pub async fn list_exercises(&self) -> Result<Vec<Exercise>, AppError> {
        self.select(tables::EXERCISES, &[("order", "name.asc".to_string())])
            .await
    }

    pub async fn get_exercise(&self, id: i64) -> Result<Option<Exercise>, AppError> {
        self.select_by_id(tables::EXERCISES, id).await
    }

    pub async fn insert_exercise(&self, exercise: &NewExercise) -> Result<Exercise, AppError> {
        self.insert(tables::EXERCISES, exercise).await
    }

    pub async fn update_exercise(
        &self,
        id: i64,
        exercise: &NewExercise,
    ) -> Result<Option<Exercise>, AppError> {
        self.update_by_id(tables::EXERCISES, id, exercise).await
    }

    pub async fn delete_exercise(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self
            .delete_where(tables::EXERCISES, &[("id", format!("eq.{}", id))])
            .await?;
        Ok(deleted > 0)
    }

    // ─── Membership Operations ───────────────────────────────────

    /// List membership tiers, cheapest first.
    pub async fn list_memberships(&self) -> Result<Vec<Membership>, AppError> {
        self.select(tables::MEMBERSHIPS, &[("order", "price.asc".to_string())])
            .await
    }

    pub async fn get_membership(&self, id: i64) -> Result<Option<Membership>, AppError> {
        self.select_by_id(tables::MEMBERSHIPS, id).await
    }

    pub async fn insert_membership(
        &self,
        membership: &NewMembership,
    ) -> Result<Membership, AppError> {
        self.insert(tables::MEMBERSHIPS, membership).await
    }

    pub async fn update_membership(
        &self,
        id: i64,
        membership: &NewMembership,
    ) -> Result<Option<Membership>, AppError> {
        self.update_by_id(tables::MEMBERSHIPS, id, membership).await
    }

    pub async fn delete_membership(&self, id: i64) -> Result<bool, AppError> {
        let deleted = self
            .delete_where(tables::MEMBERSHIPS, &[("id", format!("eq.{}", id))])
            .await?;
        Ok(deleted > 0)
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// Insert a workout row (entries are inserted separately).
    pub async fn insert_workout(&self, workout: &NewWorkout) -> Result<Workout, AppError> {
        self.insert(tables::WORKOUTS, workout).await
    }

    /// Insert the per-exercise entries for a workout in one statement.
    pub async fn insert_workout_entries(
        &self,
        entries: &[NewWorkoutEntry],
    ) -> Result<Vec<WorkoutEntry>, AppError> {
        if entries.is_empty() {
            return Ok(vec![]);
        }
        self.insert_many(tables::WORKOUT_ENTRIES, entries).await
    }

    /// List workouts for a user, newest first, with pagination and an
    /// optional lower bound on `performed_at`.
    pub async fn list_workouts_for_user(
        &self,
        user_id: i64,
        from: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Workout>, AppError> {
        let mut query = vec![
            ("user_id", format!("eq.{}", user_id)),
            ("order", "performed_at.desc".to_string()),
            ("limit", limit.to_string()),
            ("offset", offset.to_string()),
        ];
        if let Some(from) = from {
            query.push(("performed_at", format!("gte.{}", from)));
        }

        self.select(tables::WORKOUTS, &query).await
    }

    pub async fn get_workout(&self, id: i64) -> Result<Option<Workout>, AppError> {
        self.select_by_id(tables::WORKOUTS, id).await
    }

    /// Get the entries belonging to a workout.
    pub async fn get_workout_entries(
        &self,
        workout_id: i64,
    ) -> Result<Vec<WorkoutEntry>, AppError> {
        self.select(
            tables::WORKOUT_ENTRIES,
            &[
                ("workout_id", format!("eq.{}", workout_id)),
                ("order", "id.asc".to_string()),
            ],
        )
        .await
    }

    pub async fn update_workout(
        &self,
        id: i64,
        changes: &WorkoutChanges,
    ) -> Result<Option<Workout>, AppError> {
        self.update_by_id(tables::WORKOUTS, id, changes).await
    }

    /// Delete a workout and its entries.
    ///
    /// Entries go first so a failure can't orphan them behind a missing
    /// parent row.
    pub async fn delete_workout(&self, id: i64) -> Result<bool, AppError> {
        self.delete_where(
            tables::WORKOUT_ENTRIES,
            &[("workout_id", format!("eq.{}", id))],
        )
        .await?;

        let deleted = self
            .delete_where(tables::WORKOUTS, &[("id", format!("eq.{}", id))])
            .await?;
        Ok(deleted > 0)
    }

    // ─── Dashboard Aggregates ────────────────────────────────────

    /// Compute dashboard counts with concurrent count-only queries.
    pub async fn dashboard_counts(
        &self,
        week_start: &str,
        month_start: &str,
    ) -> Result<DashboardStats, AppError> {
        let week_filter = [("performed_at", format!("gte.{}", week_start))];
        let month_filter = [("created_at", format!("gte.{}", month_start))];
        let (
            total_users,
            total_exercises,
            total_memberships,
            total_workouts,
            workouts_last_7_days,
            signups_last_30_days,
        ) = futures_util::try_join!(
            self.count_where(tables::USERS, &[]),
            self.count_where(tables::EXERCISES, &[]),
            self.count_where(tables::MEMBERSHIPS, &[]),
            self.count_where(tables::WORKOUTS, &[]),
            self.count_where(tables::WORKOUTS, &week_filter),
            self.count_where(tables::USERS, &month_filter),
        )?;

        Ok(DashboardStats {
            total_users,
            total_exercises,
            total_memberships,
            total_workouts,
            workouts_last_7_days,
            signups_last_30_days,
        })
    }
}

/// Parse the total from a PostgREST `Content-Range` header value.
fn parse_content_range_total(range: &str) -> Option<u64> {
    range.rsplit('/').next()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[tokio::test]
    async fn test_offline_mode_errors() {
        let db = SupabaseDb::new_mock();
        let err = db.get_user(1).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[test]
    fn test_postgrest_error_body_parses() {
        let body = r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"users_email_key\""}"#;
        let pg: PostgrestError = serde_json::from_str(body).unwrap();
        assert_eq!(pg.code, "23505");
        assert!(pg.message.contains("users_email_key"));
    }
}
