//! Dashboard aggregates.
//!
//! The admin dashboard used to render hard-coded sample arrays; these
//! stats are computed from the database instead, using count-only
//! queries fired concurrently.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate counts shown on the admin dashboard.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total registered users
    pub total_users: u64,
    /// Exercises in the catalog
    pub total_exercises: u64,
    /// Membership tiers on offer
    pub total_memberships: u64,
    /// Workouts logged all-time
    pub total_workouts: u64,
    /// Workouts performed in the last 7 days
    pub workouts_last_7_days: u64,
    /// Accounts created in the last 30 days
    pub signups_last_30_days: u64,
}

/// RFC 3339 cutoff for "within the last `days` days" filters.
pub fn window_start(now: DateTime<Utc>, days: i64) -> String {
    (now - Duration::days(days)).to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_start() {
        let now = DateTime::parse_from_rfc3339("2026-03-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let cutoff = window_start(now, 7);
        assert!(cutoff.starts_with("2026-03-08T12:00:00"));
    }
}
