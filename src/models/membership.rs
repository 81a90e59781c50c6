//! Membership tier model.
//!
//! A membership is a pricing/feature tier row; users reference one via
//! `users.membership_id`.

use serde::{Deserialize, Serialize};

/// Membership row in the `memberships` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    pub name: String,
    /// Monthly price in the gym's currency
    pub price: f64,
    /// Contract length
    pub duration_days: i32,
    /// Marketing feature list (stored as text[])
    #[serde(default)]
    pub features: Vec<String>,
    pub created_at: String,
}

/// Insert/update payload for the `memberships` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewMembership {
    pub name: String,
    pub price: f64,
    pub duration_days: i32,
    pub features: Vec<String>,
}
