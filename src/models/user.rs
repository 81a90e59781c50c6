//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// User row in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Argon2id PHC string; never serialized into API responses
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    /// "member" or "admin"
    pub role: String,
    /// Pricing tier the user is subscribed to
    pub membership_id: Option<i64>,
    /// When the account was created (RFC 3339)
    pub created_at: String,
}

impl User {
    /// Public view of the user, safe to return from the API.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role.clone(),
            membership_id: self.membership_id,
            created_at: self.created_at.clone(),
        }
    }
}

/// Insert payload for the `users` table (id and created_at are
/// assigned by Postgres).
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub membership_id: Option<i64>,
}

/// User profile as returned by the API (no password hash).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub membership_id: Option<i64>,
    pub created_at: String,
}
