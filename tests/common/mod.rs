// SPDX-License-Identifier: MIT

use gymdesk::config::Config;
use gymdesk::db::SupabaseDb;
use gymdesk::middleware::auth::create_access_token;
use gymdesk::routes::create_router;
use gymdesk::AppState;
use std::sync::Arc;

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = SupabaseDb::new_mock();

    let state = Arc::new(AppState { config, db });

    (create_router(state.clone()), state)
}

/// Create a member access token signed with the test config's secret.
#[allow(dead_code)]
pub fn create_test_token(user_id: i64, signing_key: &[u8]) -> String {
    create_access_token(user_id, "member@example.com", "member", signing_key)
        .expect("Failed to create test token")
}

/// Create an admin access token signed with the test config's secret.
#[allow(dead_code)]
pub fn create_admin_token(user_id: i64, signing_key: &[u8]) -> String {
    create_access_token(user_id, "admin@example.com", "admin", signing_key)
        .expect("Failed to create test token")
}
