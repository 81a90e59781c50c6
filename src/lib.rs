// SPDX-License-Identifier: MIT

//! Gymdesk: REST backend for the gym management product.
//!
//! This crate serves the API consumed by the admin dashboard and the
//! mobile client: auth, exercises, membership tiers, workouts, and
//! dashboard aggregates, backed by Supabase (PostgREST).

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod password;
pub mod routes;

use config::Config;
use db::SupabaseDb;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SupabaseDb,
}
