//! Application configuration loaded from environment variables.
//!
//! Secrets (Supabase service key, JWT secrets) are read once at startup
//! and cached in memory for the lifetime of the process.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project URL (e.g. `https://xyz.supabase.co`)
    pub supabase_url: String,
    /// Supabase service-role key (server-side only, bypasses RLS)
    pub supabase_service_key: String,
    /// HMAC secret for access tokens (raw bytes)
    pub jwt_secret: Vec<u8>,
    /// HMAC secret for refresh tokens (raw bytes, distinct from `jwt_secret`)
    pub jwt_refresh_secret: Vec<u8>,
    /// Frontend URL for CORS allow-listing
    pub frontend_url: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test_service_key".to_string(),
            jwt_secret: b"test_jwt_secret_32_bytes_minimum".to_vec(),
            jwt_refresh_secret: b"test_refresh_secret_32_bytes_ok!".to_vec(),
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// For local development, values can be set via a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
            .into_bytes();
        let jwt_refresh_secret = env::var("JWT_REFRESH_SECRET")
            .map_err(|_| ConfigError::Missing("JWT_REFRESH_SECRET"))?
            .into_bytes();

        check_secrets_distinct(&jwt_secret, &jwt_refresh_secret)?;

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
            supabase_service_key: env::var("SUPABASE_SERVICE_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_SERVICE_KEY"))?,
            jwt_secret,
            jwt_refresh_secret,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Sharing one secret between access and refresh tokens would let a
/// 7-day refresh token pass the access-token middleware.
fn check_secrets_distinct(access: &[u8], refresh: &[u8]) -> Result<(), ConfigError> {
    if access == refresh {
        return Err(ConfigError::Invalid(
            "JWT_SECRET and JWT_REFRESH_SECRET must differ",
        ));
    }
    Ok(())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(&'static str),
}
