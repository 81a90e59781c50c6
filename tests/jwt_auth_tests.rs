// SPDX-License-Identifier: MIT

//! JWT issuance tests.
//!
//! These tests verify that tokens created by the auth routes can be
//! decoded by the auth middleware, catching compatibility issues early.

use gymdesk::middleware::auth::{
    create_access_token, create_refresh_token, decode_refresh_token, Claims,
    ACCESS_TOKEN_TTL_SECS, REFRESH_TOKEN_TTL_SECS,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::time::{SystemTime, UNIX_EPOCH};

fn unix_now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

#[test]
fn test_access_token_roundtrip() {
    let signing_key = b"test_signing_key_32_bytes_long!!";

    let token = create_access_token(4711, "jane@example.com", "admin", signing_key).unwrap();

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation)
        .expect("Failed to decode JWT - check Claims struct compatibility");

    assert_eq!(token_data.claims.sub, "4711");
    assert_eq!(token_data.claims.email, "jane@example.com");
    assert_eq!(token_data.claims.role, "admin");
    assert!(token_data.claims.exp > token_data.claims.iat);
}

#[test]
fn test_access_token_expires_in_24_hours() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = create_access_token(1, "a@b.com", "member", signing_key).unwrap();

    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false; // We'll check manually

    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let now = unix_now();
    assert!(
        token_data.claims.exp >= now + ACCESS_TOKEN_TTL_SECS - 60,
        "Access token should expire ~24h in the future"
    );
    assert!(token_data.claims.exp <= now + ACCESS_TOKEN_TTL_SECS + 60);
}

#[test]
fn test_refresh_token_expires_in_7_days() {
    let signing_key = b"refresh_key_32_bytes_long_okay!!";
    let token = create_refresh_token(1, signing_key).unwrap();

    #[derive(serde::Deserialize)]
    struct RawClaims {
        exp: usize,
    }

    let key = DecodingKey::from_secret(signing_key);
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;

    let token_data = decode::<RawClaims>(&token, &key, &validation).unwrap();

    let now = unix_now();
    assert!(token_data.claims.exp >= now + REFRESH_TOKEN_TTL_SECS - 60);
    assert!(token_data.claims.exp <= now + REFRESH_TOKEN_TTL_SECS + 60);
}

#[test]
fn test_user_id_parses_back_from_sub() {
    let signing_key = b"test_signing_key_32_bytes_long!!";
    let token = create_access_token(98765432, "x@y.com", "member", signing_key).unwrap();

    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);
    let token_data = decode::<Claims>(&token, &key, &validation).unwrap();

    let parsed_id: i64 = token_data
        .claims
        .sub
        .parse()
        .expect("sub claim should be parseable as i64");

    assert_eq!(parsed_id, 98765432);
}

#[test]
fn test_token_kinds_are_not_interchangeable() {
    let access_secret = b"access_secret_32_bytes_minimum!!";
    let refresh_secret = b"refresh_secret_32_bytes_minimum!";

    // Access token cannot be used at the refresh endpoint
    let access = create_access_token(1, "a@b.com", "member", access_secret).unwrap();
    assert_eq!(decode_refresh_token(&access, refresh_secret), None);

    // Refresh token cannot pass access-token validation
    let refresh = create_refresh_token(1, refresh_secret).unwrap();
    let key = DecodingKey::from_secret(access_secret);
    let validation = Validation::new(Algorithm::HS256);
    assert!(decode::<Claims>(&refresh, &key, &validation).is_err());
}
