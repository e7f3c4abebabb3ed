use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Claims included in our backend-issued access tokens.
///
/// This is a closed record: the only fields a token ever carries are the
/// subject id and the expiry, and verification rejects payloads with
/// anything else in them.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Authenticated subject (users.id)
    pub user_id: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

/// Payload shape used during verification. `user_id` is optional here so a
/// structurally valid token with no subject can be told apart from garbage.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DecodedClaims {
    user_id: Option<i64>,
    exp: i64,
}

/// The verified subject recovered from a token. Built per-request by the
/// authentication guard and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenData {
    pub id: i64,
}

/// Internal rejection taxonomy for `verify_access_token`.
///
/// Callers never see these distinctions: the `From<TokenError> for AppError`
/// conversion collapses every variant into a single 401 so the response does
/// not reveal which check failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed or mis-signed")]
    Invalid,
    #[error("token has expired")]
    Expired,
    #[error("token carries no subject")]
    MissingSubject,
}

impl From<TokenError> for AppError {
    fn from(e: TokenError) -> Self {
        debug!(reason = %e, "access token rejected");
        AppError::unauthorized()
    }
}

/// Mint a signed access token for `user_id`, expiring `security.token_ttl`
/// after `now`.
///
/// Pure computation: the same `(user_id, now, secret, algorithm, ttl)` always
/// produces the same token.
pub fn mint_access_token(
    user_id: i64,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let issued_at = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time".to_string()))?
        .as_secs() as i64;

    let exp = issued_at + security.token_ttl.as_secs() as i64;

    let claims = Claims { user_id, exp };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return the subject it carries.
///
/// Signature and structure are checked with the configured secret and pinned
/// algorithm. Expiry is compared against the caller-supplied `now` with zero
/// leeway; a token is dead from the instant `now` reaches `exp`. Depends only
/// on its arguments: no I/O, no shared state.
pub fn verify_access_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<TokenData, TokenError> {
    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| TokenError::Invalid)?
        .as_secs() as i64;

    // Expiry is checked below against the supplied clock, so jsonwebtoken's
    // own wall-clock check stays off.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;

    let payload = decode::<DecodedClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map_err(|_| TokenError::Invalid)?
    .claims;

    if now_secs >= payload.exp {
        return Err(TokenError::Expired);
    }

    match payload.user_id {
        Some(id) => Ok(TokenData { id }),
        None => Err(TokenError::MissingSubject),
    }
}
