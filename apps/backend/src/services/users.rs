use bcrypt::{hash, verify, DEFAULT_COST};
use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::repos::users::{self, User};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Create a new user account with a bcrypt-hashed password.
///
/// Duplicate emails surface as a 409 conflict from the repository layer; the
/// stored hash never leaves this module.
pub async fn register_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let email = email.trim();

    if email.is_empty() || !email.contains('@') {
        return Err(AppError::invalid(
            "INVALID_EMAIL",
            "A valid email address is required".to_string(),
        ));
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid(
            "PASSWORD_TOO_SHORT",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
    }

    let password_hash = hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let user = users::create_user(conn, email, &password_hash).await?;

    info!(user_id = user.id, email = %Redacted(&user.email), "user created");

    Ok(user)
}

/// Check login credentials against the stored hash.
///
/// Unknown email and wrong password are deliberately indistinguishable:
/// both come back as the single unauthorized error.
pub async fn authenticate(
    conn: &(impl ConnectionTrait + Send + Sync),
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let Some(user) = users::find_user_by_email(conn, email.trim()).await? else {
        debug!(email = %Redacted(email), "login attempt for unknown email");
        return Err(AppError::unauthorized());
    };

    let matches = verify(password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Failed to verify password: {e}")))?;

    if !matches {
        debug!(user_id = user.id, "login attempt with wrong password");
        return Err(AppError::unauthorized());
    }

    Ok(user)
}

/// Fetch a user by id for the public profile endpoint.
pub async fn get_user(conn: &(impl ConnectionTrait + Send + Sync), user_id: i64) -> Result<User, AppError> {
    users::find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(
                "USER_NOT_FOUND",
                format!("user with id: {user_id} was not found"),
            )
        })
}
