//! User repository functions, generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set};

use crate::entities::users;
use crate::error::AppError;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, AppError> {
    let user = users::Entity::find_by_id(user_id).one(conn).await?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<User>, AppError> {
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(email))
        .one(conn)
        .await?;
    Ok(user.map(User::from))
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password_hash: &str,
) -> Result<User, AppError> {
    let now = time::OffsetDateTime::now_utc();

    let user_active = users::ActiveModel {
        id: NotSet,
        email: Set(email.to_string()),
        password_hash: Set(password_hash.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let user = user_active.insert(conn).await.map_err(|e| {
        // Unique-email races surface from the database, not from a pre-check.
        if e.to_string().contains("unique") || e.to_string().contains("duplicate") {
            AppError::conflict(
                "UNIQUE_EMAIL",
                format!("User with email '{email}' already exists"),
            )
        } else {
            AppError::from(e)
        }
    })?;

    Ok(User::from(user))
}
