use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::with_txn;
use crate::error::AppError;
use crate::repos::users::User;
use crate::services::users as user_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Public view of a user; the password hash never appears here.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: time::OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// POST /api/users — signup.
async fn create_user(
    req: web::Json<CreateUserRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = req.into_inner();

    let user = with_txn(&app_state, |txn| {
        Box::pin(async move { user_service::register_user(txn, &body.email, &body.password).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// GET /api/users/{id} — public profile read.
async fn get_user(
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<UserResponse>, AppError> {
    let user_id = path.into_inner();

    let user = with_txn(&app_state, |txn| {
        Box::pin(async move { user_service::get_user(txn, user_id).await })
    })
    .await?;

    Ok(web::Json(UserResponse::from(user)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/users").route(web::post().to(create_user)));
    cfg.service(web::resource("/api/users/{id}").route(web::get().to(get_user)));
}
