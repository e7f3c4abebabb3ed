use std::time::SystemTime;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::jwt::verify_access_token;
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::auth_token::AuthToken;
use crate::repos::users;
use crate::state::app_state::AppState;

/// The resolved caller of a protected request: bearer token verified and the
/// subject found in the database. This is the only gate in front of protected
/// handlers; constructing one means the request is authenticated.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let AuthToken { token } = AuthToken::from_request(&req, &mut Payload::None).await?;

            let app_state = req
                .app_data::<web::Data<AppState>>()
                .cloned()
                .ok_or_else(|| AppError::internal("AppState not available".to_string()))?;

            // Any token rejection collapses into a single 401.
            let token_data = verify_access_token(&token, SystemTime::now(), &app_state.security)?;

            let db = require_db(&app_state)?;
            let user = users::find_user_by_id(db, token_data.id).await?;

            // A valid token whose subject no longer exists is an auth failure,
            // not an anonymous pass-through.
            let user = user.ok_or_else(|| {
                warn!(user_id = token_data.id, "valid token for unknown user");
                AppError::unauthorized()
            })?;

            Ok(CurrentUser {
                id: user.id,
                email: user.email,
            })
        })
    }
}
