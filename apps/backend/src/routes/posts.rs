use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::posts::Post;
use crate::services::posts as post_service;
use crate::state::app_state::AppState;

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_published")]
    pub published: bool,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: time::OffsetDateTime,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published: post.published,
            created_at: post.created_at,
        }
    }
}

/// GET /api/posts
async fn list_posts(
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<web::Json<Vec<PostResponse>>, AppError> {
    let posts = with_txn(&app_state, |txn| {
        Box::pin(async move { post_service::list_posts(txn).await })
    })
    .await?;

    Ok(web::Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// POST /api/posts
async fn create_post(
    _current_user: CurrentUser,
    req: web::Json<PostRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = req.into_inner();

    let post = with_txn(&app_state, |txn| {
        Box::pin(async move {
            post_service::create_post(txn, &body.title, &body.content, body.published).await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(PostResponse::from(post)))
}

/// GET /api/posts/{id}
async fn get_post(
    _current_user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PostResponse>, AppError> {
    let post_id = path.into_inner();

    let post = with_txn(&app_state, |txn| {
        Box::pin(async move { post_service::get_post(txn, post_id).await })
    })
    .await?;

    Ok(web::Json(PostResponse::from(post)))
}

/// PUT /api/posts/{id}
async fn update_post(
    _current_user: CurrentUser,
    path: web::Path<i64>,
    req: web::Json<PostRequest>,
    app_state: web::Data<AppState>,
) -> Result<web::Json<PostResponse>, AppError> {
    let post_id = path.into_inner();
    let body = req.into_inner();

    let post = with_txn(&app_state, |txn| {
        Box::pin(async move {
            post_service::update_post(txn, post_id, &body.title, &body.content, body.published)
                .await
        })
    })
    .await?;

    Ok(web::Json(PostResponse::from(post)))
}

/// DELETE /api/posts/{id}
async fn delete_post(
    _current_user: CurrentUser,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let post_id = path.into_inner();

    with_txn(&app_state, |txn| {
        Box::pin(async move { post_service::delete_post(txn, post_id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/posts")
            .route(web::get().to(list_posts))
            .route(web::post().to(create_post)),
    );
    cfg.service(
        web::resource("/api/posts/{id}")
            .route(web::get().to(get_post))
            .route(web::put().to(update_post))
            .route(web::delete().to(delete_post)),
    );
}
