use sea_orm::ConnectionTrait;
use tracing::info;

use crate::error::AppError;
use crate::repos::posts::{self, Post};

fn post_not_found(post_id: i64) -> AppError {
    AppError::not_found(
        "POST_NOT_FOUND",
        format!("post with id: {post_id} was not found"),
    )
}

pub async fn list_posts(conn: &(impl ConnectionTrait + Send + Sync)) -> Result<Vec<Post>, AppError> {
    posts::list_posts(conn).await
}

pub async fn get_post(conn: &(impl ConnectionTrait + Send + Sync), post_id: i64) -> Result<Post, AppError> {
    posts::find_post_by_id(conn, post_id)
        .await?
        .ok_or_else(|| post_not_found(post_id))
}

pub async fn create_post(
    conn: &(impl ConnectionTrait + Send + Sync),
    title: &str,
    content: &str,
    published: bool,
) -> Result<Post, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::invalid(
            "INVALID_TITLE",
            "Title cannot be empty".to_string(),
        ));
    }

    let post = posts::create_post(conn, title, content, published).await?;
    info!(post_id = post.id, "post created");
    Ok(post)
}

pub async fn update_post(
    conn: &(impl ConnectionTrait + Send + Sync),
    post_id: i64,
    title: &str,
    content: &str,
    published: bool,
) -> Result<Post, AppError> {
    if title.trim().is_empty() {
        return Err(AppError::invalid(
            "INVALID_TITLE",
            "Title cannot be empty".to_string(),
        ));
    }

    posts::update_post(conn, post_id, title, content, published)
        .await?
        .ok_or_else(|| post_not_found(post_id))
}

pub async fn delete_post(conn: &(impl ConnectionTrait + Send + Sync), post_id: i64) -> Result<(), AppError> {
    if !posts::delete_post(conn, post_id).await? {
        return Err(post_not_found(post_id));
    }
    Ok(())
}
