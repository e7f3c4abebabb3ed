//! Post repository functions, generic over ConnectionTrait.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, QueryOrder, Set};

use crate::entities::posts;
use crate::error::AppError;

/// Post domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub published: bool,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl From<posts::Model> for Post {
    fn from(model: posts::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            published: model.published,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn list_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Post>, AppError> {
    let posts = posts::Entity::find()
        .order_by_asc(posts::Column::Id)
        .all(conn)
        .await?;
    Ok(posts.into_iter().map(Post::from).collect())
}

pub async fn find_post_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<Post>, AppError> {
    let post = posts::Entity::find_by_id(post_id).one(conn).await?;
    Ok(post.map(Post::from))
}

pub async fn create_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    title: &str,
    content: &str,
    published: bool,
) -> Result<Post, AppError> {
    let now = time::OffsetDateTime::now_utc();

    let post_active = posts::ActiveModel {
        id: NotSet,
        title: Set(title.to_string()),
        content: Set(content.to_string()),
        published: Set(published),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let post = post_active.insert(conn).await?;
    Ok(Post::from(post))
}

/// Full update; returns None when the post does not exist.
pub async fn update_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
    title: &str,
    content: &str,
    published: bool,
) -> Result<Option<Post>, AppError> {
    let Some(existing) = posts::Entity::find_by_id(post_id).one(conn).await? else {
        return Ok(None);
    };

    let mut post_active: posts::ActiveModel = existing.into();
    post_active.title = Set(title.to_string());
    post_active.content = Set(content.to_string());
    post_active.published = Set(published);
    post_active.updated_at = Set(time::OffsetDateTime::now_utc());

    let post = post_active.update(conn).await?;
    Ok(Some(Post::from(post)))
}

/// Returns false when the post does not exist.
pub async fn delete_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<bool, AppError> {
    let result = posts::Entity::delete_by_id(post_id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
