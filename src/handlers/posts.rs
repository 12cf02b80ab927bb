/// Post handlers - HTTP endpoints for the feed, post creation, likes, and
/// reposts
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::services::posts::FEED_LIMIT;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub content: Option<String>,
    pub image_base64: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RepostRequest {
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub image_base64: Option<String>,
    pub repost_of: Option<Uuid>,
    pub repost_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PostResponse {
    fn from_post(post: crate::models::Post, username: String) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            username,
            content: post.content,
            image_base64: post.image_base64,
            repost_of: post.repost_of,
            repost_comment: post.repost_comment,
            created_at: post.created_at,
        }
    }
}

/// Get the ranked feed for the caller
pub async fn get_feed(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    query: web::Query<FeedQuery>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service
        .list_feed(user.id, query.limit.unwrap_or(FEED_LIMIT))
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
pub async fn create_post(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .create_post(user.id, req.content.as_deref(), req.image_base64.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(PostResponse::from_post(post, user.username)))
}

/// Toggle the caller's like on a post
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let liked = service.toggle_like(user.id, *post_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "liked": liked })))
}

/// Repost a post, optionally with a comment
pub async fn repost_post(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: CurrentUser,
    req: web::Json<RepostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service
        .repost(user.id, *post_id, req.comment.as_deref())
        .await?;

    Ok(HttpResponse::Created().json(PostResponse::from_post(post, user.username)))
}
