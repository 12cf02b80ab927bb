/// Comment handlers - HTTP endpoints for comment listing and creation
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// List a post's comments, oldest-first
pub async fn list_comments(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    _user: CurrentUser,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comments = service.list(*post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Add a comment to a post
pub async fn add_comment(
    pool: web::Data<PgPool>,
    post_id: web::Path<Uuid>,
    user: CurrentUser,
    req: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.add(user.id, *post_id, &req.content).await?;

    Ok(HttpResponse::Created().json(CommentResponse {
        id: comment.id,
        user_id: comment.user_id,
        username: user.username,
        post_id: comment.post_id,
        content: comment.content,
        created_at: comment.created_at,
    }))
}
