/// Story handlers - HTTP endpoints for the ephemeral story lifecycle
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::services::StoriesService;
use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    pub image_base64: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StoryResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub image_base64: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// List visible stories with the caller's seen state
pub async fn list_stories(pool: web::Data<PgPool>, user: CurrentUser) -> Result<HttpResponse> {
    let service = StoriesService::new((**pool).clone());
    let stories = service.list_visible(user.id).await?;

    Ok(HttpResponse::Ok().json(stories))
}

/// List visible stories grouped per owner
pub async fn story_groups(pool: web::Data<PgPool>, user: CurrentUser) -> Result<HttpResponse> {
    let service = StoriesService::new((**pool).clone());
    let groups = service.list_grouped(user.id).await?;

    Ok(HttpResponse::Ok().json(groups))
}

/// Upload a new story
pub async fn create_story(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    req: web::Json<CreateStoryRequest>,
) -> Result<HttpResponse> {
    let service = StoriesService::new((**pool).clone());
    let story = service
        .upload(
            user.id,
            req.image_base64.as_deref().unwrap_or(""),
            req.caption.as_deref(),
        )
        .await?;

    Ok(HttpResponse::Created().json(StoryResponse {
        id: story.id,
        user_id: story.user_id,
        username: user.username,
        image_base64: story.image_base64,
        caption: story.caption,
        created_at: story.created_at,
    }))
}

/// Mark a story as viewed by the caller (idempotent)
pub async fn mark_story_viewed(
    pool: web::Data<PgPool>,
    story_id: web::Path<Uuid>,
    user: CurrentUser,
) -> Result<HttpResponse> {
    let service = StoriesService::new((**pool).clone());
    service.mark_viewed(user.id, *story_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "success": true })))
}

/// Delete stories past the 24-hour window
pub async fn cleanup_stories(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let service = StoriesService::new((**pool).clone());
    let deleted = service.cleanup_expired().await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "deleted": deleted })))
}
