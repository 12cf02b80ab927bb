/// Search handlers - hashtag/substring search and the trending ranking
use crate::auth::CurrentUser;
use crate::error::Result;
use crate::services::hashtags::TRENDING_WINDOW_DAYS;
use crate::services::HashtagService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search posts by hashtag (leading `#`) or content substring
pub async fn search_posts(
    pool: web::Data<PgPool>,
    user: CurrentUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let service = HashtagService::new((**pool).clone());
    let posts = service
        .search(user.id, query.q.as_deref().unwrap_or(""))
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Top hashtags over the trailing week
pub async fn trending_hashtags(
    pool: web::Data<PgPool>,
    _user: CurrentUser,
) -> Result<HttpResponse> {
    let service = HashtagService::new((**pool).clone());
    let tags = service.trending(TRENDING_WINDOW_DAYS).await?;

    Ok(HttpResponse::Ok().json(tags))
}
