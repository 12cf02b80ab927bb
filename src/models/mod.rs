/// Data models for pulse-service
///
/// Row types map directly onto query columns; view types add the joined
/// author name and read-side aggregates the API returns.
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A story row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Story {
    pub id: Uuid,
    pub user_id: Uuid,
    pub image_base64: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A visible story annotated for one viewer.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoryFeedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub image_base64: String,
    pub caption: Option<String>,
    pub created_at: DateTime<Utc>,
    pub viewed: bool,
}

/// Stories of one owner, newest-first. Read-side aggregation only.
#[derive(Debug, Clone, Serialize)]
pub struct StoryGroup {
    pub user_id: Uuid,
    pub username: String,
    pub has_unseen: bool,
    pub stories: Vec<StoryFeedItem>,
}

/// A post row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub image_base64: Option<String>,
    pub repost_of: Option<Uuid>,
    pub repost_comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A feed row: post plus engagement counts, the viewer's like state, and —
/// for reposts — the original post resolved one level deep.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub image_base64: Option<String>,
    pub repost_of: Option<Uuid>,
    pub repost_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub like_count: i64,
    pub comment_count: i64,
    pub repost_count: i64,
    pub user_liked: bool,
    pub original_id: Option<Uuid>,
    pub original_user_id: Option<Uuid>,
    pub original_username: Option<String>,
    pub original_content: Option<String>,
    pub original_image: Option<String>,
    pub original_created_at: Option<DateTime<Utc>>,
}

/// A comment row as stored.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A comment with its author's name, as returned by the API.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A catalog entry in the hashtag table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Hashtag {
    pub id: Uuid,
    pub tag: String,
    pub created_at: DateTime<Utc>,
}

/// One row of the trending ranking.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrendingTag {
    pub tag: String,
    pub post_count: i64,
}
