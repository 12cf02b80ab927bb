use crate::db::{like_repo, post_repo};
use crate::error::{AppError, Result};
use crate::models::{FeedPost, Post};
use crate::services::hashtags::{extract_hashtags, HashtagService};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum post length after trimming.
pub const MAX_POST_CHARS: usize = 280;

/// Feed page cap.
pub const FEED_LIMIT: i64 = 50;

pub struct PostService {
    pool: PgPool,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The ranked feed for a viewer, capped at [`FEED_LIMIT`].
    pub async fn list_feed(&self, viewer_id: Uuid, limit: i64) -> Result<Vec<FeedPost>> {
        let posts =
            post_repo::list_feed(&self.pool, viewer_id, limit.clamp(1, FEED_LIMIT)).await?;
        Ok(posts)
    }

    /// Create a post from trimmed content and/or an image, then extract and
    /// link its hashtags.
    pub async fn create_post(
        &self,
        user_id: Uuid,
        content: Option<&str>,
        image_base64: Option<&str>,
    ) -> Result<Post> {
        let image = image_base64.filter(|img| !img.trim().is_empty());
        let content = normalize_post_content(content, image.is_some())?;

        let post = post_repo::create_post(&self.pool, user_id, &content, image).await?;

        let tags = extract_hashtags(&content);
        HashtagService::new(self.pool.clone())
            .link_hashtags(post.id, &tags)
            .await?;

        Ok(post)
    }

    /// Toggle the viewer's like on a post; returns the resulting state.
    /// The existence read is an optimization; the unique index is what keeps
    /// concurrent toggles consistent.
    pub async fn toggle_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool> {
        if like_repo::like_exists(&self.pool, user_id, post_id).await? {
            like_repo::delete_like(&self.pool, user_id, post_id).await?;
            Ok(false)
        } else {
            match like_repo::create_like(&self.pool, user_id, post_id).await {
                Ok(_) => Ok(true),
                Err(err)
                    if err
                        .as_database_error()
                        .is_some_and(|db_err| db_err.is_foreign_key_violation()) =>
                {
                    Err(AppError::NotFound("Post not found".into()))
                }
                Err(err) => Err(err.into()),
            }
        }
    }

    /// Repost an existing post, optionally with a comment. At most one
    /// repost per user per original; the partial unique index rejects the
    /// duplicate even when two requests race past the existence read.
    pub async fn repost(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        comment: Option<&str>,
    ) -> Result<Post> {
        if post_repo::find_post_by_id(&self.pool, post_id).await?.is_none() {
            return Err(AppError::NotFound("Post not found".into()));
        }

        if post_repo::repost_exists(&self.pool, user_id, post_id).await? {
            return Err(AppError::Conflict("You have already reposted this".into()));
        }

        match post_repo::create_repost(&self.pool, user_id, post_id, comment).await {
            Ok(post) => Ok(post),
            Err(err) => {
                let db_err = err.as_database_error();
                if db_err.is_some_and(|e| e.is_unique_violation()) {
                    Err(AppError::Conflict("You have already reposted this".into()))
                } else if db_err.is_some_and(|e| e.is_foreign_key_violation()) {
                    // Original vanished between the check and the insert.
                    Err(AppError::NotFound("Post not found".into()))
                } else {
                    Err(err.into())
                }
            }
        }
    }
}

/// Trim the content and enforce the content-or-image rule and the length
/// cap. Returns the trimmed content (possibly empty when an image carries
/// the post).
pub fn normalize_post_content(content: Option<&str>, has_image: bool) -> Result<String> {
    let trimmed = content.unwrap_or("").trim();

    if trimmed.is_empty() && !has_image {
        return Err(AppError::Validation("Post must have content or image".into()));
    }

    if trimmed.chars().count() > MAX_POST_CHARS {
        return Err(AppError::Validation(format!(
            "Post content must be {} characters or less",
            MAX_POST_CHARS
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_at_cap_is_accepted() {
        let content = "x".repeat(MAX_POST_CHARS);
        assert_eq!(
            normalize_post_content(Some(&content), false).unwrap(),
            content
        );
    }

    #[test]
    fn content_over_cap_is_rejected() {
        let content = "x".repeat(MAX_POST_CHARS + 1);
        assert!(matches!(
            normalize_post_content(Some(&content), false),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn empty_post_without_image_is_rejected() {
        assert!(matches!(
            normalize_post_content(Some("   "), false),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            normalize_post_content(None, false),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn image_only_post_is_accepted() {
        assert_eq!(normalize_post_content(None, true).unwrap(), "");
    }

    #[test]
    fn content_is_trimmed() {
        assert_eq!(
            normalize_post_content(Some("  hello  "), false).unwrap(),
            "hello"
        );
    }

    #[test]
    fn cap_applies_after_trimming() {
        let content = format!("  {}  ", "x".repeat(MAX_POST_CHARS));
        assert!(normalize_post_content(Some(&content), false).is_ok());
    }
}
