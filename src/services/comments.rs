use crate::db::comment_repo;
use crate::error::{AppError, Result};
use crate::models::{Comment, CommentView};
use sqlx::PgPool;
use uuid::Uuid;

/// Maximum comment length after trimming.
pub const MAX_COMMENT_CHARS: usize = 500;

pub struct CommentService {
    pool: PgPool,
}

impl CommentService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Comments on a post with author names, oldest-first. An unknown post
    /// yields an empty list.
    pub async fn list(&self, post_id: Uuid) -> Result<Vec<CommentView>> {
        let comments = comment_repo::list_by_post(&self.pool, post_id).await?;
        Ok(comments)
    }

    /// Add a comment to a post. Comments are immutable once written.
    pub async fn add(&self, user_id: Uuid, post_id: Uuid, content: &str) -> Result<Comment> {
        let content = normalize_comment(content)?;

        match comment_repo::create_comment(&self.pool, user_id, post_id, &content).await {
            Ok(comment) => Ok(comment),
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

/// Trim and bound comment content.
pub fn normalize_comment(content: &str) -> Result<String> {
    let trimmed = content.trim();

    if trimmed.is_empty() {
        return Err(AppError::Validation("Comment content is required".into()));
    }

    if trimmed.chars().count() > MAX_COMMENT_CHARS {
        return Err(AppError::Validation(format!(
            "Comment must be {} characters or less",
            MAX_COMMENT_CHARS
        )));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_at_cap_is_accepted() {
        let content = "y".repeat(MAX_COMMENT_CHARS);
        assert!(normalize_comment(&content).is_ok());
    }

    #[test]
    fn comment_over_cap_is_rejected() {
        let content = "y".repeat(MAX_COMMENT_CHARS + 1);
        assert!(matches!(
            normalize_comment(&content),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn blank_comment_is_rejected() {
        assert!(matches!(
            normalize_comment("  \n "),
            Err(AppError::Validation(_))
        ));
    }
}
