use crate::models::{Story, StoryFeedItem};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new story stamped with the current time.
pub async fn create_story(
    pool: &PgPool,
    user_id: Uuid,
    image_base64: &str,
    caption: Option<&str>,
) -> Result<Story, sqlx::Error> {
    let story = sqlx::query_as::<_, Story>(
        r#"
        INSERT INTO stories (user_id, image_base64, caption)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, image_base64, caption, created_at
        "#,
    )
    .bind(user_id)
    .bind(image_base64)
    .bind(caption)
    .fetch_one(pool)
    .await?;

    Ok(story)
}

/// All stories inside the 24-hour visibility window, newest-first, each
/// annotated with whether the viewer has a matching view record.
pub async fn list_active(
    pool: &PgPool,
    viewer_id: Uuid,
) -> Result<Vec<StoryFeedItem>, sqlx::Error> {
    let stories = sqlx::query_as::<_, StoryFeedItem>(
        r#"
        SELECT
            s.id, s.user_id, u.username, s.image_base64, s.caption, s.created_at,
            CASE WHEN sv.user_id IS NOT NULL THEN true ELSE false END AS viewed
        FROM stories s
        JOIN users u ON s.user_id = u.id
        LEFT JOIN story_views sv ON s.id = sv.story_id AND sv.user_id = $1
        WHERE s.created_at > NOW() - INTERVAL '24 hours'
        ORDER BY s.created_at DESC
        "#,
    )
    .bind(viewer_id)
    .fetch_all(pool)
    .await?;

    Ok(stories)
}

/// Record that a viewer has seen a story. The unique index makes repeated
/// calls no-ops; returns whether a new row was written.
pub async fn mark_viewed(
    pool: &PgPool,
    user_id: Uuid,
    story_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO story_views (user_id, story_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, story_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(story_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Remove stories past the visibility window. Cascades delete their view
/// records. Returns affected rows.
pub async fn delete_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
    let result =
        sqlx::query(r#"DELETE FROM stories WHERE created_at < NOW() - INTERVAL '24 hours'"#)
            .execute(pool)
            .await?;

    Ok(result.rows_affected())
}
