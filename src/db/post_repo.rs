use crate::models::{FeedPost, Post};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new post. Hashtag linking happens separately after the insert.
pub async fn create_post(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    image_base64: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, content, image_base64)
        VALUES ($1, $2, $3)
        RETURNING id, user_id, content, image_base64, repost_of, repost_comment, created_at
        "#,
    )
    .bind(user_id)
    .bind(content)
    .bind(image_base64)
    .fetch_one(pool)
    .await?;

    Ok(post)
}

/// Find a post by ID
pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        SELECT id, user_id, content, image_base64, repost_of, repost_comment, created_at
        FROM posts
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await?;

    Ok(post)
}

/// The ranked feed: newest-first posts with engagement counts, the viewer's
/// like state, and reposted originals resolved one level deep.
pub async fn list_feed(
    pool: &PgPool,
    viewer_id: Uuid,
    limit: i64,
) -> Result<Vec<FeedPost>, sqlx::Error> {
    let posts = sqlx::query_as::<_, FeedPost>(
        r#"
        SELECT
            p.id, p.user_id, u.username, p.content, p.image_base64,
            p.repost_of, p.repost_comment, p.created_at,
            COUNT(DISTINCT l.id) AS like_count,
            COUNT(DISTINCT c.id) AS comment_count,
            COUNT(DISTINCT r.id) AS repost_count,
            CASE WHEN ul.user_id IS NOT NULL THEN true ELSE false END AS user_liked,
            op.id AS original_id, op.user_id AS original_user_id, ou.username AS original_username,
            op.content AS original_content, op.image_base64 AS original_image,
            op.created_at AS original_created_at
        FROM posts p
        JOIN users u ON p.user_id = u.id
        LEFT JOIN posts op ON p.repost_of = op.id
        LEFT JOIN users ou ON op.user_id = ou.id
        LEFT JOIN likes l ON p.id = l.post_id
        LEFT JOIN comments c ON p.id = c.post_id
        LEFT JOIN posts r ON r.repost_of = p.id
        LEFT JOIN likes ul ON p.id = ul.post_id AND ul.user_id = $1
        GROUP BY p.id, u.id, ul.user_id, op.id, ou.id
        ORDER BY p.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(viewer_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Whether the user already reposted this post. Read-side optimization; the
/// partial unique index is what actually rejects duplicates.
pub async fn repost_exists(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let exists: bool = sqlx::query_scalar(
        r#"SELECT EXISTS(SELECT 1 FROM posts WHERE user_id = $1 AND repost_of = $2)"#,
    )
    .bind(user_id)
    .bind(post_id)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}

/// Create a repost wrapper around an existing post. Surfaces the unique
/// violation to the caller when the user already reposted it.
pub async fn create_repost(
    pool: &PgPool,
    user_id: Uuid,
    post_id: Uuid,
    comment: Option<&str>,
) -> Result<Post, sqlx::Error> {
    let post = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (user_id, content, repost_of, repost_comment)
        VALUES ($1, '', $2, $3)
        RETURNING id, user_id, content, image_base64, repost_of, repost_comment, created_at
        "#,
    )
    .bind(user_id)
    .bind(post_id)
    .bind(comment)
    .fetch_one(pool)
    .await?;

    Ok(post)
}
