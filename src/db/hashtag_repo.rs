use crate::models::{FeedPost, TrendingTag};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a tag into the catalog if absent and return its id.
pub async fn upsert_tag(pool: &PgPool, tag: &str) -> Result<Uuid, sqlx::Error> {
    sqlx::query(r#"INSERT INTO hashtags (tag) VALUES ($1) ON CONFLICT (tag) DO NOTHING"#)
        .bind(tag)
        .execute(pool)
        .await?;

    let id: Uuid = sqlx::query_scalar(r#"SELECT id FROM hashtags WHERE tag = $1"#)
        .bind(tag)
        .fetch_one(pool)
        .await?;

    Ok(id)
}

/// Link a post to a catalog tag; duplicate links are ignored.
pub async fn link_post(
    pool: &PgPool,
    post_id: Uuid,
    hashtag_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO post_hashtags (post_id, hashtag_id)
        VALUES ($1, $2)
        ON CONFLICT (post_id, hashtag_id) DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(hashtag_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Posts carrying an exact tag, shaped like feed rows.
pub async fn search_by_tag(
    pool: &PgPool,
    viewer_id: Uuid,
    tag: &str,
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
        JOIN post_hashtags ph ON p.id = ph.post_id
        JOIN hashtags h ON ph.hashtag_id = h.id
        LEFT JOIN posts op ON p.repost_of = op.id
        LEFT JOIN users ou ON op.user_id = ou.id
        LEFT JOIN likes l ON p.id = l.post_id
        LEFT JOIN comments c ON p.id = c.post_id
        LEFT JOIN posts r ON r.repost_of = p.id
        LEFT JOIN likes ul ON p.id = ul.post_id AND ul.user_id = $1
        WHERE h.tag = $2
        GROUP BY p.id, u.id, ul.user_id, op.id, ou.id
        ORDER BY p.created_at DESC
        LIMIT $3
        "#,
    )
    .bind(viewer_id)
    .bind(tag)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Posts whose content contains the term, case-insensitive, shaped like
/// feed rows.
pub async fn search_content(
    pool: &PgPool,
    viewer_id: Uuid,
    term: &str,
    limit: i64,
) -> Result<Vec<FeedPost>, sqlx::Error> {
    let pattern = format!("%{}%", term);

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
        WHERE p.content ILIKE $2
        GROUP BY p.id, u.id, ul.user_id, op.id, ou.id
        ORDER BY p.created_at DESC
        LIMIT $3
        "#,
    )
    .bind(viewer_id)
    .bind(pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(posts)
}

/// Tags ranked by post count within the trailing window; count descending,
/// tag ascending as the tie-break.
pub async fn trending(
    pool: &PgPool,
    window_days: i32,
    limit: i64,
) -> Result<Vec<TrendingTag>, sqlx::Error> {
    let tags = sqlx::query_as::<_, TrendingTag>(
        r#"
        SELECT h.tag, COUNT(ph.post_id) AS post_count
        FROM hashtags h
        JOIN post_hashtags ph ON h.id = ph.hashtag_id
        JOIN posts p ON ph.post_id = p.id
        WHERE p.created_at > NOW() - make_interval(days => $1)
        GROUP BY h.id, h.tag
        ORDER BY post_count DESC, h.tag ASC
        LIMIT $2
        "#,
    )
    .bind(window_days)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
