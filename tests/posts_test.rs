//! Integration Tests: Feed, Likes, Reposts, Comments, Search, Trending
//!
//! Exercises the feed aggregation and hashtag components against a real
//! database.
//!
//! Coverage:
//! - Like toggling is an involution backed by the unique index
//! - Double reposts are rejected; missing originals are 404s
//! - Feed rows carry counts, the viewer's like state, and the resolved
//!   original for reposts (one level)
//! - Post creation catalogs and links hashtags
//! - Hashtag search vs substring search
//! - Trending ranking with tie-break and window cutoff

mod common;

use common::{create_post_aged, create_test_user, setup_test_db};
use pulse_service::services::{CommentService, HashtagService, PostService};
use pulse_service::AppError;
use uuid::Uuid;

#[tokio::test]
#[ignore] // Run manually: cargo test --test posts_test -- --ignored
async fn test_toggle_like_is_involution() {
    let pool = setup_test_db().await.unwrap();
    let author = create_test_user(&pool, "author").await;
    let viewer = create_test_user(&pool, "viewer").await;

    let service = PostService::new(pool.clone());
    let post = service
        .create_post(author, Some("hello"), None)
        .await
        .unwrap();

    assert!(service.toggle_like(viewer, post.id).await.unwrap());
    assert!(!service.toggle_like(viewer, post.id).await.unwrap());

    let like_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(like_count, 0, "Two toggles return to the original state");
}

#[tokio::test]
#[ignore]
async fn test_like_on_missing_post_is_not_found() {
    let pool = setup_test_db().await.unwrap();
    let viewer = create_test_user(&pool, "viewer").await;

    let service = PostService::new(pool.clone());
    let result = service.toggle_like(viewer, Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_double_repost_conflicts() {
    let pool = setup_test_db().await.unwrap();
    let author = create_test_user(&pool, "author").await;
    let reposter = create_test_user(&pool, "reposter").await;

    let service = PostService::new(pool.clone());
    let post = service
        .create_post(author, Some("original"), None)
        .await
        .unwrap();

    let repost = service
        .repost(reposter, post.id, Some("nice"))
        .await
        .unwrap();
    assert_eq!(repost.repost_of, Some(post.id));
    assert_eq!(repost.repost_comment.as_deref(), Some("nice"));

    let second = service.repost(reposter, post.id, None).await;
    assert!(matches!(second, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_repost_of_missing_post_is_not_found() {
    let pool = setup_test_db().await.unwrap();
    let reposter = create_test_user(&pool, "reposter").await;

    let service = PostService::new(pool.clone());
    let result = service.repost(reposter, Uuid::new_v4(), None).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_feed_counts_and_repost_resolution() {
    let pool = setup_test_db().await.unwrap();
    let author = create_test_user(&pool, "author").await;
    let fan = create_test_user(&pool, "fan").await;

    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool.clone());

    let original = posts
        .create_post(author, Some("original post"), None)
        .await
        .unwrap();

    posts.toggle_like(fan, original.id).await.unwrap();
    comments.add(fan, original.id, "great").await.unwrap();
    posts.repost(fan, original.id, Some("look")).await.unwrap();

    let feed = posts.list_feed(fan, 50).await.unwrap();
    assert_eq!(feed.len(), 2, "Original plus the repost wrapper");

    let wrapper = feed
        .iter()
        .find(|p| p.repost_of == Some(original.id))
        .unwrap();
    assert_eq!(wrapper.original_id, Some(original.id));
    assert_eq!(wrapper.original_username.as_deref(), Some("author"));
    assert_eq!(wrapper.original_content.as_deref(), Some("original post"));

    let row = feed.iter().find(|p| p.id == original.id).unwrap();
    assert_eq!(row.like_count, 1);
    assert_eq!(row.comment_count, 1);
    assert_eq!(row.repost_count, 1);
    assert!(row.user_liked);
    assert_eq!(row.username, "author");
}

#[tokio::test]
#[ignore]
async fn test_create_post_links_hashtags() {
    let pool = setup_test_db().await.unwrap();
    let author = create_test_user(&pool, "author").await;

    let service = PostService::new(pool.clone());
    let post = service
        .create_post(author, Some("Hello #World #world #Test"), None)
        .await
        .unwrap();

    let tags: Vec<String> =
        sqlx::query_scalar("SELECT tag FROM hashtags ORDER BY tag")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(tags, vec!["test".to_string(), "world".to_string()]);

    let link_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM post_hashtags WHERE post_id = $1")
            .bind(post.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(link_count, 2);
}

#[tokio::test]
#[ignore]
async fn test_hashtag_search_vs_substring_search() {
    let pool = setup_test_db().await.unwrap();
    let author = create_test_user(&pool, "author").await;
    let viewer = create_test_user(&pool, "viewer").await;

    let posts = PostService::new(pool.clone());
    let tagged = posts
        .create_post(author, Some("tagged #World"), None)
        .await
        .unwrap();
    let plain = posts
        .create_post(author, Some("a WORLDLY remark"), None)
        .await
        .unwrap();

    let search = HashtagService::new(pool.clone());

    let by_tag = search.search(viewer, "#world").await.unwrap();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].id, tagged.id);

    let by_content = search.search(viewer, "world").await.unwrap();
    let ids: Vec<Uuid> = by_content.iter().map(|p| p.id).collect();
    assert!(ids.contains(&tagged.id));
    assert!(ids.contains(&plain.id));

    let empty = search.search(viewer, "   ").await;
    assert!(matches!(empty, Err(AppError::Validation(_))));
}

#[tokio::test]
#[ignore]
async fn test_trending_orders_by_count_then_tag() {
    let pool = setup_test_db().await.unwrap();
    let author = create_test_user(&pool, "author").await;

    let posts = PostService::new(pool.clone());
    posts.create_post(author, Some("#b one"), None).await.unwrap();
    posts.create_post(author, Some("#b two"), None).await.unwrap();
    posts.create_post(author, Some("#a one"), None).await.unwrap();
    posts.create_post(author, Some("#a two"), None).await.unwrap();
    posts.create_post(author, Some("#c one"), None).await.unwrap();

    // Outside the 7-day window: must not appear at all.
    let stale = create_post_aged(&pool, author, "#d stale", 8).await;
    let search = HashtagService::new(pool.clone());
    let stale_tags = pulse_service::services::extract_hashtags("#d stale");
    search.link_hashtags(stale, &stale_tags).await.unwrap();

    let trending = search.trending(7).await.unwrap();
    let tags: Vec<&str> = trending.iter().map(|t| t.tag.as_str()).collect();

    assert_eq!(tags, vec!["a", "b", "c"]);
    assert_eq!(trending[0].post_count, 2);
    assert_eq!(trending[1].post_count, 2);
    assert_eq!(trending[2].post_count, 1);
}

#[tokio::test]
#[ignore]
async fn test_comments_persist_and_list_oldest_first() {
    let pool = setup_test_db().await.unwrap();
    let author = create_test_user(&pool, "author").await;
    let fan = create_test_user(&pool, "fan").await;

    let posts = PostService::new(pool.clone());
    let post = posts.create_post(author, Some("hello"), None).await.unwrap();

    let comments = CommentService::new(pool.clone());
    comments.add(fan, post.id, "first").await.unwrap();
    comments.add(author, post.id, "second").await.unwrap();

    let listed = comments.list(post.id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].content, "first");
    assert_eq!(listed[0].username, "fan");
    assert_eq!(listed[1].content, "second");

    let missing = comments.add(fan, Uuid::new_v4(), "nope").await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}
