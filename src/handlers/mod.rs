/// HTTP handlers
///
/// Thin request/response shells over the service layer:
/// - Stories: visibility list, grouped list, upload, view marking, cleanup
/// - Posts: feed, creation, like toggle, reposts
/// - Comments: listing and creation
/// - Search: hashtag/substring search and trending tags
pub mod comments;
pub mod health;
pub mod posts;
pub mod search;
pub mod stories;

// Re-export handler functions at module level
pub use comments::{add_comment, list_comments};
pub use health::health;
pub use posts::{create_post, get_feed, repost_post, toggle_like};
pub use search::{search_posts, trending_hashtags};
pub use stories::{cleanup_stories, create_story, list_stories, mark_story_viewed, story_groups};
