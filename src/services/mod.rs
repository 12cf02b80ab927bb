/// Business logic layer
pub mod comments;
pub mod hashtags;
pub mod posts;
pub mod stories;

pub use comments::CommentService;
pub use hashtags::{extract_hashtags, HashtagService};
pub use posts::PostService;
pub use stories::StoriesService;
