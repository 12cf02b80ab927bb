/// Database access layer
///
/// One repository module per aggregate; plain functions over `PgPool`
/// returning `sqlx::Error` for the service layer to interpret.
pub mod comment_repo;
pub mod hashtag_repo;
pub mod like_repo;
pub mod post_repo;
pub mod story_repo;
