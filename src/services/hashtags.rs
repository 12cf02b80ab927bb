use crate::db::hashtag_repo;
use crate::error::{AppError, Result};
use crate::models::{FeedPost, TrendingTag};
use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::PgPool;
use uuid::Uuid;

/// Search result cap, matching the feed page size.
pub const SEARCH_LIMIT: i64 = 50;

/// Trailing window for the trending ranking.
pub const TRENDING_WINDOW_DAYS: i32 = 7;

/// Number of trending tags returned.
pub const TRENDING_LIMIT: i64 = 10;

static HASHTAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([A-Za-z0-9_]+)").unwrap());

/// Extract hashtag tokens from post content: `#` followed by alphanumerics
/// or underscores, lowercased, deduplicated, first-seen order preserved.
pub fn extract_hashtags(content: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();

    for capture in HASHTAG_RE.captures_iter(content) {
        let tag = capture[1].to_lowercase();
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }

    tags
}

pub struct HashtagService {
    pool: PgPool,
}

impl HashtagService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Catalog each tag lazily and link it to the post. Both steps ignore
    /// duplicates.
    pub async fn link_hashtags(&self, post_id: Uuid, tags: &[String]) -> Result<()> {
        for tag in tags {
            let hashtag_id = hashtag_repo::upsert_tag(&self.pool, tag).await?;
            hashtag_repo::link_post(&self.pool, post_id, hashtag_id).await?;
        }

        Ok(())
    }

    /// Search posts. A leading `#` selects exact-tag matching; anything else
    /// is a case-insensitive substring match on content. Results are shaped
    /// like feed rows, newest-first, capped at [`SEARCH_LIMIT`].
    pub async fn search(&self, viewer_id: Uuid, query: &str) -> Result<Vec<FeedPost>> {
        let term = query.trim();

        if term.is_empty() {
            return Err(AppError::Validation("Search query is required".into()));
        }

        let posts = match term.strip_prefix('#') {
            Some(tag) => {
                hashtag_repo::search_by_tag(&self.pool, viewer_id, &tag.to_lowercase(), SEARCH_LIMIT)
                    .await?
            }
            None => hashtag_repo::search_content(&self.pool, viewer_id, term, SEARCH_LIMIT).await?,
        };

        Ok(posts)
    }

    /// Tags ranked by post count over the trailing window, count descending
    /// with tag as the tie-break, capped at [`TRENDING_LIMIT`].
    pub async fn trending(&self, window_days: i32) -> Result<Vec<TrendingTag>> {
        let tags = hashtag_repo::trending(&self.pool, window_days, TRENDING_LIMIT).await?;
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_case_folds_and_dedups_in_order() {
        assert_eq!(
            extract_hashtags("Hello #World #world #Test"),
            vec!["world".to_string(), "test".to_string()]
        );
    }

    #[test]
    fn extraction_accepts_digits_and_underscores() {
        assert_eq!(
            extract_hashtags("#rust_lang v#2024 and #42"),
            vec!["rust_lang".to_string(), "2024".to_string(), "42".to_string()]
        );
    }

    #[test]
    fn extraction_ignores_bare_hash_and_punctuation() {
        assert_eq!(extract_hashtags("# no tag, #! none"), Vec::<String>::new());
    }

    #[test]
    fn extraction_stops_at_non_word_chars() {
        assert_eq!(
            extract_hashtags("#foo-bar #baz!"),
            vec!["foo".to_string(), "baz".to_string()]
        );
    }

    #[test]
    fn extraction_on_empty_content() {
        assert!(extract_hashtags("").is_empty());
    }
}
