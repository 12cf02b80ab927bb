use crate::db::story_repo;
use crate::error::{AppError, Result};
use crate::models::{Story, StoryFeedItem, StoryGroup};
use sqlx::PgPool;
use uuid::Uuid;

pub struct StoriesService {
    pool: PgPool,
}

impl StoriesService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upload a new story. The image is mandatory; the caption is free text.
    pub async fn upload(
        &self,
        owner_id: Uuid,
        image_base64: &str,
        caption: Option<&str>,
    ) -> Result<Story> {
        if image_base64.trim().is_empty() {
            return Err(AppError::Validation("Image required".into()));
        }

        let story = story_repo::create_story(&self.pool, owner_id, image_base64, caption).await?;
        Ok(story)
    }

    /// Stories inside the 24-hour window, newest-first, with the viewer's
    /// seen state.
    pub async fn list_visible(&self, viewer_id: Uuid) -> Result<Vec<StoryFeedItem>> {
        let stories = story_repo::list_active(&self.pool, viewer_id).await?;
        Ok(stories)
    }

    /// Visible stories grouped per owner for the stories bar.
    pub async fn list_grouped(&self, viewer_id: Uuid) -> Result<Vec<StoryGroup>> {
        let stories = story_repo::list_active(&self.pool, viewer_id).await?;
        Ok(group_by_owner(stories))
    }

    /// Record that the viewer has seen a story. Idempotent: repeated calls,
    /// calls on expired stories, and calls racing the cleanup sweep all
    /// succeed without effect.
    pub async fn mark_viewed(&self, viewer_id: Uuid, story_id: Uuid) -> Result<()> {
        match story_repo::mark_viewed(&self.pool, viewer_id, story_id).await {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_database_error()
                    .is_some_and(|db_err| db_err.is_foreign_key_violation()) =>
            {
                // Story already swept; nothing left to record.
                tracing::debug!(%story_id, "view marked after story removal, ignoring");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Delete stories past the visibility window. Returns the number of
    /// stories removed. A set-based delete, safe under concurrent sweeps.
    pub async fn cleanup_expired(&self) -> Result<u64> {
        let deleted = story_repo::delete_expired(&self.pool).await?;
        Ok(deleted)
    }
}

/// Group a newest-first story list by owner, preserving the order in which
/// owners first appear. A group has unseen content when any of its stories
/// lacks a view by the current viewer.
pub fn group_by_owner(stories: Vec<StoryFeedItem>) -> Vec<StoryGroup> {
    let mut groups: Vec<StoryGroup> = Vec::new();

    for story in stories {
        match groups.iter_mut().find(|g| g.user_id == story.user_id) {
            Some(group) => {
                group.has_unseen = group.has_unseen || !story.viewed;
                group.stories.push(story);
            }
            None => groups.push(StoryGroup {
                user_id: story.user_id,
                username: story.username.clone(),
                has_unseen: !story.viewed,
                stories: vec![story],
            }),
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(user_id: Uuid, username: &str, viewed: bool) -> StoryFeedItem {
        StoryFeedItem {
            id: Uuid::new_v4(),
            user_id,
            username: username.to_string(),
            image_base64: "data:image/png;base64,AAAA".to_string(),
            caption: None,
            created_at: Utc::now(),
            viewed,
        }
    }

    #[test]
    fn grouping_preserves_first_seen_owner_order() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let groups = group_by_owner(vec![
            item(alice, "alice", true),
            item(bob, "bob", true),
            item(alice, "alice", true),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].user_id, alice);
        assert_eq!(groups[0].stories.len(), 2);
        assert_eq!(groups[1].user_id, bob);
    }

    #[test]
    fn group_has_unseen_when_any_story_unviewed() {
        let alice = Uuid::new_v4();

        let groups = group_by_owner(vec![
            item(alice, "alice", true),
            item(alice, "alice", false),
        ]);

        assert_eq!(groups.len(), 1);
        assert!(groups[0].has_unseen);
    }

    #[test]
    fn group_fully_viewed_has_no_unseen() {
        let alice = Uuid::new_v4();

        let groups = group_by_owner(vec![
            item(alice, "alice", true),
            item(alice, "alice", true),
        ]);

        assert!(!groups[0].has_unseen);
    }

    #[test]
    fn grouping_empty_input() {
        assert!(group_by_owner(Vec::new()).is_empty());
    }
}
