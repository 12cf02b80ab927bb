//! Story Cleaner Background Job
//!
//! Stories are only ever queried inside their 24-hour window, so expired
//! rows are invisible the moment they age out; this job reclaims them
//! physically. The delete is set-based and the `DELETE /stories/cleanup`
//! endpoint runs the same statement, so overlapping sweeps are harmless.

use crate::services::StoriesService;
use sqlx::PgPool;
use std::time::Duration;
use tokio::time::sleep;

pub async fn start_story_cleaner(db: PgPool, interval: Duration) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Starting story cleaner background job"
    );

    let service = StoriesService::new(db);

    loop {
        sleep(interval).await;

        match service.cleanup_expired().await {
            Ok(0) => tracing::debug!("No expired stories to remove"),
            Ok(deleted) => tracing::info!(deleted, "Removed expired stories"),
            Err(e) => tracing::error!(error = %e, "Story cleanup failed"),
        }
    }
}
