//! Swipe callbacks: one-way notifications to the workflows behind each direction.
//!
//! right → submit application, left → record skip, up → save job, down → open details.
//! The deck never awaits these: `dispatch` spawns the call and only logs failures,
//! so a slow or failing collaborator cannot hold up the cursor.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{ScoredJob, SwipeDirection};

#[async_trait]
pub trait SwipeCallbacks: Send + Sync {
    async fn on_swipe_right(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError>;
    async fn on_swipe_left(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError>;
    async fn on_swipe_up(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError>;
    async fn on_swipe_down(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError>;
}

/// Fire-and-forget: runs the direction's callback on its own task.
pub fn dispatch(
    callbacks: Arc<dyn SwipeCallbacks>,
    user_id: String,
    direction: SwipeDirection,
    job: ScoredJob,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = match direction {
            SwipeDirection::Right => callbacks.on_swipe_right(&user_id, &job).await,
            SwipeDirection::Left => callbacks.on_swipe_left(&user_id, &job).await,
            SwipeDirection::Up => callbacks.on_swipe_up(&user_id, &job).await,
            SwipeDirection::Down => callbacks.on_swipe_down(&user_id, &job).await,
        };
        if let Err(e) = result {
            warn!(
                user_id = %user_id,
                job_id = %job.id(),
                ?direction,
                "swipe callback failed: {e}"
            );
        }
    })
}

// ────────────────────────────────────────────────────────────────────────────
// LoggingCallbacks: used when no database is configured
// ────────────────────────────────────────────────────────────────────────────

pub struct LoggingCallbacks;

#[async_trait]
impl SwipeCallbacks for LoggingCallbacks {
    async fn on_swipe_right(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        info!(%user_id, job_id = %job.id(), "Applied to: {}", job.job.title);
        Ok(())
    }

    async fn on_swipe_left(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        info!(%user_id, job_id = %job.id(), "Skipped: {}", job.job.title);
        Ok(())
    }

    async fn on_swipe_up(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        info!(%user_id, job_id = %job.id(), "Saved: {}", job.job.title);
        Ok(())
    }

    async fn on_swipe_down(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        info!(%user_id, job_id = %job.id(), "View details: {}", job.job.title);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PgSwipeCallbacks: records applications and saved jobs
// ────────────────────────────────────────────────────────────────────────────

const INSERT_APPLICATION: &str = r#"
    INSERT INTO job_applications (id, job_id, user_id, compatibility)
    VALUES ($1, $2, $3, $4)
    ON CONFLICT (job_id, user_id) DO NOTHING
"#;

const INSERT_SAVED_JOB: &str = r#"
    INSERT INTO saved_jobs (id, job_id, user_id)
    VALUES ($1, $2, $3)
    ON CONFLICT (job_id, user_id) DO NOTHING
"#;

/// Writes applications and saved jobs to Postgres. Repeat swipes on the same
/// job are no-ops (unique on job_id + user_id).
pub struct PgSwipeCallbacks {
    pool: PgPool,
}

impl PgSwipeCallbacks {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SwipeCallbacks for PgSwipeCallbacks {
    async fn on_swipe_right(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        let result = sqlx::query(INSERT_APPLICATION)
            .bind(Uuid::new_v4())
            .bind(job.id())
            .bind(user_id)
            .bind(i16::from(job.compatibility))
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            info!(%user_id, job_id = %job.id(), "Already applied to this job");
        } else {
            info!(%user_id, job_id = %job.id(), "Application recorded");
        }
        Ok(())
    }

    async fn on_swipe_left(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        info!(%user_id, job_id = %job.id(), "Skipped: {}", job.job.title);
        Ok(())
    }

    async fn on_swipe_up(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        let result = sqlx::query(INSERT_SAVED_JOB)
            .bind(Uuid::new_v4())
            .bind(job.id())
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            info!(%user_id, job_id = %job.id(), "Job already saved");
        } else {
            info!(%user_id, job_id = %job.id(), "Saved job recorded");
        }
        Ok(())
    }

    async fn on_swipe_down(&self, user_id: &str, job: &ScoredJob) -> Result<(), AppError> {
        info!(%user_id, job_id = %job.id(), "View details: {}", job.job.title);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingCallbacks;
    use super::*;
    use crate::models::job::sample_job;

    fn card() -> ScoredJob {
        ScoredJob {
            job: sample_job(),
            compatibility: 75,
        }
    }

    #[tokio::test]
    async fn test_dispatch_routes_by_direction() {
        let callbacks = Arc::new(RecordingCallbacks::default());
        for direction in [
            SwipeDirection::Right,
            SwipeDirection::Left,
            SwipeDirection::Up,
            SwipeDirection::Down,
        ] {
            dispatch(callbacks.clone(), "user-1".to_string(), direction, card())
                .await
                .unwrap();
        }
        let directions: Vec<_> = callbacks.calls().into_iter().map(|(d, _)| d).collect();
        assert_eq!(
            directions,
            vec![
                SwipeDirection::Right,
                SwipeDirection::Left,
                SwipeDirection::Up,
                SwipeDirection::Down
            ]
        );
    }

    #[tokio::test]
    async fn test_dispatch_swallows_callback_failure() {
        let callbacks = Arc::new(RecordingCallbacks::failing());
        let handle = dispatch(callbacks.clone(), "user-1".to_string(), SwipeDirection::Up, card());
        // the task completes normally even though the callback failed
        assert!(handle.await.is_ok());
        assert_eq!(callbacks.calls().len(), 1);
    }

    #[test]
    fn test_insert_columns_match_migration() {
        let schema = include_str!("../../migrations/0001_swipe_outcomes.sql");
        // the deck key is the user id, and the tables are keyed the same way
        assert!(schema.contains("UNIQUE (job_id, user_id)"));
        assert!(!schema.contains("profile_id"));
        for sql in [INSERT_APPLICATION, INSERT_SAVED_JOB] {
            assert!(sql.contains("ON CONFLICT (job_id, user_id)"), "{sql}");
            let columns = sql
                .split_once('(')
                .and_then(|(_, rest)| rest.split_once(')'))
                .map(|(cols, _)| cols)
                .unwrap();
            for column in columns.split(',').map(str::trim) {
                assert!(schema.contains(&format!("{column} ")), "missing column {column}");
            }
        }
    }

    #[tokio::test]
    async fn test_logging_callbacks_never_fail() {
        let cb = LoggingCallbacks;
        assert!(cb.on_swipe_right("u", &card()).await.is_ok());
        assert!(cb.on_swipe_down("u", &card()).await.is_ok());
    }
}
