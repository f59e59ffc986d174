//! Progress tracking service.

use std::sync::Arc;

use async_trait::async_trait;
use chemlearn_core::{CourseId, ModuleId, ProgressMap, ProgressRecord, UserId};
use chemlearn_store::{ContentStore, StoreError};
use tracing::{debug, warn};

use crate::gating;

/// Error type for tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    /// Progress value outside 0-100
    #[error("progress {0} is out of range (0-100)")]
    InvalidProgress(u8),

    /// The Content Store failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Result of a progress update.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// The record was written with the new progress.
    Updated(ProgressRecord),
    /// The monotonic guard rejected the value; nothing was written.
    Unchanged(Option<ProgressRecord>),
}

impl UpdateOutcome {
    /// The record as the store now holds it, if one exists.
    pub fn record(&self) -> Option<&ProgressRecord> {
        match self {
            UpdateOutcome::Updated(record) => Some(record),
            UpdateOutcome::Unchanged(record) => record.as_ref(),
        }
    }
}

/// A learner's standing in one course, computed in a single pass for
/// dashboard rendering.
#[derive(Debug, Clone)]
pub struct CourseSummary {
    /// The course
    pub course_id: CourseId,
    /// Total modules in the course
    pub total_modules: usize,
    /// Modules the learner has completed
    pub completed_modules: usize,
    /// Rounded completion percentage
    pub percent_complete: u8,
    /// Points earned over completed modules
    pub earned_points: u32,
    /// Where the learner should go next
    pub first_available: Option<ModuleId>,
}

/// Progress tracking service.
#[async_trait]
pub trait ProgressTracker: Send + Sync {
    /// Record a learner's progress through a module.
    ///
    /// Progress is monotonic: a value at or below the stored one is a no-op,
    /// except that a write of exactly 100 always goes through, so completion
    /// can be re-affirmed idempotently. Reaching 100 marks the module
    /// completed and triggers the unlock cascade for the next module in the
    /// course; a cascade failure never fails the completion write itself.
    ///
    /// `course_hint` lets the cascade locate the course when the module
    /// record cannot be loaded. `score` overwrites the stored score when
    /// `Some` and preserves it when `None`.
    async fn update_progress(
        &self,
        user_id: UserId,
        module_id: ModuleId,
        course_hint: Option<CourseId>,
        new_progress: u8,
        score: Option<f32>,
    ) -> Result<UpdateOutcome, TrackerError>;

    /// Compute a learner's standing in a course.
    async fn course_summary(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<CourseSummary, TrackerError>;
}

/// Basic progress tracker implementation over a Content Store.
pub struct BasicProgressTracker<S: ContentStore> {
    store: Arc<S>,
}

impl<S: ContentStore> BasicProgressTracker<S> {
    /// Create a new progress tracker.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Create a tracker sharing an existing store handle.
    pub fn with_store(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Materialize a progress record for the module after `module_id`, if
    /// one exists and has no record yet.
    ///
    /// Presence of the record is what marks the successor as available; an
    /// existing record is left untouched so in-flight progress never
    /// regresses. Any lookup miss aborts the cascade as a no-op.
    async fn unlock_next(
        &self,
        user_id: UserId,
        module_id: ModuleId,
        course_hint: Option<CourseId>,
    ) -> chemlearn_store::Result<()> {
        let course_id = match self.store.load_module(module_id).await {
            Ok(Some(module)) => module.course_id,
            _ => match course_hint {
                Some(course_id) => course_id,
                None => return Ok(()),
            },
        };

        let mut modules = self.store.list_course_modules(course_id).await?;
        modules.sort_by_key(|m| m.order_index);

        let Some(position) = modules.iter().position(|m| m.id == module_id) else {
            return Ok(());
        };
        let Some(next) = modules.get(position + 1) else {
            return Ok(());
        };

        if self.store.load_progress(user_id, next.id).await?.is_none() {
            self.store
                .upsert_progress(&ProgressRecord::fresh(user_id, next.id))
                .await?;
            debug!(user = %user_id, module = %next.id, "unlocked next module");
        }

        Ok(())
    }
}

#[async_trait]
impl<S: ContentStore + 'static> ProgressTracker for BasicProgressTracker<S> {
    async fn update_progress(
        &self,
        user_id: UserId,
        module_id: ModuleId,
        course_hint: Option<CourseId>,
        new_progress: u8,
        score: Option<f32>,
    ) -> Result<UpdateOutcome, TrackerError> {
        if new_progress > 100 {
            return Err(TrackerError::InvalidProgress(new_progress));
        }

        let current = self.store.load_progress(user_id, module_id).await?;
        let current_progress = current.as_ref().map_or(0, |r| r.progress);

        // Monotonic guard; a write of exactly 100 always goes through
        if new_progress <= current_progress && new_progress < 100 {
            return Ok(UpdateOutcome::Unchanged(current));
        }

        let completed = new_progress >= 100;
        let record = ProgressRecord {
            user_id,
            module_id,
            progress: new_progress,
            completed,
            score: score.or(current.as_ref().and_then(|r| r.score)),
            last_accessed: chrono::Utc::now(),
        };

        self.store.upsert_progress(&record).await?;
        debug!(user = %user_id, module = %module_id, progress = new_progress, "progress recorded");

        if completed {
            // The completion write above is authoritative; an unlock failure
            // must not surface to the caller.
            if let Err(e) = self.unlock_next(user_id, module_id, course_hint).await {
                warn!(user = %user_id, module = %module_id, error = %e, "unlock cascade failed");
            }
        }

        Ok(UpdateOutcome::Updated(record))
    }

    async fn course_summary(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<CourseSummary, TrackerError> {
        let modules = self.store.list_course_modules(course_id).await?;
        let records = self.store.list_user_progress(user_id, course_id).await?;

        let progress: ProgressMap = records.into_iter().map(|r| (r.module_id, r)).collect();

        Ok(CourseSummary {
            course_id,
            total_modules: modules.len(),
            completed_modules: gating::completed_count(&modules, &progress),
            percent_complete: gating::course_progress_percent(&modules, &progress),
            earned_points: gating::earned_points(&modules, &progress),
            first_available: gating::first_available_module(&modules, &progress),
        })
    }
}
