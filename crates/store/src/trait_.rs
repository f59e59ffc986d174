//! Content Store trait abstraction.

use async_trait::async_trait;
use chemlearn_core::{Course, CourseId, Module, ModuleId, ProgressRecord, UserId};

/// Error type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during Content Store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Referenced item not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// No valid learner session
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Two modules in the same course share an order index
    #[error("Duplicate order index {order_index} in course {course_id}")]
    DuplicateOrderIndex {
        /// The offending course
        course_id: CourseId,
        /// The colliding position
        order_index: u32,
    },

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Persistence abstraction for ChemLearn content and learner progress.
///
/// This trait allows different storage backends to be plugged in. Progress
/// writes are upserts with last-write-wins semantics; there is no version
/// check and no merge.
#[async_trait]
pub trait ContentStore: Send + Sync {
    // === Course operations ===

    /// Save a course (create or update).
    async fn save_course(&self, course: &Course) -> Result<()>;

    /// Load a course by ID.
    async fn load_course(&self, id: CourseId) -> Result<Option<Course>>;

    /// List all courses.
    async fn list_courses(&self) -> Result<Vec<Course>>;

    // === Module operations ===

    /// Save a module (authoring only).
    ///
    /// Rejects a module whose `(course_id, order_index)` collides with a
    /// different module, so the ordering the tracker gates on is always
    /// unambiguous.
    async fn save_module(&self, module: &Module) -> Result<()>;

    /// Load a module by ID.
    async fn load_module(&self, id: ModuleId) -> Result<Option<Module>>;

    /// List a course's modules, ascending by `order_index`.
    async fn list_course_modules(&self, course_id: CourseId) -> Result<Vec<Module>>;

    // === Progress operations ===

    /// Load the progress record for a `(user, module)` pair.
    async fn load_progress(
        &self,
        user_id: UserId,
        module_id: ModuleId,
    ) -> Result<Option<ProgressRecord>>;

    /// Upsert a progress record. Last write wins.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<()>;

    /// List a learner's progress records for one course.
    async fn list_user_progress(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Vec<ProgressRecord>>;
}
