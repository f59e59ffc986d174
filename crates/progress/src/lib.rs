//! Progress tracking for ChemLearn.
//!
//! Module unlock gating, monotonic progress updates, and the unlock cascade
//! that makes the next module in a course available on completion.

#![warn(missing_docs)]

pub mod gating;
pub mod tracker;

pub use gating::{course_progress_percent, earned_points, first_available_module, is_locked};
pub use tracker::{
    BasicProgressTracker, CourseSummary, ProgressTracker, TrackerError, UpdateOutcome,
};
