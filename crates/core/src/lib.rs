//! ChemLearn core data models.
//!
//! This crate defines the data structures shared by the content store and
//! the progress tracker: courses, modules, and per-learner progress records.

#![warn(missing_docs)]

// Core identities
mod id;

// Content catalog
mod course;
mod module;

// Learner state
mod progress;

// Re-exports
pub use id::{CourseId, ModuleId, UserId};

pub use course::Course;
pub use module::{Module, ModuleKind};
pub use progress::{ProgressMap, ProgressRecord};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
