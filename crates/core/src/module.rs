//! Module model - one unit of course content.

use serde::{Deserialize, Serialize};

use crate::id::{CourseId, ModuleId};
use crate::Time;

/// One unit of course content: a theory reading, a lab activity, or a quiz.
///
/// Modules are authored once and never mutated by the progress tracker.
/// Their position within a course is given by `order_index`, which is unique
/// per course and defines the linear unlock sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    /// Unique identifier
    pub id: ModuleId,

    /// The course this module belongs to
    pub course_id: CourseId,

    /// Position within the course (unique per course, ascending)
    pub order_index: u32,

    /// Kind of content
    pub kind: ModuleKind,

    /// Module title
    pub title: String,

    /// Estimated time to complete, in minutes
    pub estimated_minutes: u32,

    /// Points awarded on completion
    pub points: u32,

    /// Authoring timestamp
    pub created_at: Time,
}

/// Kind of module content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
    /// Theory reading
    Theory,
    /// Interactive lab activity
    Lab,
    /// Graded quiz
    Quiz,
}

impl ModuleKind {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Theory => "theory",
            ModuleKind::Lab => "lab",
            ModuleKind::Quiz => "quiz",
        }
    }
}
