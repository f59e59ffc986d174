//! Course model - an ordered collection of modules.

use serde::{Deserialize, Serialize};

use crate::id::CourseId;
use crate::Time;

/// A course groups modules into a linear learning path.
///
/// The module sequence is not stored on the course; it is derived by listing
/// the course's modules and sorting by `order_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    /// Unique identifier
    pub id: CourseId,

    /// Course title
    pub title: String,

    /// Short description shown in the catalog
    pub description: String,

    /// Authoring timestamp
    pub created_at: Time,
}
