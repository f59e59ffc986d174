//! Per-learner, per-module progress state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::id::{ModuleId, UserId};
use crate::Time;

/// Progress state for one `(user, module)` pair.
///
/// At most one record exists per pair; writes are upserts. A record is
/// created on the first progress update for a module and never deleted.
/// `completed = true` implies `progress = 100`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// The learner
    pub user_id: UserId,

    /// The module
    pub module_id: ModuleId,

    /// Progress through the module, 0-100
    pub progress: u8,

    /// Whether the module has been completed
    pub completed: bool,

    /// Quiz score, if the module has been scored
    pub score: Option<f32>,

    /// When the learner last touched this module
    pub last_accessed: Time,
}

impl ProgressRecord {
    /// Create a fresh, untouched record for a `(user, module)` pair.
    ///
    /// This is the shape the unlock cascade materializes for a newly
    /// available module: zero progress, not completed, no score.
    pub fn fresh(user_id: UserId, module_id: ModuleId) -> Self {
        Self {
            user_id,
            module_id,
            progress: 0,
            completed: false,
            score: None,
            last_accessed: chrono::Utc::now(),
        }
    }
}

/// A learner's progress records for one course, keyed by module id.
pub type ProgressMap = HashMap<ModuleId, ProgressRecord>;
