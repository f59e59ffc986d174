//! Unlock gating and course progress arithmetic.
//!
//! Pure functions over an already-fetched module sequence and progress map.
//! Lock state is never stored; it is recomputed from the presence and
//! `completed` flag of the predecessor's progress record, so there is no
//! second source of truth to drift.

use chemlearn_core::{Module, ModuleId, ProgressMap};

/// Whether the module at `position` in the ordered sequence is locked.
///
/// Position 0 is never locked. Any later position is unlocked iff the
/// immediately preceding module has a progress record with
/// `completed = true`; a missing record counts as not completed.
pub fn is_locked(modules: &[Module], progress: &ProgressMap, position: usize) -> bool {
    if position == 0 {
        return false;
    }
    let Some(prev) = modules.get(position - 1) else {
        return true;
    };
    !progress.get(&prev.id).is_some_and(|r| r.completed)
}

/// Percentage of the course's modules that are completed, rounded.
///
/// An empty course is 0 percent complete.
pub fn course_progress_percent(modules: &[Module], progress: &ProgressMap) -> u8 {
    if modules.is_empty() {
        return 0;
    }
    let completed = completed_count(modules, progress);
    ((completed as f64 / modules.len() as f64) * 100.0).round() as u8
}

/// Points earned so far: the sum of `points` over completed modules.
pub fn earned_points(modules: &[Module], progress: &ProgressMap) -> u32 {
    modules
        .iter()
        .filter(|m| is_completed(m.id, progress))
        .map(|m| m.points)
        .sum()
}

/// The first module (ascending `order_index`) that is unlocked and not yet
/// completed.
///
/// When every module is completed the first module's id is returned — the
/// learner restarts at the beginning rather than landing nowhere. An empty
/// course yields `None`.
pub fn first_available_module(modules: &[Module], progress: &ProgressMap) -> Option<ModuleId> {
    for (position, module) in modules.iter().enumerate() {
        if !is_locked(modules, progress, position) && !is_completed(module.id, progress) {
            return Some(module.id);
        }
    }
    modules.first().map(|m| m.id)
}

/// Number of completed modules in the sequence.
pub fn completed_count(modules: &[Module], progress: &ProgressMap) -> usize {
    modules
        .iter()
        .filter(|m| is_completed(m.id, progress))
        .count()
}

fn is_completed(module_id: ModuleId, progress: &ProgressMap) -> bool {
    progress.get(&module_id).is_some_and(|r| r.completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemlearn_core::{CourseId, ModuleKind, ProgressRecord, UserId};
    use chrono::Utc;

    fn sequence(count: u32) -> Vec<Module> {
        let course_id = CourseId::new();
        (0..count)
            .map(|order_index| Module {
                id: ModuleId::new(),
                course_id,
                order_index,
                kind: ModuleKind::Theory,
                title: format!("Module {}", order_index),
                estimated_minutes: 15,
                points: 10,
                created_at: Utc::now(),
            })
            .collect()
    }

    fn completed_record(module_id: ModuleId) -> ProgressRecord {
        ProgressRecord {
            user_id: UserId::new(),
            module_id,
            progress: 100,
            completed: true,
            score: None,
            last_accessed: Utc::now(),
        }
    }

    fn partial_record(module_id: ModuleId, progress: u8) -> ProgressRecord {
        ProgressRecord {
            user_id: UserId::new(),
            module_id,
            progress,
            completed: false,
            score: None,
            last_accessed: Utc::now(),
        }
    }

    #[test]
    fn first_module_is_never_locked() {
        let modules = sequence(3);

        assert!(!is_locked(&modules, &ProgressMap::new(), 0));

        // Still unlocked with arbitrary map contents
        let mut progress = ProgressMap::new();
        progress.insert(modules[2].id, completed_record(modules[2].id));
        assert!(!is_locked(&modules, &progress, 0));
    }

    #[test]
    fn modules_unlock_sequentially() {
        let modules = sequence(3);
        let mut progress = ProgressMap::new();

        // No records: everything after position 0 is locked
        assert!(is_locked(&modules, &progress, 1));
        assert!(is_locked(&modules, &progress, 2));

        // Completing module 0 unlocks position 1 only
        progress.insert(modules[0].id, completed_record(modules[0].id));
        assert!(!is_locked(&modules, &progress, 1));
        assert!(is_locked(&modules, &progress, 2));

        // Completing module 1 unlocks position 2
        progress.insert(modules[1].id, completed_record(modules[1].id));
        assert!(!is_locked(&modules, &progress, 2));
    }

    #[test]
    fn incomplete_record_does_not_unlock_the_next_module() {
        let modules = sequence(2);
        let mut progress = ProgressMap::new();
        progress.insert(modules[0].id, partial_record(modules[0].id, 99));

        assert!(is_locked(&modules, &progress, 1));
    }

    #[test]
    fn course_progress_rounds() {
        let modules = sequence(5);
        let mut progress = ProgressMap::new();
        progress.insert(modules[0].id, completed_record(modules[0].id));
        progress.insert(modules[1].id, completed_record(modules[1].id));

        assert_eq!(course_progress_percent(&modules, &progress), 40);

        // 1 of 3 rounds to 33
        let three = sequence(3);
        let mut progress = ProgressMap::new();
        progress.insert(three[0].id, completed_record(three[0].id));
        assert_eq!(course_progress_percent(&three, &progress), 33);
    }

    #[test]
    fn empty_course_is_zero_percent() {
        assert_eq!(course_progress_percent(&[], &ProgressMap::new()), 0);
    }

    #[test]
    fn earned_points_counts_completed_modules_only() {
        let modules = sequence(3);
        let mut progress = ProgressMap::new();
        progress.insert(modules[0].id, completed_record(modules[0].id));
        progress.insert(modules[1].id, partial_record(modules[1].id, 50));

        assert_eq!(earned_points(&modules, &progress), 10);
    }

    #[test]
    fn first_available_skips_completed_modules() {
        let modules = sequence(3);
        let mut progress = ProgressMap::new();
        progress.insert(modules[0].id, completed_record(modules[0].id));

        assert_eq!(
            first_available_module(&modules, &progress),
            Some(modules[1].id)
        );
    }

    #[test]
    fn fully_completed_course_falls_back_to_the_first_module() {
        let modules = sequence(3);
        let mut progress = ProgressMap::new();
        for m in &modules {
            progress.insert(m.id, completed_record(m.id));
        }

        assert_eq!(
            first_available_module(&modules, &progress),
            Some(modules[0].id)
        );
    }

    #[test]
    fn empty_course_has_no_available_module() {
        assert_eq!(first_available_module(&[], &ProgressMap::new()), None);
    }
}
