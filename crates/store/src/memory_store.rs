//! In-memory store implementation.
//!
//! Backs tests and demos. The locks make it a well-behaved shared
//! collaborator; they add no ordering guarantees beyond last-write-wins.

use std::collections::HashMap;

use chemlearn_core::{Course, CourseId, Module, ModuleId, ProgressRecord, UserId};
use tokio::sync::RwLock;

use super::{ContentStore, Result, StoreError};

#[derive(Default)]
struct Inner {
    courses: HashMap<CourseId, Course>,
    modules: HashMap<ModuleId, Module>,
    progress: HashMap<(UserId, ModuleId), ProgressRecord>,
}

/// In-memory Content Store backend.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ContentStore for MemoryStore {
    async fn save_course(&self, course: &Course) -> Result<()> {
        self.inner
            .write()
            .await
            .courses
            .insert(course.id, course.clone());
        Ok(())
    }

    async fn load_course(&self, id: CourseId) -> Result<Option<Course>> {
        Ok(self.inner.read().await.courses.get(&id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = self.inner.read().await.courses.values().cloned().collect();
        courses.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(courses)
    }

    async fn save_module(&self, module: &Module) -> Result<()> {
        let mut inner = self.inner.write().await;
        let collides = inner.modules.values().any(|m| {
            m.course_id == module.course_id
                && m.order_index == module.order_index
                && m.id != module.id
        });
        if collides {
            return Err(StoreError::DuplicateOrderIndex {
                course_id: module.course_id,
                order_index: module.order_index,
            });
        }
        inner.modules.insert(module.id, module.clone());
        Ok(())
    }

    async fn load_module(&self, id: ModuleId) -> Result<Option<Module>> {
        Ok(self.inner.read().await.modules.get(&id).cloned())
    }

    async fn list_course_modules(&self, course_id: CourseId) -> Result<Vec<Module>> {
        let mut modules: Vec<Module> = self
            .inner
            .read()
            .await
            .modules
            .values()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect();
        modules.sort_by_key(|m| m.order_index);
        Ok(modules)
    }

    async fn load_progress(
        &self,
        user_id: UserId,
        module_id: ModuleId,
    ) -> Result<Option<ProgressRecord>> {
        Ok(self
            .inner
            .read()
            .await
            .progress
            .get(&(user_id, module_id))
            .cloned())
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<()> {
        self.inner
            .write()
            .await
            .progress
            .insert((record.user_id, record.module_id), record.clone());
        Ok(())
    }

    async fn list_user_progress(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Vec<ProgressRecord>> {
        let inner = self.inner.read().await;
        let records = inner
            .progress
            .values()
            .filter(|r| {
                r.user_id == user_id
                    && inner
                        .modules
                        .get(&r.module_id)
                        .is_some_and(|m| m.course_id == course_id)
            })
            .cloned()
            .collect();
        Ok(records)
    }
}
