//! JSON file store implementation.
//!
//! Stores each record as a JSON file under a root directory. This is the
//! reference persistent backend; a hosted deployment would swap in a remote
//! service behind the same trait.

use std::path::{Path, PathBuf};

use chemlearn_core::{Course, CourseId, Module, ModuleId, ProgressRecord, UserId};
use tokio::fs;

use super::{ContentStore, Result, StoreError};

/// File-based JSON Content Store backend.
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Create storage rooted at `root`, creating the per-entity
    /// subdirectories as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();

        fs::create_dir_all(root.join("courses")).await?;
        fs::create_dir_all(root.join("modules")).await?;
        fs::create_dir_all(root.join("progress")).await?;

        Ok(Self { root })
    }

    fn course_path(&self, id: CourseId) -> PathBuf {
        self.root.join("courses").join(format!("{}.json", id))
    }

    fn module_path(&self, id: ModuleId) -> PathBuf {
        self.root.join("modules").join(format!("{}.json", id))
    }

    fn progress_path(&self, user_id: UserId, module_id: ModuleId) -> PathBuf {
        self.root
            .join("progress")
            .join(format!("{}_{}.json", user_id, module_id))
    }
}

#[async_trait::async_trait]
impl ContentStore for JsonStore {
    async fn save_course(&self, course: &Course) -> Result<()> {
        let json = serde_json::to_string_pretty(course)?;
        fs::write(self.course_path(course.id), json.as_bytes()).await?;
        Ok(())
    }

    async fn load_course(&self, id: CourseId) -> Result<Option<Course>> {
        read_json(&self.course_path(id)).await
    }

    async fn list_courses(&self) -> Result<Vec<Course>> {
        let mut courses: Vec<Course> = list_dir(&self.root.join("courses")).await?;
        courses.sort_by(|a: &Course, b| a.created_at.cmp(&b.created_at));
        Ok(courses)
    }

    async fn save_module(&self, module: &Module) -> Result<()> {
        let siblings: Vec<Module> = list_dir(&self.root.join("modules")).await?;
        let collides = siblings.iter().any(|m| {
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

        let json = serde_json::to_string_pretty(module)?;
        fs::write(self.module_path(module.id), json.as_bytes()).await?;
        Ok(())
    }

    async fn load_module(&self, id: ModuleId) -> Result<Option<Module>> {
        read_json(&self.module_path(id)).await
    }

    async fn list_course_modules(&self, course_id: CourseId) -> Result<Vec<Module>> {
        let all: Vec<Module> = list_dir(&self.root.join("modules")).await?;
        let mut modules: Vec<Module> = all
            .into_iter()
            .filter(|m| m.course_id == course_id)
            .collect();
        modules.sort_by_key(|m| m.order_index);
        Ok(modules)
    }

    async fn load_progress(
        &self,
        user_id: UserId,
        module_id: ModuleId,
    ) -> Result<Option<ProgressRecord>> {
        read_json(&self.progress_path(user_id, module_id)).await
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<()> {
        let json = serde_json::to_string_pretty(record)?;
        fs::write(
            self.progress_path(record.user_id, record.module_id),
            json.as_bytes(),
        )
        .await?;
        Ok(())
    }

    async fn list_user_progress(
        &self,
        user_id: UserId,
        course_id: CourseId,
    ) -> Result<Vec<ProgressRecord>> {
        let modules = self.list_course_modules(course_id).await?;
        let mut records = Vec::new();
        for module in &modules {
            if let Some(record) = self.load_progress(user_id, module.id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}
