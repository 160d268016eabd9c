//! Storage backends shared by the HTTP API, the interactive CLI and the
//! autoclose job.
//!
//! Both backends enforce the same structural rules: project names are
//! unique, tasks must point at an existing project, and deleting a project
//! removes its tasks. Field-level validation lives in [`crate::services`].

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::{NewProject, NewTask, Project, Task};

pub use memory::MemoryStore;
pub use postgres::PgStore;

pub type SharedStore = Arc<dyn Store>;

pub(crate) const DUPLICATE_PROJECT_NAME: &str = "Project with this name already exists";
pub(crate) const PROJECT_NOT_FOUND: &str = "Project not found";

#[async_trait]
pub trait Store: Send + Sync {
    async fn create_project(&self, project: NewProject) -> Result<Project, AppError>;
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;
    async fn find_project(&self, id: i64) -> Result<Option<Project>, AppError>;
    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, AppError>;
    async fn count_projects(&self) -> Result<usize, AppError>;
    /// Persist name and description. Returns `None` if the project does not exist.
    async fn update_project(&self, project: &Project) -> Result<Option<Project>, AppError>;
    /// Delete a project together with its tasks. Returns `false` if it did not exist.
    async fn delete_project(&self, id: i64) -> Result<bool, AppError>;

    async fn create_task(&self, task: NewTask) -> Result<Task, AppError>;
    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, AppError>;
    async fn count_tasks(&self, project_id: i64) -> Result<usize, AppError>;
    async fn find_task(&self, id: i64) -> Result<Option<Task>, AppError>;
    /// Persist every mutable task field. Returns `None` if the task does not exist.
    async fn update_task(&self, task: &Task) -> Result<Option<Task>, AppError>;
    async fn delete_task(&self, id: i64) -> Result<bool, AppError>;

    /// Mark every task with `deadline < now` that is not done as done, closed at `now`.
    async fn close_overdue_tasks(&self, now: DateTime<Utc>) -> Result<Vec<Task>, AppError>;
}
