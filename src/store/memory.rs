use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use super::{Store, DUPLICATE_PROJECT_NAME, PROJECT_NOT_FOUND};
use crate::error::AppError;
use crate::models::{NewProject, NewTask, Project, Task, TaskStatus};

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    projects: BTreeMap<i64, Project>,
    tasks: BTreeMap<i64, Task>,
    last_project_id: i64,
    last_task_id: i64,
}

impl Inner {
    fn name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.projects
            .values()
            .any(|p| p.name == name && Some(p.id) != except)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_project(&self, project: NewProject) -> Result<Project, AppError> {
        let mut inner = self.inner.lock().await;
        if inner.name_taken(&project.name, None) {
            return Err(AppError::bad_request(DUPLICATE_PROJECT_NAME));
        }

        inner.last_project_id += 1;
        let created = Project {
            id: inner.last_project_id,
            name: project.name,
            description: project.description,
            created_at: Utc::now(),
        };
        inner.projects.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.inner.lock().await.projects.values().cloned().collect())
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>, AppError> {
        Ok(self.inner.lock().await.projects.get(&id).cloned())
    }

    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner.projects.values().find(|p| p.name == name).cloned())
    }

    async fn count_projects(&self) -> Result<usize, AppError> {
        Ok(self.inner.lock().await.projects.len())
    }

    async fn update_project(&self, project: &Project) -> Result<Option<Project>, AppError> {
        let mut inner = self.inner.lock().await;
        if !inner.projects.contains_key(&project.id) {
            return Ok(None);
        }
        if inner.name_taken(&project.name, Some(project.id)) {
            return Err(AppError::bad_request(DUPLICATE_PROJECT_NAME));
        }

        let Some(stored) = inner.projects.get_mut(&project.id) else {
            return Ok(None);
        };
        stored.name = project.name.clone();
        stored.description = project.description.clone();
        Ok(Some(stored.clone()))
    }

    async fn delete_project(&self, id: i64) -> Result<bool, AppError> {
        let mut inner = self.inner.lock().await;
        if inner.projects.remove(&id).is_none() {
            return Ok(false);
        }
        inner.tasks.retain(|_, task| task.project_id != id);
        Ok(true)
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, AppError> {
        let mut inner = self.inner.lock().await;
        if !inner.projects.contains_key(&task.project_id) {
            return Err(AppError::bad_request(PROJECT_NOT_FOUND));
        }

        inner.last_task_id += 1;
        let created = Task {
            id: inner.last_task_id,
            project_id: task.project_id,
            title: task.title,
            description: task.description,
            status: TaskStatus::Todo,
            deadline: task.deadline,
            closed_at: None,
            created_at: Utc::now(),
        };
        inner.tasks.insert(created.id, created.clone());
        Ok(created)
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn count_tasks(&self, project_id: i64) -> Result<usize, AppError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .tasks
            .values()
            .filter(|t| t.project_id == project_id)
            .count())
    }

    async fn find_task(&self, id: i64) -> Result<Option<Task>, AppError> {
        Ok(self.inner.lock().await.tasks.get(&id).cloned())
    }

    async fn update_task(&self, task: &Task) -> Result<Option<Task>, AppError> {
        let mut inner = self.inner.lock().await;
        let Some(stored) = inner.tasks.get_mut(&task.id) else {
            return Ok(None);
        };
        stored.title = task.title.clone();
        stored.description = task.description.clone();
        stored.status = task.status;
        stored.deadline = task.deadline;
        stored.closed_at = task.closed_at;
        Ok(Some(stored.clone()))
    }

    async fn delete_task(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.lock().await.tasks.remove(&id).is_some())
    }

    async fn close_overdue_tasks(&self, now: DateTime<Utc>) -> Result<Vec<Task>, AppError> {
        let mut inner = self.inner.lock().await;
        let mut closed = Vec::new();
        for task in inner.tasks.values_mut().filter(|t| t.is_overdue(now)) {
            task.set_status(TaskStatus::Done, now);
            closed.push(task.clone());
        }
        Ok(closed)
    }
}
