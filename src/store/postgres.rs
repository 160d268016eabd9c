use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{Store, DUPLICATE_PROJECT_NAME, PROJECT_NOT_FOUND};
use crate::db;
use crate::error::AppError;
use crate::models::{NewProject, NewTask, Project, Task};

/// PostgreSQL-backed store. Each call checks a connection out of the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turn constraint violations into the same validation errors the memory store raises.
fn map_constraint(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::bad_request(DUPLICATE_PROJECT_NAME)
        }
        sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
            AppError::bad_request(PROJECT_NOT_FOUND)
        }
        _ => AppError::Database(err),
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_project(&self, project: NewProject) -> Result<Project, AppError> {
        db::projects::create(&self.pool, &project.name, project.description.as_deref())
            .await
            .map_err(map_constraint)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        Ok(db::projects::list(&self.pool).await?)
    }

    async fn find_project(&self, id: i64) -> Result<Option<Project>, AppError> {
        Ok(db::projects::find_by_id(&self.pool, id).await?)
    }

    async fn find_project_by_name(&self, name: &str) -> Result<Option<Project>, AppError> {
        Ok(db::projects::find_by_name(&self.pool, name).await?)
    }

    async fn count_projects(&self) -> Result<usize, AppError> {
        let count = db::projects::count(&self.pool).await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn update_project(&self, project: &Project) -> Result<Option<Project>, AppError> {
        db::projects::update(
            &self.pool,
            project.id,
            &project.name,
            project.description.as_deref(),
        )
        .await
        .map_err(map_constraint)
    }

    async fn delete_project(&self, id: i64) -> Result<bool, AppError> {
        Ok(db::projects::delete(&self.pool, id).await?)
    }

    async fn create_task(&self, task: NewTask) -> Result<Task, AppError> {
        db::tasks::create(
            &self.pool,
            task.project_id,
            &task.title,
            task.description.as_deref(),
            task.deadline,
        )
        .await
        .map_err(map_constraint)
    }

    async fn list_tasks(&self, project_id: i64) -> Result<Vec<Task>, AppError> {
        Ok(db::tasks::list_by_project(&self.pool, project_id).await?)
    }

    async fn count_tasks(&self, project_id: i64) -> Result<usize, AppError> {
        let count = db::tasks::count_by_project(&self.pool, project_id).await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn find_task(&self, id: i64) -> Result<Option<Task>, AppError> {
        Ok(db::tasks::find_by_id(&self.pool, id).await?)
    }

    async fn update_task(&self, task: &Task) -> Result<Option<Task>, AppError> {
        Ok(db::tasks::update(&self.pool, task).await?)
    }

    async fn delete_task(&self, id: i64) -> Result<bool, AppError> {
        Ok(db::tasks::delete(&self.pool, id).await?)
    }

    async fn close_overdue_tasks(&self, now: DateTime<Utc>) -> Result<Vec<Task>, AppError> {
        Ok(db::tasks::close_overdue(&self.pool, now).await?)
    }
}
