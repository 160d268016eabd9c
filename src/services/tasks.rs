use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{optional_description, projects, required_text, MAX_NAME_LEN};
use crate::config::Limits;
use crate::error::AppError;
use crate::models::{NewTask, Task, TaskStatus};
use crate::store::Store;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<String>,
}

fn parse_status(value: &str) -> Result<TaskStatus, AppError> {
    value
        .parse()
        .map_err(|_| AppError::bad_request("Invalid status"))
}

fn check_deadline(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), AppError> {
    if deadline < now {
        return Err(AppError::bad_request("The deadline cannot be in the past"));
    }
    Ok(())
}

pub async fn create(
    store: &dyn Store,
    limits: &Limits,
    project_id: i64,
    req: CreateTask,
) -> Result<Task, AppError> {
    if store.find_project(project_id).await?.is_none() {
        return Err(AppError::bad_request("Project not found"));
    }

    if store.count_tasks(project_id).await? >= limits.max_tasks_per_project {
        return Err(AppError::bad_request(format!(
            "The maximum number of tasks per project ({}) has been reached",
            limits.max_tasks_per_project
        )));
    }

    let title = required_text(&req.title, "Task title", MAX_NAME_LEN)?;
    let description = optional_description(req.description.as_deref())?;
    if let Some(deadline) = req.deadline {
        check_deadline(deadline, Utc::now())?;
    }

    let task = store
        .create_task(NewTask {
            project_id,
            title,
            description,
            deadline: req.deadline,
        })
        .await?;
    tracing::info!(project_id, task_id = task.id, "Task created");
    Ok(task)
}

/// Look a task up through its project. A task in another project is reported as missing.
pub async fn get(store: &dyn Store, project_id: i64, task_id: i64) -> Result<Task, AppError> {
    store
        .find_task(task_id)
        .await?
        .filter(|t| t.project_id == project_id)
        .ok_or_else(|| AppError::not_found("Task not found"))
}

pub async fn list(store: &dyn Store, project_id: i64) -> Result<Vec<Task>, AppError> {
    projects::get(store, project_id).await?;
    store.list_tasks(project_id).await
}

pub async fn update(
    store: &dyn Store,
    project_id: i64,
    task_id: i64,
    req: UpdateTask,
) -> Result<Task, AppError> {
    let mut task = get(store, project_id, task_id).await?;
    let now = Utc::now();

    if let Some(title) = req.title.as_deref() {
        task.title = required_text(title, "Task title", MAX_NAME_LEN)?;
    }
    if req.description.is_some() {
        task.description = optional_description(req.description.as_deref())?;
    }
    if let Some(deadline) = req.deadline {
        check_deadline(deadline, now)?;
        task.deadline = Some(deadline);
    }
    if let Some(status) = req.status.as_deref() {
        task.set_status(parse_status(status)?, now);
    }

    save(store, &task).await
}

pub async fn change_status(
    store: &dyn Store,
    project_id: i64,
    task_id: i64,
    status: &str,
) -> Result<Task, AppError> {
    let status = parse_status(status)?;
    let mut task = get(store, project_id, task_id).await?;
    let previous = task.status;
    task.set_status(status, Utc::now());

    let task = save(store, &task).await?;
    tracing::info!(task_id, from = %previous, to = %task.status, "Task status changed");
    Ok(task)
}

pub async fn delete(store: &dyn Store, project_id: i64, task_id: i64) -> Result<(), AppError> {
    get(store, project_id, task_id).await?;
    if !store.delete_task(task_id).await? {
        return Err(AppError::not_found("Task not found"));
    }
    tracing::info!(project_id, task_id, "Task deleted");
    Ok(())
}

async fn save(store: &dyn Store, task: &Task) -> Result<Task, AppError> {
    store
        .update_task(task)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))
}
