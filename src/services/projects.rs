use serde::Deserialize;

use super::{optional_description, required_text, MAX_NAME_LEN};
use crate::config::Limits;
use crate::error::AppError;
use crate::models::{NewProject, Project};
use crate::store::Store;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update. Absent fields are left unchanged; an empty description clears it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn create(
    store: &dyn Store,
    limits: &Limits,
    req: CreateProject,
) -> Result<Project, AppError> {
    let name = required_text(&req.name, "Project name", MAX_NAME_LEN)?;
    let description = optional_description(req.description.as_deref())?;

    if store.count_projects().await? >= limits.max_projects {
        return Err(AppError::bad_request(format!(
            "The maximum number of projects ({}) has been reached",
            limits.max_projects
        )));
    }

    if store.find_project_by_name(&name).await?.is_some() {
        return Err(AppError::bad_request("Project with this name already exists"));
    }

    let project = store.create_project(NewProject { name, description }).await?;
    tracing::info!(project_id = project.id, "Project created");
    Ok(project)
}

pub async fn get(store: &dyn Store, id: i64) -> Result<Project, AppError> {
    store
        .find_project(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))
}

pub async fn list(store: &dyn Store) -> Result<Vec<Project>, AppError> {
    store.list_projects().await
}

pub async fn update(store: &dyn Store, id: i64, req: UpdateProject) -> Result<Project, AppError> {
    let mut project = get(store, id).await?;

    if let Some(name) = req.name.as_deref() {
        let name = required_text(name, "Project name", MAX_NAME_LEN)?;
        if let Some(other) = store.find_project_by_name(&name).await? {
            if other.id != id {
                return Err(AppError::bad_request(
                    "The new project name conflicts with another project",
                ));
            }
        }
        project.name = name;
    }

    if req.description.is_some() {
        project.description = optional_description(req.description.as_deref())?;
    }

    let project = store
        .update_project(&project)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Project {id} not found")))?;
    tracing::info!(project_id = project.id, "Project updated");
    Ok(project)
}

/// Delete a project and every task in it.
pub async fn delete(store: &dyn Store, id: i64) -> Result<(), AppError> {
    if !store.delete_project(id).await? {
        return Err(AppError::not_found(format!("Project {id} not found")));
    }
    tracing::info!(project_id = id, "Project deleted");
    Ok(())
}
