use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::Task;
use crate::services::tasks::{self, CreateTask, UpdateTask};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct ChangeStatus {
    pub status: String,
}

pub async fn list(
    State(state): State<SharedState>,
    Path(project_id): Path<i64>,
) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = tasks::list(state.store.as_ref(), project_id).await?;
    Ok(Json(tasks))
}

pub async fn create(
    State(state): State<SharedState>,
    Path(project_id): Path<i64>,
    Json(req): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let task = tasks::create(state.store.as_ref(), &state.config.limits, project_id, req).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get(
    State(state): State<SharedState>,
    Path((project_id, task_id)): Path<(i64, i64)>,
) -> Result<Json<Task>, AppError> {
    let task = tasks::get(state.store.as_ref(), project_id, task_id).await?;
    Ok(Json(task))
}

pub async fn update(
    State(state): State<SharedState>,
    Path((project_id, task_id)): Path<(i64, i64)>,
    Json(req): Json<UpdateTask>,
) -> Result<Json<Task>, AppError> {
    let task = tasks::update(state.store.as_ref(), project_id, task_id, req).await?;
    Ok(Json(task))
}

pub async fn change_status(
    State(state): State<SharedState>,
    Path((project_id, task_id)): Path<(i64, i64)>,
    Json(req): Json<ChangeStatus>,
) -> Result<Json<Task>, AppError> {
    let task = tasks::change_status(state.store.as_ref(), project_id, task_id, &req.status).await?;
    Ok(Json(task))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path((project_id, task_id)): Path<(i64, i64)>,
) -> Result<StatusCode, AppError> {
    tasks::delete(state.store.as_ref(), project_id, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
