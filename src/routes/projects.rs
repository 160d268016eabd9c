use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;
use crate::models::Project;
use crate::services::projects::{self, CreateProject, UpdateProject};
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<Project>>, AppError> {
    let projects = projects::list(state.store.as_ref()).await?;
    Ok(Json(projects))
}

pub async fn create(
    State(state): State<SharedState>,
    Json(req): Json<CreateProject>,
) -> Result<(StatusCode, Json<Project>), AppError> {
    let project = projects::create(state.store.as_ref(), &state.config.limits, req).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<Json<Project>, AppError> {
    let project = projects::get(state.store.as_ref(), id).await?;
    Ok(Json(project))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateProject>,
) -> Result<Json<Project>, AppError> {
    let project = projects::update(state.store.as_ref(), id, req).await?;
    Ok(Json(project))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    projects::delete(state.store.as_ref(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
