pub mod projects;
pub mod tasks;

use axum::routing::{get, patch};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Projects
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{project_id}",
            get(projects::get)
                .put(projects::update)
                .delete(projects::delete),
        )
        // Tasks
        .route(
            "/projects/{project_id}/tasks",
            get(tasks::list).post(tasks::create),
        )
        .route(
            "/projects/{project_id}/tasks/{task_id}",
            get(tasks::get)
                .put(tasks::update)
                .patch(tasks::change_status)
                .delete(tasks::delete),
        )
        .route(
            "/projects/{project_id}/tasks/{task_id}/status",
            patch(tasks::change_status),
        )
}
