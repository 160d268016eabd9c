pub mod autoclose;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::{AppState, SharedState};
use crate::store::SharedStore;

pub fn build_app(store: SharedStore, config: Config) -> Router {
    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState { store, config });

    Router::new()
        .merge(routes::api_routes())
        .route("/", get(root))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::overriding(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(RequestBodyLimitLayer::new(max_body_size)),
        )
        .with_state(state)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "message": "ToDoList API is running" }))
}

async fn health() -> &'static str {
    "ok"
}
