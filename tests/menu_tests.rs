use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use todo::cli::menu::{project_overview, reported};
use todo::cli::Menu;
use todo::config::Limits;
use todo::error::AppError;
use todo::models::{NewProject, NewTask, Project, Task};
use todo::services::projects::{self, CreateProject};
use todo::services::tasks;
use todo::store::{MemoryStore, Store};

/// A store whose every call fails as if the database went away.
struct UnavailableStore;

fn unavailable() -> AppError {
    AppError::Database(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl Store for UnavailableStore {
    async fn create_project(&self, _project: NewProject) -> Result<Project, AppError> {
        Err(unavailable())
    }
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        Err(unavailable())
    }
    async fn find_project(&self, _id: i64) -> Result<Option<Project>, AppError> {
        Err(unavailable())
    }
    async fn find_project_by_name(&self, _name: &str) -> Result<Option<Project>, AppError> {
        Err(unavailable())
    }
    async fn count_projects(&self) -> Result<usize, AppError> {
        Err(unavailable())
    }
    async fn update_project(&self, _project: &Project) -> Result<Option<Project>, AppError> {
        Err(unavailable())
    }
    async fn delete_project(&self, _id: i64) -> Result<bool, AppError> {
        Err(unavailable())
    }
    async fn create_task(&self, _task: NewTask) -> Result<Task, AppError> {
        Err(unavailable())
    }
    async fn list_tasks(&self, _project_id: i64) -> Result<Vec<Task>, AppError> {
        Err(unavailable())
    }
    async fn count_tasks(&self, _project_id: i64) -> Result<usize, AppError> {
        Err(unavailable())
    }
    async fn find_task(&self, _id: i64) -> Result<Option<Task>, AppError> {
        Err(unavailable())
    }
    async fn update_task(&self, _task: &Task) -> Result<Option<Task>, AppError> {
        Err(unavailable())
    }
    async fn delete_task(&self, _id: i64) -> Result<bool, AppError> {
        Err(unavailable())
    }
    async fn close_overdue_tasks(&self, _now: DateTime<Utc>) -> Result<Vec<Task>, AppError> {
        Err(unavailable())
    }
}

#[test]
fn reported_passes_values_through_and_swallows_errors() {
    assert_eq!(reported::<i32>(Ok(7)), Some(7));
    assert_eq!(reported::<i32>(Err(AppError::bad_request("Invalid status"))), None);
}

#[tokio::test]
async fn store_failures_surface_as_none_instead_of_aborting() {
    let store = UnavailableStore;

    assert!(project_overview(&store).await.is_err());
    assert!(reported(project_overview(&store).await).is_none());
    assert!(reported(tasks::list(&store, 1).await).is_none());
}

#[tokio::test]
async fn current_project_keeps_selection_when_lookup_fails() {
    let mut menu = Menu::new(Arc::new(UnavailableStore), Limits::default());
    menu.select_project(1);

    assert!(menu.current_project().await.is_none());
    assert_eq!(menu.selected_project_id(), Some(1));
}

#[tokio::test]
async fn current_project_clears_selection_of_deleted_project() {
    let store = Arc::new(MemoryStore::new());
    let project = projects::create(
        store.as_ref(),
        &Limits::default(),
        CreateProject {
            name: "Home".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();

    let mut menu = Menu::new(store.clone(), Limits::default());
    menu.select_project(project.id);
    assert_eq!(menu.current_project().await.map(|p| p.id), Some(project.id));

    projects::delete(store.as_ref(), project.id).await.unwrap();
    assert!(menu.current_project().await.is_none());
    assert_eq!(menu.selected_project_id(), None);
}

#[tokio::test]
async fn project_overview_counts_tasks_per_status() {
    let store = MemoryStore::new();
    let limits = Limits::default();
    let home = projects::create(
        &store,
        &limits,
        CreateProject {
            name: "Home".to_string(),
            description: None,
        },
    )
    .await
    .unwrap();
    for title in ["Dishes", "Laundry"] {
        tasks::create(
            &store,
            &limits,
            home.id,
            tasks::CreateTask {
                title: title.to_string(),
                description: None,
                deadline: None,
            },
        )
        .await
        .unwrap();
    }
    tasks::change_status(&store, home.id, 1, "done").await.unwrap();

    let overview = project_overview(&store).await.unwrap();
    assert_eq!(overview.len(), 1);
    let (project, counts) = &overview[0];
    assert_eq!(project.name, "Home");
    assert_eq!((counts.todo, counts.doing, counts.done), (1, 0, 1));
}
