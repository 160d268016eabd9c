use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::models::{Task, TaskStatus};

pub async fn list_by_project(pool: &PgPool, project_id: i64) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE project_id = $1 ORDER BY id")
        .bind(project_id)
        .fetch_all(pool)
        .await
}

pub async fn count_by_project(pool: &PgPool, project_id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks WHERE project_id = $1")
        .bind(project_id)
        .fetch_one(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    project_id: i64,
    title: &str,
    description: Option<&str>,
    deadline: Option<DateTime<Utc>>,
) -> Result<Task, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "INSERT INTO tasks (project_id, title, description, deadline)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(project_id)
    .bind(title)
    .bind(description)
    .bind(deadline)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn update(pool: &PgPool, task: &Task) -> Result<Option<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks
         SET title = $2, description = $3, status = $4, deadline = $5, closed_at = $6
         WHERE id = $1 RETURNING *",
    )
    .bind(task.id)
    .bind(&task.title)
    .bind(task.description.as_deref())
    .bind(task.status)
    .bind(task.deadline)
    .bind(task.closed_at)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Close every open task whose deadline is before `now` in a single statement.
pub async fn close_overdue(pool: &PgPool, now: DateTime<Utc>) -> Result<Vec<Task>, sqlx::Error> {
    sqlx::query_as::<_, Task>(
        "UPDATE tasks SET status = $2, closed_at = $1
         WHERE deadline < $1 AND status <> $2
         RETURNING *",
    )
    .bind(now)
    .bind(TaskStatus::Done)
    .fetch_all(pool)
    .await
}
