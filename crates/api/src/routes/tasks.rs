//! Household task routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::double_option;
use crate::{ApiResult, AppState, extractors::ValidatedJson, middleware::AuthUser};
use hearth_core::task::{NewTask, TaskPatch};
use hearth_db::{TaskRepository, entities::tasks};

/// Creates the task routes (requires auth middleware to be applied externally).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route("/tasks/{id}/complete", post(complete_task))
}

/// Query parameters for listing tasks.
#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Include completed tasks.
    #[serde(default = "default_include_completed")]
    pub include_completed: bool,
}

const fn default_include_completed() -> bool {
    true
}

/// Request body for creating a task.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    /// What needs doing.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Details.
    pub description: Option<String>,
    /// When it is due.
    pub due_date: Option<NaiveDate>,
}

/// Request body for updating a task. Explicit nulls clear optional fields.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    /// New title.
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    /// New description.
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    /// New due date.
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<NaiveDate>>,
}

/// GET `/tasks`
async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListTasksQuery>,
) -> ApiResult<Json<Vec<tasks::Model>>> {
    let repo = TaskRepository::new(state.conn());
    Ok(Json(repo.list(auth.user_id(), query.include_completed).await?))
}

/// POST `/tasks`
async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<tasks::Model>)> {
    let repo = TaskRepository::new(state.conn());
    let task = repo
        .create(
            auth.user_id(),
            NewTask {
                title: payload.title,
                description: payload.description,
                due_date: payload.due_date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT `/tasks/{id}`
async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<tasks::Model>> {
    let repo = TaskRepository::new(state.conn());
    let task = repo
        .update(
            auth.user_id(),
            id,
            TaskPatch {
                title: payload.title,
                description: payload.description,
                due_date: payload.due_date,
            },
        )
        .await?;
    Ok(Json(task))
}

/// POST `/tasks/{id}/complete` - One-way; completing twice is `already_in_state`.
async fn complete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<tasks::Model>> {
    let repo = TaskRepository::new(state.conn());
    Ok(Json(repo.complete(auth.user_id(), id).await?))
}

/// DELETE `/tasks/{id}`
async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    let repo = TaskRepository::new(state.conn());
    repo.delete(auth.user_id(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
