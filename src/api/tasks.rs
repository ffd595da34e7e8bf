//! Task list endpoints.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use super::error::ApiError;
use super::routes::AppState;
use super::types::{AddTaskParams, ErrorResponse, MessageResponse, TaskListResponse};

/// GET /tasks - List all tasks.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TaskListResponse>, ApiError> {
    let tasks = state
        .tasks
        .list()
        .await
        .map_err(|e| ApiError::store("Error retrieving tasks", e))?;
    Ok(Json(TaskListResponse { tasks }))
}

/// POST /tasks?task_text=... - Add a task.
pub async fn add_task(
    State(state): State<Arc<AppState>>,
    params: Result<Query<AddTaskParams>, QueryRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;

    let id = state
        .tasks
        .add(&params.task_text)
        .await
        .map_err(|e| ApiError::store("Error adding task", e))?;

    tracing::info!("Added task {}", id);
    Ok(Json(MessageResponse::new("Task added successfully!")))
}

/// DELETE /tasks/:task_id - Delete a task.
///
/// A path that is not an integer cannot name a task and is reported as not found.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    task_id: Option<Path<i64>>,
) -> Result<Response, ApiError> {
    let Some(Path(task_id)) = task_id else {
        return Ok(not_found());
    };

    let removed = state
        .tasks
        .delete(task_id)
        .await
        .map_err(|e| ApiError::store("Error deleting task", e))?;

    if removed {
        tracing::info!("Deleted task {}", task_id);
        Ok(Json(MessageResponse::new("Task deleted successfully!")).into_response())
    } else {
        Ok(not_found())
    }
}

fn not_found() -> Response {
    Json(ErrorResponse {
        error: "Task not found".to_string(),
    })
    .into_response()
}
