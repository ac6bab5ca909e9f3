//! Task endpoints

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use dayplan_core::{
    models::{NewTask, Task, TaskPatch},
    params::{CreateTask, DateQuery, UpdateTask},
};
use serde::Serialize;

use super::{
    errors::AppError,
    extract::{ApiJson, ApiPath, ApiQuery},
    AppState, MessageResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
}

#[derive(Serialize)]
pub struct TasksResponse {
    pub tasks: Vec<Task>,
}

#[derive(Serialize)]
pub struct TaskResponse {
    pub task: Task,
}

async fn list_tasks(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<Json<TasksResponse>, AppError> {
    let tasks = state.store.list_tasks(query.date()?).await?;
    Ok(Json(TasksResponse { tasks }))
}

async fn create_task(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateTask>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    let task = state.store.create_task(NewTask::try_from(body)?).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

async fn update_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(body): ApiJson<UpdateTask>,
) -> Result<Json<TaskResponse>, AppError> {
    let task = state.store.update_task(id, TaskPatch::from(body)).await?;
    Ok(Json(TaskResponse { task }))
}

async fn delete_task(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    state.store.delete_task(id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}
