use axum::Json;
use axum::extract::Path;
use axum::extract::rejection::JsonRejection;
use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::error::AppError;
use crate::models::{Task, TaskDraft};
use crate::services::TaskService;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/tasks/{id}",
            get(read_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    sqlx::query("select 1").execute(&state.db).await?;
    Ok(StatusCode::OK)
}

async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let service = TaskService::new(state.db.clone());
    let tasks = service.list().await?;
    Ok(Json(tasks))
}

async fn create_task(
    State(state): State<AppState>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let Json(candidate) = payload?;
    let service = TaskService::new(state.db.clone());
    let task = service.create(candidate).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

async fn read_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let service = TaskService::new(state.db.clone());
    let task = service.read(&id).await?;
    Ok(Json(task))
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TaskDraft>, JsonRejection>,
) -> Result<Json<Task>, AppError> {
    let Json(changes) = payload?;
    let service = TaskService::new(state.db.clone());
    let task = service.update(&id, changes).await?;
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let service = TaskService::new(state.db.clone());
    service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
