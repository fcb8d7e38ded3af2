use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::db::repository;
use crate::error::AppError;
use crate::models::{Task, TaskDraft, validate};

/// Authoritative CRUD for tasks. Every write is validated before it reaches
/// the database.
pub struct TaskService {
    db: SqlitePool,
}

impl TaskService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn create(&self, candidate: TaskDraft) -> Result<Task, AppError> {
        let fields = validate(&candidate)?;
        let task = Task::from_validated(Uuid::new_v4().to_string(), fields, Utc::now());

        repository::insert_task(&self.db, &task).await?;
        info!("created task {} ({})", task.id, task.title);
        Ok(task)
    }

    pub async fn read(&self, id: &str) -> Result<Task, AppError> {
        repository::find_task_by_id(&self.db, id)
            .await?
            .ok_or_else(|| AppError::NotFound(id.to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Task>, AppError> {
        let tasks = repository::fetch_tasks(&self.db).await?;
        debug!("listing {} tasks", tasks.len());
        Ok(tasks)
    }

    /// Lays `changes` over the stored task and validates the merged result,
    /// so a partial update can never leave a task violating the model.
    pub async fn update(&self, id: &str, changes: TaskDraft) -> Result<Task, AppError> {
        let mut task = self.read(id).await?;
        let merged = changes.merged_onto(&TaskDraft::from_task(&task));
        let fields = validate(&merged)?;
        task.apply(fields, Utc::now());

        if !repository::update_task(&self.db, &task).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        info!("updated task {}", task.id);
        Ok(task)
    }

    /// Deleting an id that is already gone is an error, not a no-op.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        if !repository::delete_task(&self.db, id).await? {
            return Err(AppError::NotFound(id.to_string()));
        }
        info!("deleted task {}", id);
        Ok(())
    }
}
