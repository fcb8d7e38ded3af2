use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::error::AppError;
use crate::models::task::format_date_time;
use crate::models::{Task, UnknownVariant};

const TASK_COLUMNS: &str = "id, title, description, due_date, priority, completed, category, tags, reminder_date, notes, status, created_at, updated_at";

/// A `tasks` row as SQLite stores it: enums as their wire names, tags as a
/// JSON array and date-times as RFC 3339 text.
#[derive(Debug, FromRow)]
struct TaskRow {
    id: String,
    title: String,
    description: String,
    due_date: String,
    priority: String,
    completed: bool,
    category: String,
    tags: String,
    reminder_date: Option<String>,
    notes: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, detail: String| {
            AppError::CorruptRecord(format!("task {} has invalid {}: {}", row.id, field, detail))
        };

        let reminder_date = match &row.reminder_date {
            Some(raw) => Some(parse_timestamp(raw).map_err(|e| corrupt("reminder_date", e))?),
            None => None,
        };

        Ok(Task {
            title: row.title.clone(),
            description: row.description.clone(),
            due_date: parse_timestamp(&row.due_date).map_err(|e| corrupt("due_date", e))?,
            priority: row
                .priority
                .parse()
                .map_err(|e: UnknownVariant| corrupt("priority", e.to_string()))?,
            completed: row.completed,
            category: row
                .category
                .parse()
                .map_err(|e: UnknownVariant| corrupt("category", e.to_string()))?,
            tags: serde_json::from_str(&row.tags).map_err(|e| corrupt("tags", e.to_string()))?,
            reminder_date,
            notes: row.notes.clone(),
            status: row
                .status
                .parse()
                .map_err(|e: UnknownVariant| corrupt("status", e.to_string()))?,
            created_at: parse_timestamp(&row.created_at).map_err(|e| corrupt("created_at", e))?,
            updated_at: parse_timestamp(&row.updated_at).map_err(|e| corrupt("updated_at", e))?,
            id: row.id,
        })
    }
}

fn parse_timestamp(ts: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(ts)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| e.to_string())
}

fn encode_tags(tags: &[String]) -> Result<String, AppError> {
    serde_json::to_string(tags).map_err(|e| AppError::CorruptRecord(e.to_string()))
}

/// All tasks in insertion order.
pub async fn fetch_tasks(db: &SqlitePool) -> Result<Vec<Task>, AppError> {
    let rows = sqlx::query_as::<_, TaskRow>(&format!(
        "SELECT {} FROM tasks ORDER BY rowid",
        TASK_COLUMNS
    ))
    .fetch_all(db)
    .await?;

    rows.into_iter().map(Task::try_from).collect()
}

pub async fn find_task_by_id(db: &SqlitePool, id: &str) -> Result<Option<Task>, AppError> {
    let row = sqlx::query_as::<_, TaskRow>(&format!(
        "SELECT {} FROM tasks WHERE id = ?",
        TASK_COLUMNS
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;

    row.map(Task::try_from).transpose()
}

pub async fn insert_task(db: &SqlitePool, task: &Task) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO tasks
            (id, title, description, due_date, priority, completed, category,
            tags, reminder_date, notes, status, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        "#,
    )
    .bind(&task.id)
    .bind(&task.title)
    .bind(&task.description)
    .bind(format_date_time(&task.due_date))
    .bind(task.priority.as_str())
    .bind(task.completed)
    .bind(task.category.as_str())
    .bind(encode_tags(&task.tags)?)
    .bind(task.reminder_date.as_ref().map(format_date_time))
    .bind(&task.notes)
    .bind(task.status.as_str())
    .bind(format_date_time(&task.created_at))
    .bind(format_date_time(&task.updated_at))
    .execute(db)
    .await?;

    Ok(())
}

/// Writes every mutable column of `task`. Returns `false` when no row has
/// that id.
pub async fn update_task(db: &SqlitePool, task: &Task) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE tasks
        SET title = ?1,
            description = ?2,
            due_date = ?3,
            priority = ?4,
            completed = ?5,
            category = ?6,
            tags = ?7,
            reminder_date = ?8,
            notes = ?9,
            status = ?10,
            updated_at = ?11
        WHERE id = ?12
        "#,
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(format_date_time(&task.due_date))
    .bind(task.priority.as_str())
    .bind(task.completed)
    .bind(task.category.as_str())
    .bind(encode_tags(&task.tags)?)
    .bind(task.reminder_date.as_ref().map(format_date_time))
    .bind(&task.notes)
    .bind(task.status.as_str())
    .bind(format_date_time(&task.updated_at))
    .bind(&task.id)
    .execute(db)
    .await?
    .rows_affected();

    Ok(result > 0)
}

pub async fn delete_task(db: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
