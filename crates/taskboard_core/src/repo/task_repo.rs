//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the five CRUD operations over canonical `tasks` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `Task::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `created_at` is written once by `create` and never by `update`.
//! - Each operation checks out one pooled connection and commits once.

use crate::db::schema::{first_missing_column, table_exists, REQUIRED_COLUMNS, TASKS_TABLE};
use crate::db::{ConnectionPool, DbError};
use crate::model::task::{Task, TaskId, TaskValidationError};
use async_trait::async_trait;
use rusqlite::{params, Connection, Row};
use thiserror::Error;

const TASK_COLUMNS: &str = "id, title, description, completed, created_at";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("{0}")]
    Validation(#[from] TaskValidationError),
    #[error("{0}")]
    Db(#[from] DbError),
    #[error("task not found: {0}")]
    NotFound(TaskId),
    #[error("task is already persisted with id {0}")]
    AlreadyPersisted(TaskId),
    #[error("task has no id; only persisted tasks can be updated")]
    MissingId,
    #[error("invalid persisted task data: {0}")]
    InvalidData(String),
    #[error("required table `{0}` is missing")]
    MissingRequiredTable(&'static str),
    #[error("required column `{table}.{column}` is missing")]
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    #[error("storage task did not complete: {0}")]
    Join(String),
}

impl RepoError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<r2d2::Error> for RepoError {
    fn from(value: r2d2::Error) -> Self {
        Self::Db(DbError::Pool(value))
    }
}

/// Repository interface for task CRUD operations.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a transient task and returns it with its assigned id.
    async fn create(&self, task: &Task) -> RepoResult<Task>;
    /// Returns `Ok(None)` when no task has `id`.
    async fn get_by_id(&self, id: TaskId) -> RepoResult<Option<Task>>;
    async fn list_all(&self) -> RepoResult<Vec<Task>>;
    /// Replaces title, description and completion of the stored task.
    async fn update(&self, task: &Task) -> RepoResult<Task>;
    async fn delete(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Clone)]
pub struct SqliteTaskRepository {
    pool: ConnectionPool,
}

impl SqliteTaskRepository {
    /// Creates a repository after checking the pool's schema.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when `tasks` does not exist.
    /// - `MissingRequiredColumn` when `tasks` lacks a column this
    ///   repository reads or writes.
    pub fn try_new(pool: ConnectionPool) -> RepoResult<Self> {
        {
            let conn = pool.get()?;
            if !table_exists(&conn, TASKS_TABLE)? {
                return Err(RepoError::MissingRequiredTable(TASKS_TABLE));
            }
            if let Some(column) = first_missing_column(&conn, TASKS_TABLE, REQUIRED_COLUMNS)? {
                return Err(RepoError::MissingRequiredColumn {
                    table: TASKS_TABLE,
                    column,
                });
            }
        }
        Ok(Self { pool })
    }

    async fn with_connection<T, F>(&self, operation: F) -> RepoResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> RepoResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            operation(&conn)
        })
        .await
        .map_err(|err| RepoError::Join(err.to_string()))?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, task: &Task) -> RepoResult<Task> {
        if let Some(id) = task.id {
            return Err(RepoError::AlreadyPersisted(id));
        }
        task.validate()?;

        let task = task.clone();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "INSERT INTO tasks (title, description, completed, created_at)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {TASK_COLUMNS};"
            ))?;
            let mut rows = stmt.query(params![
                task.title.as_str(),
                task.description.as_str(),
                bool_to_int(task.completed),
                task.created_at,
            ])?;

            if let Some(row) = rows.next()? {
                return parse_task_row(row);
            }

            Err(RepoError::InvalidData("insert returned no row".to_string()))
        })
        .await
    }

    async fn get_by_id(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.with_connection(move |conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            if let Some(row) = rows.next()? {
                return Ok(Some(parse_task_row(row)?));
            }

            Ok(None)
        })
        .await
    }

    async fn list_all(&self) -> RepoResult<Vec<Task>> {
        self.with_connection(|conn| {
            let mut stmt =
                conn.prepare(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY id ASC;"))?;
            let mut rows = stmt.query([])?;
            let mut tasks = Vec::new();

            while let Some(row) = rows.next()? {
                tasks.push(parse_task_row(row)?);
            }

            Ok(tasks)
        })
        .await
    }

    async fn update(&self, task: &Task) -> RepoResult<Task> {
        let id = task.id.ok_or(RepoError::MissingId)?;
        task.validate()?;

        let task = task.clone();
        self.with_connection(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "UPDATE tasks
                 SET
                    title = ?1,
                    description = ?2,
                    completed = ?3
                 WHERE id = ?4
                 RETURNING {TASK_COLUMNS};"
            ))?;
            let mut rows = stmt.query(params![
                task.title.as_str(),
                task.description.as_str(),
                bool_to_int(task.completed),
                id,
            ])?;

            if let Some(row) = rows.next()? {
                return parse_task_row(row);
            }

            Err(RepoError::NotFound(id))
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> RepoResult<()> {
        self.with_connection(move |conn| {
            let changed = conn.execute("DELETE FROM tasks WHERE id = ?1;", [id])?;
            if changed == 0 {
                return Err(RepoError::NotFound(id));
            }

            Ok(())
        })
        .await
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        description: row.get("description")?,
        completed,
        created_at: row.get("created_at")?,
    };
    task.validate()
        .map_err(|err| RepoError::InvalidData(format!("invalid task row: {err}")))?;
    Ok(task)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
