//! Task domain model.
//!
//! # Responsibility
//! - Define the single record tracked by the service.
//! - Provide lifecycle helpers for transient/persisted state.
//!
//! # Invariants
//! - `id` is assigned by storage and never changes afterwards.
//! - `created_at` is set once at creation and never mutated.
//! - `title` is non-empty after trimming.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage-assigned task identifier.
pub type TaskId = i64;

/// Validation errors for task invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TaskValidationError {
    /// `title` is empty or whitespace only.
    #[error("title must not be empty")]
    EmptyTitle,
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// `None` until the persistence adapter assigns one.
    pub id: Option<TaskId>,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a transient task that has not been stored yet.
    ///
    /// # Invariants
    /// - `id` starts as `None`.
    /// - `completed` starts as `false`.
    pub fn new_transient(
        title: impl Into<String>,
        description: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at,
        }
    }

    /// Returns whether storage has assigned an id to this task.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn is_transient(&self) -> bool {
        self.id.is_none()
    }

    /// Validates field invariants.
    ///
    /// Repository write paths call this before any SQL mutation.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskValidationError};
    use chrono::Utc;

    #[test]
    fn new_transient_sets_defaults() {
        let now = Utc::now();
        let task = Task::new_transient("write docs", "", now);

        assert_eq!(task.id, None);
        assert!(task.is_transient());
        assert!(!task.is_persisted());
        assert!(!task.completed);
        assert_eq!(task.created_at, now);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let task = Task::new_transient("   ", "body", Utc::now());
        assert_eq!(task.validate(), Err(TaskValidationError::EmptyTitle));
    }

    #[test]
    fn transient_task_serializes_null_id() {
        let task = Task::new_transient("write docs", "", Utc::now());
        let json = serde_json::to_value(&task).unwrap();

        assert!(json["id"].is_null());
        assert_eq!(json["title"], "write docs");
        assert_eq!(json["completed"], false);

        let back: Task = serde_json::from_value(json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn validate_accepts_empty_description() {
        let task = Task::new_transient("title", "", Utc::now());
        assert!(task.validate().is_ok());
    }
}
