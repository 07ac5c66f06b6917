//! Request and response bodies.
//!
//! # Invariants
//! - `created_at` is rendered as an RFC 3339 UTC string.
//! - Responses are only built from persisted tasks.

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskboard_core::{Task, TaskId};

/// Body of `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
}

/// Body of `PUT /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
}

impl UpdateTaskRequest {
    /// Builds the replacement task handed to the update use case.
    ///
    /// Storage keeps its own `created_at`; the value set here is never
    /// written.
    pub fn into_task(self) -> Task {
        Task {
            id: Some(self.id),
            title: self.title,
            description: self.description,
            completed: self.completed,
            created_at: Utc::now(),
        }
    }
}

/// Wire representation of a persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<Task> for TaskResponse {
    type Error = ApiError;

    fn try_from(task: Task) -> Result<Self, Self::Error> {
        let id = task
            .id
            .ok_or_else(|| ApiError::Internal("storage returned a task without id".to_string()))?;
        Ok(Self {
            id,
            title: task.title,
            description: task.description,
            completed: task.completed,
            created_at: task.created_at,
        })
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::{TaskResponse, UpdateTaskRequest};
    use chrono::{TimeZone, Utc};
    use taskboard_core::Task;

    #[test]
    fn task_response_serializes_wire_fields() {
        let task = Task {
            id: Some(3),
            title: "ship".to_string(),
            description: String::new(),
            completed: true,
            created_at: Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(TaskResponse::try_from(task).unwrap()).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["title"], "ship");
        assert_eq!(json["description"], "");
        assert_eq!(json["completed"], true);
        assert_eq!(json["created_at"], "2026-02-13T10:00:00Z");
    }

    #[test]
    fn transient_task_cannot_become_response() {
        let task = Task::new_transient("draft", "", Utc::now());
        assert!(TaskResponse::try_from(task).is_err());
    }

    #[test]
    fn update_request_carries_id_into_task() {
        let request = UpdateTaskRequest {
            id: 5,
            title: "t".to_string(),
            description: "d".to_string(),
            completed: true,
        };

        let task = request.into_task();
        assert_eq!(task.id, Some(5));
        assert!(task.completed);
    }
}
