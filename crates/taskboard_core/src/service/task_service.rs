//! Task use cases.
//!
//! # Responsibility
//! - Provide one orchestrator per CRUD operation.
//! - Log the outcome of each successful call through the injected
//!   [`EventLog`].
//!
//! # Invariants
//! - Each `execute` performs exactly one repository call.
//! - Repository errors are returned unchanged; nothing is retried or
//!   swallowed.

use crate::logging::EventLog;
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use chrono::Utc;

/// Module name used by use-case log events.
pub const SERVICE_LOG: EventLog = EventLog::new("service");

/// Creates a task from caller-supplied title and description.
pub struct CreateTask<R: TaskRepository> {
    repo: R,
    log: EventLog,
}

impl<R: TaskRepository> CreateTask<R> {
    pub fn new(repo: R, log: EventLog) -> Self {
        Self { repo, log }
    }

    /// Persists a new task with `completed = false` and `created_at = now`.
    pub async fn execute(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> RepoResult<Task> {
        let task = Task::new_transient(title, description, Utc::now());
        let created = self.repo.create(&task).await?;
        self.log.ok(
            "task_create",
            format_args!(
                "id={} title={}",
                created.id.unwrap_or_default(),
                created.title
            ),
        );
        Ok(created)
    }
}

/// Fetches one task by id.
pub struct GetTask<R: TaskRepository> {
    repo: R,
    log: EventLog,
}

impl<R: TaskRepository> GetTask<R> {
    pub fn new(repo: R, log: EventLog) -> Self {
        Self { repo, log }
    }

    /// Returns `Ok(None)` when the id is unknown.
    pub async fn execute(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let found = self.repo.get_by_id(id).await?;
        match &found {
            Some(task) => self
                .log
                .ok("task_get", format_args!("id={} title={}", id, task.title)),
            None => self
                .log
                .outcome("task_get", "not_found", format_args!("id={id}")),
        }
        Ok(found)
    }
}

/// Lists every stored task.
pub struct ListTasks<R: TaskRepository> {
    repo: R,
    log: EventLog,
}

impl<R: TaskRepository> ListTasks<R> {
    pub fn new(repo: R, log: EventLog) -> Self {
        Self { repo, log }
    }

    pub async fn execute(&self) -> RepoResult<Vec<Task>> {
        let tasks = self.repo.list_all().await?;
        self.log
            .ok("task_list", format_args!("count={}", tasks.len()));
        Ok(tasks)
    }
}

/// Replaces title, description and completion of a stored task.
pub struct UpdateTask<R: TaskRepository> {
    repo: R,
    log: EventLog,
}

impl<R: TaskRepository> UpdateTask<R> {
    pub fn new(repo: R, log: EventLog) -> Self {
        Self { repo, log }
    }

    /// `task.created_at` is ignored; the stored value is returned.
    pub async fn execute(&self, task: &Task) -> RepoResult<Task> {
        let updated = self.repo.update(task).await?;
        self.log.ok(
            "task_update",
            format_args!(
                "id={} title={} completed={}",
                updated.id.unwrap_or_default(),
                updated.title,
                updated.completed
            ),
        );
        Ok(updated)
    }
}

/// Removes a task by id.
pub struct DeleteTask<R: TaskRepository> {
    repo: R,
    log: EventLog,
}

impl<R: TaskRepository> DeleteTask<R> {
    pub fn new(repo: R, log: EventLog) -> Self {
        Self { repo, log }
    }

    pub async fn execute(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete(id).await?;
        self.log.ok("task_delete", format_args!("id={id}"));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CreateTask, DeleteTask, GetTask, ListTasks, UpdateTask, SERVICE_LOG};
    use crate::model::task::{Task, TaskId};
    use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    /// Records calls and serves canned results.
    #[derive(Default)]
    struct RecordingRepo {
        created: Mutex<Vec<Task>>,
        deleted: Mutex<Vec<TaskId>>,
        stored: Option<Task>,
        missing: bool,
    }

    fn stored_task() -> Task {
        Task {
            id: Some(1),
            title: "Test".to_string(),
            description: "Description".to_string(),
            completed: false,
            created_at: Utc::now(),
        }
    }

    #[async_trait]
    impl<'a> TaskRepository for &'a RecordingRepo {
        async fn create(&self, task: &Task) -> RepoResult<Task> {
            self.created.lock().unwrap().push(task.clone());
            Ok(Task {
                id: Some(42),
                ..task.clone()
            })
        }

        async fn get_by_id(&self, _id: TaskId) -> RepoResult<Option<Task>> {
            Ok(self.stored.clone())
        }

        async fn list_all(&self) -> RepoResult<Vec<Task>> {
            Ok(self.stored.clone().into_iter().collect())
        }

        async fn update(&self, task: &Task) -> RepoResult<Task> {
            if self.missing {
                return Err(RepoError::NotFound(task.id.unwrap_or_default()));
            }
            Ok(task.clone())
        }

        async fn delete(&self, id: TaskId) -> RepoResult<()> {
            if self.missing {
                return Err(RepoError::NotFound(id));
            }
            self.deleted.lock().unwrap().push(id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn create_builds_transient_task_with_defaults() {
        let repo = RecordingRepo::default();
        let before = Utc::now();

        let task = CreateTask::new(&repo, SERVICE_LOG)
            .execute("Test", "Description")
            .await
            .unwrap();

        assert_eq!(task.id, Some(42));
        assert_eq!(task.title, "Test");
        assert_eq!(task.description, "Description");
        assert!(!task.completed);
        assert!(task.created_at >= before);
        assert!(task.created_at - before < Duration::seconds(5));

        let sent = repo.created.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].is_transient());
    }

    #[tokio::test]
    async fn get_returns_repository_result_unchanged() {
        let repo = RecordingRepo {
            stored: Some(stored_task()),
            ..RecordingRepo::default()
        };

        let task = GetTask::new(&repo, SERVICE_LOG).execute(1).await.unwrap();
        assert_eq!(task.map(|task| task.title), Some("Test".to_string()));
    }

    #[tokio::test]
    async fn get_passes_through_absent_signal() {
        let repo = RecordingRepo::default();
        let task = GetTask::new(&repo, SERVICE_LOG).execute(9999).await.unwrap();
        assert!(task.is_none());
    }

    #[tokio::test]
    async fn list_returns_every_task() {
        let repo = RecordingRepo {
            stored: Some(stored_task()),
            ..RecordingRepo::default()
        };

        let tasks = ListTasks::new(&repo, SERVICE_LOG).execute().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Test");
    }

    #[tokio::test]
    async fn update_returns_replacement() {
        let repo = RecordingRepo::default();
        let replacement = Task {
            title: "Updated".to_string(),
            description: "Updated Desc".to_string(),
            completed: true,
            ..stored_task()
        };

        let updated = UpdateTask::new(&repo, SERVICE_LOG)
            .execute(&replacement)
            .await
            .unwrap();
        assert_eq!(updated.title, "Updated");
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn delete_forwards_id_once() {
        let repo = RecordingRepo::default();
        DeleteTask::new(&repo, SERVICE_LOG).execute(1).await.unwrap();
        assert_eq!(*repo.deleted.lock().unwrap(), vec![1]);
    }

    #[tokio::test]
    async fn delete_propagates_not_found() {
        let repo = RecordingRepo {
            missing: true,
            ..RecordingRepo::default()
        };

        let err = DeleteTask::new(&repo, SERVICE_LOG)
            .execute(9999)
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::NotFound(9999)));
    }
}
