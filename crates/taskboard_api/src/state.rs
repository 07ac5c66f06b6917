//! Shared handler state.

use taskboard_core::{EventLog, TaskRepository};

/// Module name used by boundary log events.
pub const API_LOG: EventLog = EventLog::new("api");

/// Dependencies every handler receives.
///
/// `repository` is cloned into a fresh use case per request.
#[derive(Clone)]
pub struct AppState<R> {
    pub repository: R,
    pub service_log: EventLog,
    pub api_log: EventLog,
}

impl<R: TaskRepository + Clone> AppState<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            service_log: taskboard_core::SERVICE_LOG,
            api_log: API_LOG,
        }
    }
}
