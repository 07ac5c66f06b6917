//! Error-to-response mapping.
//!
//! # Invariants
//! - NotFound always renders the fixed `NOT_FOUND_DETAIL` message.
//! - Response bodies are `{"detail": "..."}` for every failure.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use taskboard_core::{EventLog, RepoError};
use thiserror::Error;

pub const NOT_FOUND_DETAIL: &str = "Task not found";

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Task not found")]
    NotFound,
    /// Well-formed request whose content breaks a task invariant.
    #[error("{0}")]
    Unprocessable(String),
    /// Request rejected by an extractor before reaching a use case.
    #[error("{detail}")]
    Rejected { status: StatusCode, detail: String },
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a repository error, logging anything that becomes a 500.
    pub fn from_repo(log: EventLog, event: &str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => {
                log.outcome(event, "not_found", format_args!("id={id}"));
                Self::NotFound
            }
            RepoError::Validation(validation) => {
                log.outcome(
                    event,
                    "rejected",
                    format_args!("error_code=invalid_task error={validation}"),
                );
                Self::Unprocessable(validation.to_string())
            }
            other => {
                log.failure(
                    event,
                    format_args!("error_code=unexpected error={other} debug={other:?}"),
                );
                Self::Internal(other.to_string())
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Rejected { status, .. } => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Rejected {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::{ApiError, NOT_FOUND_DETAIL};
    use axum::http::StatusCode;
    use taskboard_core::{EventLog, RepoError, TaskValidationError};

    const LOG: EventLog = EventLog::new("test");

    #[test]
    fn not_found_maps_to_404_with_fixed_detail() {
        let err = ApiError::from_repo(LOG, "task_get", RepoError::NotFound(9999));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), NOT_FOUND_DETAIL);
    }

    #[test]
    fn validation_maps_to_422() {
        let err = ApiError::from_repo(
            LOG,
            "task_create",
            RepoError::Validation(TaskValidationError::EmptyTitle),
        );
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "title must not be empty");
    }

    #[test]
    fn other_errors_map_to_500_with_description() {
        let err = ApiError::from_repo(
            LOG,
            "task_list",
            RepoError::InvalidData("bad row".to_string()),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("bad row"));
    }
}
