//! HTTP boundary for taskboard.
//!
//! # Responsibility
//! - Translate HTTP requests into use-case calls.
//! - Translate use-case results and errors into HTTP responses.
//!
//! # Invariants
//! - Only this crate decides HTTP status codes.
//! - Every unexpected error is logged before it becomes a 500.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod schema;
pub mod state;

pub use error::{ApiError, ErrorBody, NOT_FOUND_DETAIL};
pub use routes::create_router;
pub use state::{AppState, API_LOG};
