//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage contract the use cases depend on.
//! - Isolate SQLite query details from use-case orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Task::validate()` before persistence.
//! - Missing records surface as explicit signals (`Ok(None)` or
//!   `RepoError::NotFound`), never as panics.

pub mod task_repo;
