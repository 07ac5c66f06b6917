//! Domain model for tracked tasks.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//!
//! # Invariants
//! - A task is either transient (no id) or persisted (storage-assigned id).
//! - Deletion is a hard delete; there are no tombstones.

pub mod task;
