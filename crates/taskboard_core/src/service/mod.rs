//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate exactly one repository call per use case.
//! - Keep the HTTP boundary decoupled from storage details.

pub mod task_service;
