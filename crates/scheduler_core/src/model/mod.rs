//! Domain model for scheduled tasks.
//!
//! # Invariants
//! - Every persisted task is identified by its SQLite rowid.
//! - Deletion is a hard delete; completed one-off tasks leave no row behind.

pub mod task;
