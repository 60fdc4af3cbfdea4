//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the storage capability injected into use-case services.
//! - Isolate SQLite query details from workflow orchestration.
//!
//! # Invariants
//! - Repository writes must enforce task validation before persistence.
//! - Update/delete report `NotFound` when no row matched.

pub mod task_repo;
