//! HTTP surface for the task scheduler.
//!
//! Routes JSON task CRUD, the next-date helper and static web assets onto
//! `scheduler_core`.

pub mod api;
pub mod config;
pub mod state;

pub use api::router;
pub use config::Config;
pub use state::AppState;
