//! Command-line and environment configuration.

use clap::Parser;
use scheduler_core::default_log_level;
use std::path::PathBuf;

/// Task scheduler HTTP service.
#[derive(Debug, Clone, Parser)]
#[command(name = "scheduler", version, about, long_about = None)]
pub struct Config {
    /// Interface to listen on.
    #[arg(long, env = "SCHEDULER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// TCP port to listen on.
    #[arg(long, env = "SCHEDULER_PORT", default_value_t = 7540)]
    pub port: u16,

    /// SQLite database file; created and migrated on first start.
    #[arg(long, env = "SCHEDULER_DBFILE", default_value = "scheduler.db")]
    pub db_file: PathBuf,

    /// Directory served for every non-API path.
    #[arg(long, env = "SCHEDULER_WEB_DIR", default_value = "./web")]
    pub web_dir: PathBuf,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "SCHEDULER_LOG_LEVEL", default_value_t = default_log_level().to_string())]
    pub log_level: String,

    /// Write rotating log files here instead of stderr.
    #[arg(long, env = "SCHEDULER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
