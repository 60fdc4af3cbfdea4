//! Scheduler HTTP service entry point.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use scheduler_core::db::open_db;
use scheduler_core::init_logging;
use scheduler_server::{router, AppState, Config};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_dir = config
        .log_dir
        .as_deref()
        .map(std::path::absolute)
        .transpose()
        .context("failed to resolve log directory")?;
    init_logging(&config.log_level, log_dir.as_deref()).context("failed to initialize logging")?;

    let conn = open_db(&config.db_file)
        .with_context(|| format!("failed to open database `{}`", config.db_file.display()))?;
    let app = router(AppState::new(conn), &config.web_dir);

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr()))?;
    info!(
        "event=server_start module=server status=ok addr={} db_file={} web_dir={}",
        listener.local_addr()?,
        config.db_file.display(),
        config.web_dir.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_signal module=server status=error error={err}");
        std::future::pending::<()>().await;
    }
}
