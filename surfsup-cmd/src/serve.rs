//! `serve`: run the weather query API until Ctrl-C.

use anyhow::Context;
use log::info;
use std::net::SocketAddr;
use std::path::Path;
use surfsup_db::Database;

/// Open the pool, bind `bind` and serve requests until interrupted.
///
/// Fails before binding if the database cannot be opened.
pub async fn run_serve(database: &Path, bind: SocketAddr, pool_size: usize) -> anyhow::Result<()> {
    let db = Database::open(database, pool_size)?;

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!(
        "Serving {} on http://{} ({} connections)",
        database.display(),
        listener.local_addr()?,
        db.pool_size()
    );

    axum::serve(listener, surfsup_api::router(db))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_fails_fast_on_missing_database() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.sqlite");
        let bind: SocketAddr = "127.0.0.1:0".parse().unwrap();

        let err = run_serve(&missing, bind, 2).await.unwrap_err();
        assert!(
            format!("{:#}", err).contains("failed to open database"),
            "unexpected error: {:#}",
            err
        );
    }
}
