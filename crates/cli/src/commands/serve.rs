use std::sync::Arc;

use anyhow::Result;
use postakod_core::DirectoryConfig;
use postakod_http::{AppState, create_router};

use crate::open_storage;

pub(crate) async fn run(config: &DirectoryConfig, host: &str, port: u16) -> Result<()> {
    let storage = Arc::new(open_storage(config).await?);
    let state = Arc::new(AppState::new(storage, config)?);

    let router = create_router(state);
    let addr = format!("{host}:{port}");
    tracing::info!(%addr, base_url = %config.base_url, shards = config.shard_count, "starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
