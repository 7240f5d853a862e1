use std::sync::Arc;

use anyhow::Result;
use axum::routing::{get, post};
use axum::{serve, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::handlers;
use crate::connector::api::Container;

/// Builds the application router with all endpoints.
pub fn create_router(container: Arc<Container>) -> Router {
    let api = Router::new()
        .route("/load-json", post(handlers::load_json))
        .route("/query", post(handlers::query))
        .route("/health", get(handlers::health));

    Router::new()
        .route("/", get(handlers::root))
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

/// Serves until Ctrl-C.
pub async fn start_server(container: Arc<Container>, addr: &str) -> Result<()> {
    let app = create_router(container);

    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
