mod handlers;
mod state;

use axum::routing::{any, get};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ServiceConfig;

pub use state::AppState;

pub const EVALUATE_PATH: &str = "/policy/hazardousgoods/evaluate";
pub const HEALTH_PATH: &str = "/health";

/// Every method, OPTIONS included, reaches the evaluate handler so that
/// rejected methods get the same plain-text error and diagnostic log as
/// other failures.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(EVALUATE_PATH, any(handlers::evaluate))
        .route(HEALTH_PATH, get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until Ctrl+C.
pub async fn start(config: &ServiceConfig, state: Arc<AppState>) -> std::io::Result<()> {
    let app = build_router(state);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(%addr, "hazardous goods policy service listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            error!(error = %e, "cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
