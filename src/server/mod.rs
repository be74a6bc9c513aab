//! HTTP surface: a status route and the authenticated processing route.

pub mod auth;
pub mod routes;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::AppState;

pub use auth::API_KEY_HEADER;
pub use routes::StatusResponse;

/// Builds the application router.
///
/// `GET /` is open; `POST /process` sits behind [`auth::require_api_key`].
pub fn router(state: AppState) -> Router {
    let processing = Router::new()
        .route("/process", post(routes::process))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .route("/", get(routes::status))
        .merge(processing)
        .layer(DefaultBodyLimit::max(state.max_body_bytes()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve(config: Config) -> std::io::Result<()> {
    let addr = config.socket_addr();
    let app = router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Starting file transform server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
