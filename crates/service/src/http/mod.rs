//! HTTP surface of the pastebin server.

use axum::{routing, Router};
use http::header::{ACCEPT, CONTENT_TYPE, ORIGIN};
use http::Method;
use tokio::sync::watch;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tower_http::LatencyUnit;

pub mod handlers;
mod health;

use crate::config::Config;
use crate::ServiceState;

const STATUS_PREFIX: &str = "/_status";

/// Build the protocol router. Exposed separately from [`run`] so tests
/// can serve it on an ephemeral port.
pub fn router(state: ServiceState) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(vec![ACCEPT, CONTENT_TYPE, ORIGIN])
        .allow_origin(Any)
        .allow_credentials(false);

    Router::new()
        .route("/handshake", routing::get(handlers::handshake::handler))
        .route("/verify", routing::post(handlers::verify::handler))
        .route("/store", routing::post(handlers::store::handler))
        .route("/retrieve", routing::get(handlers::retrieve::handler))
        .route("/update", routing::put(handlers::update::handler))
        .route("/delete", routing::delete(handlers::delete::handler))
        .route("/register", routing::post(handlers::register::handler))
        .nest(STATUS_PREFIX, health::router())
        .fallback(handlers::not_found::handler)
        .layer(cors_layer)
        .with_state(state)
}

/// Run the API server until the shutdown channel fires.
pub async fn run(
    config: Config,
    state: ServiceState,
    mut shutdown_rx: watch::Receiver<()>,
) -> Result<(), HttpServerError> {
    let listen_addr = config
        .listen_addr
        .ok_or(HttpServerError::MissingListenAddr)?;
    let trace_layer = TraceLayer::new_for_http()
        .on_response(
            DefaultOnResponse::new()
                .include_headers(false)
                .level(config.log_level)
                .latency_unit(LatencyUnit::Micros),
        )
        .on_failure(DefaultOnFailure::new().latency_unit(LatencyUnit::Micros));

    let app = router(state).layer(trace_layer);

    tracing::info!(addr = ?listen_addr, "API server listening");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.changed().await;
        })
        .await?;

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("no listen address configured")]
    MissingListenAddr,
    #[error("an error occurred running the HTTP server: {0}")]
    ServingFailed(#[from] std::io::Error),
}
