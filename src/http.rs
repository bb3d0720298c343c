//! HTTP server for the metrics endpoint.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tokio::sync::watch;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::error::ScrapeError;
use crate::exposition;
use crate::parser;
use crate::upstream::Upstream;

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    upstream: Arc<Upstream>,
}

/// Create the HTTP router.
fn create_router(upstream: Arc<Upstream>) -> Router {
    let state = AppState { upstream };

    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/healthz", get(healthz_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run one scrape cycle: fetch the status page, parse it, render the body.
/// No caching; every call is an independent round-trip to the upstream.
async fn scrape(upstream: &Upstream) -> Result<String, ScrapeError> {
    let raw = upstream.fetch().await?;
    let lights = parser::parse_response(&raw)?;
    Ok(exposition::render(&lights))
}

/// Handler for the /metrics endpoint.
async fn metrics_handler(State(state): State<AppState>) -> Response {
    match scrape(&state.upstream).await {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            warn!("Scrape failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

/// Handler for the /healthz endpoint. Always succeeds, no upstream involved.
async fn healthz_handler() -> Response {
    (StatusCode::OK, "ok").into_response()
}

/// HTTP server wrapping the scrape pipeline.
pub struct HttpServer {
    upstream: Arc<Upstream>,
    listen_addr: SocketAddr,
}

impl HttpServer {
    /// Create a new HTTP server.
    pub fn new(upstream: Arc<Upstream>, listen_addr: SocketAddr) -> Self {
        Self {
            upstream,
            listen_addr,
        }
    }

    /// Run the HTTP server until the shutdown signal is received.
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) -> anyhow::Result<()> {
        let router = create_router(self.upstream);

        let listener = tokio::net::TcpListener::bind(self.listen_addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", self.listen_addr, e))?;

        info!(addr = %self.listen_addr, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                loop {
                    if shutdown.changed().await.is_err() {
                        break;
                    }
                    if *shutdown.borrow() {
                        break;
                    }
                }
                info!("HTTP server shutting down");
            })
            .await
            .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

        info!("HTTP server stopped");
        Ok(())
    }
}
