//! HTTP Server
//!
//! Axum server exposing the exporter over three endpoints:
//!
//! - `GET /` - HTML landing page with links to metrics and health
//! - `GET /metrics` - runs one collection cycle and answers with the
//!   resulting families in Prometheus text format
//! - `GET /health` - 200 after a successful cycle, 503 after a failed one
//!
//! # Collection Model
//!
//! There is no background loop and no cache: every scrape triggers a fresh
//! cycle against the New Relic APIs. Concurrent scrapes run independent
//! cycles with no shared mutable state, but each one costs a full round of
//! upstream queries; point a single Prometheus server at this endpoint.
//!
//! The server runs until a ctrl-c / SIGTERM-style shutdown signal arrives.

use crate::collectors::NewRelicCollector;
use crate::config::Config;
use crate::metrics;
use crate::newrelic::NewRelicClient;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
struct AppState {
    collector: Arc<NewRelicCollector>,
    healthy: Arc<AtomicBool>,
}

pub async fn start(config: Config) -> anyhow::Result<()> {
    let client = NewRelicClient::new(config.newrelic.clone());
    let state = AppState {
        collector: Arc::new(NewRelicCollector::new(client)),
        healthy: Arc::new(AtomicBool::new(true)),
    };

    let app = Router::new()
        .route("/", get(root_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    let addr = format!("{}:{}", config.server.addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Metrics server listening on {}", addr);
    info!("Metrics available at http://{}/metrics", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, stopping server");
}

async fn root_handler() -> impl IntoResponse {
    axum::response::Html(
        r#"<html>
<head><title>New Relic Exporter</title></head>
<body>
<h1>New Relic Prometheus Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
<p><a href="/health">Health</a></p>
</body>
</html>"#,
    )
}

async fn metrics_handler(State(state): State<AppState>) -> Response {
    let families = match state.collector.collect().await {
        Ok(families) => families,
        Err(e) => {
            error!("Collection cycle failed: {}", e);
            state.healthy.store(false, Ordering::Relaxed);
            return (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error collecting metrics: {}", e),
            )
                .into_response();
        }
    };
    state.healthy.store(true, Ordering::Relaxed);

    match metrics::encode_text(&families) {
        Ok(body) => (
            [(axum::http::header::CONTENT_TYPE, metrics::format_type())],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to render metrics: {}", e);
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error rendering metrics: {}", e),
            )
                .into_response()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.healthy.load(Ordering::Relaxed) {
        (axum::http::StatusCode::OK, "OK")
    } else {
        (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            "New Relic API unreachable",
        )
    }
}
