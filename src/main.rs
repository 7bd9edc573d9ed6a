//! API router service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ listener ─▶ axum server ─▶ Dispatcher ─┬─▶ /<group>            → discovery listing
//!                                 (trace, id,                ├─▶ /<group><route>...  → controller handler
//!                                  timeout)                  └─▶ anything else       → 404
//! ```
//!
//! Controllers are registered programmatically before the server starts;
//! this binary registers a small `v1` group to serve as a working example.

use std::path::PathBuf;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::IntoResponse,
    Json,
};
use clap::Parser;
use tokio::net::TcpListener;

use api_router::config::{self, ServerConfig};
use api_router::observability::{logging, metrics};
use api_router::routing::{handler_fn, RemainingPath, RouteRegistry, StaticController};
use api_router::{HttpServer, Shutdown};

const MAX_ECHO_BODY: usize = 64 * 1024;

#[derive(Parser)]
#[command(name = "api-router")]
#[command(about = "Two-level HTTP router with per-group route discovery", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        config::validate_config(&config).map_err(config::ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("api-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        config_file = ?cli.config,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_signal());

    let server = HttpServer::new(config, example_registry());
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn example_registry() -> RouteRegistry {
    let mut registry = RouteRegistry::new();

    registry.register_route(
        "v1",
        "/status",
        StaticController::new()
            .on(Method::GET, "", handler_fn(status))
            .expose("status", ""),
    );

    registry.register_route(
        "v1",
        "/echo",
        StaticController::new()
            .on(Method::POST, "", handler_fn(echo))
            .on(Method::PUT, "", handler_fn(echo))
            .expose("echo", ""),
    );

    registry
}

async fn status(request: Request<Body>) -> impl IntoResponse {
    let remaining = request
        .extensions()
        .get::<RemainingPath>()
        .map(|r| r.0.clone())
        .unwrap_or_default();

    Json(serde_json::json!({
        "status": "operational",
        "version": env!("CARGO_PKG_VERSION"),
        "remaining": remaining,
    }))
}

async fn echo(request: Request<Body>) -> impl IntoResponse {
    match to_bytes(request.into_body(), MAX_ECHO_BODY).await {
        Ok(bytes) => (StatusCode::OK, bytes).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Echo body rejected");
            (StatusCode::PAYLOAD_TOO_LARGE, "Body too large").into_response()
        }
    }
}
