//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router whose fallback is the dispatcher
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener and stop on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::routing::{Dispatcher, RouteRegistry};

/// HTTP server in front of the dispatcher.
pub struct HttpServer {
    router: Router,
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
}

impl HttpServer {
    /// Freeze `registry` and build the server around it.
    pub fn new(config: ServerConfig, registry: RouteRegistry) -> Self {
        tracing::info!(
            groups = registry.groups().count(),
            routes = registry.len(),
            "Route registry frozen"
        );

        let dispatcher = Arc::new(Dispatcher::new(registry, config.discovery.clone()));
        let router = Self::build_router(&config, dispatcher.clone());
        Self {
            router,
            config,
            dispatcher,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServerConfig, dispatcher: Arc<Dispatcher>) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(dispatcher)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
            .layer(propagate_request_id_layer())
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The Axum router, for embedding in another server or driving in tests.
    pub fn into_router(self) -> Router {
        self.router
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

/// Every request, whatever its path or method, lands here.
async fn dispatch_handler(
    State(dispatcher): State<Arc<Dispatcher>>,
    request: Request<Body>,
) -> Response {
    dispatcher.handle_request(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::X_REQUEST_ID;
    use crate::routing::{handler_fn, StaticController};
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let mut registry = RouteRegistry::new();
        registry.register_route(
            "v1",
            "/ping",
            StaticController::new()
                .on(Method::GET, "", handler_fn(|_req| async { "pong" }))
                .expose("ping", ""),
        );
        HttpServer::new(ServerConfig::default(), registry)
    }

    #[tokio::test]
    async fn test_router_dispatches_every_path() {
        let router = server().into_router();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/v1/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .method(Method::PATCH)
                    .uri("/nowhere/at/all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_request_id_assigned_and_echoed() {
        let router = server().into_router();

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/v1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key(X_REQUEST_ID));

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/v1")
                    .header(X_REQUEST_ID, "client-chosen")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[X_REQUEST_ID], "client-chosen");
    }

    #[test]
    fn test_server_keeps_registry() {
        let server = server();
        assert_eq!(server.dispatcher().registry().len(), 1);
        assert_eq!(server.config().timeouts.request_secs, 30);
    }
}
