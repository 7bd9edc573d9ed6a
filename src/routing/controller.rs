//! Controller capability contract.
//!
//! # Responsibilities
//! - Describe named routes a controller exposes for discovery
//! - Define the three capabilities the dispatcher consumes
//! - Provide the boxed handler type controllers hand back
//!
//! # Design Decisions
//! - Capability trait, no shared base implementation
//! - "No handler" is `None`, never an error
//! - Handlers are shared (`Arc`) so a controller can hand out the same one repeatedly

use std::future::Future;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use futures_util::future::{BoxFuture, FutureExt};

/// A named route descriptor used only for discovery listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSpec {
    /// Identifier of the route within its controller's exposed set.
    pub name: String,

    /// Suffix appended after `/<group><route>` to form the listed URL.
    pub path: String,
}

impl RouteSpec {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Request handler produced by a controller for one (remaining path, method) pair.
pub type Handler = Arc<dyn Fn(Request<Body>) -> BoxFuture<'static, Response> + Send + Sync>;

/// Path suffix left after the matched group and route prefix.
///
/// Inserted into the request extensions before a handler is invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemainingPath(pub String);

/// Wrap an async function into a [`Handler`].
pub fn handler_fn<F, Fut, R>(f: F) -> Handler
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + 'static,
{
    Arc::new(move |request: Request<Body>| f(request).map(IntoResponse::into_response).boxed())
}

/// Provider of handlers for everything below one registered route.
///
/// Implementations must tolerate `exposed_routes` being called concurrently
/// with request handling, and must return `None` from `handler_for_route`
/// for any combination they do not recognise.
pub trait Controller: Send + Sync {
    /// Receives `group + route` once, at registration time.
    fn set_base_path(&mut self, base_path: &str);

    /// Returns the handler for `route` (the remaining path) and `method`, if any.
    fn handler_for_route(&self, route: &str, method: &Method) -> Option<Handler>;

    /// Routes listed in the group's discovery response. Recomputed on every call.
    fn exposed_routes(&self) -> Vec<RouteSpec>;
}
