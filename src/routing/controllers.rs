//! Table-driven controller.

use std::collections::HashMap;
use std::fmt;

use axum::http::Method;

use crate::routing::controller::{Controller, Handler, RouteSpec};

/// A controller backed by a fixed (method, remaining path) → handler table.
///
/// Remaining paths are matched exactly; the empty string is the route itself.
#[derive(Default)]
pub struct StaticController {
    base_path: Option<String>,
    handlers: HashMap<Method, HashMap<String, Handler>>,
    exposed: Vec<RouteSpec>,
}

impl StaticController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `method` requests whose remaining path equals `remaining`.
    pub fn on(mut self, method: Method, remaining: impl Into<String>, handler: Handler) -> Self {
        self.handlers
            .entry(method)
            .or_default()
            .insert(remaining.into(), handler);
        self
    }

    /// List `name` in the group's discovery response, at `path` below this route.
    pub fn expose(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.exposed.push(RouteSpec::new(name, path));
        self
    }

    /// The `group + route` this controller was registered under.
    pub fn base_path(&self) -> Option<&str> {
        self.base_path.as_deref()
    }

    /// Server-relative path for `suffix` below this controller, e.g. `/v1/users/42`.
    pub fn absolute_path(&self, suffix: &str) -> String {
        format!("/{}{}", self.base_path.as_deref().unwrap_or_default(), suffix)
    }
}

impl Controller for StaticController {
    fn set_base_path(&mut self, base_path: &str) {
        if let Some(previous) = &self.base_path {
            tracing::warn!(previous = %previous, base_path = %base_path, "Base path set more than once");
        }
        self.base_path = Some(base_path.to_string());
    }

    fn handler_for_route(&self, route: &str, method: &Method) -> Option<Handler> {
        self.handlers.get(method)?.get(route).cloned()
    }

    fn exposed_routes(&self) -> Vec<RouteSpec> {
        self.exposed.clone()
    }
}

impl fmt::Debug for StaticController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let routes: Vec<_> = self
            .handlers
            .iter()
            .flat_map(|(method, paths)| paths.keys().map(move |path| format!("{method} {path:?}")))
            .collect();
        f.debug_struct("StaticController")
            .field("base_path", &self.base_path)
            .field("routes", &routes)
            .field("exposed", &self.exposed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::controller::handler_fn;

    fn ok() -> Handler {
        handler_fn(|_req| async { "ok" })
    }

    #[test]
    fn test_handler_lookup_is_exact() {
        let controller = StaticController::new()
            .on(Method::GET, "", ok())
            .on(Method::PUT, "/settings", ok());

        assert!(controller.handler_for_route("", &Method::GET).is_some());
        assert!(controller.handler_for_route("/settings", &Method::PUT).is_some());
        assert!(controller.handler_for_route("/settings", &Method::GET).is_none());
        assert!(controller.handler_for_route("/settings/", &Method::PUT).is_none());
        assert!(controller.handler_for_route("", &Method::DELETE).is_none());
    }

    #[test]
    fn test_base_path_and_absolute_path() {
        let mut controller = StaticController::new();
        assert_eq!(controller.base_path(), None);
        assert_eq!(controller.absolute_path("/x"), "//x");

        controller.set_base_path("v1/users");
        assert_eq!(controller.base_path(), Some("v1/users"));
        assert_eq!(controller.absolute_path("/42"), "/v1/users/42");
    }

    #[test]
    fn test_exposed_routes_in_insertion_order() {
        let controller = StaticController::new()
            .expose("list", "")
            .expose("create", "/new");

        assert_eq!(
            controller.exposed_routes(),
            vec![RouteSpec::new("list", ""), RouteSpec::new("create", "/new")]
        );
    }
}
