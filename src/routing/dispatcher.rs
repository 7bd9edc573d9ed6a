//! Request dispatch.
//!
//! # Responsibilities
//! - Answer `/<group>` and `/<group>/` with the group's discovery listing
//! - Find the controller whose `/<group><route>` prefixes the path
//! - Delegate to the first controller that accepts (remaining path, method)
//! - Fall back to 404 when every candidate declines
//!
//! # Design Decisions
//! - Exact group matches are checked before any prefix dispatch
//! - Prefix candidates are tried longest prefix first, ties in (group, route)
//!   lexicographic order, so overlapping registrations resolve the same way
//!   on every run
//! - A declining controller is not an error; the scan moves on
//! - No locking: the registry is frozen before the dispatcher is built

use std::collections::BTreeMap;
use std::fmt;
use std::time::Instant;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::config::DiscoveryConfig;
use crate::http::request::RequestIdExt;
use crate::http::response as http_response;
use crate::observability::metrics::{self, DispatchOutcome};
use crate::routing::base_url::base_url;
use crate::routing::controller::{Controller, Handler, RemainingPath};
use crate::routing::registry::RouteRegistry;

/// Result of matching a path and method against the registry.
pub enum Resolution<'a> {
    /// The path names a group root; answer with its listing.
    Discovery { group: &'a str },

    /// A controller accepted the request.
    Handled {
        group: &'a str,
        route: &'a str,
        remaining: String,
        handler: Handler,
    },

    NotFound,
}

impl fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Discovery { group } => {
                f.debug_struct("Discovery").field("group", group).finish()
            }
            Resolution::Handled { group, route, remaining, .. } => f
                .debug_struct("Handled")
                .field("group", group)
                .field("route", route)
                .field("remaining", remaining)
                .finish_non_exhaustive(),
            Resolution::NotFound => f.write_str("NotFound"),
        }
    }
}

struct Candidate<'a> {
    group: &'a str,
    route: &'a str,
    controller: &'a dyn Controller,
    prefix_len: usize,
}

/// Dispatch table entry point. Owns the frozen registry.
#[derive(Debug)]
pub struct Dispatcher {
    registry: RouteRegistry,
    discovery: DiscoveryConfig,
}

impl Dispatcher {
    pub fn new(registry: RouteRegistry, discovery: DiscoveryConfig) -> Self {
        Self { registry, discovery }
    }

    pub fn registry(&self) -> &RouteRegistry {
        &self.registry
    }

    /// Match `path` and `method` without touching a request or response.
    pub fn resolve(&self, path: &str, method: &Method) -> Resolution<'_> {
        let exact = self
            .registry
            .groups()
            .filter(|group| is_group_root(path, group))
            .max_by_key(|group| group.len());
        if let Some(group) = exact {
            return Resolution::Discovery { group };
        }

        let mut candidates = Vec::new();
        for (group, routes) in self.registry.iter() {
            let Some(after_group) = path.strip_prefix('/').and_then(|p| p.strip_prefix(group)) else {
                continue;
            };
            for (route, controller) in routes {
                if after_group.starts_with(route.as_str()) {
                    candidates.push(Candidate {
                        group,
                        route: route.as_str(),
                        controller: &**controller,
                        prefix_len: 1 + group.len() + route.len(),
                    });
                }
            }
        }

        // Stable sort keeps registry (group, route) order among equal lengths.
        candidates.sort_by(|a, b| b.prefix_len.cmp(&a.prefix_len));

        for candidate in candidates {
            let remaining = &path[candidate.prefix_len..];
            match candidate.controller.handler_for_route(remaining, method) {
                Some(handler) => {
                    return Resolution::Handled {
                        group: candidate.group,
                        route: candidate.route,
                        remaining: remaining.to_string(),
                        handler,
                    };
                }
                None => {
                    tracing::trace!(
                        group = %candidate.group,
                        route = %candidate.route,
                        remaining = %remaining,
                        method = %method,
                        "Controller declined"
                    );
                }
            }
        }

        Resolution::NotFound
    }

    /// Name → absolute URL for every route exposed under `group`.
    ///
    /// Routes are visited in lexicographic order; a repeated name keeps the
    /// URL from the last route that exposes it.
    pub fn discovery_listing<B>(&self, group: &str, request: &Request<B>) -> BTreeMap<String, String> {
        let mut listing = BTreeMap::new();
        let Some(routes) = self.registry.group(group) else {
            return listing;
        };

        let base = base_url(request, &self.discovery);
        for (route, controller) in routes {
            for spec in controller.exposed_routes() {
                let url = format!("{base}/{group}{route}{}", spec.path);
                listing.insert(spec.name, url);
            }
        }
        listing
    }

    /// Handle one inbound request.
    pub async fn handle_request(&self, mut request: Request<Body>) -> Response {
        let start = Instant::now();
        let path = request.uri().path().to_string();
        let decoded = decode_path(&path);
        let method = request.method().clone();
        let request_id = request.request_id().unwrap_or("unknown").to_string();

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "Handling request"
        );

        let resolution = match &decoded {
            Some(decoded) => self.resolve(decoded, &method),
            None => {
                tracing::debug!(request_id = %request_id, path = %path, "Path is not valid UTF-8 once decoded");
                Resolution::NotFound
            }
        };

        let (outcome, response) = match resolution {
            Resolution::Discovery { group } => {
                let listing = self.discovery_listing(group, &request);
                match http_response::discovery_response(&listing) {
                    Ok(listing_response) => {
                        tracing::debug!(request_id = %request_id, group = %group, routes = listing.len(), "Served discovery listing");
                        (DispatchOutcome::Discovery, listing_response)
                    }
                    Err(e) => {
                        tracing::error!(request_id = %request_id, group = %group, error = %e, "Discovery listing failed");
                        (DispatchOutcome::Error, e.into_response())
                    }
                }
            }
            Resolution::Handled { group, route, remaining, handler } => {
                tracing::debug!(
                    request_id = %request_id,
                    group = %group,
                    route = %route,
                    remaining = %remaining,
                    "Delegating to controller"
                );
                request.extensions_mut().insert(RemainingPath(remaining));
                let mut handled = handler(request).await;
                http_response::ensure_content_type(&mut handled);
                (DispatchOutcome::Handled, handled)
            }
            Resolution::NotFound => {
                tracing::info!(request_id = %request_id, method = %method, path = %path, "No route matched");
                (DispatchOutcome::NotFound, http_response::not_found())
            }
        };

        metrics::record_dispatch(outcome, start);
        response
    }
}

/// Percent-decode the request path; `None` when the bytes are not UTF-8.
fn decode_path(path: &str) -> Option<String> {
    percent_decode_str(path)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

fn is_group_root(path: &str, group: &str) -> bool {
    match path.strip_prefix('/').and_then(|p| p.strip_prefix(group)) {
        Some(rest) => rest.is_empty() || rest == "/",
        None => false,
    }
}
