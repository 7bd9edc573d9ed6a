//! Server root URL as seen by a request.

use axum::http::{header, Request};

use crate::config::DiscoveryConfig;

/// Reconstruct `scheme://host` for the server root from `request`.
///
/// Scheme comes from the request URI, else `defaults.default_scheme`.
/// Host comes from the URI authority, then the `Host` header, then
/// `defaults.default_host`. Path and query are always dropped.
pub fn base_url<B>(request: &Request<B>, defaults: &DiscoveryConfig) -> String {
    let uri = request.uri();
    let scheme = uri.scheme_str().unwrap_or(defaults.default_scheme.as_str());

    let host = uri
        .authority()
        .map(|authority| authority.as_str())
        .or_else(|| {
            request
                .headers()
                .get(header::HOST)
                .and_then(|h| h.to_str().ok())
        })
        .filter(|host| !host.is_empty())
        .unwrap_or(defaults.default_host.as_str());

    format!("{scheme}://{host}")
}
