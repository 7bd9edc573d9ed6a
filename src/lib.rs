//! Two-level HTTP request router with per-group route discovery.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use error::RouterError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Controller, Dispatcher, RouteRegistry, RouteSpec};
