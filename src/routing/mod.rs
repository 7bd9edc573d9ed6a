//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     (group, route, controller)
//!     → registry.rs (controller.set_base_path(group + route), store)
//!     → Freeze inside Dispatcher
//!
//! Incoming Request (method, path, host)
//!     → dispatcher.rs
//!         /<group> or /<group>/   → discovery listing (base_url.rs)
//!         /<group><route><rest>   → controller.handler_for_route(rest, method)
//!         nothing accepts         → 404
//! ```
//!
//! # Design Decisions
//! - Prefix matching only: no wildcards, parameters or regex
//! - Registry immutable at runtime (thread-safe without locks)
//! - Deterministic: same input always matches same controller

pub mod base_url;
pub mod controller;
pub mod controllers;
pub mod dispatcher;
pub mod registry;

pub use base_url::base_url;
pub use controller::{handler_fn, Controller, Handler, RemainingPath, RouteSpec};
pub use controllers::StaticController;
pub use dispatcher::{Dispatcher, Resolution};
pub use registry::RouteRegistry;
