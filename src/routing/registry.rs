//! Route registry.
//!
//! # Responsibilities
//! - Store group → route → controller
//! - Hand each controller its base path on registration
//!
//! # Design Decisions
//! - Built once at startup, read-only afterwards (no locking)
//! - Duplicate (group, route) registration replaces the old controller
//! - Ordered maps so dispatch and discovery iterate deterministically

use std::collections::BTreeMap;
use std::fmt;

use crate::routing::controller::Controller;

/// Controllers registered under one group, keyed by route.
pub type GroupRoutes = BTreeMap<String, Box<dyn Controller>>;

/// Owned table of every registered controller.
#[derive(Default)]
pub struct RouteRegistry {
    groups: BTreeMap<String, GroupRoutes>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `controller` to handle requests below `/<group><route>`.
    ///
    /// The controller's base path is the verbatim concatenation `group + route`;
    /// no slash is inserted at the join. Last write wins on a repeated key.
    pub fn register_route<C>(&mut self, group: impl Into<String>, route: impl Into<String>, controller: C)
    where
        C: Controller + 'static,
    {
        self.register_boxed(group, route, Box::new(controller));
    }

    /// Same as [`register_route`](Self::register_route) for an already boxed controller.
    pub fn register_boxed(
        &mut self,
        group: impl Into<String>,
        route: impl Into<String>,
        mut controller: Box<dyn Controller>,
    ) {
        let group = group.into();
        let route = route.into();

        controller.set_base_path(&format!("{group}{route}"));

        let replaced = self
            .groups
            .entry(group.clone())
            .or_default()
            .insert(route.clone(), controller);

        if replaced.is_some() {
            tracing::debug!(group = %group, route = %route, "Replaced registered controller");
        } else {
            tracing::debug!(group = %group, route = %route, "Registered controller");
        }
    }

    /// Registered group names, in lexicographic order.
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Routes registered under `group`.
    pub fn group(&self, group: &str) -> Option<&GroupRoutes> {
        self.groups.get(group)
    }

    pub fn controller(&self, group: &str, route: &str) -> Option<&dyn Controller> {
        self.groups.get(group)?.get(route).map(|controller| &**controller)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &GroupRoutes)> {
        self.groups.iter().map(|(group, routes)| (group.as_str(), routes))
    }

    /// Total number of registered (group, route) pairs.
    pub fn len(&self) -> usize {
        self.groups.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.groups
                    .iter()
                    .map(|(group, routes)| (group, routes.keys().collect::<Vec<_>>())),
            )
            .finish()
    }
}
