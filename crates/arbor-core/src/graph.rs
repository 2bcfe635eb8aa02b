//! Graph data model.
//!
//! The registry keeps one [`GraphNode`] per event that has a bound handler.
//! [`DependencyMap`] is the derived, query-time view: for every handler
//! (keyed by its `owner.method` name) the handlers directly downstream and
//! upstream of it.

use std::collections::HashMap;

use serde::Serialize;

use crate::event::qualified_name;

/// One node of the event graph, keyed by the event that triggers it.
///
/// `emissions` accumulates the declared emission lists of every binding
/// registered for this event, in registration order. Duplicates are
/// preserved: each occurrence is one downstream edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    /// The event this node is keyed by.
    pub event: String,
    /// Concrete type name of the owning branch.
    pub owner: String,
    /// Name of the bound method.
    pub method: String,
    /// Diagnostic source location of the bound method.
    pub location: String,
    /// Ordered, non-deduplicated event names this handler emits.
    pub emissions: Vec<String>,
}

impl GraphNode {
    /// Creates a node with an empty emissions sequence.
    pub fn new(event: &str, owner: &str, method: &str, location: &str) -> Self {
        Self {
            event: event.to_string(),
            owner: owner.to_string(),
            method: method.to_string(),
            location: location.to_string(),
            emissions: Vec::new(),
        }
    }

    /// The composite `owner.method` name identifying this handler.
    pub fn qualified_name(&self) -> String {
        qualified_name(&self.owner, &self.method)
    }
}

/// One entry of the dependency map.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DependencyEntry {
    /// Handlers reachable through this handler's emissions, one entry per
    /// emission edge (duplicates preserved).
    pub down: Vec<String>,
    /// Handlers whose emissions trigger this handler's event.
    pub up: Vec<String>,
}

/// Handler-name-keyed view of the graph, rebuilt on every query.
///
/// An entry exists only for handlers that participate in at least one
/// emission edge; a graph whose root emits nothing produces an empty map.
pub type DependencyMap = HashMap<String, DependencyEntry>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_starts_with_empty_emissions() {
        let node = GraphNode::new("app.init", "App", "boot", "src/app.rs");
        assert!(node.emissions.is_empty());
        assert_eq!(node.qualified_name(), "App.boot");
    }

    #[test]
    fn node_serializes_for_export() {
        let mut node = GraphNode::new("app.init", "App", "boot", "src/app.rs");
        node.emissions.push("user.created".into());
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["event"], "app.init");
        assert_eq!(json["emissions"][0], "user.created");
    }
}
