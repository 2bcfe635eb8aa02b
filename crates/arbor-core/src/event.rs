//! Event naming primitives.
//!
//! Events in Arbor are plain dotted names (`"app.init"`, `"user.created"`).
//! This module provides [`EventList`], the boundary type that normalizes
//! "one event or several" declarations into a single ordered list, and the
//! [`ROOT_EVENT`] every dependency traversal starts from.

use std::fmt;

/// The fixed root of the dependency graph.
///
/// [`dependency_map`] seeds its traversal queue with this event; a registry
/// with no handler bound to it cannot be traversed.
///
/// [`dependency_map`]: https://docs.rs/arbor-framework
pub const ROOT_EVENT: &str = "app.init";

/// Builds the composite `owner.method` name used to key dependency maps.
pub fn qualified_name(owner: &str, method: &str) -> String {
    format!("{owner}.{method}")
}

// ============================================================================
// EventList
// ============================================================================

/// An ordered, non-deduplicated list of event names.
///
/// Bindings may be declared against a single event or a list of events.
/// `EventList` normalizes both shapes at the declaration boundary so the
/// registry only ever deals with one type.
///
/// ```
/// use arbor_core::EventList;
///
/// let single: EventList = "app.init".into();
/// let many: EventList = ["user.created", "user.deleted"].into();
/// assert_eq!(single.as_slice(), ["app.init"]);
/// assert_eq!(many.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventList(Vec<String>);

impl EventList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the event names in declaration order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterates over the event names in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Number of declared events.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no events were declared.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for EventList {
    fn from(event: &str) -> Self {
        Self(vec![event.to_string()])
    }
}

impl From<String> for EventList {
    fn from(event: String) -> Self {
        Self(vec![event])
    }
}

impl From<Vec<String>> for EventList {
    fn from(events: Vec<String>) -> Self {
        Self(events)
    }
}

impl From<Vec<&str>> for EventList {
    fn from(events: Vec<&str>) -> Self {
        Self(events.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for EventList {
    fn from(events: [&str; N]) -> Self {
        Self(events.iter().map(|e| e.to_string()).collect())
    }
}

impl From<&[&str]> for EventList {
    fn from(events: &[&str]) -> Self {
        Self(events.iter().map(|e| e.to_string()).collect())
    }
}

impl<'a> IntoIterator for &'a EventList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for EventList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}
