//! Traversal queries over the event graph.
//!
//! Both queries derive their answers from a [`DependencyMap`] rebuilt on
//! every call by breadth-first expansion from [`ROOT_EVENT`]. Nothing is
//! cached: callers needing a stable snapshot memoize the result
//! themselves.

use std::collections::VecDeque;

use tracing::trace;

use arbor_core::{DependencyMap, ROOT_EVENT, WiringError, WiringResult};

use crate::registry::Arbor;

impl Arbor {
    /// Builds the handler-name-keyed dependency map by BFS from
    /// [`ROOT_EVENT`].
    ///
    /// Every emission edge is followed once per occurrence: a duplicate
    /// emission produces a duplicate `down` entry and a repeat expansion of
    /// the target. Fails with `DanglingEvent` when an emission (or the root
    /// itself) names an event with no registered handler.
    ///
    /// Map entries exist only for handlers touched by at least one edge —
    /// a root that emits nothing yields an empty map.
    ///
    /// The traversal assumes the graph is a DAG rooted at `app.init`; a
    /// cyclic emission chain makes it loop forever.
    pub fn dependency_map(&self) -> WiringResult<DependencyMap> {
        let mut map = DependencyMap::new();
        let mut queue: VecDeque<String> = VecDeque::from([ROOT_EVENT.to_string()]);

        while let Some(event) = queue.pop_front() {
            let node = self.node(&event)?;
            let name = node.qualified_name();
            trace!(event = %event, handler = %name, "expanding node");

            for emitted in &node.emissions {
                let dependent = self.node(emitted)?;
                let dependent_name = dependent.qualified_name();

                map.entry(name.clone())
                    .or_default()
                    .down
                    .push(dependent_name.clone());
                map.entry(dependent_name).or_default().up.push(name.clone());

                queue.push_back(emitted.clone());
            }
        }

        Ok(map)
    }

    /// Every handler transitively downstream of `name`, in stack-pop
    /// order.
    ///
    /// Builds a fresh dependency map, fails with `UnknownName` when `name`
    /// is absent from it, then expands with an explicit stack: pop from the
    /// end, record, append the popped entry's own `down` list. Handlers
    /// reachable over several paths appear once per path.
    pub fn affected_methods(&self, name: &str) -> WiringResult<Vec<String>> {
        let map = self.dependency_map()?;

        let entry = map.get(name).ok_or_else(|| WiringError::UnknownName {
            name: name.to_string(),
        })?;

        let mut affected = Vec::new();
        let mut stack = entry.down.clone();

        while let Some(next) = stack.pop() {
            if let Some(entry) = map.get(&next) {
                stack.extend(entry.down.iter().cloned());
            }
            affected.push(next);
        }

        Ok(affected)
    }
}
