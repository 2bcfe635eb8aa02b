//! # Arbor
//!
//! An event-wiring registry with build-time consistency checking.
//!
//! ## Overview
//!
//! Components ("branches") declare methods that handle named events and the
//! events those methods emit. At registration time Arbor verifies that the
//! declaration matches the method body exactly, then records the result in
//! an event-keyed dependency graph:
//!
//! ```text
//! ┌──────────┐  register  ┌───────────┐  graph/bind  ┌──────────────────┐
//! │  Branch  │───────────▶│ Validator │─────────────▶│  Arbor registry  │
//! └──────────┘            └───────────┘              │  emit / traverse │
//!                                                    └──────────────────┘
//! ```
//!
//! The registry then answers traversal queries (full dependency map,
//! transitive downstream impact of one handler) and dispatches events to
//! their unique handlers — exactly one handler per event, enforced at
//! registration.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use arbor::prelude::*;
//!
//! struct UserBranch;
//!
//! impl UserBranch {
//!     fn boot(&self, tree: &Arbor, args: &[Value]) -> WiringResult<Option<Value>> {
//!         tree.emit("user.created", args)
//!     }
//! }
//!
//! define_branch! {
//!     branch: UserBranch as "UserBranch",
//!     methods: [
//!         boot {
//!             events: ["app.init"],
//!             emits: ["user.created"],
//!             body: ["user.created"],
//!         },
//!     ]
//! }
//!
//! let mut tree = Arbor::new();
//! tree.register(Arc::new(UserBranch))?;
//! tree.emit("app.init", &[])?;
//! ```
//!
//! ## Scope
//!
//! Arbor is not a pub/sub bus (one handler per event, always), not a
//! cycle-aware scheduler (the dependency graph must be a DAG rooted at
//! `app.init`), and not a runtime type system — it is a registration-time
//! consistency checker plus a minimal synchronous dispatcher.

pub use arbor_core as core;
pub use arbor_framework as framework;

pub use arbor_framework::define_branch;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use arbor::prelude::*;
/// ```
pub mod prelude {
    // Registry - main entry point
    pub use arbor_framework::Arbor;

    // Branch declaration
    pub use arbor_framework::{Branch, Candidate, MethodBinding, define_branch};

    // Foundation types
    pub use arbor_core::{
        DependencyEntry, DependencyMap, EmissionAnalyzer, EventList, GraphNode, MethodSource,
        ROOT_EVENT, ScanAnalyzer, WiringError, WiringResult,
    };
}
