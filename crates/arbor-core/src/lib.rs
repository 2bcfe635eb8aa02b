//! # Arbor Core
//!
//! Foundation types for the Arbor event-wiring registry.
//!
//! This crate provides the pieces the framework layer is built on:
//!
//! - **Event naming**: [`EventList`] boundary normalization and the fixed
//!   traversal root [`ROOT_EVENT`]
//! - **Graph data model**: [`GraphNode`] and the derived [`DependencyMap`]
//! - **Error taxonomy**: [`WiringError`] — fail-fast, non-retryable
//!   registration/dispatch/traversal errors
//! - **Emission analysis**: the [`EmissionAnalyzer`] seam and the default
//!   literal-scanning [`ScanAnalyzer`]
//!
//! The registry itself, branch declaration traits, and traversal queries
//! live in `arbor-framework`.

pub mod analyzer;
pub mod error;
pub mod event;
pub mod graph;

pub use analyzer::{EmissionAnalyzer, MethodSource, ScanAnalyzer};
pub use error::{WiringError, WiringResult};
pub use event::{EventList, ROOT_EVENT, qualified_name};
pub use graph::{DependencyEntry, DependencyMap, GraphNode};

/// Prelude for common imports.
pub mod prelude {
    pub use super::analyzer::{EmissionAnalyzer, MethodSource, ScanAnalyzer};
    pub use super::error::{WiringError, WiringResult};
    pub use super::event::{EventList, ROOT_EVENT};
    pub use super::graph::{DependencyEntry, DependencyMap, GraphNode};
}
