//! # Arbor Framework
//!
//! The framework layer of the Arbor event-wiring registry.
//!
//! Arbor validates, at registration time, that every handler's declared
//! emission set matches what its body actually emits, records the result in
//! an event-keyed dependency graph, and offers synchronous dispatch plus
//! traversal queries over that graph.
//!
//! This crate provides:
//!
//! - **Branch declaration**: the [`Candidate`]/[`Branch`] traits and the
//!   [`MethodBinding`] descriptor ([`branch`])
//! - **Validation**: declared-vs-actual emission checking ([`validator`])
//! - **The registry**: [`Arbor`] — graph construction and dispatch
//!   ([`registry`])
//! - **Traversal**: dependency map and affected-methods queries
//!   ([`traversal`])
//! - **Declaration macro**: [`define_branch!`]
//!
//! # Example
//!
//! ```rust,ignore
//! use arbor_framework::{Arbor, define_branch};
//!
//! let mut tree = Arbor::new();
//! tree.register(Arc::new(UserBranch))?;
//!
//! tree.emit("app.init", &[])?;
//! let map = tree.dependency_map()?;
//! let downstream = tree.affected_methods("UserBranch.boot")?;
//! ```
//!
//! # Lifecycle contract
//!
//! Single-threaded and synchronous: all registration happens before any
//! dispatch or query, and the registry provides no internal locking.
//! Callers needing concurrent access wrap the registry themselves.

pub mod branch;
pub mod macros;
pub mod registry;
pub mod traversal;
pub mod validator;

pub use branch::{Branch, Candidate, HandlerFn, MethodBinding};
pub use registry::Arbor;

#[doc(hidden)]
pub use arbor_core as __core;
