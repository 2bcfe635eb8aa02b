//! Unified error types for the Arbor core.
//!
//! Every condition here is a programmer or configuration error surfaced
//! immediately at registration, dispatch, or query time. None of them are
//! retryable and there is no recovery path: the failing operation aborts
//! and the caller decides how to surface the message.

use thiserror::Error;

/// Errors raised by registration, validation, dispatch, and traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WiringError {
    /// The candidate offered to `register` does not carry the branch marker.
    #[error("candidate '{candidate}' does not carry the branch marker")]
    NotEligible {
        /// Diagnostic name of the rejected candidate.
        candidate: String,
    },

    /// A method body emits events missing from its declared emission set.
    #[error("{location}:{method} is emitting the following events not declared in its binding: {}", events.join(", "))]
    UndeclaredEmission {
        /// Source location of the offending method.
        location: String,
        /// Method name.
        method: String,
        /// The emitted-but-undeclared event names, in emission order.
        events: Vec<String>,
    },

    /// A method declares emissions its body never performs.
    #[error("{location}:{method} states it emits the following events it does not emit: {}", events.join(", "))]
    UnusedDeclaration {
        /// Source location of the offending method.
        location: String,
        /// Method name.
        method: String,
        /// The declared-but-unused event names, in declaration order.
        events: Vec<String>,
    },

    /// An event already has a bound handler.
    #[error("the event '{event}' is already bound")]
    DuplicateBinding {
        /// The doubly-bound event name.
        event: String,
    },

    /// `emit` was called for an event with no graph node.
    #[error("event '{event}' not found")]
    UnknownEvent {
        /// The unbound event name.
        event: String,
    },

    /// Traversal reached an emission naming an event no handler was
    /// registered for.
    #[error("dangling event '{event}' found - contains no handlers")]
    DanglingEvent {
        /// The handler-less event name.
        event: String,
    },

    /// `affected_methods` was called with a name absent from the
    /// dependency map.
    #[error("unknown class/method found '{name}'")]
    UnknownName {
        /// The unresolvable `owner.method` composite name.
        name: String,
    },

    /// The emission analyzer could not read a method's source span.
    #[error("failed to read source '{file}': {reason}")]
    SourceUnavailable {
        /// Path of the unreadable file.
        file: String,
        /// Underlying I/O failure.
        reason: String,
    },

    /// The configured emission depth limit was exceeded during dispatch.
    #[error("emission depth limit {limit} exceeded while dispatching '{event}'")]
    DepthExceeded {
        /// The event whose dispatch crossed the limit.
        event: String,
        /// The configured limit.
        limit: usize,
    },

    /// Handler-reported failure.
    #[error("{0}")]
    Handler(String),
}

/// Result type for wiring operations.
pub type WiringResult<T> = Result<T, WiringError>;
