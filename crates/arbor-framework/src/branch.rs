//! Branch declaration traits and method-binding descriptors.
//!
//! A *branch* is a component whose methods handle named events. Instead of
//! runtime type introspection, branches describe themselves explicitly: the
//! [`Branch`] trait supplies a list of [`MethodBinding`] descriptors, one
//! per bound method, each carrying the triggering events, the declared
//! emission set, the analyzer input, and the callable itself.
//!
//! [`Candidate`] is the wider trait the registry accepts. It exists so the
//! eligibility decision stays observable: a candidate whose [`as_branch`]
//! returns `None` is rejected with `NotEligible`. Every `Branch` is a
//! `Candidate` through a blanket impl.
//!
//! [`as_branch`]: Candidate::as_branch

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use arbor_core::{EventList, MethodSource, WiringResult};

use crate::registry::Arbor;

/// The callable stored for a bound method.
///
/// Handlers receive the registry (so they can re-enter [`Arbor::emit`]) and
/// the caller-supplied arguments, and may return a value to the emitter.
pub type HandlerFn = Arc<dyn Fn(&Arbor, &[Value]) -> WiringResult<Option<Value>> + Send + Sync>;

// ============================================================================
// Candidate / Branch
// ============================================================================

/// Anything that may be offered to [`Arbor::register`].
///
/// The registry consults [`as_branch`](Self::as_branch) — the branch
/// marker — to decide eligibility. Types that are not branches can still
/// implement `Candidate` (with the default `None`) to make the rejection
/// path explicit and testable.
pub trait Candidate: Send + Sync {
    /// Diagnostic name used in the `NotEligible` error.
    fn candidate_name(&self) -> &str;

    /// Returns the branch view of this candidate, or `None` when the type
    /// does not carry the marker.
    fn as_branch(self: Arc<Self>) -> Option<Arc<dyn Branch>>;
}

/// An eligible event branch: a named owner of bound methods.
pub trait Branch: Send + Sync + 'static {
    /// The owner-type name used in composite `owner.method` names.
    fn name(&self) -> &'static str;

    /// The explicit registration-time descriptor list, one entry per bound
    /// method. Handlers typically capture `self` through the given `Arc`.
    fn bindings(self: Arc<Self>) -> Vec<MethodBinding>;
}

/// Every branch carries the marker.
impl<B: Branch> Candidate for B {
    fn candidate_name(&self) -> &str {
        self.name()
    }

    fn as_branch(self: Arc<Self>) -> Option<Arc<dyn Branch>> {
        Some(self)
    }
}

// ============================================================================
// MethodBinding
// ============================================================================

/// Descriptor for one method bound to one or more events.
///
/// Built with [`MethodBinding::new`] plus the builder methods:
///
/// ```rust,ignore
/// MethodBinding::new("app.init", "boot", |tree, args| {
///     tree.emit("user.created", args)
/// })
/// .emits(["user.created"])
/// .source(MethodSource::Manifest(vec!["user.created".into()]))
/// .location(file!())
/// ```
pub struct MethodBinding {
    /// Events that trigger this method, normalized at the boundary.
    pub events: EventList,
    /// Method name (the second half of the composite name).
    pub method: &'static str,
    /// Declared emission set; validated against the analyzer's findings.
    pub emits: Vec<String>,
    /// Analyzer input describing what the body actually emits.
    pub source: MethodSource,
    /// Diagnostic source location.
    pub location: String,
    /// The callable invoked on dispatch.
    pub handler: HandlerFn,
}

impl MethodBinding {
    /// Creates a binding with no declared emissions, an empty manifest, and
    /// no location.
    pub fn new<E, F>(events: E, method: &'static str, handler: F) -> Self
    where
        E: Into<EventList>,
        F: Fn(&Arbor, &[Value]) -> WiringResult<Option<Value>> + Send + Sync + 'static,
    {
        Self {
            events: events.into(),
            method,
            emits: Vec::new(),
            source: MethodSource::default(),
            location: String::new(),
            handler: Arc::new(handler),
        }
    }

    /// Sets the declared emission set.
    pub fn emits<I>(mut self, events: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.emits = events.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the analyzer input for this method's body.
    pub fn source(mut self, source: MethodSource) -> Self {
        self.source = source;
        self
    }

    /// Sets the diagnostic source location.
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

impl fmt::Debug for MethodBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodBinding")
            .field("events", &self.events)
            .field("method", &self.method)
            .field("emits", &self.emits)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
