//! The `Arbor` registry: graph construction and dispatch.
//!
//! A registry instance owns the event graph and the dispatch-binding table.
//! [`register`](Arbor::register) validates and records branches during an
//! initialization phase; [`emit`](Arbor::emit) and the traversal queries
//! operate on the result. The design assumes that split in time — there is
//! no internal locking, and registration is `&mut self` while dispatch and
//! queries are `&self`.
//!
//! # Lifecycle
//!
//! 1. `register` every branch. Each bound method is analyzed, validated
//!    against its declared emission set, and committed: one dispatch
//!    binding plus one graph node (or emission append) per triggering
//!    event.
//! 2. `emit` / `dependency_map` / `affected_methods` at will.
//!
//! The registry is append-only: nothing is ever unbound.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::Value;
use tracing::{Level, debug, span};

use arbor_core::{EmissionAnalyzer, GraphNode, ScanAnalyzer, WiringError, WiringResult};

use crate::branch::{Candidate, HandlerFn};
use crate::validator;

/// The event-wiring registry.
///
/// One long-lived instance per application. Holds references to handler
/// callables, not copies of the branches themselves.
pub struct Arbor {
    analyzer: Box<dyn EmissionAnalyzer>,
    base_dir: Option<PathBuf>,
    depth_limit: Option<usize>,
    depth: AtomicUsize,
    graph: HashMap<String, GraphNode>,
    bindings: HashMap<String, HandlerFn>,
}

impl Arbor {
    /// Creates an empty registry with the default literal-scan analyzer.
    pub fn new() -> Self {
        Self {
            analyzer: Box::new(ScanAnalyzer::new()),
            base_dir: None,
            depth_limit: None,
            depth: AtomicUsize::new(0),
            graph: HashMap::new(),
            bindings: HashMap::new(),
        }
    }

    /// Relativizes diagnostic locations against `base_dir`.
    ///
    /// Locations outside the base directory are kept as-is.
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Replaces the emission analyzer.
    pub fn with_analyzer(mut self, analyzer: Box<dyn EmissionAnalyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    /// Caps the depth of re-entrant `emit` chains.
    ///
    /// Dispatch is unguarded by default: a cyclic emission chain runs until
    /// the stack gives out, which is the caller's contract to avoid. With a
    /// limit configured, crossing it fails with `DepthExceeded` instead.
    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = Some(limit);
        self
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers one candidate branch.
    ///
    /// Fails with `NotEligible` when the candidate does not carry the
    /// branch marker. For each bound method, the declared emission set is
    /// checked against the analyzer's findings *before* any graph mutation
    /// for that method; then every triggering event gets a dispatch binding
    /// (`DuplicateBinding` if the event is already bound) and a graph node
    /// whose emissions sequence accumulates the declared set.
    ///
    /// A failure aborts registration immediately. Mutations already
    /// committed for earlier methods, or earlier events of one method's
    /// list, are kept; there is no rollback.
    pub fn register(&mut self, candidate: Arc<dyn Candidate>) -> WiringResult<()> {
        let candidate_name = candidate.candidate_name().to_string();
        let Some(branch) = candidate.as_branch() else {
            return Err(WiringError::NotEligible {
                candidate: candidate_name,
            });
        };

        let owner = branch.name();
        debug!(branch = %owner, "registering branch");

        for binding in branch.bindings() {
            let location = self.relativize(&binding.location);
            let actual = self.analyzer.emitted_events(&binding.source)?;
            validator::check_emissions(&location, binding.method, &binding.emits, &actual)?;

            for event in &binding.events {
                self.bind(event, Arc::clone(&binding.handler))?;
                self.graph_insert(event, owner, binding.method, &binding.emits, &location);
            }
        }

        Ok(())
    }

    fn bind(&mut self, event: &str, handler: HandlerFn) -> WiringResult<()> {
        if self.bindings.contains_key(event) {
            return Err(WiringError::DuplicateBinding {
                event: event.to_string(),
            });
        }
        self.bindings.insert(event.to_string(), handler);
        debug!(event = %event, "bound handler");
        Ok(())
    }

    fn graph_insert(
        &mut self,
        event: &str,
        owner: &str,
        method: &str,
        emissions: &[String],
        location: &str,
    ) {
        let node = self
            .graph
            .entry(event.to_string())
            .or_insert_with(|| GraphNode::new(event, owner, method, location));
        node.emissions.extend(emissions.iter().cloned());
    }

    fn relativize(&self, location: &str) -> String {
        match &self.base_dir {
            Some(base) => Path::new(location)
                .strip_prefix(base)
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| location.to_string()),
            None => location.to_string(),
        }
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Read-only view of the full event graph.
    pub fn graph(&self) -> &HashMap<String, GraphNode> {
        &self.graph
    }

    /// Looks up the node for `event`, failing with `DanglingEvent` when no
    /// handler was ever registered for it.
    pub(crate) fn node(&self, event: &str) -> WiringResult<&GraphNode> {
        self.graph.get(event).ok_or_else(|| WiringError::DanglingEvent {
            event: event.to_string(),
        })
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Synchronously invokes the unique handler bound to `event`.
    ///
    /// Fails with `UnknownEvent` when the graph has no node for `event`.
    /// The handler receives this registry and `args`, and its return value
    /// is passed back to the caller. Handlers may re-enter `emit`; nothing
    /// guards against unbounded recursion unless a depth limit was
    /// configured via [`with_depth_limit`](Self::with_depth_limit).
    pub fn emit(&self, event: &str, args: &[Value]) -> WiringResult<Option<Value>> {
        if !self.graph.contains_key(event) {
            return Err(WiringError::UnknownEvent {
                event: event.to_string(),
            });
        }

        let depth = self.depth.fetch_add(1, Ordering::Relaxed);
        let _depth_guard = DepthGuard(&self.depth);
        if let Some(limit) = self.depth_limit
            && depth >= limit
        {
            return Err(WiringError::DepthExceeded {
                event: event.to_string(),
                limit,
            });
        }

        let span = span!(Level::DEBUG, "emit", event = %event);
        let _enter = span.enter();

        // Graph node and binding are created together in `register`; a miss
        // here means the tables diverged.
        let Some(handler) = self.bindings.get(event) else {
            return Err(WiringError::UnknownEvent {
                event: event.to_string(),
            });
        };

        (handler.as_ref())(self, args)
    }
}

impl Default for Arbor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arbor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arbor")
            .field("events", &self.graph.len())
            .field("bindings", &self.bindings.len())
            .field("depth_limit", &self.depth_limit)
            .finish()
    }
}

/// Rewinds the dispatch depth counter when an `emit` frame unwinds.
struct DepthGuard<'a>(&'a AtomicUsize);

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::{Branch, MethodBinding};
    use arbor_core::MethodSource;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    /// Branch bound to `app.init` that emits `user.created` when invoked.
    struct AppBranch;

    impl Branch for AppBranch {
        fn name(&self) -> &'static str {
            "AppBranch"
        }

        fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
            vec![
                MethodBinding::new("app.init", "boot", |tree, args| {
                    tree.emit("user.created", args)
                })
                .emits(["user.created"])
                .source(MethodSource::Manifest(vec!["user.created".into()]))
                .location("src/app.rs"),
            ]
        }
    }

    /// Leaf branch for `user.created` that counts invocations.
    struct UserBranch {
        created: AtomicUsize,
    }

    impl UserBranch {
        fn new() -> Self {
            Self {
                created: AtomicUsize::new(0),
            }
        }
    }

    impl Branch for UserBranch {
        fn name(&self) -> &'static str {
            "UserBranch"
        }

        fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
            let this = Arc::clone(&self);
            vec![
                MethodBinding::new("user.created", "created", move |_, _| {
                    let count = this.created.fetch_add(1, Ordering::Relaxed) + 1;
                    Ok(Some(json!(count)))
                })
                .location("src/user.rs"),
            ]
        }
    }

    #[test]
    fn matching_declaration_registers_and_records_emissions() {
        let mut tree = Arbor::new();
        tree.register(Arc::new(AppBranch)).unwrap();

        let node = &tree.graph()["app.init"];
        assert_eq!(node.owner, "AppBranch");
        assert_eq!(node.method, "boot");
        assert_eq!(node.emissions, ["user.created"]);
    }

    #[test]
    fn undeclared_emission_rejects_the_branch() {
        struct Sneaky;

        impl Branch for Sneaky {
            fn name(&self) -> &'static str {
                "Sneaky"
            }

            fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
                vec![
                    MethodBinding::new("app.init", "boot", |_, _| Ok(None))
                        .emits(["user.created"])
                        .source(MethodSource::Manifest(vec!["user.deleted".into()]))
                        .location("src/sneaky.rs"),
                ]
            }
        }

        let mut tree = Arbor::new();
        let err = tree.register(Arc::new(Sneaky)).unwrap_err();
        assert!(matches!(
            err,
            WiringError::UndeclaredEmission { ref events, .. } if events == &["user.deleted"]
        ));
        // Validation precedes any mutation for the method.
        assert!(tree.graph().is_empty());
        assert!(tree.emit("app.init", &[]).is_err());
    }

    #[test]
    fn second_binding_for_an_event_is_rejected() {
        struct Rival;

        impl Branch for Rival {
            fn name(&self) -> &'static str {
                "Rival"
            }

            fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
                vec![MethodBinding::new("app.init", "boot", |_, _| Ok(None))]
            }
        }

        let mut tree = Arbor::new();
        tree.register(Arc::new(AppBranch)).unwrap();
        let err = tree.register(Arc::new(Rival)).unwrap_err();
        assert_eq!(
            err,
            WiringError::DuplicateBinding {
                event: "app.init".into()
            }
        );
    }

    #[test]
    fn candidates_without_the_marker_are_not_eligible() {
        struct Freeloader;

        impl Candidate for Freeloader {
            fn candidate_name(&self) -> &str {
                "Freeloader"
            }

            fn as_branch(self: Arc<Self>) -> Option<Arc<dyn Branch>> {
                None
            }
        }

        let mut tree = Arbor::new();
        let err = tree.register(Arc::new(Freeloader)).unwrap_err();
        assert_eq!(
            err,
            WiringError::NotEligible {
                candidate: "Freeloader".into()
            }
        );
    }

    #[test]
    fn graph_node_and_binding_are_co_created() {
        let mut tree = Arbor::new();
        let user = Arc::new(UserBranch::new());
        tree.register(Arc::new(AppBranch)).unwrap();
        tree.register(user).unwrap();

        // `emit` never fails with UnknownEvent for a registered event, and
        // the nested emission reaches the leaf handler.
        let result = tree.emit("app.init", &[]).unwrap();
        assert_eq!(result, Some(json!(1)));
    }

    #[test]
    fn emit_for_an_unregistered_event_fails() {
        let tree = Arbor::new();
        let err = tree.emit("ghost.event", &[]).unwrap_err();
        assert_eq!(
            err,
            WiringError::UnknownEvent {
                event: "ghost.event".into()
            }
        );
    }

    #[test]
    fn handler_receives_caller_arguments() {
        struct EchoBranch;

        impl Branch for EchoBranch {
            fn name(&self) -> &'static str {
                "EchoBranch"
            }

            fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
                vec![MethodBinding::new("app.init", "echo", |_, args| {
                    Ok(args.first().cloned())
                })]
            }
        }

        let mut tree = Arbor::new();
        tree.register(Arc::new(EchoBranch)).unwrap();
        let result = tree.emit("app.init", &[json!({"user": "ada"})]).unwrap();
        assert_eq!(result, Some(json!({"user": "ada"})));
    }

    #[test]
    fn one_method_can_bind_several_events() {
        struct FanIn;

        impl Branch for FanIn {
            fn name(&self) -> &'static str {
                "FanIn"
            }

            fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
                vec![MethodBinding::new(
                    ["cache.flush", "cache.expire"],
                    "drop",
                    |_, _| Ok(None),
                )]
            }
        }

        let mut tree = Arbor::new();
        tree.register(Arc::new(FanIn)).unwrap();
        assert!(tree.graph().contains_key("cache.flush"));
        assert!(tree.graph().contains_key("cache.expire"));
        assert_eq!(tree.graph()["cache.flush"].method, "drop");
    }

    #[test]
    fn failure_keeps_mutations_from_earlier_methods() {
        struct Half;

        impl Branch for Half {
            fn name(&self) -> &'static str {
                "Half"
            }

            fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
                vec![
                    MethodBinding::new("good.event", "fine", |_, _| Ok(None)),
                    MethodBinding::new("bad.event", "broken", |_, _| Ok(None))
                        .emits(["never.emitted"]),
                ]
            }
        }

        let mut tree = Arbor::new();
        let err = tree.register(Arc::new(Half)).unwrap_err();
        assert!(matches!(err, WiringError::UnusedDeclaration { .. }));
        // The first method's commit survives; the failing one left nothing.
        assert!(tree.graph().contains_key("good.event"));
        assert!(!tree.graph().contains_key("bad.event"));
    }

    #[test]
    fn depth_limit_stops_cyclic_dispatch() {
        struct Echoer;

        impl Branch for Echoer {
            fn name(&self) -> &'static str {
                "Echoer"
            }

            fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
                vec![
                    MethodBinding::new("loop.tick", "tick", |tree, args| {
                        tree.emit("loop.tick", args)
                    })
                    .emits(["loop.tick"])
                    .source(MethodSource::Manifest(vec!["loop.tick".into()])),
                ]
            }
        }

        let mut tree = Arbor::new().with_depth_limit(8);
        tree.register(Arc::new(Echoer)).unwrap();
        let err = tree.emit("loop.tick", &[]).unwrap_err();
        assert_eq!(
            err,
            WiringError::DepthExceeded {
                event: "loop.tick".into(),
                limit: 8
            }
        );
    }

    #[test]
    fn depth_counter_rewinds_after_dispatch() {
        let mut tree = Arbor::new().with_depth_limit(2);
        let user = Arc::new(UserBranch::new());
        tree.register(Arc::new(AppBranch)).unwrap();
        tree.register(user).unwrap();

        // Each chain uses depth 2 of 2; repeated dispatch must not
        // accumulate.
        for _ in 0..5 {
            tree.emit("app.init", &[]).unwrap();
        }
    }

    #[test]
    fn base_dir_relativizes_locations() {
        struct Located;

        impl Branch for Located {
            fn name(&self) -> &'static str {
                "Located"
            }

            fn bindings(self: Arc<Self>) -> Vec<MethodBinding> {
                vec![
                    MethodBinding::new("app.init", "boot", |_, _| Ok(None))
                        .location("/srv/app/src/located.rs"),
                ]
            }
        }

        let mut tree = Arbor::new().with_base_dir("/srv/app");
        tree.register(Arc::new(Located)).unwrap();
        assert_eq!(tree.graph()["app.init"].location, "src/located.rs");
    }
}
