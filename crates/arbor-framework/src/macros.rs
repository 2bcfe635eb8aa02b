//! Declarative branch definition.
//!
//! [`define_branch!`] generates the [`Branch`] impl for a type from a fixed
//! per-method grammar, so branch authors write ordinary inherent methods
//! and one declaration block instead of hand-building descriptor lists.
//!
//! [`Branch`]: crate::branch::Branch

/// Implements [`Branch`](crate::branch::Branch) for a type.
///
/// # Syntax
///
/// ```rust,ignore
/// use arbor_framework::define_branch;
///
/// struct UserBranch;
///
/// impl UserBranch {
///     fn boot(&self, tree: &Arbor, args: &[Value]) -> WiringResult<Option<Value>> {
///         tree.emit("user.created", args)
///     }
///
///     fn created(&self, _tree: &Arbor, _args: &[Value]) -> WiringResult<Option<Value>> {
///         Ok(None)
///     }
/// }
///
/// define_branch! {
///     branch: UserBranch as "UserBranch",
///     methods: [
///         boot {
///             events: ["app.init"],
///             emits: ["user.created"],
///             body: ["user.created"],
///         },
///         created {
///             events: ["user.created"],
///             emits: [],
///             body: [],
///         },
///     ]
/// }
/// ```
///
/// Each entry names an inherent method with the handler signature
/// `fn(&self, &Arbor, &[Value]) -> WiringResult<Option<Value>>`. `events`
/// lists the triggering events, `emits` the declared emission set, and
/// `body` the authored manifest of events the method body actually emits —
/// the registry cross-checks `emits` against `body` at registration time.
/// The binding location defaults to the defining file via `file!()`.
#[macro_export]
macro_rules! define_branch {
    (
        branch: $ty:ty as $name:literal,
        methods: [
            $( $method:ident {
                events: [$($event:literal),* $(,)?],
                emits: [$($emit:literal),* $(,)?],
                body: [$($performed:literal),* $(,)?] $(,)?
            } ),* $(,)?
        ] $(,)?
    ) => {
        impl $crate::branch::Branch for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn bindings(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::vec::Vec<$crate::branch::MethodBinding> {
                ::std::vec![
                    $(
                        {
                            let this = ::std::sync::Arc::clone(&self);
                            let events: ::std::vec::Vec<::std::string::String> =
                                ::std::vec![$(::std::string::String::from($event)),*];
                            let declared: ::std::vec::Vec<::std::string::String> =
                                ::std::vec![$(::std::string::String::from($emit)),*];
                            let performed: ::std::vec::Vec<::std::string::String> =
                                ::std::vec![$(::std::string::String::from($performed)),*];

                            $crate::branch::MethodBinding::new(
                                events,
                                ::std::stringify!($method),
                                move |tree, args| this.$method(tree, args),
                            )
                            .emits(declared)
                            .source($crate::__core::MethodSource::Manifest(performed))
                            .location(::std::file!())
                        }
                    ),*
                ]
            }
        }
    };
}
