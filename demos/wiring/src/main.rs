//! Wiring Demo
//!
//! A small application wired through the Arbor registry: an app branch
//! seeds the flow from `app.init`, a user branch reacts and fans out to a
//! mail branch, and the demo prints the resulting graph, dependency map,
//! and downstream-impact query before dispatching the root event.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package wiring-demo
//! RUST_LOG=debug cargo run --package wiring-demo
//! ```

use std::sync::Arc;

use anyhow::Result;
use arbor::prelude::*;
use serde_json::{Value, json};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Branches
// ============================================================================

/// Root of the flow: seeds a demo user when the application initializes.
struct AppBranch;

impl AppBranch {
    fn boot(&self, tree: &Arbor, _args: &[Value]) -> WiringResult<Option<Value>> {
        info!("application initializing");
        tree.emit("user.created", &[json!({ "name": "ada" })])
    }
}

define_branch! {
    branch: AppBranch as "AppBranch",
    methods: [
        boot {
            events: ["app.init"],
            emits: ["user.created"],
            body: ["user.created"],
        },
    ]
}

/// Reacts to new users and requests a welcome mail.
struct UserBranch;

impl UserBranch {
    fn created(&self, tree: &Arbor, args: &[Value]) -> WiringResult<Option<Value>> {
        let name = args
            .first()
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("unknown");
        info!(user = %name, "user created");
        tree.emit("mail.welcome", args)
    }
}

define_branch! {
    branch: UserBranch as "UserBranch",
    methods: [
        created {
            events: ["user.created"],
            emits: ["mail.welcome"],
            body: ["mail.welcome"],
        },
    ]
}

/// Leaf of the flow: pretends to send mail.
struct MailBranch;

impl MailBranch {
    fn welcome(&self, _tree: &Arbor, args: &[Value]) -> WiringResult<Option<Value>> {
        info!("sending welcome mail");
        Ok(args.first().cloned())
    }
}

define_branch! {
    branch: MailBranch as "MailBranch",
    methods: [
        welcome {
            events: ["mail.welcome"],
            emits: [],
            body: [],
        },
    ]
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut tree = Arbor::new().with_depth_limit(32);
    tree.register(Arc::new(AppBranch))?;
    tree.register(Arc::new(UserBranch))?;
    tree.register(Arc::new(MailBranch))?;

    println!("graph:\n{}", serde_json::to_string_pretty(tree.graph())?);

    let map = tree.dependency_map()?;
    println!("dependency map:\n{}", serde_json::to_string_pretty(&map)?);

    let affected = tree.affected_methods("AppBranch.boot")?;
    println!("downstream of AppBranch.boot: {affected:?}");

    let result = tree.emit("app.init", &[])?;
    println!("dispatch result: {result:?}");

    Ok(())
}
