//! Declared-vs-actual emission validation.
//!
//! Registration cross-checks two independent statements about a bound
//! method: the emission set its binding declares, and the emission set the
//! analyzer finds in its body. The two must be equal as sets. Validation is
//! pure; the only outcome is `Ok` or one of the two mismatch errors.

use arbor_core::{WiringError, WiringResult};

/// Verifies that `declared` and `actual` describe the same emission set.
///
/// The subset checks run in a fixed order so diagnostics are deterministic
/// when both directions fail: events emitted but not declared surface
/// first (`UndeclaredEmission`), then declarations never emitted
/// (`UnusedDeclaration`).
pub fn check_emissions(
    location: &str,
    method: &str,
    declared: &[String],
    actual: &[String],
) -> WiringResult<()> {
    let undeclared = diff(actual, declared);
    if !undeclared.is_empty() {
        return Err(WiringError::UndeclaredEmission {
            location: location.to_string(),
            method: method.to_string(),
            events: undeclared,
        });
    }

    let unused = diff(declared, actual);
    if !unused.is_empty() {
        return Err(WiringError::UnusedDeclaration {
            location: location.to_string(),
            method: method.to_string(),
            events: unused,
        });
    }

    Ok(())
}

/// Entries of `left` absent from `right`, in `left` order, occurrences
/// preserved.
fn diff(left: &[String], right: &[String]) -> Vec<String> {
    left.iter()
        .filter(|event| !right.iter().any(|other| other == *event))
        .cloned()
        .collect()
}
