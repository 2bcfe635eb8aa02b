//! Emission analysis seam.
//!
//! Validation needs to know which events a bound method *actually* emits,
//! independently of what its binding declares. [`EmissionAnalyzer`] is the
//! pluggable contract for that step; [`ScanAnalyzer`] is the default
//! implementation.
//!
//! # Soundness gap
//!
//! The scan recognizes only literal string arguments — `emit("name", ...)`
//! or `emit('name', ...)`. A dynamically constructed event name is invisible
//! to the analysis and therefore to validation. This is deliberate, carried
//! over from the original scanner; the [`MethodSource::Manifest`] path
//! avoids text scanning (and the gap) entirely by letting the method author
//! state the emitted events directly.

use std::path::PathBuf;

use regex::Regex;

use crate::error::{WiringError, WiringResult};

/// Describes where the actual emissions of a bound method come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSource {
    /// An explicit, author-written list of the events the body emits.
    Manifest(Vec<String>),
    /// Already-extracted source text to scan for literal emit calls.
    Inline {
        /// The method's source text.
        text: String,
    },
    /// A 1-based, inclusive line span of a file on disk to scan.
    Span {
        /// Path of the source file.
        file: PathBuf,
        /// First line of the method body.
        start_line: usize,
        /// Last line of the method body.
        end_line: usize,
    },
}

impl Default for MethodSource {
    fn default() -> Self {
        Self::Manifest(Vec::new())
    }
}

/// Resolves a [`MethodSource`] to the list of event names the method emits.
///
/// Implementations must preserve the literal-only property: only statically
/// visible event names are reported, never dynamically computed ones.
pub trait EmissionAnalyzer: Send + Sync {
    /// Returns the emitted event names, one entry per emission occurrence,
    /// in source order.
    fn emitted_events(&self, source: &MethodSource) -> WiringResult<Vec<String>>;
}

// ============================================================================
// ScanAnalyzer
// ============================================================================

/// Default analyzer: manifests pass through, source text is scanned for
/// literal `emit("...")` / `emit('...')` calls.
pub struct ScanAnalyzer {
    pattern: Regex,
}

impl ScanAnalyzer {
    /// Creates the analyzer with the literal-emission pattern.
    pub fn new() -> Self {
        Self {
            // Matches the quoted first argument of an emit call.
            pattern: Regex::new(r#"emit\(\s*['"]([^'"]+)['"]"#)
                .expect("hard-coded emission pattern"),
        }
    }

    fn scan(&self, text: &str) -> Vec<String> {
        self.pattern
            .captures_iter(text)
            .map(|cap| cap[1].to_string())
            .collect()
    }
}

impl Default for ScanAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl EmissionAnalyzer for ScanAnalyzer {
    fn emitted_events(&self, source: &MethodSource) -> WiringResult<Vec<String>> {
        match source {
            MethodSource::Manifest(events) => Ok(events.clone()),
            MethodSource::Inline { text } => Ok(self.scan(text)),
            MethodSource::Span {
                file,
                start_line,
                end_line,
            } => {
                let contents =
                    std::fs::read_to_string(file).map_err(|e| WiringError::SourceUnavailable {
                        file: file.display().to_string(),
                        reason: e.to_string(),
                    })?;
                let body: String = contents
                    .lines()
                    .skip(start_line.saturating_sub(1))
                    .take(end_line.saturating_sub(*start_line) + 1)
                    .collect::<Vec<_>>()
                    .join("\n");
                Ok(self.scan(&body))
            }
        }
    }
}
