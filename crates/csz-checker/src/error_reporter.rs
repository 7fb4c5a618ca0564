//! Diagnostic sink and result shapes.
//!
//! Every resolver appends to the body's `DiagnosticBag` and keeps going. The
//! bag drops literal repeats (same kind at the same location), which is what
//! re-binding a node produces; distinct errors in one statement are all kept.

use csz_common::{Diagnostic, DiagnosticKind, Span};
use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::trace;

// =============================================================================
// DiagnosticBag
// =============================================================================

#[derive(Debug, Default)]
pub struct DiagnosticBag {
    file: String,
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<(DiagnosticKind, u32, u32)>,
}

/// Position in a bag, for speculative probes that must leave no trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BagMark(usize);

impl DiagnosticBag {
    pub fn new(file: &str) -> Self {
        Self {
            file: file.to_string(),
            diagnostics: Vec::with_capacity(csz_common::limits::DIAGNOSTIC_BAG_CAPACITY),
            seen: FxHashSet::default(),
        }
    }

    /// Append a diagnostic. Returns `false` if an identical one was already reported.
    pub fn report(&mut self, kind: DiagnosticKind, span: Span, args: Vec<String>) -> bool {
        if !self.seen.insert((kind, span.start, span.len())) {
            return false;
        }
        trace!(code = kind.code(), ?kind, start = span.start, "report diagnostic");
        self.diagnostics
            .push(Diagnostic::new(&self.file, span, kind, args));
        true
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn mark(&self) -> BagMark {
        BagMark(self.diagnostics.len())
    }

    /// Did any error get reported after `mark`?
    pub fn has_errors_since(&self, mark: BagMark) -> bool {
        self.diagnostics
            .get(mark.0..)
            .is_some_and(|tail| tail.iter().any(Diagnostic::is_error))
    }

    /// Diagnostics reported after `mark`.
    pub fn since(&self, mark: BagMark) -> &[Diagnostic] {
        self.diagnostics.get(mark.0..).unwrap_or_default()
    }

    /// Discard everything reported after `mark`.
    pub fn rollback(&mut self, mark: BagMark) {
        for diag in self.diagnostics.drain(mark.0.min(self.diagnostics.len())..) {
            self.seen.remove(&(diag.kind, diag.start, diag.length));
        }
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

// =============================================================================
// Resolved
// =============================================================================

/// A resolution result: the value always exists, possibly error-typed, next
/// to the diagnostics produced while computing it.
#[derive(Clone, Debug, Serialize)]
pub struct Resolved<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Resolved<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn kinds(&self) -> Vec<DiagnosticKind> {
        self.diagnostics.iter().map(|d| d.kind).collect()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            diagnostics: self.diagnostics,
        }
    }
}
