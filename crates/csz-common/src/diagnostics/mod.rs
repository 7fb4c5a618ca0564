//! Diagnostic types and message lookup for the resolvers.
//!
//! Message data lives in `data.rs`; the closed taxonomy lives in `kinds.rs`.
//! Diagnostics are plain values appended to a sink, never thrown.

use crate::span::Span;
use serde::Serialize;

mod data;
mod kinds;
pub use data::{DIAGNOSTIC_MESSAGES, diagnostic_codes, diagnostic_messages};
pub use kinds::DiagnosticKind;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// Related information for a diagnostic (e.g., "see also" locations).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticRelatedInformation {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

/// A resolver diagnostic: `(kind, location, substituted arguments)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub file: String,
    pub start: u32,
    pub length: u32,
    /// Arguments substituted into the template, in placeholder order.
    pub args: Vec<String>,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Related information spans (e.g., the other candidate of an ambiguity)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    /// Create a diagnostic of `kind` at `span`, formatting its message from `args`.
    #[must_use]
    pub fn new(file: &str, span: Span, kind: DiagnosticKind, args: Vec<String>) -> Self {
        let refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let message_text = format_message(kind.template(), &refs);
        Self {
            kind,
            file: file.to_string(),
            start: span.start,
            length: span.len(),
            args,
            message_text,
            category: kind.category(),
            code: kind.code(),
            related_information: Vec::new(),
        }
    }

    /// Add related information to this diagnostic.
    #[must_use]
    pub fn with_related(mut self, span: Span, message: String) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            file: self.file.clone(),
            start: span.start,
            length: span.len(),
            message_text: message,
            category: DiagnosticCategory::Message,
            code: 0,
        });
        self
    }

    #[must_use]
    pub const fn span(&self) -> Span {
        Span::at(self.start, self.length)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES
        .binary_search_by_key(&code, |m| m.code)
        .ok()
        .map(|idx| &DIAGNOSTIC_MESSAGES[idx])
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
#[path = "../../tests/diagnostics_tests.rs"]
mod tests;
