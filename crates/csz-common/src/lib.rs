//! Common types and utilities for the csz semantic resolution engine.
//!
//! This crate provides foundational types used across all csz crates:
//! - Source spans (`Span`, `Spanned`)
//! - Resolver limits and thresholds
//! - The diagnostic record, its closed taxonomy (`DiagnosticKind`) and message table

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::{Span, Spanned};

// Centralized limits and thresholds
pub mod limits;

// Diagnostic types, taxonomy and message lookup
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticKind, DiagnosticRelatedInformation, format_message,
};
