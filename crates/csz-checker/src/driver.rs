//! Checking many method bodies at once.
//!
//! Every body gets its own `CheckerState` (scopes plus diagnostic bag) while
//! sharing the read-only `TypeCatalog`, so bodies are checked on rayon
//! workers and merged afterward in input order.

use crate::context::{CheckerOptions, MemberContext};
use crate::error_reporter::Resolved;
use crate::operations::{DeconstructionOperation, ForEachOperation, Operation};
use crate::state::CheckerState;
use crate::syntax::{DeconstructionStatement, ForEachStatement, MethodBody};
use csz_common::Diagnostic;
use csz_solver::TypeCatalog;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use serde::Serialize;
use tracing::{debug, info_span};

/// Operations and diagnostics of one method body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BodyResult {
    pub name: String,
    pub operations: Vec<Operation>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Per-body results plus every diagnostic, in input order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    pub bodies: Vec<BodyResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckResult {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn from_bodies(bodies: Vec<BodyResult>) -> Self {
        let diagnostics = bodies.iter().flat_map(|b| b.diagnostics.iter().cloned()).collect();
        Self { bodies, diagnostics }
    }
}

/// Check one body: parameters first, then its statements in order.
pub fn check_body(catalog: &TypeCatalog, options: &CheckerOptions, body: &MethodBody) -> BodyResult {
    let _span = info_span!("check_body", name = %body.name).entered();
    let mut state = CheckerState::new(catalog, options, &body.context);
    for param in &body.parameters {
        state.declare_parameter(param);
    }
    let operations = state.check_statements(&body.statements);
    BodyResult {
        name: body.name.clone(),
        operations,
        diagnostics: state.into_diagnostics(),
    }
}

/// Check independent bodies in parallel.
pub fn check_bodies(catalog: &TypeCatalog, options: &CheckerOptions, bodies: &[MethodBody]) -> CheckResult {
    debug!(bodies = bodies.len(), "checking bodies in parallel");
    let results: Vec<BodyResult> = bodies
        .par_iter()
        .map(|body| check_body(catalog, options, body))
        .collect();
    CheckResult::from_bodies(results)
}

/// Sequential counterpart of [`check_bodies`].
pub fn check_bodies_sequential(catalog: &TypeCatalog, options: &CheckerOptions, bodies: &[MethodBody]) -> CheckResult {
    CheckResult::from_bodies(bodies.iter().map(|body| check_body(catalog, options, body)).collect())
}

/// Resolve a single deconstruction statement outside any body.
pub fn resolve_deconstruction(
    catalog: &TypeCatalog,
    options: &CheckerOptions,
    member: &MemberContext,
    stmt: &DeconstructionStatement,
) -> Resolved<DeconstructionOperation> {
    let mut state = CheckerState::new(catalog, options, member);
    let op = state.bind_deconstruction(stmt);
    Resolved::new(op, state.into_diagnostics())
}

/// Resolve a single foreach statement outside any body.
pub fn resolve_foreach(
    catalog: &TypeCatalog,
    options: &CheckerOptions,
    member: &MemberContext,
    stmt: &ForEachStatement,
) -> Resolved<ForEachOperation> {
    let mut state = CheckerState::new(catalog, options, member);
    let op = state.bind_foreach(stmt);
    Resolved::new(op, state.into_diagnostics())
}
