//! `CheckerState`: the per-body binder that owns scopes and diagnostics.
//!
//! Resolution logic lives in `impl CheckerState` blocks spread across the
//! `deconstruction` and `foreach` modules; this file holds construction,
//! statement dispatch and the small reporting helpers they share.

use crate::context::{CheckerContext, CheckerOptions, Feature, MemberContext};
use crate::operations::Operation;
use crate::scope::{LocalKind, LocalSymbol, ScopeStack};
use crate::syntax::{LocalDeclaration, Statement};
use csz_common::{Diagnostic, DiagnosticKind, Span};
use csz_solver::{MemberId, TypeCatalog, TypeId};
use tracing::debug;

pub struct CheckerState<'a> {
    pub ctx: CheckerContext<'a>,
    pub scopes: ScopeStack,
}

impl<'a> CheckerState<'a> {
    pub fn new(catalog: &'a TypeCatalog, options: &'a CheckerOptions, member: &'a MemberContext) -> Self {
        Self {
            ctx: CheckerContext::new(catalog, options, member),
            scopes: ScopeStack::new(),
        }
    }

    /// Bring a parameter (or any pre-existing local) into scope.
    pub fn declare_parameter(&mut self, param: &LocalDeclaration) {
        let symbol = LocalSymbol::new(&param.name, param.type_id, LocalKind::Parameter, param.span);
        if !self.scopes.declare(symbol) {
            self.report(DiagnosticKind::LocalDuplicate, param.span, vec![param.name.clone()]);
        }
    }

    pub fn check_statements(&mut self, statements: &[Statement]) -> Vec<Operation> {
        statements.iter().map(|s| self.check_statement(s)).collect()
    }

    pub fn check_statement(&mut self, statement: &Statement) -> Operation {
        match statement {
            Statement::Local(decl) => {
                let symbol = LocalSymbol::new(&decl.name, decl.type_id, LocalKind::Local, decl.span);
                if !self.scopes.declare(symbol) {
                    self.report(DiagnosticKind::LocalDuplicate, decl.span, vec![decl.name.clone()]);
                }
                Operation::LocalDeclaration {
                    name: decl.name.clone(),
                    type_id: decl.type_id,
                    span: decl.span,
                }
            }
            Statement::Deconstruction(stmt) => Operation::Deconstruction(self.bind_deconstruction(stmt)),
            Statement::ForEach(stmt) => Operation::ForEach(self.bind_foreach(stmt)),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.ctx.diagnostics.diagnostics()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        debug!(count = self.ctx.diagnostics.len(), "checker finished");
        self.ctx.diagnostics.into_vec()
    }

    // =========================================================================
    // Reporting helpers
    // =========================================================================

    pub(crate) fn report(&mut self, kind: DiagnosticKind, span: Span, args: Vec<String>) {
        self.ctx.diagnostics.report(kind, span, args);
    }

    pub(crate) fn type_name(&self, ty: TypeId) -> String {
        self.ctx.catalog.display(ty)
    }

    pub(crate) fn member_name(&self, member: MemberId) -> String {
        self.ctx.catalog.display_member(member)
    }

    /// Report `FeatureNotAvailable` when `feature` is above the configured
    /// language version. Returns whether the feature is available.
    pub(crate) fn check_feature(&mut self, feature: Feature, span: Span) -> bool {
        let options = self.ctx.options;
        if options.supports(feature) {
            return true;
        }
        self.report(
            DiagnosticKind::FeatureNotAvailable,
            span,
            vec![
                feature.display_name().to_string(),
                options.language_version.display().to_string(),
                feature.required_version().display().to_string(),
            ],
        );
        false
    }
}
