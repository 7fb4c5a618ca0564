//! Binding a `foreach` statement: collection, iteration variable and body.

use super::{EnumerationStrategy, EnumeratorInfo};
use crate::context::Feature;
use crate::operations::{ForEachOperation, IterationVariable};
use crate::scope::{LocalKind, LocalSymbol};
use crate::state::CheckerState;
use crate::syntax::{DeclaredType, ForEachStatement, ForEachVariable};
use csz_common::{DiagnosticKind, Span};
use csz_solver::{Conversion, ConversionOracle, RefKind};
use tracing::debug;

impl CheckerState<'_> {
    #[tracing::instrument(level = "trace", skip_all, fields(is_await = stmt.is_await))]
    pub fn bind_foreach(&mut self, stmt: &ForEachStatement) -> ForEachOperation {
        let mark = self.ctx.diagnostics.mark();
        if stmt.is_await {
            self.check_feature(Feature::AsyncStreams, stmt.span);
        }

        let mut info = self.classify_collection(&stmt.collection, stmt.is_await);

        // The iteration variable and the body share one scope.
        self.scopes.push();
        let (variable, element_conversion) = match &stmt.variable {
            ForEachVariable::Single {
                declared,
                name,
                ref_kind,
                span,
            } => self.bind_single_variable(&mut info, *declared, name, *ref_kind, *span, stmt.collection.span),
            ForEachVariable::Deconstruction(target) => {
                let op = self.bind_iteration_deconstruction(target, info.element_type);
                (IterationVariable::Deconstruction(Box::new(op)), Conversion::identity())
            }
        };
        let body = self.check_statements(&stmt.body);
        self.scopes.pop();

        let is_invalid = self.ctx.diagnostics.has_errors_since(mark);
        debug!(
            strategy = ?info.strategy,
            variable_type = variable.type_id().0,
            is_invalid,
            "foreach bound"
        );
        ForEachOperation {
            span: stmt.span,
            is_await: stmt.is_await,
            info,
            variable,
            element_conversion,
            body,
            is_invalid,
        }
    }

    fn bind_single_variable(
        &mut self,
        info: &mut EnumeratorInfo,
        declared: DeclaredType,
        name: &str,
        ref_kind: RefKind,
        span: Span,
        collection_span: Span,
    ) -> (IterationVariable, Conversion) {
        let catalog = self.ctx.catalog;
        let element = info.element_type;

        let (type_id, element_conversion) = match declared {
            DeclaredType::Var => (element, Conversion::identity()),
            DeclaredType::Explicit(target) => {
                let conversion = if element.is_error() || target.is_error() {
                    Conversion::identity()
                } else {
                    catalog.classify_explicit(element, target)
                };
                if !conversion.exists() {
                    self.report(
                        DiagnosticKind::NoExplicitConversion,
                        span,
                        vec![self.type_name(element), self.type_name(target)],
                    );
                }
                (target, conversion)
            }
        };

        // Arrays read `Current` as `object`; `var` skips the round trip.
        info.current_conversion = match (info.strategy, declared) {
            (EnumerationStrategy::Array, DeclaredType::Explicit(target)) if !target.is_error() => {
                catalog.classify_explicit(info.current_type, target)
            }
            _ => element_conversion.clone(),
        };

        if ref_kind.is_by_ref() {
            self.check_ref_iteration(info, ref_kind, &element_conversion, span, collection_span);
        }

        let symbol = LocalSymbol::new(name, type_id, LocalKind::IterationVariable, span).with_ref_kind(ref_kind);
        if !self.scopes.declare(symbol) {
            self.report(DiagnosticKind::LocalDuplicate, span, vec![name.to_string()]);
        }

        let variable = IterationVariable::Single {
            name: name.to_string(),
            type_id,
            ref_kind,
            span,
        };
        (variable, element_conversion)
    }

    /// `foreach (ref var x in ...)` / `foreach (ref readonly var x in ...)`.
    fn check_ref_iteration(
        &mut self,
        info: &EnumeratorInfo,
        ref_kind: RefKind,
        element_conversion: &Conversion,
        span: Span,
        collection_span: Span,
    ) {
        self.check_feature(Feature::RefForeach, span);

        let member = self.ctx.member;
        if member.is_async {
            self.report(DiagnosticKind::BadAsyncLocalType, span, Vec::new());
        } else if member.is_iterator {
            self.report(DiagnosticKind::BadIteratorLocalType, span, Vec::new());
        }

        if info.is_error() {
            return;
        }
        if !info.current_ref_kind.is_by_ref() {
            self.report(DiagnosticKind::RefIterationOverByValueCurrent, collection_span, Vec::new());
        } else if ref_kind == RefKind::Ref && info.current_ref_kind == RefKind::In {
            self.report(
                DiagnosticKind::RefIterationOverReadonlyCurrent,
                collection_span,
                vec!["property".to_string(), "Current".to_string()],
            );
        } else if !element_conversion.is_identity() {
            self.report(
                DiagnosticKind::RefIterationRequiresIdentity,
                span,
                vec![self.type_name(info.element_type)],
            );
        }
    }
}
