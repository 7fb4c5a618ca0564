//! Binding the right-hand side of a deconstruction.
//!
//! Names the statement is declaring are "pending" until the statement
//! completes. Reading one from the right-hand side is a circular inference;
//! the read binds to the error type so it cannot also fail a conversion.

use crate::state::CheckerState;
use crate::syntax::{Expr, ExprKind};
use csz_common::{DiagnosticKind, Span};
use csz_solver::{ExprShape, TypeId};
use rustc_hash::FxHashSet;
use tracing::trace;

/// A bound source expression (or one element of it).
#[derive(Clone, Debug)]
pub(crate) struct SourceValue {
    pub span: Span,
    /// `None` for expressions without a type (`null`, `default`, lambdas).
    pub type_id: Option<TypeId>,
    pub shape: ExprShape,
    /// Elements of a tuple literal.
    pub elements: Option<Vec<SourceValue>>,
}

impl SourceValue {
    pub(crate) fn typed(span: Span, type_id: TypeId) -> Self {
        Self {
            span,
            type_id: Some(type_id),
            shape: ExprShape::Typed(type_id),
            elements: None,
        }
    }

    pub(crate) fn error(span: Span) -> Self {
        Self::typed(span, TypeId::ERROR)
    }

    pub(crate) fn type_or_error(&self) -> TypeId {
        self.type_id.unwrap_or(TypeId::ERROR)
    }

    pub(crate) fn is_error(&self) -> bool {
        self.type_id.is_some_and(TypeId::is_error)
    }
}

impl CheckerState<'_> {
    pub(crate) fn bind_source(&mut self, expr: &Expr, pending: &FxHashSet<&str>) -> SourceValue {
        let span = expr.span;
        match &expr.kind {
            ExprKind::Typed(ty) => SourceValue::typed(span, *ty),
            ExprKind::Member { type_id, .. } => SourceValue::typed(span, *type_id),
            ExprKind::IntegerLiteral(value) => SourceValue {
                span,
                type_id: Some(TypeId::INT),
                shape: ExprShape::Constant {
                    type_id: TypeId::INT,
                    value: *value,
                },
                elements: None,
            },
            ExprKind::Null => typeless(span, ExprShape::Null),
            ExprKind::Default => typeless(span, ExprShape::Default),
            ExprKind::Lambda => typeless(span, ExprShape::Lambda),
            ExprKind::MethodGroup(_) => typeless(span, ExprShape::MethodGroup),
            ExprKind::Local(name) => {
                if pending.contains(name.as_str()) {
                    trace!(name = %name, "read of a pending deconstruction variable");
                    self.report(DiagnosticKind::CircularInference, span, vec![name.clone()]);
                    return SourceValue::error(span);
                }
                match self.scopes.lookup(name) {
                    Some(local) => SourceValue::typed(span, local.type_id),
                    None => {
                        self.report(DiagnosticKind::NameNotInContext, span, vec![name.clone()]);
                        SourceValue::error(span)
                    }
                }
            }
            ExprKind::Tuple(items) => {
                let elements: Vec<SourceValue> = items.iter().map(|e| self.bind_source(e, pending)).collect();
                let shape = ExprShape::Tuple(elements.iter().map(|e| e.shape.clone()).collect());
                SourceValue {
                    span,
                    type_id: self.ctx.catalog.natural_type(&shape),
                    shape,
                    elements: Some(elements),
                }
            }
            ExprKind::Invalid => SourceValue::error(span),
        }
    }

    /// How a source value is named in conversion diagnostics.
    pub(crate) fn source_display(&self, value: &SourceValue) -> String {
        if let Some(ty) = value.type_id {
            return self.type_name(ty);
        }
        match &value.elements {
            Some(elements) => {
                let parts: Vec<String> = elements.iter().map(|e| self.source_display(e)).collect();
                format!("({})", parts.join(", "))
            }
            None => match value.shape {
                ExprShape::Null => "<null>".to_string(),
                ExprShape::Default => "default".to_string(),
                ExprShape::Lambda => "lambda expression".to_string(),
                ExprShape::MethodGroup => "method group".to_string(),
                _ => "?".to_string(),
            },
        }
    }
}

fn typeless(span: Span, shape: ExprShape) -> SourceValue {
    SourceValue {
        span,
        type_id: None,
        shape,
        elements: None,
    }
}
