//! Deconstruction resolution: pairing target slots with source elements.
//!
//! Resolution always yields a plan. Failures report their diagnostics and
//! produce an error plan whose leaves still carry whatever types could be
//! determined (explicitly typed targets keep their declared type).

use super::source::SourceValue;
use super::{
    DecomposeMode, DeconstructionPlan, InvalidTarget, PlanElement, PlanStrategy, SlotConversion, SlotType,
    TargetSlot,
};
use crate::context::Feature;
use crate::error_reporter::BagMark;
use crate::operations::{DeconstructionOperation, TargetOperation};
use crate::scope::{LocalKind, LocalSymbol};
use crate::state::CheckerState;
use crate::syntax::{DeconstructionKind, DeconstructionStatement, TargetSyntax};
use csz_common::{DiagnosticKind, Span};
use csz_solver::{Conversion, ConversionOracle, TypeId};
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

impl CheckerState<'_> {
    /// Bind `(a, b) = e`, `var (a, b) = e` or a `for` initializer of either form.
    #[tracing::instrument(level = "trace", skip_all, fields(kind = ?stmt.kind))]
    pub fn bind_deconstruction(&mut self, stmt: &DeconstructionStatement) -> DeconstructionOperation {
        let mark = self.ctx.diagnostics.mark();
        self.check_feature(Feature::Tuples, stmt.span);

        let mode = match stmt.kind {
            DeconstructionKind::Assignment => DecomposeMode::Assignment,
            DeconstructionKind::Declaration | DeconstructionKind::ForInitializer => DecomposeMode::Declaration,
        };
        let slot = self.decompose_target(&stmt.target, mode);
        let source = {
            let pending: FxHashSet<&str> = slot.declared_names().into_iter().collect();
            self.bind_source(&stmt.value, &pending)
        };

        self.finish_deconstruction(stmt.kind, &slot, &source, stmt.span, LocalKind::Local, mark)
    }

    /// Bind `foreach (var (k, v) in ...)`: the target deconstructs one element
    /// of type `element_type`. Declared names become readonly iteration
    /// variables in the current (loop) scope.
    pub(crate) fn bind_iteration_deconstruction(
        &mut self,
        target: &TargetSyntax,
        element_type: TypeId,
    ) -> DeconstructionOperation {
        let mark = self.ctx.diagnostics.mark();
        self.check_feature(Feature::Tuples, target.span);

        let slot = self.decompose_target(target, DecomposeMode::Declaration);
        let source = SourceValue::typed(target.span, element_type);
        self.finish_deconstruction(
            DeconstructionKind::Declaration,
            &slot,
            &source,
            target.span,
            LocalKind::IterationVariable,
            mark,
        )
    }

    fn finish_deconstruction(
        &mut self,
        kind: DeconstructionKind,
        slot: &TargetSlot,
        source: &SourceValue,
        span: Span,
        local_kind: LocalKind,
        mark: BagMark,
    ) -> DeconstructionOperation {
        let (plan, target) = match slot {
            TargetSlot::Nested { elements, span: target_span } => {
                let plan = self.resolve_nested(elements, source, span);
                let target = self.target_operation(&plan, *target_span);
                (plan, target)
            }
            other => {
                let plan = self.error_plan(std::slice::from_ref(other));
                (plan, TargetOperation::Invalid { span: other.span() })
            }
        };

        self.declare_plan_locals(&plan, local_kind);

        let type_id = plan.target_type(self.ctx.catalog);
        let is_invalid = self.ctx.diagnostics.has_errors_since(mark);
        debug!(
            leaves = plan.leaf_count(),
            strategy = ?plan.strategy,
            is_invalid,
            "deconstruction bound"
        );
        DeconstructionOperation {
            span,
            kind,
            target,
            plan,
            type_id,
            is_invalid,
        }
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve one parenthesized level against `source`. Cardinality errors
    /// are reported at `report_span`.
    fn resolve_nested(&mut self, elements: &[TargetSlot], source: &SourceValue, report_span: Span) -> DeconstructionPlan {
        let arity = elements.len();

        if let Some(items) = &source.elements {
            if items.len() != arity {
                self.report_cardinality(items.len(), arity, report_span);
                return self.error_plan(elements);
            }
            return self.pair_positionally(elements, items, PlanStrategy::TuplePositional);
        }

        let Some(source_type) = source.type_id else {
            self.report(DiagnosticKind::RequiresTypedExpression, source.span, Vec::new());
            return self.untyped_plan(elements, source);
        };
        if source_type.is_error() {
            return self.error_plan(elements);
        }
        if source_type == TypeId::VOID {
            self.report(
                DiagnosticKind::NoSuchMember,
                source.span,
                vec![self.type_name(TypeId::VOID), "Deconstruct".to_string()],
            );
            self.report_missing_deconstruct(TypeId::VOID, arity, source.span);
            return self.error_plan(elements);
        }
        if source_type == TypeId::DYNAMIC {
            self.report(DiagnosticKind::CannotDeconstructDynamic, source.span, Vec::new());
            return self.error_plan(elements);
        }

        if let Some(tuple) = self.ctx.catalog.types().tuple_elements(source_type) {
            if tuple.len() != arity {
                self.report_cardinality(tuple.len(), arity, report_span);
                return self.error_plan(elements);
            }
            let items: Vec<SourceValue> = tuple.iter().map(|&t| SourceValue::typed(source.span, t)).collect();
            return self.pair_positionally(elements, &items, PlanStrategy::TuplePositional);
        }

        match self.find_deconstruct(source_type, arity, source.span, report_span) {
            Some(invocation) => {
                let items: Vec<SourceValue> = invocation
                    .out_types
                    .iter()
                    .map(|&t| SourceValue::typed(source.span, t))
                    .collect();
                self.pair_positionally(elements, &items, PlanStrategy::MethodInvocation(invocation))
            }
            None => self.error_plan(elements),
        }
    }

    fn pair_positionally(
        &mut self,
        elements: &[TargetSlot],
        items: &[SourceValue],
        strategy: PlanStrategy,
    ) -> DeconstructionPlan {
        let elements = elements
            .iter()
            .zip(items)
            .map(|(slot, item)| self.bind_element(slot, item))
            .collect();
        DeconstructionPlan { strategy, elements }
    }

    fn bind_element(&mut self, slot: &TargetSlot, item: &SourceValue) -> PlanElement {
        match slot {
            TargetSlot::Nested { elements, span } => PlanElement::Nested {
                span: *span,
                source_type: item.type_or_error(),
                plan: self.resolve_nested(elements, item, *span),
            },
            _ => self.bind_leaf(slot, item),
        }
    }

    /// Placeholder plan after a failure already reported (or not worth
    /// reporting). Leaves are bound against the error type.
    fn error_plan(&mut self, elements: &[TargetSlot]) -> DeconstructionPlan {
        let elements = elements
            .iter()
            .map(|slot| self.bind_element(slot, &SourceValue::error(slot.span())))
            .collect();
        DeconstructionPlan {
            strategy: PlanStrategy::Error,
            elements,
        }
    }

    /// Plan for a source without a type: every implicitly typed leaf gets its
    /// own inference failure; explicitly typed leaves stay quiet.
    fn untyped_plan(&mut self, elements: &[TargetSlot], source: &SourceValue) -> DeconstructionPlan {
        let elements = elements
            .iter()
            .map(|slot| match slot {
                TargetSlot::Nested { elements, span } => PlanElement::Nested {
                    span: *span,
                    source_type: TypeId::ERROR,
                    plan: self.untyped_plan(elements, source),
                },
                TargetSlot::NewVariable {
                    declared: SlotType::Inferred,
                    ..
                }
                | TargetSlot::Discard {
                    declared: SlotType::Inferred,
                    ..
                } => self.bind_leaf(slot, source),
                _ => self.bind_leaf(slot, &SourceValue::error(slot.span())),
            })
            .collect();
        DeconstructionPlan {
            strategy: PlanStrategy::Error,
            elements,
        }
    }

    // =========================================================================
    // Leaves
    // =========================================================================

    fn bind_leaf(&mut self, slot: &TargetSlot, item: &SourceValue) -> PlanElement {
        let conversion = match slot {
            TargetSlot::Variable { type_id, span, .. }
            | TargetSlot::NewVariable {
                declared: SlotType::Explicit(type_id),
                span,
                ..
            }
            | TargetSlot::Discard {
                declared: SlotType::Explicit(type_id),
                span,
            } => self.convert_leaf(item, *type_id, *span),
            TargetSlot::NewVariable {
                name,
                declared: SlotType::Inferred,
                span,
            } => self.infer_leaf(item, Some(name), *span),
            TargetSlot::Discard {
                declared: SlotType::Inferred,
                span,
            } => self.infer_leaf(item, None, *span),
            TargetSlot::Invalid { reason, span } => {
                self.report_invalid_target(reason, *span);
                error_conversion()
            }
            TargetSlot::Nested { .. } => error_conversion(),
        };
        PlanElement::Leaf {
            slot: slot.clone(),
            source_type: item.type_or_error(),
            conversion,
        }
    }

    /// Classify `item` into a leaf of known type `target`.
    fn convert_leaf(&mut self, item: &SourceValue, target: TypeId, span: Span) -> SlotConversion {
        let catalog = self.ctx.catalog;
        let conversion = if target.is_error() || item.is_error() {
            Conversion::identity()
        } else {
            catalog.classify_expression(&item.shape, target)
        };

        if !conversion.exists() {
            let explicit_exists = item
                .type_id
                .is_some_and(|source| catalog.classify_explicit(source, target).exists());
            let kind = if explicit_exists {
                DiagnosticKind::NoImplicitConversionExplicitExists
            } else {
                DiagnosticKind::NoImplicitConversion
            };
            self.report(kind, span, vec![self.source_display(item), self.type_name(target)]);
        }
        trace!(target = target.0, kind = ?conversion.kind, "leaf conversion");

        SlotConversion {
            target_type: target,
            conversion,
        }
    }

    /// Fix an implicitly typed leaf to the type of its source element.
    fn infer_leaf(&mut self, item: &SourceValue, name: Option<&str>, span: Span) -> SlotConversion {
        if let Some(type_id) = item.type_id {
            return SlotConversion {
                target_type: type_id,
                conversion: Conversion::identity(),
            };
        }
        match name {
            Some(name) => self.report(DiagnosticKind::TypeInferenceFailed, span, vec![name.to_string()]),
            None => self.report(DiagnosticKind::DiscardTypeInferenceFailed, span, Vec::new()),
        }
        error_conversion()
    }

    fn report_invalid_target(&mut self, reason: &InvalidTarget, span: Span) {
        match reason {
            InvalidTarget::NotLvalue => {
                self.report(DiagnosticKind::AssignmentTargetNotLvalue, span, Vec::new());
            }
            InvalidTarget::UnknownName(name) => {
                self.report(DiagnosticKind::NameNotInContext, span, vec![name.clone()]);
            }
            InvalidTarget::ReadonlyLocal(name) => {
                self.report(
                    DiagnosticKind::ReadonlyLocalAssignment,
                    span,
                    vec![name.clone(), "foreach iteration variable".to_string()],
                );
            }
            InvalidTarget::DuplicateLocal(name) => {
                self.report(DiagnosticKind::LocalDuplicate, span, vec![name.clone()]);
            }
            // Already reported, or a cascade of an earlier error.
            InvalidTarget::TooFewElements | InvalidTarget::TooDeep | InvalidTarget::Error => {}
        }
    }

    fn report_cardinality(&mut self, source_count: usize, target_count: usize, span: Span) {
        self.report(
            DiagnosticKind::CardinalityMismatch,
            span,
            vec![source_count.to_string(), target_count.to_string()],
        );
    }

    // =========================================================================
    // Operation tree
    // =========================================================================

    fn target_operation(&self, plan: &DeconstructionPlan, span: Span) -> TargetOperation {
        let elements = plan
            .elements
            .iter()
            .map(|element| match element {
                PlanElement::Leaf { slot, conversion, .. } => leaf_target(slot, conversion.target_type),
                PlanElement::Nested { span, plan, .. } => self.target_operation(plan, *span),
            })
            .collect();
        TargetOperation::Tuple {
            elements,
            type_id: plan.target_type(self.ctx.catalog),
            span,
        }
    }

    /// Bring the plan's new variables into scope with their final types.
    fn declare_plan_locals(&mut self, plan: &DeconstructionPlan, kind: LocalKind) {
        for (slot, conversion) in plan.leaves() {
            if let TargetSlot::NewVariable { name, span, .. } = slot {
                let symbol = LocalSymbol::new(name, conversion.target_type, kind, *span);
                if !self.scopes.declare(symbol) {
                    self.report(DiagnosticKind::LocalDuplicate, *span, vec![name.clone()]);
                }
            }
        }
    }
}

fn leaf_target(slot: &TargetSlot, type_id: TypeId) -> TargetOperation {
    match slot {
        TargetSlot::Variable { name, span, .. } => TargetOperation::Variable {
            name: name.clone(),
            type_id,
            span: *span,
        },
        TargetSlot::NewVariable { name, span, .. } => TargetOperation::Declared {
            name: name.clone(),
            type_id,
            span: *span,
        },
        TargetSlot::Discard { span, .. } => TargetOperation::Discard { type_id, span: *span },
        TargetSlot::Nested { span, .. } | TargetSlot::Invalid { span, .. } => TargetOperation::Invalid { span: *span },
    }
}

const fn error_conversion() -> SlotConversion {
    SlotConversion {
        target_type: TypeId::ERROR,
        conversion: Conversion::identity(),
    }
}
