//! Tuple-target decomposition.
//!
//! Turns target syntax into a `TargetSlot` tree. Decomposition never fails:
//! targets that cannot receive a value become `Invalid` leaves whose reason
//! is reported when the leaf is bound. Only the purely syntactic errors
//! (`var (...)` with a type, lists shorter than two) are reported here.

use super::{InvalidTarget, SlotType, TargetSlot};
use crate::state::CheckerState;
use crate::syntax::{DeclaredType, ExprKind, TargetKind, TargetSyntax};
use csz_common::limits::MAX_DECONSTRUCTION_DEPTH;
use csz_common::{DiagnosticKind, Span};
use rustc_hash::FxHashSet;

/// Whether the statement assigns to existing targets or declares new ones.
///
/// The same syntax means different things in each: in an assignment, `_`
/// names a local called `_` when one is in scope.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecomposeMode {
    Assignment,
    Declaration,
}

const DISCARD_NAME: &str = "_";

impl CheckerState<'_> {
    pub(crate) fn decompose_target(&mut self, target: &TargetSyntax, mode: DecomposeMode) -> TargetSlot {
        let mut declared = FxHashSet::default();
        self.decompose_at(target, mode, false, &mut declared, 0)
    }

    fn decompose_at(
        &mut self,
        target: &TargetSyntax,
        mode: DecomposeMode,
        under_var: bool,
        declared: &mut FxHashSet<String>,
        depth: u32,
    ) -> TargetSlot {
        let span = target.span;
        if depth > MAX_DECONSTRUCTION_DEPTH {
            return TargetSlot::Invalid {
                reason: InvalidTarget::TooDeep,
                span,
            };
        }

        match &target.kind {
            TargetKind::Parenthesized(elements) => {
                self.decompose_list(span, elements, mode, under_var, declared, depth)
            }
            TargetKind::VarParenthesized { var_type, elements } => {
                if var_type.is_some() {
                    self.report(DiagnosticKind::VarFormDisallowsSpecificType, span, Vec::new());
                }
                self.decompose_list(span, elements, mode, true, declared, depth)
            }
            TargetKind::Declaration {
                declared: declared_type,
                name,
            } => {
                let slot_type = if under_var {
                    if matches!(declared_type, DeclaredType::Explicit(_)) {
                        self.report(DiagnosticKind::VarFormDisallowsSpecificType, span, Vec::new());
                    }
                    SlotType::Inferred
                } else {
                    slot_type(*declared_type)
                };
                self.new_variable(name, slot_type, span, declared)
            }
            TargetKind::Discard(declared_type) => {
                let slot_type = match declared_type {
                    Some(DeclaredType::Explicit(_)) if under_var => {
                        self.report(DiagnosticKind::VarFormDisallowsSpecificType, span, Vec::new());
                        SlotType::Inferred
                    }
                    Some(d) => slot_type(*d),
                    None => SlotType::Inferred,
                };
                TargetSlot::Discard {
                    declared: slot_type,
                    span,
                }
            }
            TargetKind::Identifier(name) if under_var => {
                if name == DISCARD_NAME {
                    TargetSlot::Discard {
                        declared: SlotType::Inferred,
                        span,
                    }
                } else {
                    self.new_variable(name, SlotType::Inferred, span, declared)
                }
            }
            TargetKind::Identifier(name) => self.existing_target(name, span, mode),
            TargetKind::Expression(expr) => match &expr.kind {
                ExprKind::Local(name) => self.existing_target(name, span, mode),
                ExprKind::Member {
                    name,
                    type_id,
                    assignable: true,
                } => TargetSlot::Variable {
                    name: name.clone(),
                    type_id: *type_id,
                    span,
                },
                ExprKind::Invalid => TargetSlot::Invalid {
                    reason: InvalidTarget::Error,
                    span,
                },
                _ => TargetSlot::Invalid {
                    reason: InvalidTarget::NotLvalue,
                    span,
                },
            },
        }
    }

    fn decompose_list(
        &mut self,
        span: Span,
        elements: &[TargetSyntax],
        mode: DecomposeMode,
        under_var: bool,
        declared: &mut FxHashSet<String>,
        depth: u32,
    ) -> TargetSlot {
        if elements.len() < 2 {
            self.report(DiagnosticKind::DeconstructTooFewElements, span, Vec::new());
            return TargetSlot::Invalid {
                reason: InvalidTarget::TooFewElements,
                span,
            };
        }
        let elements = elements
            .iter()
            .map(|e| self.decompose_at(e, mode, under_var, declared, depth + 1))
            .collect();
        TargetSlot::Nested { elements, span }
    }

    /// A bare name outside `var (...)`: an existing local, or `_`.
    fn existing_target(&self, name: &str, span: Span, mode: DecomposeMode) -> TargetSlot {
        if name == DISCARD_NAME
            && (mode == DecomposeMode::Declaration || !self.scopes.contains(DISCARD_NAME))
        {
            return TargetSlot::Discard {
                declared: SlotType::Inferred,
                span,
            };
        }
        match self.scopes.lookup(name) {
            Some(local) if local.is_readonly() => TargetSlot::Invalid {
                reason: InvalidTarget::ReadonlyLocal(name.to_string()),
                span,
            },
            Some(local) => TargetSlot::Variable {
                name: name.to_string(),
                type_id: local.type_id,
                span,
            },
            None => TargetSlot::Invalid {
                reason: InvalidTarget::UnknownName(name.to_string()),
                span,
            },
        }
    }

    fn new_variable(
        &self,
        name: &str,
        slot_type: SlotType,
        span: Span,
        declared: &mut FxHashSet<String>,
    ) -> TargetSlot {
        if name == DISCARD_NAME {
            return TargetSlot::Discard {
                declared: slot_type,
                span,
            };
        }
        if self.scopes.contains(name) || !declared.insert(name.to_string()) {
            return TargetSlot::Invalid {
                reason: InvalidTarget::DuplicateLocal(name.to_string()),
                span,
            };
        }
        TargetSlot::NewVariable {
            name: name.to_string(),
            declared: slot_type,
            span,
        }
    }
}

const fn slot_type(declared: DeclaredType) -> SlotType {
    match declared {
        DeclaredType::Var => SlotType::Inferred,
        DeclaredType::Explicit(ty) => SlotType::Explicit(ty),
    }
}
