//! Deconstruction: `(a, b) = e`, `var (a, b) = e`, and deconstructing
//! foreach variables.
//!
//! Binding runs in three steps:
//! - `decompose`: target syntax to a `TargetSlot` tree (never fails)
//! - `source`: the right-hand side to a `SourceValue`, rejecting reads of
//!   names the statement is still declaring
//! - `resolver` / `deconstruct_method`: pair slots with source elements,
//!   positionally for tuples or through a `Deconstruct` method, and classify
//!   one conversion per leaf

mod decompose;
mod deconstruct_method;
mod resolver;
mod source;

pub use decompose::DecomposeMode;

use crate::operations::ReceiverKind;
use csz_common::Span;
use csz_solver::{Conversion, MemberId, TypeId};
use serde::Serialize;

// =============================================================================
// Target slots
// =============================================================================

/// Type of a newly declared slot.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum SlotType {
    Explicit(TypeId),
    /// `var`: fixed from the paired source element.
    Inferred,
}

/// Why a target leaf cannot receive a value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum InvalidTarget {
    NotLvalue,
    UnknownName(String),
    ReadonlyLocal(String),
    DuplicateLocal(String),
    /// Parenthesized list with fewer than two elements; already reported.
    TooFewElements,
    /// Nesting beyond the resolver's depth limit.
    TooDeep,
    /// The target expression was already in error.
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TargetSlot {
    /// An existing local or assignable member.
    Variable {
        name: String,
        type_id: TypeId,
        span: Span,
    },
    NewVariable {
        name: String,
        declared: SlotType,
        span: Span,
    },
    Discard {
        declared: SlotType,
        span: Span,
    },
    Nested {
        elements: Vec<TargetSlot>,
        span: Span,
    },
    Invalid {
        reason: InvalidTarget,
        span: Span,
    },
}

impl TargetSlot {
    pub const fn span(&self) -> Span {
        match self {
            Self::Variable { span, .. }
            | Self::NewVariable { span, .. }
            | Self::Discard { span, .. }
            | Self::Nested { span, .. }
            | Self::Invalid { span, .. } => *span,
        }
    }

    /// Number of leaves under this slot.
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Nested { elements, .. } => elements.iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }

    /// Names this target declares.
    pub fn declared_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_declared_names(&mut names);
        names
    }

    fn collect_declared_names<'s>(&'s self, out: &mut Vec<&'s str>) {
        match self {
            Self::NewVariable { name, .. } => out.push(name),
            Self::Nested { elements, .. } => {
                for element in elements {
                    element.collect_declared_names(out);
                }
            }
            _ => {}
        }
    }
}

// =============================================================================
// Plans
// =============================================================================

/// A resolved `Deconstruct` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeconstructInvocation {
    pub method: MemberId,
    pub receiver: ReceiverKind,
    pub receiver_type: TypeId,
    /// Inferred method type arguments (generic extension methods).
    pub type_arguments: Vec<TypeId>,
    /// Instantiated `out` parameter types, in target order.
    pub out_types: Vec<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PlanStrategy {
    TuplePositional,
    MethodInvocation(DeconstructInvocation),
    /// Resolution failed; elements carry error-typed placeholders.
    Error,
}

/// One leaf's conversion verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlotConversion {
    /// Final type of the leaf (inferred, declared or existing).
    pub target_type: TypeId,
    pub conversion: Conversion,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum PlanElement {
    Leaf {
        slot: TargetSlot,
        source_type: TypeId,
        conversion: SlotConversion,
    },
    Nested {
        span: Span,
        source_type: TypeId,
        plan: DeconstructionPlan,
    },
}

impl PlanElement {
    /// Static type of the target side of this element.
    pub fn target_type(&self, catalog: &csz_solver::TypeCatalog) -> TypeId {
        match self {
            Self::Leaf { conversion, .. } => conversion.target_type,
            Self::Nested { plan, .. } => plan.target_type(catalog),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeconstructionPlan {
    pub strategy: PlanStrategy,
    pub elements: Vec<PlanElement>,
}

impl DeconstructionPlan {
    pub const fn is_error(&self) -> bool {
        matches!(self.strategy, PlanStrategy::Error)
    }

    pub fn leaf_count(&self) -> usize {
        self.elements
            .iter()
            .map(|e| match e {
                PlanElement::Leaf { .. } => 1,
                PlanElement::Nested { plan, .. } => plan.leaf_count(),
            })
            .sum()
    }

    /// Leaf conversions in left-to-right order.
    pub fn leaves(&self) -> Vec<(&TargetSlot, &SlotConversion)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'p>(&'p self, out: &mut Vec<(&'p TargetSlot, &'p SlotConversion)>) {
        for element in &self.elements {
            match element {
                PlanElement::Leaf {
                    slot, conversion, ..
                } => out.push((slot, conversion)),
                PlanElement::Nested { plan, .. } => plan.collect_leaves(out),
            }
        }
    }

    /// Tuple type of the target side, e.g. `(long, string)`.
    pub fn target_type(&self, catalog: &csz_solver::TypeCatalog) -> TypeId {
        let types: Vec<TypeId> = self.elements.iter().map(|e| e.target_type(catalog)).collect();
        catalog.types().tuple(&types)
    }
}
