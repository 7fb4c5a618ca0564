//! The typed operation tree.
//!
//! Operations are what downstream consumers read. Every node is built even
//! when binding failed: `is_invalid` marks nodes whose subtree produced an
//! error, and types are filled in wherever they could be determined.

use crate::deconstruction::DeconstructionPlan;
use crate::foreach::EnumeratorInfo;
use crate::syntax::DeconstructionKind;
use csz_common::Span;
use csz_solver::{Conversion, RefKind, TypeId};
use serde::Serialize;

/// How a resolved method receives its receiver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum ReceiverKind {
    Instance,
    /// Static extension method; the receiver is passed as the `this` argument.
    Extension,
}

// =============================================================================
// Deconstruction
// =============================================================================

/// The assignment side of a deconstruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum TargetOperation {
    /// Existing local or member.
    Variable {
        name: String,
        type_id: TypeId,
        span: Span,
    },
    /// Local introduced by the statement.
    Declared {
        name: String,
        type_id: TypeId,
        span: Span,
    },
    Discard {
        type_id: TypeId,
        span: Span,
    },
    Tuple {
        elements: Vec<TargetOperation>,
        type_id: TypeId,
        span: Span,
    },
    Invalid {
        span: Span,
    },
}

impl TargetOperation {
    pub const fn type_id(&self) -> TypeId {
        match self {
            Self::Variable { type_id, .. }
            | Self::Declared { type_id, .. }
            | Self::Discard { type_id, .. }
            | Self::Tuple { type_id, .. } => *type_id,
            Self::Invalid { .. } => TypeId::ERROR,
        }
    }

    pub const fn span(&self) -> Span {
        match self {
            Self::Variable { span, .. }
            | Self::Declared { span, .. }
            | Self::Discard { span, .. }
            | Self::Tuple { span, .. }
            | Self::Invalid { span } => *span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DeconstructionOperation {
    pub span: Span,
    pub kind: DeconstructionKind,
    pub target: TargetOperation,
    pub plan: DeconstructionPlan,
    /// Static type of the whole expression: the tuple of target types.
    pub type_id: TypeId,
    pub is_invalid: bool,
}

// =============================================================================
// Foreach
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum IterationVariable {
    Single {
        name: String,
        type_id: TypeId,
        ref_kind: RefKind,
        span: Span,
    },
    Deconstruction(Box<DeconstructionOperation>),
}

impl IterationVariable {
    pub fn type_id(&self) -> TypeId {
        match self {
            Self::Single { type_id, .. } => *type_id,
            Self::Deconstruction(op) => op.type_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ForEachOperation {
    pub span: Span,
    pub is_await: bool,
    pub info: EnumeratorInfo,
    pub variable: IterationVariable,
    /// Element type to iteration variable type.
    pub element_conversion: Conversion,
    pub body: Vec<Operation>,
    pub is_invalid: bool,
}

// =============================================================================
// Operation
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Operation {
    LocalDeclaration {
        name: String,
        type_id: TypeId,
        span: Span,
    },
    Deconstruction(DeconstructionOperation),
    ForEach(ForEachOperation),
}

impl Operation {
    pub const fn is_invalid(&self) -> bool {
        match self {
            Self::LocalDeclaration { .. } => false,
            Self::Deconstruction(op) => op.is_invalid,
            Self::ForEach(op) => op.is_invalid,
        }
    }
}
