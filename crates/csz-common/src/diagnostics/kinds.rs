//! The closed diagnostic taxonomy.
//!
//! Every failure the resolvers can report maps to exactly one `DiagnosticKind`.
//! The kind, not the numeric code, is the contract: two kinds may render with
//! the same code and template (`MissingDeconstruct` / `WrongDeconstructArity`).

use super::data::diagnostic_codes as codes;
use super::{DiagnosticCategory, get_diagnostic_message};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum DiagnosticKind {
    // =========================================================================
    // Deconstruction
    // =========================================================================
    /// No accessible `Deconstruct` of matching arity and the source isn't a tuple.
    MissingDeconstruct,
    /// An accessible `Deconstruct` exists but its out-parameter count differs.
    WrongDeconstructArity,
    /// The single candidate has a by-value parameter.
    DeconstructNotOutParams,
    /// The single candidate has a `ref` or `in` parameter.
    DeconstructRefParam,
    /// Two or more equally eligible candidates (`Deconstruct` or extension `GetEnumerator`).
    AmbiguousCall,
    CardinalityMismatch,
    /// A `var` slot is read by its own right-hand side.
    CircularInference,
    TypeInferenceFailed,
    DiscardTypeInferenceFailed,
    RequiresTypedExpression,
    DeconstructTooFewElements,
    VarFormDisallowsSpecificType,
    CannotDeconstructDynamic,
    NonInvocableMember,
    NoSuchMember,
    InaccessibleMember,
    StaticMemberWithInstance,

    // =========================================================================
    // Targets and locals
    // =========================================================================
    NameNotInContext,
    LocalDuplicate,
    AssignmentTargetNotLvalue,
    ReadonlyLocalAssignment,

    // =========================================================================
    // Conversions and language version
    // =========================================================================
    NoImplicitConversion,
    NoImplicitConversionExplicitExists,
    NoExplicitConversion,
    FeatureNotAvailable,

    // =========================================================================
    // Foreach
    // =========================================================================
    ForeachMissingGetEnumerator,
    ForeachMissingMemberWrongAsync,
    AwaitForeachMissingGetAsyncEnumerator,
    AwaitForeachMissingMemberWrongAsync,
    MultipleInterfaceInstantiations,
    MultipleAsyncInterfaceInstantiations,
    BadGetEnumeratorShape,
    BadGetAsyncEnumeratorShape,
    PatternStaticOrInaccessible,
    PatternIsAmbiguous,
    ForeachNullCollection,
    AnonymousMethodInForeach,
    BadDynamicAwaitForeach,
    RefIterationOverByValueCurrent,
    RefIterationOverReadonlyCurrent,
    RefIterationRequiresIdentity,
    BadAsyncLocalType,
    BadIteratorLocalType,
}

impl DiagnosticKind {
    /// Numeric code this kind renders with.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::MissingDeconstruct | Self::WrongDeconstructArity => codes::MISSING_DECONSTRUCT,
            Self::DeconstructNotOutParams => codes::DECONSTRUCT_NOT_OUT_PARAMS,
            Self::DeconstructRefParam => codes::DECONSTRUCT_REF_PARAM,
            Self::AmbiguousCall => codes::AMBIGUOUS_CALL,
            Self::CardinalityMismatch => codes::CARDINALITY_MISMATCH,
            Self::CircularInference => codes::CIRCULAR_INFERENCE,
            Self::TypeInferenceFailed => codes::TYPE_INFERENCE_FAILED,
            Self::DiscardTypeInferenceFailed => codes::DISCARD_TYPE_INFERENCE_FAILED,
            Self::RequiresTypedExpression => codes::REQUIRES_TYPED_EXPRESSION,
            Self::DeconstructTooFewElements => codes::DECONSTRUCT_TOO_FEW_ELEMENTS,
            Self::VarFormDisallowsSpecificType => codes::VAR_FORM_DISALLOWS_SPECIFIC_TYPE,
            Self::CannotDeconstructDynamic => codes::CANNOT_DECONSTRUCT_DYNAMIC,
            Self::NonInvocableMember => codes::NON_INVOCABLE_MEMBER,
            Self::NoSuchMember => codes::NO_SUCH_MEMBER,
            Self::InaccessibleMember => codes::INACCESSIBLE_MEMBER,
            Self::StaticMemberWithInstance => codes::STATIC_MEMBER_WITH_INSTANCE,
            Self::NameNotInContext => codes::NAME_NOT_IN_CONTEXT,
            Self::LocalDuplicate => codes::LOCAL_DUPLICATE,
            Self::AssignmentTargetNotLvalue => codes::ASSIGNMENT_TARGET_NOT_LVALUE,
            Self::ReadonlyLocalAssignment => codes::READONLY_LOCAL_ASSIGNMENT,
            Self::NoImplicitConversion => codes::NO_IMPLICIT_CONVERSION,
            Self::NoImplicitConversionExplicitExists => {
                codes::NO_IMPLICIT_CONVERSION_EXPLICIT_EXISTS
            }
            Self::NoExplicitConversion => codes::NO_EXPLICIT_CONVERSION,
            Self::FeatureNotAvailable => codes::FEATURE_NOT_AVAILABLE,
            Self::ForeachMissingGetEnumerator => codes::FOREACH_MISSING_GET_ENUMERATOR,
            Self::ForeachMissingMemberWrongAsync => codes::FOREACH_MISSING_MEMBER_WRONG_ASYNC,
            Self::AwaitForeachMissingGetAsyncEnumerator => {
                codes::AWAIT_FOREACH_MISSING_GET_ASYNC_ENUMERATOR
            }
            Self::AwaitForeachMissingMemberWrongAsync => {
                codes::AWAIT_FOREACH_MISSING_MEMBER_WRONG_ASYNC
            }
            Self::MultipleInterfaceInstantiations => codes::MULTIPLE_INTERFACE_INSTANTIATIONS,
            Self::MultipleAsyncInterfaceInstantiations => {
                codes::MULTIPLE_ASYNC_INTERFACE_INSTANTIATIONS
            }
            Self::BadGetEnumeratorShape => codes::BAD_GET_ENUMERATOR_SHAPE,
            Self::BadGetAsyncEnumeratorShape => codes::BAD_GET_ASYNC_ENUMERATOR_SHAPE,
            Self::PatternStaticOrInaccessible => codes::PATTERN_STATIC_OR_INACCESSIBLE,
            Self::PatternIsAmbiguous => codes::PATTERN_IS_AMBIGUOUS,
            Self::ForeachNullCollection => codes::FOREACH_NULL_COLLECTION,
            Self::AnonymousMethodInForeach => codes::ANONYMOUS_METHOD_IN_FOREACH,
            Self::BadDynamicAwaitForeach => codes::BAD_DYNAMIC_AWAIT_FOREACH,
            Self::RefIterationOverByValueCurrent => codes::REF_ITERATION_OVER_BY_VALUE_CURRENT,
            Self::RefIterationOverReadonlyCurrent => codes::REF_ITERATION_OVER_READONLY_CURRENT,
            Self::RefIterationRequiresIdentity => codes::REF_ITERATION_REQUIRES_IDENTITY,
            Self::BadAsyncLocalType => codes::BAD_ASYNC_LOCAL_TYPE,
            Self::BadIteratorLocalType => codes::BAD_ITERATOR_LOCAL_TYPE,
        }
    }

    /// Category from the message table; unknown codes default to `Error`.
    #[must_use]
    pub fn category(self) -> DiagnosticCategory {
        get_diagnostic_message(self.code()).map_or(DiagnosticCategory::Error, |m| m.category)
    }

    /// Message template with `{0}`-style placeholders.
    #[must_use]
    pub fn template(self) -> &'static str {
        get_diagnostic_message(self.code()).map_or("", |m| m.message)
    }

    /// `CS0029`-style display code.
    #[must_use]
    pub fn display_code(self) -> String {
        format!("CS{:04}", self.code())
    }

    #[must_use]
    pub fn is_error(self) -> bool {
        self.category() == DiagnosticCategory::Error
    }
}
