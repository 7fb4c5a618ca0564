//! Diagnostic message data.
//!
//! One entry per code. Several taxonomy kinds may share a code (for example the
//! missing and wrong-arity `Deconstruct` kinds), in which case they share the
//! template as well.

use super::{DiagnosticCategory, DiagnosticMessage};

/// Numeric diagnostic codes.
pub mod diagnostic_codes {
    pub const NO_IMPLICIT_CONVERSION: u32 = 29;
    pub const NO_EXPLICIT_CONVERSION: u32 = 30;
    pub const NAME_NOT_IN_CONTEXT: u32 = 103;
    pub const AMBIGUOUS_CALL: u32 = 121;
    pub const INACCESSIBLE_MEMBER: u32 = 122;
    pub const LOCAL_DUPLICATE: u32 = 128;
    pub const ASSIGNMENT_TARGET_NOT_LVALUE: u32 = 131;
    pub const STATIC_MEMBER_WITH_INSTANCE: u32 = 176;
    pub const FOREACH_NULL_COLLECTION: u32 = 186;
    pub const BAD_GET_ENUMERATOR_SHAPE: u32 = 202;
    pub const NO_IMPLICIT_CONVERSION_EXPLICIT_EXISTS: u32 = 266;
    pub const PATTERN_IS_AMBIGUOUS: u32 = 278;
    pub const PATTERN_STATIC_OR_INACCESSIBLE: u32 = 279;
    pub const ANONYMOUS_METHOD_IN_FOREACH: u32 = 446;
    pub const CIRCULAR_INFERENCE: u32 = 841;
    pub const NO_SUCH_MEMBER: u32 = 1061;
    pub const REF_ITERATION_OVER_BY_VALUE_CURRENT: u32 = 1510;
    pub const FOREACH_MISSING_GET_ENUMERATOR: u32 = 1579;
    pub const DECONSTRUCT_NOT_OUT_PARAMS: u32 = 1615;
    pub const DECONSTRUCT_REF_PARAM: u32 = 1620;
    pub const MULTIPLE_INTERFACE_INSTANTIATIONS: u32 = 1640;
    pub const READONLY_LOCAL_ASSIGNMENT: u32 = 1656;
    pub const NON_INVOCABLE_MEMBER: u32 = 1955;
    pub const FEATURE_NOT_AVAILABLE: u32 = 8107;
    pub const MISSING_DECONSTRUCT: u32 = 8129;
    pub const TYPE_INFERENCE_FAILED: u32 = 8130;
    pub const REQUIRES_TYPED_EXPRESSION: u32 = 8131;
    pub const CARDINALITY_MISMATCH: u32 = 8132;
    pub const CANNOT_DECONSTRUCT_DYNAMIC: u32 = 8133;
    pub const DECONSTRUCT_TOO_FEW_ELEMENTS: u32 = 8134;
    pub const VAR_FORM_DISALLOWS_SPECIFIC_TYPE: u32 = 8136;
    pub const REF_ITERATION_REQUIRES_IDENTITY: u32 = 8173;
    pub const BAD_ITERATOR_LOCAL_TYPE: u32 = 8176;
    pub const BAD_ASYNC_LOCAL_TYPE: u32 = 8177;
    pub const DISCARD_TYPE_INFERENCE_FAILED: u32 = 8183;
    pub const REF_ITERATION_OVER_READONLY_CURRENT: u32 = 8329;
    pub const AWAIT_FOREACH_MISSING_GET_ASYNC_ENUMERATOR: u32 = 8411;
    pub const BAD_GET_ASYNC_ENUMERATOR_SHAPE: u32 = 8412;
    pub const MULTIPLE_ASYNC_INTERFACE_INSTANTIATIONS: u32 = 8413;
    pub const AWAIT_FOREACH_MISSING_MEMBER_WRONG_ASYNC: u32 = 8414;
    pub const FOREACH_MISSING_MEMBER_WRONG_ASYNC: u32 = 8415;
    pub const BAD_DYNAMIC_AWAIT_FOREACH: u32 = 8416;
}

/// Message templates with `{0}`, `{1}` placeholders.
pub mod diagnostic_messages {
    pub const NO_IMPLICIT_CONVERSION: &str = "Cannot implicitly convert type '{0}' to '{1}'";
    pub const NO_EXPLICIT_CONVERSION: &str = "Cannot convert type '{0}' to '{1}'";
    pub const NAME_NOT_IN_CONTEXT: &str = "The name '{0}' does not exist in the current context";
    pub const AMBIGUOUS_CALL: &str =
        "The call is ambiguous between the following methods or properties: '{0}' and '{1}'";
    pub const INACCESSIBLE_MEMBER: &str = "'{0}' is inaccessible due to its protection level";
    pub const LOCAL_DUPLICATE: &str =
        "A local variable or function named '{0}' is already defined in this scope";
    pub const ASSIGNMENT_TARGET_NOT_LVALUE: &str =
        "The left-hand side of an assignment must be a variable, property or indexer";
    pub const STATIC_MEMBER_WITH_INSTANCE: &str =
        "Member '{0}' cannot be accessed with an instance reference; qualify it with a type name instead";
    pub const FOREACH_NULL_COLLECTION: &str = "Use of null is not valid in this context";
    pub const BAD_GET_ENUMERATOR_SHAPE: &str =
        "foreach requires that the return type '{0}' of '{1}' must have a suitable public 'MoveNext' method and public 'Current' property";
    pub const NO_IMPLICIT_CONVERSION_EXPLICIT_EXISTS: &str =
        "Cannot implicitly convert type '{0}' to '{1}'. An explicit conversion exists (are you missing a cast?)";
    pub const PATTERN_IS_AMBIGUOUS: &str =
        "'{0}' does not implement the '{1}' pattern. '{2}' is ambiguous with '{3}'.";
    pub const PATTERN_STATIC_OR_INACCESSIBLE: &str =
        "'{0}' does not implement the '{1}' pattern. '{2}' is not a public instance or extension method.";
    pub const ANONYMOUS_METHOD_IN_FOREACH: &str =
        "Foreach cannot operate on a '{0}'. Did you intend to invoke the '{0}'?";
    pub const CIRCULAR_INFERENCE: &str = "Cannot use local variable '{0}' before it is declared";
    pub const NO_SUCH_MEMBER: &str =
        "'{0}' does not contain a definition for '{1}' and no accessible extension method '{1}' accepting a first argument of type '{0}' could be found (are you missing a using directive or an assembly reference?)";
    pub const REF_ITERATION_OVER_BY_VALUE_CURRENT: &str =
        "A ref or out value must be an assignable variable";
    pub const FOREACH_MISSING_GET_ENUMERATOR: &str =
        "foreach statement cannot operate on variables of type '{0}' because '{0}' does not contain a public instance or extension definition for '{1}'";
    pub const DECONSTRUCT_NOT_OUT_PARAMS: &str =
        "Argument {0} may not be passed with the '{1}' keyword";
    pub const DECONSTRUCT_REF_PARAM: &str = "Argument {0} must be passed with the '{1}' keyword";
    pub const MULTIPLE_INTERFACE_INSTANTIATIONS: &str =
        "foreach statement cannot operate on variables of type '{0}' because it implements multiple instantiations of '{1}'; try casting to a specific interface instantiation";
    pub const READONLY_LOCAL_ASSIGNMENT: &str = "Cannot assign to '{0}' because it is a '{1}'";
    pub const NON_INVOCABLE_MEMBER: &str =
        "Non-invocable member '{0}' cannot be used like a method.";
    pub const FEATURE_NOT_AVAILABLE: &str =
        "Feature '{0}' is not available in C# {1}. Please use language version {2} or greater.";
    pub const MISSING_DECONSTRUCT: &str =
        "No suitable 'Deconstruct' instance or extension method was found for type '{0}', with {1} out parameters and a void return type.";
    pub const TYPE_INFERENCE_FAILED: &str =
        "Cannot infer the type of implicitly-typed deconstruction variable '{0}'.";
    pub const REQUIRES_TYPED_EXPRESSION: &str =
        "Deconstruct assignment requires an expression with a type on the right-hand-side.";
    pub const CARDINALITY_MISMATCH: &str =
        "Cannot deconstruct a tuple of '{0}' elements into '{1}' variables.";
    pub const CANNOT_DECONSTRUCT_DYNAMIC: &str = "Cannot deconstruct dynamic objects.";
    pub const DECONSTRUCT_TOO_FEW_ELEMENTS: &str =
        "Deconstruction must contain at least two variables.";
    pub const VAR_FORM_DISALLOWS_SPECIFIC_TYPE: &str =
        "Deconstruction 'var (...)' form disallows a specific type for 'var'.";
    pub const REF_ITERATION_REQUIRES_IDENTITY: &str =
        "The expression must be of type '{0}' because it is being assigned by reference";
    pub const BAD_ITERATOR_LOCAL_TYPE: &str = "Iterators cannot have by-reference locals";
    pub const BAD_ASYNC_LOCAL_TYPE: &str = "Async methods cannot have by-reference locals";
    pub const DISCARD_TYPE_INFERENCE_FAILED: &str =
        "Cannot infer the type of implicitly-typed discard.";
    pub const REF_ITERATION_OVER_READONLY_CURRENT: &str =
        "Cannot use {0} '{1}' as a ref or out value because it is a readonly variable";
    pub const AWAIT_FOREACH_MISSING_GET_ASYNC_ENUMERATOR: &str =
        "Asynchronous foreach statement cannot operate on variables of type '{0}' because '{0}' does not contain a suitable public instance or extension definition for '{1}'";
    pub const BAD_GET_ASYNC_ENUMERATOR_SHAPE: &str =
        "Asynchronous foreach requires that the return type '{0}' of '{1}' must have a suitable public 'MoveNextAsync' method and public 'Current' property";
    pub const MULTIPLE_ASYNC_INTERFACE_INSTANTIATIONS: &str =
        "Asynchronous foreach statement cannot operate on variables of type '{0}' because it implements multiple instantiations of '{1}'; try casting to a specific interface instantiation";
    pub const AWAIT_FOREACH_MISSING_MEMBER_WRONG_ASYNC: &str =
        "Asynchronous foreach statement cannot operate on variables of type '{0}' because '{0}' does not contain a public instance or extension definition for '{1}'. Did you mean 'foreach' rather than 'await foreach'?";
    pub const FOREACH_MISSING_MEMBER_WRONG_ASYNC: &str =
        "foreach statement cannot operate on variables of type '{0}' because '{0}' does not contain a public instance or extension definition for '{1}'. Did you mean 'await foreach' rather than 'foreach'?";
    pub const BAD_DYNAMIC_AWAIT_FOREACH: &str =
        "Cannot use a collection of dynamic type in an asynchronous foreach";
}

/// Table of every message known to the resolvers, sorted by code.
pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::NO_IMPLICIT_CONVERSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_IMPLICIT_CONVERSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_EXPLICIT_CONVERSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_EXPLICIT_CONVERSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NAME_NOT_IN_CONTEXT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NAME_NOT_IN_CONTEXT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AMBIGUOUS_CALL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AMBIGUOUS_CALL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::INACCESSIBLE_MEMBER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INACCESSIBLE_MEMBER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::LOCAL_DUPLICATE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::LOCAL_DUPLICATE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ASSIGNMENT_TARGET_NOT_LVALUE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ASSIGNMENT_TARGET_NOT_LVALUE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::STATIC_MEMBER_WITH_INSTANCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::STATIC_MEMBER_WITH_INSTANCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FOREACH_NULL_COLLECTION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FOREACH_NULL_COLLECTION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BAD_GET_ENUMERATOR_SHAPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BAD_GET_ENUMERATOR_SHAPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_IMPLICIT_CONVERSION_EXPLICIT_EXISTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_IMPLICIT_CONVERSION_EXPLICIT_EXISTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PATTERN_IS_AMBIGUOUS,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::PATTERN_IS_AMBIGUOUS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::PATTERN_STATIC_OR_INACCESSIBLE,
        category: DiagnosticCategory::Warning,
        message: diagnostic_messages::PATTERN_STATIC_OR_INACCESSIBLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::ANONYMOUS_METHOD_IN_FOREACH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::ANONYMOUS_METHOD_IN_FOREACH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CIRCULAR_INFERENCE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CIRCULAR_INFERENCE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NO_SUCH_MEMBER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NO_SUCH_MEMBER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REF_ITERATION_OVER_BY_VALUE_CURRENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::REF_ITERATION_OVER_BY_VALUE_CURRENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FOREACH_MISSING_GET_ENUMERATOR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FOREACH_MISSING_GET_ENUMERATOR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECONSTRUCT_NOT_OUT_PARAMS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DECONSTRUCT_NOT_OUT_PARAMS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECONSTRUCT_REF_PARAM,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DECONSTRUCT_REF_PARAM,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MULTIPLE_INTERFACE_INSTANTIATIONS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MULTIPLE_INTERFACE_INSTANTIATIONS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::READONLY_LOCAL_ASSIGNMENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::READONLY_LOCAL_ASSIGNMENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::NON_INVOCABLE_MEMBER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::NON_INVOCABLE_MEMBER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FEATURE_NOT_AVAILABLE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FEATURE_NOT_AVAILABLE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MISSING_DECONSTRUCT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MISSING_DECONSTRUCT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::TYPE_INFERENCE_FAILED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::TYPE_INFERENCE_FAILED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REQUIRES_TYPED_EXPRESSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::REQUIRES_TYPED_EXPRESSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CARDINALITY_MISMATCH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CARDINALITY_MISMATCH,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CANNOT_DECONSTRUCT_DYNAMIC,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CANNOT_DECONSTRUCT_DYNAMIC,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DECONSTRUCT_TOO_FEW_ELEMENTS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DECONSTRUCT_TOO_FEW_ELEMENTS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::VAR_FORM_DISALLOWS_SPECIFIC_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::VAR_FORM_DISALLOWS_SPECIFIC_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REF_ITERATION_REQUIRES_IDENTITY,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::REF_ITERATION_REQUIRES_IDENTITY,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BAD_ITERATOR_LOCAL_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BAD_ITERATOR_LOCAL_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BAD_ASYNC_LOCAL_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BAD_ASYNC_LOCAL_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::DISCARD_TYPE_INFERENCE_FAILED,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::DISCARD_TYPE_INFERENCE_FAILED,
    },
    DiagnosticMessage {
        code: diagnostic_codes::REF_ITERATION_OVER_READONLY_CURRENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::REF_ITERATION_OVER_READONLY_CURRENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AWAIT_FOREACH_MISSING_GET_ASYNC_ENUMERATOR,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AWAIT_FOREACH_MISSING_GET_ASYNC_ENUMERATOR,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BAD_GET_ASYNC_ENUMERATOR_SHAPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BAD_GET_ASYNC_ENUMERATOR_SHAPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::MULTIPLE_ASYNC_INTERFACE_INSTANTIATIONS,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::MULTIPLE_ASYNC_INTERFACE_INSTANTIATIONS,
    },
    DiagnosticMessage {
        code: diagnostic_codes::AWAIT_FOREACH_MISSING_MEMBER_WRONG_ASYNC,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::AWAIT_FOREACH_MISSING_MEMBER_WRONG_ASYNC,
    },
    DiagnosticMessage {
        code: diagnostic_codes::FOREACH_MISSING_MEMBER_WRONG_ASYNC,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::FOREACH_MISSING_MEMBER_WRONG_ASYNC,
    },
    DiagnosticMessage {
        code: diagnostic_codes::BAD_DYNAMIC_AWAIT_FOREACH,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::BAD_DYNAMIC_AWAIT_FOREACH,
    },
];
