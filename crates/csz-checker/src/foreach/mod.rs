//! Foreach binding: enumeration strategy, disposal and iteration variables.
//!
//! `classifier` picks a strategy for the collection type, first match wins:
//!
//! 1. `null`, lambdas and method groups are rejected up front
//! 2. `T?` is unwrapped to `T`
//! 3. arrays and `string` use built-in strategies (sync only)
//! 4. `dynamic` defers everything to runtime
//! 5. an instance `GetEnumerator`/`GetAsyncEnumerator` pattern
//! 6. a unique `IEnumerable<T>` / `IAsyncEnumerable<T>` instantiation
//! 7. the non-generic `IEnumerable` (sync only)
//! 8. an extension `GetEnumerator` pattern
//!
//! `pattern` and `interfaces` resolve `Current`/`MoveNext` for steps 5-8,
//! `disposal` decides what runs after the loop, and `iteration_variable`
//! binds the statement itself.

mod classifier;
mod disposal;
mod interfaces;
mod iteration_variable;
mod pattern;

use crate::operations::ReceiverKind;
use csz_solver::{Conversion, MemberId, RefKind, TypeId};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum EnumerationStrategy {
    Array,
    String,
    /// Instance `GetEnumerator` found by shape.
    Pattern,
    /// Extension `GetEnumerator` found by shape.
    Extension,
    GenericInterface,
    NonGenericInterface,
    Dynamic,
    Error,
}

/// What happens to the enumerator after the loop.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Disposal {
    /// Provably nothing to dispose.
    None,
    /// `IDisposable.Dispose` / `IAsyncDisposable.DisposeAsync`.
    Interface(MemberId),
    /// A public parameterless `Dispose`/`DisposeAsync` found by shape.
    Pattern(MemberId),
    /// `if (e is IDisposable d) d.Dispose();`
    RuntimeCheck,
}

/// The resolved `GetEnumerator` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumeratorMethod {
    pub method: MemberId,
    pub receiver: ReceiverKind,
    /// Inferred type arguments of a generic extension method.
    pub type_arguments: Vec<TypeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnumeratorInfo {
    pub strategy: EnumerationStrategy,
    pub is_async: bool,
    /// The type `GetEnumerator` is invoked on (after unwrapping and any
    /// interface conversion).
    pub collection_type: TypeId,
    pub element_type: TypeId,
    pub get_enumerator: Option<EnumeratorMethod>,
    pub enumerator_type: TypeId,
    pub current: Option<MemberId>,
    pub current_type: TypeId,
    pub current_ref_kind: RefKind,
    /// `MoveNext`, or `MoveNextAsync` for `await foreach`.
    pub move_next: Option<MemberId>,
    pub disposal: Disposal,
    /// Collection expression type to `collection_type`.
    pub collection_conversion: Conversion,
    /// `Current` to the iteration variable type.
    pub current_conversion: Conversion,
}

impl EnumeratorInfo {
    /// Placeholder for a collection that could not be classified.
    pub fn error(collection_type: TypeId, is_async: bool) -> Self {
        Self {
            strategy: EnumerationStrategy::Error,
            is_async,
            collection_type,
            element_type: TypeId::ERROR,
            get_enumerator: None,
            enumerator_type: TypeId::ERROR,
            current: None,
            current_type: TypeId::ERROR,
            current_ref_kind: RefKind::None,
            move_next: None,
            disposal: Disposal::None,
            collection_conversion: Conversion::identity(),
            current_conversion: Conversion::identity(),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self.strategy, EnumerationStrategy::Error)
    }
}
