//! Type catalog and conversion services for the csz resolvers.
//!
//! This crate provides the read-only world the resolvers consult:
//!
//! - **Interning**: structural `TypeData` behind `TypeId` handles
//! - **Catalog**: definitions, members and the well-known library surface,
//!   built once with `CatalogBuilder` and shared by every worker
//! - **Lookup**: member lookup by levels with hiding, memoized per
//!   `(type, name)`; inheritance and interface closure walks
//! - **Conversions**: the `ConversionOracle` classification
//! - **Display**: `TypeFormatter` for diagnostic arguments
pub mod catalog;
pub mod conversions;
pub mod def;
mod format;
mod instantiate;
mod intern;
pub mod lookup;
pub mod members;
pub mod types;
pub mod well_known;

pub use catalog::{CatalogBuilder, DefBuilder, MethodBuilder, PropertyBuilder, TypeCatalog};
pub use conversions::{Conversion, ConversionKind, ConversionOracle, ExprShape};
pub use def::{DefFlags, DefId, DefKind, DefinitionInfo, TypeParamInfo};
pub use format::TypeFormatter;
pub use instantiate::Substitution;
pub use intern::TypeInterner;
pub use lookup::LookupLevel;
pub use members::{
    Accessibility, MemberFlags, MemberId, MemberInfo, MemberKind, MethodSignature, ParamFlags,
    ParamInfo,
};
pub use types::{IntrinsicKind, ParamOwner, RefKind, TypeArgs, TypeData, TypeId, TypeParamRef};
pub use well_known::WellKnownTypes;

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod intern_tests;

#[cfg(test)]
#[path = "../tests/lookup_tests.rs"]
mod lookup_tests;

#[cfg(test)]
#[path = "../tests/conversion_tests.rs"]
mod conversion_tests;

#[cfg(test)]
#[path = "../tests/format_tests.rs"]
mod format_tests;
