//! Deconstruction and foreach resolution for csz.
//!
//! This crate binds already-parsed statements against a `TypeCatalog`:
//! - `syntax` - Input shapes (expressions, targets, statements, bodies)
//! - `context` - `CheckerOptions`, language features, per-body context
//! - `scope` - Lexical scopes of locals
//! - `deconstruction` - Tuple-target decomposition and `Deconstruct` resolution
//! - `foreach` - Enumeration strategy, disposal and iteration variables
//! - `operations` - The typed operation tree
//! - `error_reporter` - Diagnostic sink and `Resolved<T>`
//! - `driver` - Parallel checking of independent method bodies
//!
//! Semantic errors never surface as `Err`: every entry point returns a
//! complete (possibly error-typed) operation next to its diagnostics.

pub mod context;
pub mod deconstruction;
pub mod driver;
pub mod error_reporter;
mod extensions;
pub mod foreach;
pub mod operations;
pub mod scope;
pub mod state;
pub mod syntax;

pub use context::{CheckerOptions, ConfigError, Feature, LanguageVersion, MemberContext};
pub use deconstruction::{
    DeconstructInvocation, DeconstructionPlan, PlanElement, PlanStrategy, SlotConversion, SlotType,
    TargetSlot,
};
pub use driver::{
    BodyResult, CheckResult, check_bodies, check_bodies_sequential, check_body, resolve_deconstruction,
    resolve_foreach,
};
pub use error_reporter::{DiagnosticBag, Resolved};
pub use foreach::{Disposal, EnumerationStrategy, EnumeratorInfo, EnumeratorMethod};
pub use operations::{
    DeconstructionOperation, ForEachOperation, IterationVariable, Operation, ReceiverKind, TargetOperation,
};
pub use state::CheckerState;

#[cfg(test)]
#[path = "../tests/test_support.rs"]
mod test_support;

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod context_tests;

#[cfg(test)]
#[path = "../tests/decompose_tests.rs"]
mod decompose_tests;

#[cfg(test)]
#[path = "../tests/deconstruction_tests.rs"]
mod deconstruction_tests;

#[cfg(test)]
#[path = "../tests/deconstruct_method_tests.rs"]
mod deconstruct_method_tests;

#[cfg(test)]
#[path = "../tests/foreach_tests.rs"]
mod foreach_tests;
