//! Centralized limits and thresholds for the resolvers.
//!
//! Recursion over target shapes and type structure is bounded here so the
//! values stay consistent between the decomposer, the deconstruction
//! resolver and the catalog's structural walks.

// =============================================================================
// Recursion Depth Limits
// =============================================================================

/// Maximum nesting depth for deconstruction targets.
///
/// `((((a, b), c), d), e) = ...` adds one level per parenthesized list. Deeper
/// shapes are treated as invalid targets instead of recursing further.
pub const MAX_DECONSTRUCTION_DEPTH: u32 = 64;

/// Maximum depth when walking a base-class chain during member lookup.
///
/// Protects against cycles in a malformed catalog (`class A : B`, `class B : A`).
pub const MAX_BASE_CHAIN_DEPTH: u32 = 256;

/// Maximum depth for structural type walks (substitution, unification, display).
pub const MAX_TYPE_WALK_DEPTH: u32 = 128;

// =============================================================================
// Capacity Limits
// =============================================================================

/// Initial capacity for a per-body diagnostic bag.
pub const DIAGNOSTIC_BAG_CAPACITY: usize = 8;
