//! Definition identifiers and storage.
//!
//! A `DefId` names a declared type (class, struct, interface, delegate or
//! enum). Definitions are owned by the `TypeCatalog` and never change once the
//! catalog is frozen, so `DefId`s can be shared freely across workers.
//!
//! Base types, interfaces and member signatures are written in terms of the
//! definition's own type parameters (`TypeData::TypeParameter` with
//! `ParamOwner::Type(def)`); lookups substitute them with the instantiation's
//! type arguments.

use crate::members::MemberId;
use crate::types::TypeId;
use bitflags::bitflags;

// =============================================================================
// DefId - Definition Identifier
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    /// Check if this `DefId` is valid.
    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }

    pub(crate) const fn index(self) -> usize {
        (self.0 - Self::FIRST_VALID) as usize
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32 + Self::FIRST_VALID)
    }
}

// =============================================================================
// DefKind - Definition Kind
// =============================================================================

/// Kind of type definition.
///
/// | Kind | Value type | Can be a base | Example |
/// |------|------------|---------------|---------|
/// | Class | No | Yes (unless sealed) | `class C : B, IEnumerable<int>` |
/// | Struct | Yes | No | `struct Enumerator { ... }` |
/// | Interface | No | Interfaces only | `interface IEnumerator<T> : IEnumerator` |
/// | Delegate | No | No | `delegate void D(out int x)` |
/// | Enum | Yes | No | `enum Color { Red }` |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DefKind {
    Class,
    Struct,
    Interface,
    Delegate,
    Enum,
}

bitflags! {
    /// Declaration modifiers that affect lookup, disposal and conversions.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DefFlags: u8 {
        const SEALED = 1 << 0;
        /// `static class`, the only place extension methods are declared.
        const STATIC = 1 << 1;
        /// `ref struct`: cannot be boxed, so never converts to an interface.
        const REF_STRUCT = 1 << 2;
        const ABSTRACT = 1 << 3;
    }
}

/// A declared type parameter and its constraint types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    pub name: String,
    /// Class and interface constraints, in declaration order.
    pub constraints: Vec<TypeId>,
}

impl TypeParamInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }
}

// =============================================================================
// Definition Info - Stored Definition Data
// =============================================================================

#[derive(Clone, Debug)]
pub struct DefinitionInfo {
    pub kind: DefKind,
    pub name: String,
    /// Dotted namespace, used only for display of well-known families.
    pub namespace: Option<String>,
    pub type_params: Vec<TypeParamInfo>,
    /// Base class (classes only). `None` means `object` for classes.
    pub base: Option<TypeId>,
    /// Directly implemented (or, for interfaces, inherited) interfaces.
    pub interfaces: Vec<TypeId>,
    pub members: Vec<MemberId>,
    pub flags: DefFlags,
}

impl DefinitionInfo {
    pub fn new(kind: DefKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: None,
            type_params: Vec::new(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            flags: DefFlags::empty(),
        }
    }

    pub const fn is_value_type(&self) -> bool {
        matches!(self.kind, DefKind::Struct | DefKind::Enum)
    }

    pub const fn is_interface(&self) -> bool {
        matches!(self.kind, DefKind::Interface)
    }

    /// No type can derive from this one.
    pub fn is_sealed(&self) -> bool {
        self.flags.contains(DefFlags::SEALED)
            || matches!(self.kind, DefKind::Struct | DefKind::Enum | DefKind::Delegate)
    }

    pub fn is_ref_struct(&self) -> bool {
        self.flags.contains(DefFlags::REF_STRUCT)
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(DefFlags::STATIC)
    }

    /// `System.Collections.Generic.IEnumerable<T>`-style name with parameter names.
    pub fn qualified_display(&self) -> String {
        let mut out = String::new();
        if let Some(ns) = &self.namespace {
            out.push_str(ns);
            out.push('.');
        }
        out.push_str(&self.name);
        if !self.type_params.is_empty() {
            out.push('<');
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&param.name);
            }
            out.push('>');
        }
        out
    }
}
