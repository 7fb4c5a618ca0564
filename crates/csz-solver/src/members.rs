//! Member symbols: methods, properties, fields, events and conversion operators.

use crate::def::DefId;
use crate::types::{RefKind, TypeId};
use bitflags::bitflags;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct MemberId(pub u32);

/// Declared accessibility of a member.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Accessibility {
    #[default]
    Public,
    Internal,
    Protected,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

impl Accessibility {
    pub const fn is_public(self) -> bool {
        matches!(self, Self::Public)
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MemberFlags: u8 {
        const STATIC = 1 << 0;
        /// Static method whose first parameter is `this`.
        const EXTENSION = 1 << 1;
        /// Takes `__arglist`.
        const ARGLIST = 1 << 2;
        /// Declared with `new`: hides every inherited member with the same name.
        const NEW = 1 << 3;
    }
}

bitflags! {
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ParamFlags: u8 {
        const OPTIONAL = 1 << 0;
        const PARAMS = 1 << 1;
        const THIS = 1 << 2;
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    pub type_id: TypeId,
    pub ref_kind: RefKind,
    pub flags: ParamFlags,
}

impl ParamInfo {
    pub fn is_optional(&self) -> bool {
        self.flags.intersects(ParamFlags::OPTIONAL | ParamFlags::PARAMS)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodSignature {
    /// Method type parameter names; references use `ParamOwner::Method`.
    pub type_params: Vec<String>,
    pub params: Vec<ParamInfo>,
    pub return_type: TypeId,
    pub return_ref: RefKind,
}

impl MethodSignature {
    /// Number of parameters that must be supplied.
    pub fn required_count(&self) -> usize {
        self.params.iter().filter(|p| !p.is_optional()).count()
    }

    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    /// Parameters after the `this` parameter of an extension method.
    pub fn call_params(&self, is_extension: bool) -> &[ParamInfo] {
        if is_extension && !self.params.is_empty() {
            &self.params[1..]
        } else {
            &self.params
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Method(MethodSignature),
    Property {
        type_id: TypeId,
        ref_kind: RefKind,
        getter: Option<Accessibility>,
        setter: Option<Accessibility>,
    },
    Field {
        type_id: TypeId,
        readonly: bool,
    },
    Event {
        type_id: TypeId,
    },
    /// User-defined `implicit`/`explicit operator`.
    Conversion {
        from: TypeId,
        to: TypeId,
        is_implicit: bool,
    },
}

#[derive(Clone, Debug)]
pub struct MemberInfo {
    pub name: String,
    pub containing: DefId,
    pub accessibility: Accessibility,
    pub flags: MemberFlags,
    pub kind: MemberKind,
}

impl MemberInfo {
    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    pub fn is_extension(&self) -> bool {
        self.flags.contains(MemberFlags::EXTENSION)
    }

    pub const fn signature(&self) -> Option<&MethodSignature> {
        match &self.kind {
            MemberKind::Method(sig) => Some(sig),
            _ => None,
        }
    }

    pub const fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method(_))
    }

    /// Declared type of a non-method member.
    pub const fn value_type(&self) -> Option<TypeId> {
        match &self.kind {
            MemberKind::Property { type_id, .. }
            | MemberKind::Field { type_id, .. }
            | MemberKind::Event { type_id } => Some(*type_id),
            MemberKind::Method(_) | MemberKind::Conversion { .. } => None,
        }
    }

    /// Same name and same parameter list: a derived member with the same
    /// signature hides the inherited one.
    pub fn same_signature(&self, other: &Self) -> bool {
        match (&self.kind, &other.kind) {
            (MemberKind::Method(a), MemberKind::Method(b)) => {
                a.type_params.len() == b.type_params.len()
                    && a.params.len() == b.params.len()
                    && a.params
                        .iter()
                        .zip(&b.params)
                        .all(|(x, y)| x.type_id == y.type_id && x.ref_kind == y.ref_kind)
            }
            _ => false,
        }
    }
}
