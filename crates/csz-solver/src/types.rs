//! Structural type representation.
//!
//! Types are interned: a `TypeId` is a handle into the `TypeInterner`, and two
//! structurally equal types always share a handle, so equality is `==` on ids.

use crate::def::DefId;
use serde::Serialize;
use smallvec::SmallVec;

// =============================================================================
// TypeId
// =============================================================================

/// Interned type handle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The error type. Anything touching it is already reported.
    pub const ERROR: Self = Self(0);
    pub const OBJECT: Self = Self(1);
    pub const STRING: Self = Self(2);
    pub const CHAR: Self = Self(3);
    pub const BOOL: Self = Self(4);
    pub const SBYTE: Self = Self(5);
    pub const BYTE: Self = Self(6);
    pub const SHORT: Self = Self(7);
    pub const USHORT: Self = Self(8);
    pub const INT: Self = Self(9);
    pub const UINT: Self = Self(10);
    pub const LONG: Self = Self(11);
    pub const ULONG: Self = Self(12);
    pub const FLOAT: Self = Self(13);
    pub const DOUBLE: Self = Self(14);
    pub const DECIMAL: Self = Self(15);
    pub const VOID: Self = Self(16);
    pub const DYNAMIC: Self = Self(17);

    /// First id handed out for non-intrinsic types.
    pub const FIRST_USER: u32 = 18;

    #[must_use]
    pub const fn is_intrinsic(self) -> bool {
        self.0 < Self::FIRST_USER
    }

    #[must_use]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }
}

// =============================================================================
// Intrinsics
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum IntrinsicKind {
    Error,
    Object,
    String,
    Char,
    Bool,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    Void,
    Dynamic,
}

impl IntrinsicKind {
    /// All intrinsics in `TypeId` order.
    pub const ALL: [Self; 18] = [
        Self::Error,
        Self::Object,
        Self::String,
        Self::Char,
        Self::Bool,
        Self::SByte,
        Self::Byte,
        Self::Short,
        Self::UShort,
        Self::Int,
        Self::UInt,
        Self::Long,
        Self::ULong,
        Self::Float,
        Self::Double,
        Self::Decimal,
        Self::Void,
        Self::Dynamic,
    ];

    /// Keyword used when displaying the type.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Error => "?",
            Self::Object => "object",
            Self::String => "string",
            Self::Char => "char",
            Self::Bool => "bool",
            Self::SByte => "sbyte",
            Self::Byte => "byte",
            Self::Short => "short",
            Self::UShort => "ushort",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Long => "long",
            Self::ULong => "ulong",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::Void => "void",
            Self::Dynamic => "dynamic",
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Short
                | Self::UShort
                | Self::Int
                | Self::UInt
                | Self::Long
                | Self::ULong
                | Self::Float
                | Self::Double
                | Self::Decimal
        )
    }

    #[must_use]
    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            Self::SByte
                | Self::Byte
                | Self::Short
                | Self::UShort
                | Self::Int
                | Self::UInt
                | Self::Long
                | Self::ULong
                | Self::Char
        )
    }

    /// Struct-like intrinsics. `object`, `string` and `dynamic` are references.
    #[must_use]
    pub const fn is_value_type(self) -> bool {
        self.is_numeric() || matches!(self, Self::Char | Self::Bool)
    }

    /// Inclusive range of an integral intrinsic, for constant conversions.
    #[must_use]
    pub const fn integral_range(self) -> Option<(i128, i128)> {
        match self {
            Self::SByte => Some((i8::MIN as i128, i8::MAX as i128)),
            Self::Byte => Some((0, u8::MAX as i128)),
            Self::Short => Some((i16::MIN as i128, i16::MAX as i128)),
            Self::UShort | Self::Char => Some((0, u16::MAX as i128)),
            Self::Int => Some((i32::MIN as i128, i32::MAX as i128)),
            Self::UInt => Some((0, u32::MAX as i128)),
            Self::Long => Some((i64::MIN as i128, i64::MAX as i128)),
            Self::ULong => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn type_id(self) -> TypeId {
        TypeId(self as u32)
    }
}

// =============================================================================
// TypeData
// =============================================================================

/// Who declares a type parameter.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ParamOwner {
    /// A type parameter of a generic definition.
    Type(DefId),
    /// A type parameter of the method currently being instantiated.
    Method,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TypeParamRef {
    pub owner: ParamOwner,
    pub index: u32,
}

/// Inline storage for type arguments; most generics take one or two.
pub type TypeArgs = SmallVec<[TypeId; 2]>;

/// Inline storage for tuple elements.
pub type TupleElements = SmallVec<[TypeId; 4]>;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Intrinsic(IntrinsicKind),
    /// A class, struct, interface, delegate or enum, possibly instantiated.
    Named { def: DefId, args: TypeArgs },
    Array { element: TypeId, rank: u8 },
    Tuple(TupleElements),
    /// `T?` over a value type.
    Nullable(TypeId),
    TypeParameter(TypeParamRef),
}

// =============================================================================
// Ref kinds
// =============================================================================

/// How a parameter, return value or local is passed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    /// `in` parameters and `ref readonly` returns/locals.
    In,
}

impl RefKind {
    #[must_use]
    pub const fn is_by_ref(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Keyword as it appears in argument lists.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Ref => "ref",
            Self::Out => "out",
            Self::In => "in",
        }
    }
}
