//! Conversion classification.
//!
//! The `ConversionOracle` answers "how does a value of type S become a T?"
//! for the resolvers. It classifies; it never reports. Callers decide which
//! failures are diagnostics and which are cascades of an earlier error.
//!
//! Conversions involving the error type classify as `Identity` so an
//! unresolved type never produces a second, conversion-shaped diagnostic.

use crate::catalog::TypeCatalog;
use crate::members::{MemberId, MemberKind};
use crate::types::{IntrinsicKind, TypeId};
use serde::Serialize;

// =============================================================================
// Conversion kinds
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ConversionKind {
    Identity,
    ImplicitNumeric,
    /// Integer constant that fits the narrower target (`byte b = 1`).
    ImplicitConstant,
    ImplicitNullable,
    NullLiteral,
    DefaultLiteral,
    ImplicitReference,
    Boxing,
    ImplicitTuple,
    ImplicitDynamic,
    ImplicitUserDefined,
    AnonymousFunction,
    MethodGroup,
    ExplicitNumeric,
    ExplicitNullable,
    ExplicitReference,
    Unboxing,
    ExplicitDynamic,
    ExplicitUserDefined,
    ExplicitTuple,
    NoConversion,
}

impl ConversionKind {
    pub const fn exists(self) -> bool {
        !matches!(self, Self::NoConversion)
    }

    pub const fn is_implicit(self) -> bool {
        matches!(
            self,
            Self::Identity
                | Self::ImplicitNumeric
                | Self::ImplicitConstant
                | Self::ImplicitNullable
                | Self::NullLiteral
                | Self::DefaultLiteral
                | Self::ImplicitReference
                | Self::Boxing
                | Self::ImplicitTuple
                | Self::ImplicitDynamic
                | Self::ImplicitUserDefined
                | Self::AnonymousFunction
                | Self::MethodGroup
        )
    }
}

/// A classified conversion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Conversion {
    pub kind: ConversionKind,
    /// Operator used by user-defined conversions.
    pub method: Option<MemberId>,
    /// Element conversions of tuple conversions, in element order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Conversion>,
}

impl Conversion {
    pub const fn of(kind: ConversionKind) -> Self {
        Self {
            kind,
            method: None,
            nested: Vec::new(),
        }
    }

    pub const fn identity() -> Self {
        Self::of(ConversionKind::Identity)
    }

    pub const fn none() -> Self {
        Self::of(ConversionKind::NoConversion)
    }

    pub const fn exists(&self) -> bool {
        self.kind.exists()
    }

    pub const fn is_implicit(&self) -> bool {
        self.kind.is_implicit()
    }

    pub const fn is_identity(&self) -> bool {
        matches!(self.kind, ConversionKind::Identity)
    }
}

/// The shape of a source expression, for conversions that depend on more
/// than the expression's type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprShape {
    Typed(TypeId),
    /// Integer literal of type `type_id` with a known value.
    Constant { type_id: TypeId, value: i64 },
    Null,
    Default,
    Tuple(Vec<ExprShape>),
    Lambda,
    MethodGroup,
}

// =============================================================================
// ConversionOracle
// =============================================================================

pub trait ConversionOracle {
    /// Standard and user-defined implicit conversion from `source` to `target`.
    fn classify_implicit(&self, source: TypeId, target: TypeId) -> Conversion;

    /// Conversion allowed by a cast: implicit conversions plus explicit ones.
    fn classify_explicit(&self, source: TypeId, target: TypeId) -> Conversion;

    /// Implicit conversion from an expression, honoring constants, `null`,
    /// `default` and tuple literals.
    fn classify_expression(&self, expr: &ExprShape, target: TypeId) -> Conversion;
}

impl ConversionOracle for TypeCatalog {
    fn classify_implicit(&self, source: TypeId, target: TypeId) -> Conversion {
        if source == target || source.is_error() || target.is_error() {
            return Conversion::identity();
        }
        if matches!(
            (source, target),
            (TypeId::OBJECT, TypeId::DYNAMIC) | (TypeId::DYNAMIC, TypeId::OBJECT)
        ) {
            return Conversion::identity();
        }
        if source == TypeId::VOID || target == TypeId::VOID {
            return Conversion::none();
        }
        if source == TypeId::DYNAMIC {
            return Conversion::of(ConversionKind::ImplicitDynamic);
        }
        if let Some(kind) = self.standard_implicit(source, target) {
            return kind;
        }
        match self.user_defined(source, target, true) {
            Some(method) => Conversion {
                kind: ConversionKind::ImplicitUserDefined,
                method: Some(method),
                nested: Vec::new(),
            },
            None => Conversion::none(),
        }
    }

    fn classify_explicit(&self, source: TypeId, target: TypeId) -> Conversion {
        if source == TypeId::DYNAMIC && !matches!(target, TypeId::DYNAMIC | TypeId::OBJECT) && !target.is_error() {
            return Conversion::of(ConversionKind::ExplicitDynamic);
        }
        let implicit = self.classify_implicit(source, target);
        if implicit.exists() {
            return implicit;
        }
        if source == TypeId::VOID || target == TypeId::VOID {
            return Conversion::none();
        }
        if let Some(conversion) = self.standard_explicit(source, target) {
            return conversion;
        }
        match self
            .user_defined(source, target, false)
            .or_else(|| self.user_defined(source, target, true))
        {
            Some(method) => Conversion {
                kind: ConversionKind::ExplicitUserDefined,
                method: Some(method),
                nested: Vec::new(),
            },
            None => Conversion::none(),
        }
    }

    fn classify_expression(&self, expr: &ExprShape, target: TypeId) -> Conversion {
        if target.is_error() {
            return Conversion::identity();
        }
        match expr {
            ExprShape::Typed(source) => self.classify_implicit(*source, target),
            ExprShape::Constant { type_id, value } => {
                let by_type = self.classify_implicit(*type_id, target);
                if by_type.exists() {
                    return by_type;
                }
                let underlying = self.types.nullable_underlying(target).unwrap_or(target);
                let fits = *type_id == TypeId::INT
                    && self.types.intrinsic(underlying).is_some_and(|k| {
                        k != IntrinsicKind::Char
                            && k.integral_range()
                                .is_some_and(|(lo, hi)| (lo..=hi).contains(&i128::from(*value)))
                    });
                if fits {
                    Conversion::of(ConversionKind::ImplicitConstant)
                } else {
                    Conversion::none()
                }
            }
            ExprShape::Null => {
                if self.accepts_null(target) {
                    Conversion::of(ConversionKind::NullLiteral)
                } else {
                    Conversion::none()
                }
            }
            ExprShape::Default => {
                if target == TypeId::VOID {
                    Conversion::none()
                } else {
                    Conversion::of(ConversionKind::DefaultLiteral)
                }
            }
            ExprShape::Tuple(elements) => {
                if let Some(targets) = self.types.tuple_elements(target) {
                    if targets.len() != elements.len() {
                        return Conversion::none();
                    }
                    let nested: Vec<Conversion> = elements
                        .iter()
                        .zip(targets.iter())
                        .map(|(e, &t)| self.classify_expression(e, t))
                        .collect();
                    if nested.iter().all(Conversion::exists) {
                        return Conversion {
                            kind: ConversionKind::ImplicitTuple,
                            method: None,
                            nested,
                        };
                    }
                    return Conversion::none();
                }
                match self.natural_type(expr) {
                    Some(natural) => self.classify_implicit(natural, target),
                    None => Conversion::none(),
                }
            }
            ExprShape::Lambda if self.is_delegate_type(target) => {
                Conversion::of(ConversionKind::AnonymousFunction)
            }
            ExprShape::MethodGroup if self.is_delegate_type(target) => {
                Conversion::of(ConversionKind::MethodGroup)
            }
            ExprShape::Lambda | ExprShape::MethodGroup => Conversion::none(),
        }
    }
}

impl TypeCatalog {
    /// Type of an expression when it has one. `null`, `default`, lambdas and
    /// tuple literals containing them have none.
    pub fn natural_type(&self, expr: &ExprShape) -> Option<TypeId> {
        match expr {
            ExprShape::Typed(t) => Some(*t),
            ExprShape::Constant { type_id, .. } => Some(*type_id),
            ExprShape::Tuple(elements) => {
                let types: Option<Vec<TypeId>> = elements.iter().map(|e| self.natural_type(e)).collect();
                types.map(|t| self.types.tuple(&t))
            }
            ExprShape::Null | ExprShape::Default | ExprShape::Lambda | ExprShape::MethodGroup => None,
        }
    }

    fn accepts_null(&self, target: TypeId) -> bool {
        self.is_reference_type(target) || self.types.nullable_underlying(target).is_some()
    }

    fn standard_implicit(&self, source: TypeId, target: TypeId) -> Option<Conversion> {
        let types = &self.types;
        if let (Some(s), Some(t)) = (types.intrinsic(source), types.intrinsic(target)) {
            if implicit_numeric(s, t) {
                return Some(Conversion::of(ConversionKind::ImplicitNumeric));
            }
        }

        if let Some(target_inner) = types.nullable_underlying(target) {
            let source_inner = types.nullable_underlying(source).unwrap_or(source);
            if source_inner == target_inner || self.standard_implicit_numeric(source_inner, target_inner) {
                return Some(Conversion::of(ConversionKind::ImplicitNullable));
            }
        }

        if let (Some(source_elems), Some(target_elems)) = (types.tuple_elements(source), types.tuple_elements(target)) {
            if source_elems.len() != target_elems.len() {
                return None;
            }
            let nested: Vec<Conversion> = source_elems
                .iter()
                .zip(target_elems.iter())
                .map(|(&s, &t)| self.classify_implicit(s, t))
                .collect();
            return nested.iter().all(Conversion::exists).then(|| Conversion {
                kind: ConversionKind::ImplicitTuple,
                method: None,
                nested,
            });
        }

        let to_top = matches!(target, TypeId::OBJECT | TypeId::DYNAMIC);
        if self.is_reference_type(source) {
            if to_top || self.base_chain(source).contains(&target) || self.all_interfaces(source).contains(&target) {
                return Some(Conversion::of(ConversionKind::ImplicitReference));
            }
            if let (Some(se), Some(te)) = (types.array_element(source), types.array_element(target)) {
                if self.is_reference_type(se) && self.classify_implicit(se, te).kind == ConversionKind::ImplicitReference {
                    return Some(Conversion::of(ConversionKind::ImplicitReference));
                }
            }
            return None;
        }

        if self.is_ref_struct(source) {
            return None;
        }
        let boxed_from = types.nullable_underlying(source).unwrap_or(source);
        if to_top || self.all_interfaces(boxed_from).contains(&target) {
            return Some(Conversion::of(ConversionKind::Boxing));
        }
        None
    }

    fn standard_implicit_numeric(&self, source: TypeId, target: TypeId) -> bool {
        match (self.types.intrinsic(source), self.types.intrinsic(target)) {
            (Some(s), Some(t)) => implicit_numeric(s, t),
            _ => false,
        }
    }

    fn standard_explicit(&self, source: TypeId, target: TypeId) -> Option<Conversion> {
        let types = &self.types;
        let numeric_like = |k: IntrinsicKind| k.is_numeric() || k == IntrinsicKind::Char;
        if let (Some(s), Some(t)) = (types.intrinsic(source), types.intrinsic(target)) {
            if numeric_like(s) && numeric_like(t) {
                return Some(Conversion::of(ConversionKind::ExplicitNumeric));
            }
        }

        let source_inner = types.nullable_underlying(source);
        let target_inner = types.nullable_underlying(target);
        if source_inner.is_some() || target_inner.is_some() {
            let s = source_inner.unwrap_or(source);
            let t = target_inner.unwrap_or(target);
            let inner_ok = s == t
                || matches!(
                    (types.intrinsic(s), types.intrinsic(t)),
                    (Some(a), Some(b)) if numeric_like(a) && numeric_like(b)
                );
            if inner_ok {
                return Some(Conversion::of(ConversionKind::ExplicitNullable));
            }
        }

        if let (Some(source_elems), Some(target_elems)) = (types.tuple_elements(source), types.tuple_elements(target)) {
            if source_elems.len() != target_elems.len() {
                return None;
            }
            let nested: Vec<Conversion> = source_elems
                .iter()
                .zip(target_elems.iter())
                .map(|(&s, &t)| self.classify_explicit(s, t))
                .collect();
            return nested.iter().all(Conversion::exists).then(|| Conversion {
                kind: ConversionKind::ExplicitTuple,
                method: None,
                nested,
            });
        }

        let source_is_top = matches!(source, TypeId::OBJECT | TypeId::DYNAMIC);
        let source_is_interface = self.is_interface_type(source);
        let target_is_interface = self.is_interface_type(target);

        if self.is_value_type(target) || self.is_unconstrained_type_param(target) {
            let unboxes = source_is_top
                || (source_is_interface
                    && (self.all_interfaces(target_inner.unwrap_or(target)).contains(&source)
                        || self.is_unconstrained_type_param(target)));
            return unboxes.then(|| Conversion::of(ConversionKind::Unboxing));
        }

        if self.is_reference_type(target) {
            let downcast = source_is_top
                || self.base_chain(target).contains(&source)
                || (source_is_interface && (target_is_interface || !self.is_sealed_type(target)))
                || (source_is_interface && self.all_interfaces(target).contains(&source))
                || (target_is_interface && self.is_reference_type(source) && !self.is_sealed_type(source));
            return downcast.then(|| Conversion::of(ConversionKind::ExplicitReference));
        }
        None
    }

    fn is_unconstrained_type_param(&self, ty: TypeId) -> bool {
        self.types.type_param_ref(ty).is_some() && !self.is_reference_type(ty)
    }

    /// User-defined operator converting exactly `source` to `target`.
    fn user_defined(&self, source: TypeId, target: TypeId, implicit: bool) -> Option<MemberId> {
        let mut owners = Vec::with_capacity(2);
        for t in [source, target] {
            let t = self.types.nullable_underlying(t).unwrap_or(t);
            if let Some((def, _)) = self.def_of(t) {
                if !owners.contains(&def) {
                    owners.push(def);
                }
            }
        }
        owners.into_iter().find_map(|def| {
            self.def(def).members.iter().copied().find(|&m| {
                matches!(
                    self.member(m).kind,
                    MemberKind::Conversion { from, to, is_implicit }
                        if from == source && to == target && is_implicit == implicit
                )
            })
        })
    }
}

/// Implicit numeric conversion table.
const fn implicit_numeric(source: IntrinsicKind, target: IntrinsicKind) -> bool {
    use IntrinsicKind::*;
    matches!(
        (source, target),
        (SByte, Short | Int | Long | Float | Double | Decimal)
            | (Byte, Short | UShort | Int | UInt | Long | ULong | Float | Double | Decimal)
            | (Short, Int | Long | Float | Double | Decimal)
            | (UShort, Int | UInt | Long | ULong | Float | Double | Decimal)
            | (Int, Long | Float | Double | Decimal)
            | (UInt, Long | ULong | Float | Double | Decimal)
            | (Long | ULong, Float | Double | Decimal)
            | (Char, UShort | Int | UInt | Long | ULong | Float | Double | Decimal)
            | (Float, Double)
    )
}
