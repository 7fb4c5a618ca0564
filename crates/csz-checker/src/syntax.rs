//! Syntax shapes consumed by the resolvers.
//!
//! These are the already-parsed, already-name-bound inputs: expressions carry
//! their type when the binder knew it (`Typed`), and only the forms whose
//! meaning depends on deconstruction or foreach binding (literals, locals,
//! tuple literals, typeless expressions) are modelled structurally.

use crate::context::MemberContext;
use csz_common::{Span, Spanned};
use csz_solver::{RefKind, TypeId};

// =============================================================================
// Expressions
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprKind {
    /// Any expression whose type the binder already knows (calls, `new C()`).
    Typed(TypeId),
    IntegerLiteral(i64),
    Null,
    Default,
    /// A simple name resolved against the local scope.
    Local(String),
    Tuple(Vec<Expr>),
    Lambda,
    MethodGroup(String),
    /// A field or property access such as `this.X`.
    Member {
        name: String,
        type_id: TypeId,
        assignable: bool,
    },
    /// Syntax the binder already rejected.
    Invalid,
}

impl Expr {
    pub const fn new(span: Span, kind: ExprKind) -> Self {
        Self { span, kind }
    }

    pub const fn typed(span: Span, type_id: TypeId) -> Self {
        Self::new(span, ExprKind::Typed(type_id))
    }

    pub const fn int(span: Span, value: i64) -> Self {
        Self::new(span, ExprKind::IntegerLiteral(value))
    }

    pub const fn null(span: Span) -> Self {
        Self::new(span, ExprKind::Null)
    }

    pub fn local(span: Span, name: &str) -> Self {
        Self::new(span, ExprKind::Local(name.to_string()))
    }

    pub fn tuple(span: Span, elements: Vec<Self>) -> Self {
        Self::new(span, ExprKind::Tuple(elements))
    }

    pub fn member(span: Span, name: &str, type_id: TypeId, assignable: bool) -> Self {
        Self::new(
            span,
            ExprKind::Member {
                name: name.to_string(),
                type_id,
                assignable,
            },
        )
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// Deconstruction targets
// =============================================================================

/// Declared type of a new local: `var` or an explicit type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclaredType {
    Var,
    Explicit(TypeId),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetSyntax {
    pub span: Span,
    pub kind: TargetKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetKind {
    /// `(a, b, ...)`
    Parenthesized(Vec<TargetSyntax>),
    /// `var (a, b, ...)`. `var_type` is set when `var` names an actual type.
    VarParenthesized {
        var_type: Option<TypeId>,
        elements: Vec<TargetSyntax>,
    },
    /// `var x` or `T x`
    Declaration { declared: DeclaredType, name: String },
    /// A bare name.
    Identifier(String),
    /// `_`, `var _` or `T _`.
    Discard(Option<DeclaredType>),
    /// Any other expression used as an assignment target.
    Expression(Expr),
}

impl TargetSyntax {
    pub const fn new(span: Span, kind: TargetKind) -> Self {
        Self { span, kind }
    }

    pub fn parenthesized(span: Span, elements: Vec<Self>) -> Self {
        Self::new(span, TargetKind::Parenthesized(elements))
    }

    pub fn var_parenthesized(span: Span, elements: Vec<Self>) -> Self {
        Self::new(
            span,
            TargetKind::VarParenthesized {
                var_type: None,
                elements,
            },
        )
    }

    pub fn var(span: Span, name: &str) -> Self {
        Self::new(
            span,
            TargetKind::Declaration {
                declared: DeclaredType::Var,
                name: name.to_string(),
            },
        )
    }

    pub fn declared(span: Span, type_id: TypeId, name: &str) -> Self {
        Self::new(
            span,
            TargetKind::Declaration {
                declared: DeclaredType::Explicit(type_id),
                name: name.to_string(),
            },
        )
    }

    pub fn identifier(span: Span, name: &str) -> Self {
        Self::new(span, TargetKind::Identifier(name.to_string()))
    }

    pub const fn discard(span: Span) -> Self {
        Self::new(span, TargetKind::Discard(None))
    }

    pub fn expression(expr: Expr) -> Self {
        Self::new(expr.span, TargetKind::Expression(expr))
    }
}

impl Spanned for TargetSyntax {
    fn span(&self) -> Span {
        self.span
    }
}

// =============================================================================
// Statements
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub enum DeconstructionKind {
    /// `(a, b) = e;`
    Assignment,
    /// `var (a, b) = e;` / `(int a, var b) = e;`
    Declaration,
    /// `for (var (a, b) = e; ...)`
    ForInitializer,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeconstructionStatement {
    pub kind: DeconstructionKind,
    pub target: TargetSyntax,
    pub value: Expr,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ForEachVariable {
    /// `foreach (T x in ...)`, `foreach (ref var x in ...)`
    Single {
        declared: DeclaredType,
        name: String,
        ref_kind: RefKind,
        span: Span,
    },
    /// `foreach (var (k, v) in ...)`
    Deconstruction(TargetSyntax),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForEachStatement {
    pub is_await: bool,
    pub variable: ForEachVariable,
    pub collection: Expr,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// `T name;` introducing a writable local (or a parameter).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalDeclaration {
    pub name: String,
    pub type_id: TypeId,
    pub span: Span,
}

impl LocalDeclaration {
    pub fn new(name: &str, type_id: TypeId, span: Span) -> Self {
        Self {
            name: name.to_string(),
            type_id,
            span,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Local(LocalDeclaration),
    Deconstruction(DeconstructionStatement),
    ForEach(ForEachStatement),
}

/// One method body, checked independently of every other.
#[derive(Clone, Debug, Default)]
pub struct MethodBody {
    pub name: String,
    pub context: MemberContext,
    pub parameters: Vec<LocalDeclaration>,
    pub statements: Vec<Statement>,
}
