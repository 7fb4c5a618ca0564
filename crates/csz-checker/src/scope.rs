//! Lexical scopes of locals within one method body.

use csz_common::Span;
use csz_solver::{RefKind, TypeId};
use rustc_hash::FxHashMap;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum LocalKind {
    Parameter,
    Local,
    /// A foreach iteration variable (including deconstructed ones).
    IterationVariable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalSymbol {
    pub name: String,
    pub type_id: TypeId,
    pub kind: LocalKind,
    pub ref_kind: RefKind,
    pub span: Span,
}

impl LocalSymbol {
    pub fn new(name: &str, type_id: TypeId, kind: LocalKind, span: Span) -> Self {
        Self {
            name: name.to_string(),
            type_id,
            kind,
            ref_kind: RefKind::None,
            span,
        }
    }

    #[must_use]
    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub const fn is_readonly(&self) -> bool {
        matches!(self.kind, LocalKind::IterationVariable) && !matches!(self.ref_kind, RefKind::Ref)
    }
}

/// Stack of block scopes, innermost last.
///
/// A name may not be redeclared while any enclosing declaration of it is
/// visible, so `declare` checks the whole stack.
#[derive(Debug)]
pub struct ScopeStack {
    scopes: Vec<FxHashMap<String, LocalSymbol>>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![FxHashMap::default()],
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    pub fn pop(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn lookup(&self, name: &str) -> Option<&LocalSymbol> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Declare `symbol` in the innermost scope. Returns `false` (and declares
    /// nothing) when the name is already visible.
    pub fn declare(&mut self, symbol: LocalSymbol) -> bool {
        if self.contains(&symbol.name) {
            return false;
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(symbol.name.clone(), symbol);
        }
        true
    }
}
