//! Type interning.
//!
//! `TypeInterner` maps structural `TypeData` to stable `TypeId` handles. It is
//! shared by every worker of a compilation: interning is idempotent, so two
//! workers racing to intern the same tuple observe the same id.

use crate::def::DefId;
use crate::types::{
    IntrinsicKind, ParamOwner, TupleElements, TypeArgs, TypeData, TypeId, TypeParamRef,
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::{PoisonError, RwLock};
use tracing::trace;

pub struct TypeInterner {
    ids: DashMap<TypeData, TypeId>,
    data: RwLock<Vec<TypeData>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    /// Create an interner with every intrinsic pre-registered at its fixed id.
    pub fn new() -> Self {
        let ids = DashMap::new();
        let mut data = Vec::with_capacity(64);
        for kind in IntrinsicKind::ALL {
            let id = TypeId(data.len() as u32);
            debug_assert_eq!(id, kind.type_id());
            data.push(TypeData::Intrinsic(kind));
            ids.insert(TypeData::Intrinsic(kind), id);
        }
        Self {
            ids,
            data: RwLock::new(data),
        }
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        match self.ids.entry(data) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let mut table = self.data.write().unwrap_or_else(PoisonError::into_inner);
                let id = TypeId(table.len() as u32);
                table.push(entry.key().clone());
                trace!(type_id = id.0, data = ?entry.key(), "TypeInterner::intern");
                entry.insert(id);
                id
            }
        }
    }

    /// Structural data behind `id`, if it was produced by this interner.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        let table = self.data.read().unwrap_or_else(PoisonError::into_inner);
        table.get(id.0 as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.data.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn named(&self, def: DefId, args: &[TypeId]) -> TypeId {
        self.intern(TypeData::Named {
            def,
            args: TypeArgs::from_slice(args),
        })
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array { element, rank: 1 })
    }

    pub fn tuple(&self, elements: &[TypeId]) -> TypeId {
        self.intern(TypeData::Tuple(TupleElements::from_slice(elements)))
    }

    /// `T?`. Wrapping is idempotent: `T??` is `T?`.
    pub fn nullable(&self, underlying: TypeId) -> TypeId {
        if matches!(self.lookup(underlying), Some(TypeData::Nullable(_))) {
            return underlying;
        }
        self.intern(TypeData::Nullable(underlying))
    }

    pub fn type_param(&self, owner: DefId, index: u32) -> TypeId {
        self.intern(TypeData::TypeParameter(TypeParamRef {
            owner: ParamOwner::Type(owner),
            index,
        }))
    }

    pub fn method_type_param(&self, index: u32) -> TypeId {
        self.intern(TypeData::TypeParameter(TypeParamRef {
            owner: ParamOwner::Method,
            index,
        }))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn tuple_elements(&self, id: TypeId) -> Option<TupleElements> {
        match self.lookup(id)? {
            TypeData::Tuple(elements) => Some(elements),
            _ => None,
        }
    }

    pub fn array_element(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(id)? {
            TypeData::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn nullable_underlying(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(id)? {
            TypeData::Nullable(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn named_parts(&self, id: TypeId) -> Option<(DefId, TypeArgs)> {
        match self.lookup(id)? {
            TypeData::Named { def, args } => Some((def, args)),
            _ => None,
        }
    }

    pub fn intrinsic(&self, id: TypeId) -> Option<IntrinsicKind> {
        match self.lookup(id)? {
            TypeData::Intrinsic(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn type_param_ref(&self, id: TypeId) -> Option<TypeParamRef> {
        match self.lookup(id)? {
            TypeData::TypeParameter(param) => Some(param),
            _ => None,
        }
    }
}
