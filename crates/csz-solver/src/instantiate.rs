//! Generic substitution and receiver-driven inference.

use crate::catalog::TypeCatalog;
use crate::def::DefId;
use crate::members::{MethodSignature, ParamInfo};
use crate::types::{ParamOwner, TypeArgs, TypeData, TypeId};
use csz_common::limits::MAX_TYPE_WALK_DEPTH;

/// Type arguments for one generic definition and, optionally, one generic method.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Substitution {
    pub owner: Option<DefId>,
    pub type_args: TypeArgs,
    pub method_args: TypeArgs,
}

impl Substitution {
    pub fn for_type(owner: DefId, args: TypeArgs) -> Self {
        Self {
            owner: Some(owner),
            type_args: args,
            method_args: TypeArgs::new(),
        }
    }

    #[must_use]
    pub fn with_method_args(mut self, args: TypeArgs) -> Self {
        self.method_args = args;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.type_args.is_empty() && self.method_args.is_empty()
    }
}

impl TypeCatalog {
    /// Replace type parameters bound by `subst` inside `ty`.
    pub fn instantiate(&self, ty: TypeId, subst: &Substitution) -> TypeId {
        if subst.is_empty() || ty.is_intrinsic() {
            return ty;
        }
        self.instantiate_at(ty, subst, 0)
    }

    fn instantiate_at(&self, ty: TypeId, subst: &Substitution, depth: u32) -> TypeId {
        if depth > MAX_TYPE_WALK_DEPTH || ty.is_intrinsic() {
            return ty;
        }
        let Some(data) = self.types.lookup(ty) else {
            return ty;
        };
        match data {
            TypeData::TypeParameter(param) => {
                let bound = match param.owner {
                    ParamOwner::Type(owner) if Some(owner) == subst.owner => {
                        subst.type_args.get(param.index as usize)
                    }
                    ParamOwner::Method => subst.method_args.get(param.index as usize),
                    ParamOwner::Type(_) => None,
                };
                bound.copied().unwrap_or(ty)
            }
            TypeData::Named { def, args } => {
                if args.is_empty() {
                    return ty;
                }
                let args: Vec<TypeId> = args
                    .iter()
                    .map(|&a| self.instantiate_at(a, subst, depth + 1))
                    .collect();
                self.types.named(def, &args)
            }
            TypeData::Array { element, rank } => {
                let element = self.instantiate_at(element, subst, depth + 1);
                self.types.intern(TypeData::Array { element, rank })
            }
            TypeData::Tuple(elements) => {
                let elements: Vec<TypeId> = elements
                    .iter()
                    .map(|&e| self.instantiate_at(e, subst, depth + 1))
                    .collect();
                self.types.tuple(&elements)
            }
            TypeData::Nullable(inner) => {
                let inner = self.instantiate_at(inner, subst, depth + 1);
                self.types.nullable(inner)
            }
            TypeData::Intrinsic(_) => ty,
        }
    }

    /// A method signature with `subst` applied to every parameter and the return type.
    pub fn instantiate_signature(&self, sig: &MethodSignature, subst: &Substitution) -> MethodSignature {
        MethodSignature {
            type_params: if subst.method_args.is_empty() {
                sig.type_params.clone()
            } else {
                Vec::new()
            },
            params: sig
                .params
                .iter()
                .map(|p| ParamInfo {
                    name: p.name.clone(),
                    type_id: self.instantiate(p.type_id, subst),
                    ref_kind: p.ref_kind,
                    flags: p.flags,
                })
                .collect(),
            return_type: self.instantiate(sig.return_type, subst),
            return_ref: sig.return_ref,
        }
    }

    // =========================================================================
    // Inference
    // =========================================================================

    /// Infer method type arguments so that `pattern` (a `this` parameter type)
    /// matches `receiver`, trying the receiver itself, its base chain and then
    /// every interface it implements. Returns `None` when some type parameter
    /// stays unbound or the shapes disagree.
    pub fn infer_from_receiver(&self, pattern: TypeId, receiver: TypeId, arity: usize) -> Option<TypeArgs> {
        let mut candidates = vec![receiver];
        candidates.extend(self.base_chain(receiver));
        candidates.extend(self.all_interfaces(receiver).iter().copied());
        for candidate in candidates {
            let mut bindings: Vec<Option<TypeId>> = vec![None; arity];
            if self.unify(pattern, candidate, &mut bindings, 0) && bindings.iter().all(Option::is_some) {
                return Some(bindings.into_iter().flatten().collect());
            }
        }
        None
    }

    fn unify(&self, pattern: TypeId, actual: TypeId, bindings: &mut [Option<TypeId>], depth: u32) -> bool {
        if pattern == actual {
            return true;
        }
        if depth > MAX_TYPE_WALK_DEPTH {
            return false;
        }
        let (Some(p), Some(a)) = (self.types.lookup(pattern), self.types.lookup(actual)) else {
            return false;
        };
        match (p, a) {
            (TypeData::TypeParameter(param), _) if param.owner == ParamOwner::Method => {
                let Some(slot) = bindings.get_mut(param.index as usize) else {
                    return false;
                };
                match slot {
                    Some(bound) => *bound == actual,
                    None => {
                        *slot = Some(actual);
                        true
                    }
                }
            }
            (TypeData::Named { def: pd, args: pa }, TypeData::Named { def: ad, args: aa }) => {
                pd == ad
                    && pa.len() == aa.len()
                    && pa
                        .iter()
                        .zip(aa.iter())
                        .all(|(&x, &y)| self.unify(x, y, bindings, depth + 1))
            }
            (
                TypeData::Array { element: pe, rank: pr },
                TypeData::Array { element: ae, rank: ar },
            ) => pr == ar && self.unify(pe, ae, bindings, depth + 1),
            (TypeData::Tuple(pe), TypeData::Tuple(ae)) => {
                pe.len() == ae.len()
                    && pe
                        .iter()
                        .zip(ae.iter())
                        .all(|(&x, &y)| self.unify(x, y, bindings, depth + 1))
            }
            (TypeData::Nullable(pi), TypeData::Nullable(ai)) => self.unify(pi, ai, bindings, depth + 1),
            _ => false,
        }
    }
}
