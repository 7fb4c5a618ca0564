//! Member lookup, inheritance walks and type classification queries.
//!
//! Lookup returns *levels*: the members found on the most-derived type first,
//! then each base in turn. Resolvers that need "most-derived wins" semantics
//! (pattern `GetEnumerator`, `Deconstruct`) stop at the first level that has a
//! usable candidate. Hiding is applied while the levels are built:
//!
//! - a non-method member hides every inherited member of the same name
//! - a member declared `new` hides every inherited member of the same name
//! - a method hides inherited methods with the same signature

use crate::catalog::TypeCatalog;
use crate::def::{DefId, DefKind};
use crate::instantiate::Substitution;
use crate::members::{Accessibility, MemberFlags, MemberId};
use crate::types::{ParamOwner, TypeArgs, TypeData, TypeId};
use csz_common::limits::{MAX_BASE_CHAIN_DEPTH, MAX_TYPE_WALK_DEPTH};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::sync::Arc;
use tracing::trace;

/// Members of one type in a lookup result.
#[derive(Clone, Debug)]
pub struct LookupLevel {
    /// The (instantiated) type that declares these members.
    pub owner: TypeId,
    /// Maps the declaring definition's type parameters to `owner`'s arguments.
    pub substitution: Substitution,
    pub members: SmallVec<[MemberId; 2]>,
}

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

impl TypeCatalog {
    // =========================================================================
    // Member lookup
    // =========================================================================

    /// All members named `name` visible on `ty`, most-derived level first.
    ///
    /// Memoized per `(ty, name)`; the memo is invisible to callers.
    pub fn lookup_members(&self, ty: TypeId, name: &str) -> Arc<[LookupLevel]> {
        let key = (ty, name.to_string());
        if let Some(hit) = self.lookup_cache.get(&key) {
            return Arc::clone(hit.value());
        }
        let levels: Arc<[LookupLevel]> = self.compute_lookup(ty, name).into();
        trace!(type_id = ty.0, name, levels = levels.len(), "lookup_members");
        self.lookup_cache.insert(key, Arc::clone(&levels));
        levels
    }

    fn compute_lookup(&self, ty: TypeId, name: &str) -> Vec<LookupLevel> {
        let mut levels: Vec<LookupLevel> = Vec::new();
        let mut hidden_by_name = false;
        for owner in self.lookup_chain(ty) {
            if hidden_by_name {
                break;
            }
            let Some((def, args)) = self.def_of(owner) else {
                continue;
            };
            let mut found: SmallVec<[MemberId; 2]> = SmallVec::new();
            for member_id in self.members_named(def, name) {
                let member = self.member(member_id);
                let hidden = levels.iter().flat_map(|l| l.members.iter()).any(|&derived| {
                    let derived = self.member(derived);
                    derived.same_signature(member)
                });
                if !hidden {
                    found.push(member_id);
                }
            }
            if found.is_empty() {
                continue;
            }
            hidden_by_name = found.iter().any(|&m| {
                let member = self.member(m);
                !member.is_method() || member.flags.contains(MemberFlags::NEW)
            });
            levels.push(LookupLevel {
                owner,
                substitution: Substitution::for_type(def, args),
                members: found,
            });
        }
        levels
    }

    /// Types searched by member lookup on `ty`, most-derived first.
    fn lookup_chain(&self, ty: TypeId) -> Vec<TypeId> {
        if matches!(ty, TypeId::ERROR | TypeId::VOID | TypeId::DYNAMIC) {
            return Vec::new();
        }
        match self.types.lookup(ty) {
            Some(TypeData::Named { def, .. }) if self.def(def).is_interface() => {
                let mut chain = vec![ty];
                chain.extend(self.all_interfaces(ty).iter().copied());
                chain.push(TypeId::OBJECT);
                chain
            }
            Some(TypeData::TypeParameter(_)) => {
                let mut chain = Vec::new();
                for constraint in self.type_param_constraints(ty) {
                    for t in self.lookup_chain(constraint) {
                        if !chain.contains(&t) {
                            chain.push(t);
                        }
                    }
                }
                if !chain.contains(&TypeId::OBJECT) {
                    chain.push(TypeId::OBJECT);
                }
                chain
            }
            _ => {
                let mut chain = vec![ty];
                chain.extend(self.base_chain(ty));
                chain
            }
        }
    }

    // =========================================================================
    // Inheritance
    // =========================================================================

    /// Direct base type of `ty`, instantiated.
    pub fn base_type(&self, ty: TypeId) -> Option<TypeId> {
        if matches!(ty, TypeId::OBJECT | TypeId::ERROR | TypeId::VOID | TypeId::DYNAMIC) {
            return None;
        }
        match self.types.lookup(ty)? {
            TypeData::Named { def, args } => {
                let info = self.def(def);
                match info.kind {
                    DefKind::Interface => None,
                    DefKind::Class => match info.base {
                        Some(base) => Some(self.instantiate(base, &Substitution::for_type(def, args))),
                        None if def == self.well_known.object => None,
                        None => Some(TypeId::OBJECT),
                    },
                    DefKind::Struct | DefKind::Enum | DefKind::Delegate => Some(TypeId::OBJECT),
                }
            }
            TypeData::TypeParameter(_) => self
                .type_param_constraints(ty)
                .into_iter()
                .find(|&c| !self.is_interface_type(c))
                .or(Some(TypeId::OBJECT)),
            _ => Some(TypeId::OBJECT),
        }
    }

    /// Every base type of `ty`, nearest first, ending at `object`.
    pub fn base_chain(&self, ty: TypeId) -> Vec<TypeId> {
        let mut chain = Vec::new();
        let mut current = ty;
        while let Some(base) = self.base_type(current) {
            if chain.len() as u32 >= MAX_BASE_CHAIN_DEPTH || chain.contains(&base) {
                break;
            }
            chain.push(base);
            current = base;
        }
        chain
    }

    /// Transitive interface set of `ty`, not including `ty` itself.
    ///
    /// Declaration order is preserved so callers that report ambiguities see
    /// interfaces in a stable order.
    pub fn all_interfaces(&self, ty: TypeId) -> Arc<[TypeId]> {
        if let Some(hit) = self.closure_cache.get(&ty) {
            return Arc::clone(hit.value());
        }
        let mut set = FxIndexSet::default();
        self.collect_interfaces(ty, &mut set, 0);
        set.shift_remove(&ty);
        let closure: Arc<[TypeId]> = set.into_iter().collect::<Vec<_>>().into();
        self.closure_cache.insert(ty, Arc::clone(&closure));
        closure
    }

    fn collect_interfaces(&self, ty: TypeId, out: &mut FxIndexSet<TypeId>, depth: u32) {
        if depth > MAX_TYPE_WALK_DEPTH {
            return;
        }
        let direct: Vec<TypeId> = match self.types.lookup(ty) {
            Some(TypeData::Array { element, .. }) => {
                vec![self.types.named(self.well_known.ienumerable_t, &[element])]
            }
            Some(TypeData::TypeParameter(_)) => self.type_param_constraints(ty),
            Some(TypeData::Named { .. }) | Some(TypeData::Intrinsic(_)) => match self.def_of(ty) {
                Some((def, args)) => {
                    let subst = Substitution::for_type(def, args);
                    self.def(def)
                        .interfaces
                        .iter()
                        .map(|&i| self.instantiate(i, &subst))
                        .collect()
                }
                None => Vec::new(),
            },
            _ => Vec::new(),
        };
        for iface in direct {
            if self.is_interface_type(iface) {
                if out.insert(iface) {
                    self.collect_interfaces(iface, out, depth + 1);
                }
            } else {
                // Class constraint on a type parameter.
                self.collect_interfaces(iface, out, depth + 1);
            }
        }
        if let Some(base) = self.base_type(ty) {
            if !self.is_interface_type(ty) {
                self.collect_interfaces(base, out, depth + 1);
            }
        }
    }

    /// Instantiations of the generic interface `family` implemented by `ty`
    /// (including `ty` itself when it is one).
    pub fn interface_instantiations(&self, ty: TypeId, family: DefId) -> Vec<TypeId> {
        let mut found = Vec::new();
        let is_family = |t: TypeId| matches!(self.types.named_parts(t), Some((d, _)) if d == family);
        if is_family(ty) {
            found.push(ty);
        }
        for &iface in self.all_interfaces(ty).iter() {
            if is_family(iface) && !found.contains(&iface) {
                found.push(iface);
            }
        }
        found
    }

    /// Does `ty` implement (or is it) the non-generic interface `def`?
    pub fn implements_def(&self, ty: TypeId, def: DefId) -> bool {
        !self.interface_instantiations(ty, def).is_empty()
    }

    /// Is `derived` equal to `base` or a class derived from it?
    pub fn is_derived_from(&self, derived: DefId, base: DefId) -> bool {
        if derived == base {
            return true;
        }
        let ty = self.instance_type(derived);
        self.base_chain(ty)
            .into_iter()
            .filter_map(|t| self.def_of(t))
            .any(|(d, _)| d == base)
    }

    fn type_param_constraints(&self, ty: TypeId) -> Vec<TypeId> {
        let Some(param) = self.types.type_param_ref(ty) else {
            return Vec::new();
        };
        match param.owner {
            ParamOwner::Type(owner) => self
                .def(owner)
                .type_params
                .get(param.index as usize)
                .map(|p| p.constraints.clone())
                .unwrap_or_default(),
            ParamOwner::Method => Vec::new(),
        }
    }

    // =========================================================================
    // Accessibility
    // =========================================================================

    /// Can code inside `from` (or top-level code when `None`) see `member`?
    ///
    /// There is a single compilation, so `internal` is always accessible.
    pub fn is_accessible(&self, member: MemberId, from: Option<DefId>) -> bool {
        let info = self.member(member);
        match info.accessibility {
            Accessibility::Public | Accessibility::Internal | Accessibility::ProtectedInternal => true,
            Accessibility::Private => from == Some(info.containing),
            Accessibility::Protected | Accessibility::PrivateProtected => {
                from.is_some_and(|f| self.is_derived_from(f, info.containing))
            }
        }
    }

    // =========================================================================
    // Classification queries
    // =========================================================================

    pub fn is_value_type(&self, ty: TypeId) -> bool {
        match self.types.lookup(ty) {
            Some(TypeData::Intrinsic(kind)) => kind.is_value_type(),
            Some(TypeData::Named { def, .. }) => self.def(def).is_value_type(),
            Some(TypeData::Tuple(_) | TypeData::Nullable(_)) => true,
            _ => false,
        }
    }

    /// Known to be a reference type. Unconstrained type parameters are neither.
    pub fn is_reference_type(&self, ty: TypeId) -> bool {
        match self.types.lookup(ty) {
            Some(TypeData::Intrinsic(_)) => matches!(ty, TypeId::OBJECT | TypeId::STRING | TypeId::DYNAMIC),
            Some(TypeData::Named { def, .. }) => !self.def(def).is_value_type(),
            Some(TypeData::Array { .. }) => true,
            Some(TypeData::TypeParameter(_)) => self
                .type_param_constraints(ty)
                .into_iter()
                .any(|c| !self.is_interface_type(c) && self.is_reference_type(c)),
            _ => false,
        }
    }

    pub fn is_interface_type(&self, ty: TypeId) -> bool {
        matches!(self.types.lookup(ty), Some(TypeData::Named { def, .. }) if self.def(def).is_interface())
    }

    pub fn is_delegate_type(&self, ty: TypeId) -> bool {
        matches!(self.types.lookup(ty), Some(TypeData::Named { def, .. }) if self.def(def).kind == DefKind::Delegate)
    }

    pub fn is_ref_struct(&self, ty: TypeId) -> bool {
        matches!(self.types.lookup(ty), Some(TypeData::Named { def, .. }) if self.def(def).is_ref_struct())
    }

    /// No subtype of `ty` can exist, so its interface set is exactly known.
    pub fn is_sealed_type(&self, ty: TypeId) -> bool {
        match self.types.lookup(ty) {
            Some(TypeData::Intrinsic(kind)) => kind.is_value_type() || ty == TypeId::STRING,
            Some(TypeData::Named { def, .. }) => self.def(def).is_sealed(),
            Some(TypeData::Array { .. } | TypeData::Tuple(_) | TypeData::Nullable(_)) => true,
            _ => false,
        }
    }

    /// Type arguments of `ty` when it is an instantiation of `family`.
    pub fn instantiation_args(&self, ty: TypeId, family: DefId) -> Option<TypeArgs> {
        match self.types.named_parts(ty) {
            Some((def, args)) if def == family => Some(args),
            _ => None,
        }
    }
}
