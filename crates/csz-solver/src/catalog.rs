//! The symbol/type catalog.
//!
//! `CatalogBuilder` collects definitions and members; `finish` freezes them
//! into a `TypeCatalog` that every resolver worker reads concurrently. The only
//! interior mutability left after freezing is idempotent: type interning and
//! the per-`(type, name)` lookup memo.

use crate::def::{DefFlags, DefId, DefKind, DefinitionInfo, TypeParamInfo};
use crate::intern::TypeInterner;
use crate::lookup::LookupLevel;
use crate::members::{
    Accessibility, MemberFlags, MemberId, MemberInfo, MemberKind, MethodSignature, ParamFlags,
    ParamInfo,
};
use crate::types::{RefKind, TypeArgs, TypeId};
use crate::well_known::{self, WellKnownTypes};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

// =============================================================================
// TypeCatalog
// =============================================================================

pub struct TypeCatalog {
    pub(crate) types: TypeInterner,
    pub(crate) defs: Vec<DefinitionInfo>,
    pub(crate) members: Vec<MemberInfo>,
    pub(crate) well_known: WellKnownTypes,
    pub(crate) lookup_cache: DashMap<(TypeId, String), Arc<[LookupLevel]>>,
    pub(crate) closure_cache: DashMap<TypeId, Arc<[TypeId]>>,
}

impl TypeCatalog {
    pub const fn types(&self) -> &TypeInterner {
        &self.types
    }

    pub const fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    /// Definition data for `id`.
    ///
    /// Ids are only minted by this catalog's builder, so indexing is in range.
    pub fn def(&self, id: DefId) -> &DefinitionInfo {
        &self.defs[id.index()]
    }

    pub fn member(&self, id: MemberId) -> &MemberInfo {
        &self.members[id.0 as usize]
    }

    pub fn def_count(&self) -> usize {
        self.defs.len()
    }

    /// Iterate all definitions with their ids.
    pub fn defs(&self) -> impl Iterator<Item = (DefId, &DefinitionInfo)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, info)| (DefId::from_index(i), info))
    }

    /// Find a definition by simple name (first match). Test and tooling helper.
    pub fn find_def(&self, name: &str) -> Option<DefId> {
        self.defs().find(|(_, info)| info.name == name).map(|(id, _)| id)
    }

    /// Members of `def` named `name`, in declaration order.
    pub fn members_named<'a>(
        &'a self,
        def: DefId,
        name: &'a str,
    ) -> impl Iterator<Item = MemberId> + 'a {
        self.def(def)
            .members
            .iter()
            .copied()
            .filter(move |&m| self.member(m).name == name)
    }

    /// The definition behind a type, if it has one.
    ///
    /// `object` and `string` are intrinsics backed by library definitions.
    pub fn def_of(&self, ty: TypeId) -> Option<(DefId, TypeArgs)> {
        match ty {
            TypeId::OBJECT => Some((self.well_known.object, TypeArgs::new())),
            TypeId::STRING => Some((self.well_known.string, TypeArgs::new())),
            _ => self.types.named_parts(ty),
        }
    }

    /// `def` instantiated with its own type parameters.
    pub fn instance_type(&self, def: DefId) -> TypeId {
        instance_type(&self.types, def, self.def(def).type_params.len())
    }
}

fn instance_type(types: &TypeInterner, def: DefId, arity: usize) -> TypeId {
    let args: Vec<TypeId> = (0..arity as u32).map(|i| types.type_param(def, i)).collect();
    types.named(def, &args)
}

// =============================================================================
// CatalogBuilder
// =============================================================================

pub struct CatalogBuilder {
    types: TypeInterner,
    defs: Vec<DefinitionInfo>,
    members: Vec<MemberInfo>,
    well_known: WellKnownTypes,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBuilder {
    /// Create a builder with the core library surface already installed.
    pub fn new() -> Self {
        let mut builder = Self {
            types: TypeInterner::new(),
            defs: Vec::new(),
            members: Vec::new(),
            well_known: WellKnownTypes::placeholder(),
        };
        builder.well_known = well_known::install_core_library(&mut builder);
        builder
    }

    pub const fn types(&self) -> &TypeInterner {
        &self.types
    }

    /// Well-known library definitions.
    pub const fn well_known(&self) -> &WellKnownTypes {
        &self.well_known
    }

    pub fn finish(self) -> TypeCatalog {
        debug!(
            defs = self.defs.len(),
            members = self.members.len(),
            types = self.types.len(),
            "CatalogBuilder::finish"
        );
        TypeCatalog {
            types: self.types,
            defs: self.defs,
            members: self.members,
            well_known: self.well_known,
            lookup_cache: DashMap::new(),
            closure_cache: DashMap::new(),
        }
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    pub fn define(&mut self, kind: DefKind, name: &str) -> DefBuilder<'_> {
        self.defs.push(DefinitionInfo::new(kind, name));
        let id = DefId::from_index(self.defs.len() - 1);
        DefBuilder { builder: self, id }
    }

    pub fn class(&mut self, name: &str) -> DefBuilder<'_> {
        self.define(DefKind::Class, name)
    }

    pub fn structure(&mut self, name: &str) -> DefBuilder<'_> {
        self.define(DefKind::Struct, name)
    }

    pub fn interface(&mut self, name: &str) -> DefBuilder<'_> {
        self.define(DefKind::Interface, name)
    }

    pub fn delegate(&mut self, name: &str) -> DefBuilder<'_> {
        self.define(DefKind::Delegate, name)
    }

    /// A `static class` holding extension methods.
    pub fn static_class(&mut self, name: &str) -> DefBuilder<'_> {
        let builder = self.define(DefKind::Class, name);
        builder.flags(DefFlags::STATIC | DefFlags::SEALED)
    }

    pub fn set_base(&mut self, def: DefId, base: TypeId) {
        self.defs[def.index()].base = Some(base);
    }

    pub fn add_interface(&mut self, def: DefId, interface: TypeId) {
        self.defs[def.index()].interfaces.push(interface);
    }

    pub fn add_constraint(&mut self, def: DefId, param: u32, constraint: TypeId) {
        if let Some(info) = self.defs[def.index()].type_params.get_mut(param as usize) {
            info.constraints.push(constraint);
        }
    }

    pub fn def(&self, id: DefId) -> &DefinitionInfo {
        &self.defs[id.index()]
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Non-generic named type.
    pub fn named(&self, def: DefId) -> TypeId {
        self.types.named(def, &[])
    }

    pub fn generic(&self, def: DefId, args: &[TypeId]) -> TypeId {
        self.types.named(def, args)
    }

    pub fn instance_type(&self, def: DefId) -> TypeId {
        instance_type(&self.types, def, self.def(def).type_params.len())
    }

    pub fn type_param(&self, def: DefId, index: u32) -> TypeId {
        self.types.type_param(def, index)
    }

    pub fn method_type_param(&self, index: u32) -> TypeId {
        self.types.method_type_param(index)
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.types.array(element)
    }

    pub fn tuple(&self, elements: &[TypeId]) -> TypeId {
        self.types.tuple(elements)
    }

    pub fn nullable(&self, underlying: TypeId) -> TypeId {
        self.types.nullable(underlying)
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn push_member(&mut self, info: MemberInfo) -> MemberId {
        let id = MemberId(self.members.len() as u32);
        self.defs[info.containing.index()].members.push(id);
        self.members.push(info);
        id
    }

    pub fn method(&mut self, def: DefId, name: &str) -> MethodBuilder<'_> {
        MethodBuilder {
            builder: self,
            info: MemberInfo {
                name: name.to_string(),
                containing: def,
                accessibility: Accessibility::Public,
                flags: MemberFlags::empty(),
                kind: MemberKind::Method(MethodSignature {
                    type_params: Vec::new(),
                    params: Vec::new(),
                    return_type: TypeId::VOID,
                    return_ref: RefKind::None,
                }),
            },
        }
    }

    pub fn property(&mut self, def: DefId, name: &str, type_id: TypeId) -> PropertyBuilder<'_> {
        PropertyBuilder {
            builder: self,
            info: MemberInfo {
                name: name.to_string(),
                containing: def,
                accessibility: Accessibility::Public,
                flags: MemberFlags::empty(),
                kind: MemberKind::Property {
                    type_id,
                    ref_kind: RefKind::None,
                    getter: Some(Accessibility::Public),
                    setter: None,
                },
            },
        }
    }

    /// Public instance field.
    pub fn field(&mut self, def: DefId, name: &str, type_id: TypeId) -> MemberId {
        self.member(
            def,
            name,
            MemberKind::Field {
                type_id,
                readonly: false,
            },
            Accessibility::Public,
            MemberFlags::empty(),
        )
    }

    /// Public instance event.
    pub fn event(&mut self, def: DefId, name: &str, type_id: TypeId) -> MemberId {
        self.member(
            def,
            name,
            MemberKind::Event { type_id },
            Accessibility::Public,
            MemberFlags::empty(),
        )
    }

    /// User-defined conversion operator declared in `def`.
    pub fn conversion(&mut self, def: DefId, from: TypeId, to: TypeId, is_implicit: bool) -> MemberId {
        let name = if is_implicit {
            "op_Implicit"
        } else {
            "op_Explicit"
        };
        self.member(
            def,
            name,
            MemberKind::Conversion {
                from,
                to,
                is_implicit,
            },
            Accessibility::Public,
            MemberFlags::STATIC,
        )
    }

    /// Add a fully specified member.
    pub fn member(
        &mut self,
        def: DefId,
        name: &str,
        kind: MemberKind,
        accessibility: Accessibility,
        flags: MemberFlags,
    ) -> MemberId {
        self.push_member(MemberInfo {
            name: name.to_string(),
            containing: def,
            accessibility,
            flags,
            kind,
        })
    }
}

// =============================================================================
// Fluent builders
// =============================================================================

pub struct DefBuilder<'b> {
    builder: &'b mut CatalogBuilder,
    id: DefId,
}

impl DefBuilder<'_> {
    pub const fn id(&self) -> DefId {
        self.id
    }

    fn info(&mut self) -> &mut DefinitionInfo {
        &mut self.builder.defs[self.id.index()]
    }

    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.info().namespace = Some(namespace.to_string());
        self
    }

    #[must_use]
    pub fn type_params(mut self, names: &[&str]) -> Self {
        self.info().type_params = names.iter().map(|n| TypeParamInfo::new(*n)).collect();
        self
    }

    #[must_use]
    pub fn flags(mut self, flags: DefFlags) -> Self {
        self.info().flags |= flags;
        self
    }

    #[must_use]
    pub fn sealed(self) -> Self {
        self.flags(DefFlags::SEALED)
    }

    #[must_use]
    pub fn ref_struct(self) -> Self {
        self.flags(DefFlags::REF_STRUCT)
    }

    #[must_use]
    pub fn base(mut self, base: TypeId) -> Self {
        self.info().base = Some(base);
        self
    }

    #[must_use]
    pub fn implements(mut self, interface: TypeId) -> Self {
        self.info().interfaces.push(interface);
        self
    }

    pub fn finish(self) -> DefId {
        self.id
    }
}

pub struct MethodBuilder<'b> {
    builder: &'b mut CatalogBuilder,
    info: MemberInfo,
}

impl MethodBuilder<'_> {
    fn sig(&mut self) -> &mut MethodSignature {
        match &mut self.info.kind {
            MemberKind::Method(sig) => sig,
            _ => unreachable!("MethodBuilder always holds a method"),
        }
    }

    fn push_param(mut self, name: &str, type_id: TypeId, ref_kind: RefKind, flags: ParamFlags) -> Self {
        self.sig().params.push(ParamInfo {
            name: name.to_string(),
            type_id,
            ref_kind,
            flags,
        });
        self
    }

    #[must_use]
    pub fn type_params(mut self, names: &[&str]) -> Self {
        self.sig().type_params = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    #[must_use]
    pub fn param(self, name: &str, type_id: TypeId) -> Self {
        self.push_param(name, type_id, RefKind::None, ParamFlags::empty())
    }

    #[must_use]
    pub fn out_param(self, name: &str, type_id: TypeId) -> Self {
        self.push_param(name, type_id, RefKind::Out, ParamFlags::empty())
    }

    #[must_use]
    pub fn ref_param(self, name: &str, type_id: TypeId) -> Self {
        self.push_param(name, type_id, RefKind::Ref, ParamFlags::empty())
    }

    #[must_use]
    pub fn in_param(self, name: &str, type_id: TypeId) -> Self {
        self.push_param(name, type_id, RefKind::In, ParamFlags::empty())
    }

    #[must_use]
    pub fn optional_param(self, name: &str, type_id: TypeId) -> Self {
        self.push_param(name, type_id, RefKind::None, ParamFlags::OPTIONAL)
    }

    #[must_use]
    pub fn optional_out_param(self, name: &str, type_id: TypeId) -> Self {
        self.push_param(name, type_id, RefKind::Out, ParamFlags::OPTIONAL)
    }

    #[must_use]
    pub fn params_array(self, name: &str, type_id: TypeId) -> Self {
        self.push_param(name, type_id, RefKind::None, ParamFlags::PARAMS)
    }

    /// First parameter of an extension method; marks the method static + extension.
    #[must_use]
    pub fn this_param(mut self, name: &str, type_id: TypeId) -> Self {
        self.info.flags |= MemberFlags::STATIC | MemberFlags::EXTENSION;
        self.push_param(name, type_id, RefKind::None, ParamFlags::THIS)
    }

    #[must_use]
    pub fn arglist(mut self) -> Self {
        self.info.flags |= MemberFlags::ARGLIST;
        self
    }

    #[must_use]
    pub fn returns(mut self, type_id: TypeId) -> Self {
        self.sig().return_type = type_id;
        self
    }

    #[must_use]
    pub fn returns_ref(mut self, type_id: TypeId, ref_kind: RefKind) -> Self {
        let sig = self.sig();
        sig.return_type = type_id;
        sig.return_ref = ref_kind;
        self
    }

    #[must_use]
    pub fn access(mut self, accessibility: Accessibility) -> Self {
        self.info.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn make_static(mut self) -> Self {
        self.info.flags |= MemberFlags::STATIC;
        self
    }

    /// Declared with `new`.
    #[must_use]
    pub fn hides(mut self) -> Self {
        self.info.flags |= MemberFlags::NEW;
        self
    }

    pub fn finish(self) -> MemberId {
        self.builder.push_member(self.info)
    }
}

pub struct PropertyBuilder<'b> {
    builder: &'b mut CatalogBuilder,
    info: MemberInfo,
}

impl PropertyBuilder<'_> {
    fn parts(&mut self) -> (&mut RefKind, &mut Option<Accessibility>, &mut Option<Accessibility>) {
        match &mut self.info.kind {
            MemberKind::Property {
                ref_kind,
                getter,
                setter,
                ..
            } => (ref_kind, getter, setter),
            _ => unreachable!("PropertyBuilder always holds a property"),
        }
    }

    /// `ref T Current { get; }` (`RefKind::Ref`) or `ref readonly` (`RefKind::In`).
    #[must_use]
    pub fn by_ref(mut self, kind: RefKind) -> Self {
        *self.parts().0 = kind;
        self
    }

    #[must_use]
    pub fn access(mut self, accessibility: Accessibility) -> Self {
        self.info.accessibility = accessibility;
        self
    }

    #[must_use]
    pub fn getter(mut self, accessibility: Accessibility) -> Self {
        *self.parts().1 = Some(accessibility);
        self
    }

    #[must_use]
    pub fn write_only(mut self) -> Self {
        let (_, getter, setter) = self.parts();
        *getter = None;
        *setter = Some(Accessibility::Public);
        self
    }

    #[must_use]
    pub fn setter(mut self, accessibility: Accessibility) -> Self {
        *self.parts().2 = Some(accessibility);
        self
    }

    #[must_use]
    pub fn make_static(mut self) -> Self {
        self.info.flags |= MemberFlags::STATIC;
        self
    }

    pub fn finish(self) -> MemberId {
        self.builder.push_member(self.info)
    }
}
