//! Type and member display for diagnostics.

use crate::catalog::TypeCatalog;
use crate::def::DefId;
use crate::members::{MemberId, MemberKind, ParamFlags};
use crate::types::{ParamOwner, TypeData, TypeId};
use csz_common::limits::MAX_TYPE_WALK_DEPTH;

pub struct TypeFormatter<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> TypeFormatter<'a> {
    pub const fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// `int`, `C`, `IEnumerable<int>`, `int[]`, `(int, string)`, `S?`, `T`.
    pub fn format(&self, ty: TypeId) -> String {
        let mut out = String::new();
        self.write_type(&mut out, ty, 0);
        out
    }

    fn write_type(&self, out: &mut String, ty: TypeId, depth: u32) {
        if depth > MAX_TYPE_WALK_DEPTH {
            out.push_str("...");
            return;
        }
        let Some(data) = self.catalog.types().lookup(ty) else {
            out.push('?');
            return;
        };
        match data {
            TypeData::Intrinsic(kind) => out.push_str(kind.keyword()),
            TypeData::Named { def, args } => {
                out.push_str(&self.catalog.def(def).name);
                if !args.is_empty() {
                    out.push('<');
                    self.write_list(out, &args, depth);
                    out.push('>');
                }
            }
            TypeData::Array { element, rank } => {
                self.write_type(out, element, depth + 1);
                out.push('[');
                for _ in 1..rank {
                    out.push(',');
                }
                out.push(']');
            }
            TypeData::Tuple(elements) => {
                out.push('(');
                self.write_list(out, &elements, depth);
                out.push(')');
            }
            TypeData::Nullable(inner) => {
                self.write_type(out, inner, depth + 1);
                out.push('?');
            }
            TypeData::TypeParameter(param) => match param.owner {
                ParamOwner::Type(owner) => {
                    match self.catalog.def(owner).type_params.get(param.index as usize) {
                        Some(info) => out.push_str(&info.name),
                        None => out.push('T'),
                    }
                }
                ParamOwner::Method if param.index == 0 => out.push('T'),
                ParamOwner::Method => {
                    out.push('T');
                    out.push_str(&param.index.to_string());
                }
            },
        }
    }

    fn write_list(&self, out: &mut String, types: &[TypeId], depth: u32) {
        for (i, &t) in types.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.write_type(out, t, depth + 1);
        }
    }

    /// `C.Deconstruct(out int, out int)` for methods, `C.Deconstruct` otherwise.
    pub fn format_member(&self, member: MemberId) -> String {
        let info = self.catalog.member(member);
        let mut out = format!("{}.{}", self.catalog.def(info.containing).name, info.name);
        if let MemberKind::Method(sig) = &info.kind {
            out.push('(');
            for (i, param) in sig.params.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                if param.flags.contains(ParamFlags::THIS) {
                    out.push_str("this ");
                }
                if param.flags.contains(ParamFlags::PARAMS) {
                    out.push_str("params ");
                }
                if param.ref_kind.is_by_ref() {
                    out.push_str(param.ref_kind.keyword());
                    out.push(' ');
                }
                self.write_type(&mut out, param.type_id, 0);
            }
            out.push(')');
        }
        out
    }

    /// `System.Collections.Generic.IEnumerable<T>`.
    pub fn format_family(&self, def: DefId) -> String {
        self.catalog.def(def).qualified_display()
    }
}

impl TypeCatalog {
    /// Shorthand for `TypeFormatter::new(self).format(ty)`.
    pub fn display(&self, ty: TypeId) -> String {
        TypeFormatter::new(self).format(ty)
    }

    pub fn display_member(&self, member: MemberId) -> String {
        TypeFormatter::new(self).format_member(member)
    }
}
