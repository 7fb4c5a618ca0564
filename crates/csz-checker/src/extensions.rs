//! Extension method candidates shared by `Deconstruct` and `GetEnumerator`
//! lookup.

use crate::state::CheckerState;
use csz_solver::{ConversionKind, ConversionOracle, MemberId, MethodSignature, Substitution, TypeId};

/// Outcome of searching the extension scopes.
#[derive(Debug)]
pub(crate) enum ExtensionLookup<T> {
    Found(T),
    /// More than one candidate in the nearest scope that had any; already reported.
    Ambiguous,
    NotFound,
}

/// An extension method whose `this` parameter accepts the receiver.
#[derive(Clone, Debug)]
pub(crate) struct ExtensionCandidate {
    pub method: MemberId,
    /// Signature with inferred method type arguments substituted.
    pub signature: MethodSignature,
    pub type_arguments: Vec<TypeId>,
}

impl CheckerState<'_> {
    /// Accessible extension methods named `name` in each scope, nearest first,
    /// filtered to those applicable to `receiver`.
    pub(crate) fn extension_candidates_by_scope(&self, receiver: TypeId, name: &str) -> Vec<Vec<ExtensionCandidate>> {
        let catalog = self.ctx.catalog;
        let from = self.ctx.member.containing_type;
        self.ctx
            .member
            .extension_scopes
            .iter()
            .map(|scope| {
                scope
                    .iter()
                    .flat_map(|&def| catalog.members_named(def, name))
                    .filter(|&m| catalog.member(m).is_extension() && catalog.is_accessible(m, from))
                    .filter_map(|m| self.bind_extension_receiver(m, receiver))
                    .collect()
            })
            .collect()
    }

    /// Match `receiver` against the `this` parameter, inferring method type
    /// arguments when the method is generic.
    fn bind_extension_receiver(&self, method: MemberId, receiver: TypeId) -> Option<ExtensionCandidate> {
        let catalog = self.ctx.catalog;
        let sig = catalog.member(method).signature()?;
        let this_param = sig.params.first()?;

        if sig.is_generic() {
            let args = catalog.infer_from_receiver(this_param.type_id, receiver, sig.type_params.len())?;
            let subst = Substitution::default().with_method_args(args.clone());
            return Some(ExtensionCandidate {
                method,
                signature: catalog.instantiate_signature(sig, &subst),
                type_arguments: args.to_vec(),
            });
        }

        let conversion = catalog.classify_implicit(receiver, this_param.type_id);
        matches!(
            conversion.kind,
            ConversionKind::Identity | ConversionKind::ImplicitReference | ConversionKind::Boxing
        )
        .then(|| ExtensionCandidate {
            method,
            signature: sig.clone(),
            type_arguments: Vec::new(),
        })
    }
}
