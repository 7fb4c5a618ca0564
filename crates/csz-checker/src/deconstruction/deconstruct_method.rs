//! `Deconstruct` method lookup.
//!
//! Instance lookup walks the member levels most-derived first and stops at the
//! first level with an accessible method whose parameter count can fit the
//! target arity (counting optional and `params` parameters). Only then is the
//! strict shape checked: exactly `arity` parameters, all `out`, no optional,
//! `params` or `__arglist`, non-generic, instance. A level that fits only
//! loosely therefore hides a valid candidate further up the chain.
//!
//! Extension lookup runs when no instance level fits. A non-method member
//! named `Deconstruct` on the most-derived level blocks both.
//!
//! Every rejection ends with `MissingDeconstruct` at the source expression.
//! Argument ref-kind errors are reported at the whole deconstruction.

use super::DeconstructInvocation;
use crate::extensions::ExtensionLookup;
use crate::operations::ReceiverKind;
use crate::state::CheckerState;
use csz_common::{DiagnosticKind, Span};
use csz_solver::{
    LookupLevel, MemberFlags, MemberId, MemberInfo, MemberKind, ParamFlags, RefKind, TypeId,
};
use smallvec::SmallVec;
use tracing::{debug, trace};

const DECONSTRUCT: &str = "Deconstruct";

type Candidates = SmallVec<[MemberId; 2]>;

impl CheckerState<'_> {
    /// Resolve `receiver.Deconstruct(out _, ...)` with `arity` out arguments.
    ///
    /// `span` is the source expression and `statement_span` the deconstruction
    /// being bound. Reports the failure and returns `None` when no method
    /// qualifies.
    #[tracing::instrument(level = "trace", skip(self), fields(receiver = receiver.0))]
    pub(crate) fn find_deconstruct(
        &mut self,
        receiver: TypeId,
        arity: usize,
        span: Span,
        statement_span: Span,
    ) -> Option<DeconstructInvocation> {
        let catalog = self.ctx.catalog;
        let from = self.ctx.member.containing_type;
        let levels = catalog.lookup_members(receiver, DECONSTRUCT);

        let blocker = levels
            .first()
            .and_then(|level| level.members.iter().copied().find(|&m| !catalog.member(m).is_method()));
        if let Some(member) = blocker {
            self.report_non_invocable_deconstruct(member, span);
            self.report_missing_deconstruct(receiver, arity, span);
            return None;
        }

        let mut saw_accessible = false;
        let mut first_inaccessible = None;
        for level in levels.iter() {
            let mut loose = Candidates::new();
            for &member in &level.members {
                if !catalog.is_accessible(member, from) {
                    first_inaccessible.get_or_insert(member);
                    continue;
                }
                saw_accessible = true;
                if loosely_applicable(catalog.member(member), arity) {
                    loose.push(member);
                }
            }
            if !loose.is_empty() {
                return self.pick_instance_deconstruct(receiver, level, &loose, arity, span, statement_span);
            }
        }

        match self.find_extension_deconstruct(receiver, arity, span) {
            ExtensionLookup::Found(invocation) => return Some(invocation),
            ExtensionLookup::Ambiguous => {
                self.report_missing_deconstruct(receiver, arity, span);
                return None;
            }
            ExtensionLookup::NotFound => {}
        }

        if saw_accessible {
            self.report(
                DiagnosticKind::WrongDeconstructArity,
                span,
                vec![self.type_name(receiver), arity.to_string()],
            );
        } else {
            if let Some(member) = first_inaccessible {
                self.report(DiagnosticKind::InaccessibleMember, span, vec![self.member_name(member)]);
            }
            self.report_missing_deconstruct(receiver, arity, span);
        }
        None
    }

    fn pick_instance_deconstruct(
        &mut self,
        receiver: TypeId,
        level: &LookupLevel,
        loose: &[MemberId],
        arity: usize,
        span: Span,
        statement_span: Span,
    ) -> Option<DeconstructInvocation> {
        let catalog = self.ctx.catalog;
        let strict: Candidates = loose
            .iter()
            .copied()
            .filter(|&m| strictly_applicable(catalog.member(m), arity))
            .collect();

        match strict.as_slice() {
            [only] => {
                let sig = catalog.member(*only).signature()?;
                let sig = catalog.instantiate_signature(sig, &level.substitution);
                debug!(method = only.0, "instance Deconstruct");
                Some(DeconstructInvocation {
                    method: *only,
                    receiver: ReceiverKind::Instance,
                    receiver_type: receiver,
                    type_arguments: Vec::new(),
                    out_types: sig.params.iter().map(|p| p.type_id).collect(),
                })
            }
            [first, second, ..] => {
                self.report(
                    DiagnosticKind::AmbiguousCall,
                    span,
                    vec![self.member_name(*first), self.member_name(*second)],
                );
                self.report_missing_deconstruct(receiver, arity, span);
                None
            }
            [] => {
                if let [candidate] = loose {
                    self.report_rejected_candidate(*candidate, arity, span, statement_span);
                }
                self.report_missing_deconstruct(receiver, arity, span);
                None
            }
        }
    }

    /// Explain why the single loosely applicable candidate was not usable.
    /// The caller follows up with `MissingDeconstruct`.
    fn report_rejected_candidate(&mut self, candidate: MemberId, arity: usize, span: Span, statement_span: Span) {
        let catalog = self.ctx.catalog;
        let info = catalog.member(candidate);
        let Some(sig) = info.signature() else {
            return;
        };
        let exact_shape = sig.params.len() == arity
            && !sig.is_generic()
            && !info.flags.contains(MemberFlags::ARGLIST)
            && sig.params.iter().all(|p| !p.is_optional());
        if !exact_shape {
            trace!(method = candidate.0, "Deconstruct candidate has an unsupported shape");
            return;
        }

        if info.is_static() {
            self.report(
                DiagnosticKind::StaticMemberWithInstance,
                span,
                vec![self.member_name(candidate)],
            );
        } else if let Some(index) = sig.params.iter().position(|p| p.ref_kind == RefKind::None) {
            self.report(
                DiagnosticKind::DeconstructNotOutParams,
                statement_span,
                vec![(index + 1).to_string(), RefKind::Out.keyword().to_string()],
            );
        } else if let Some((index, param)) = sig
            .params
            .iter()
            .enumerate()
            .find(|(_, p)| matches!(p.ref_kind, RefKind::Ref | RefKind::In))
        {
            self.report(
                DiagnosticKind::DeconstructRefParam,
                statement_span,
                vec![(index + 1).to_string(), param.ref_kind.keyword().to_string()],
            );
        }
    }

    fn find_extension_deconstruct(
        &mut self,
        receiver: TypeId,
        arity: usize,
        span: Span,
    ) -> ExtensionLookup<DeconstructInvocation> {
        for scope in self.extension_candidates_by_scope(receiver, DECONSTRUCT) {
            let matching: Vec<_> = scope
                .into_iter()
                .filter(|c| {
                    let params = c.signature.call_params(true);
                    params.len() == arity
                        && params.iter().all(|p| p.ref_kind == RefKind::Out && !p.is_optional())
                })
                .collect();
            match matching.as_slice() {
                [] => {}
                [only] => {
                    debug!(method = only.method.0, "extension Deconstruct");
                    return ExtensionLookup::Found(DeconstructInvocation {
                        method: only.method,
                        receiver: ReceiverKind::Extension,
                        receiver_type: receiver,
                        type_arguments: only.type_arguments.clone(),
                        out_types: only.signature.call_params(true).iter().map(|p| p.type_id).collect(),
                    });
                }
                [first, second, ..] => {
                    self.report(
                        DiagnosticKind::AmbiguousCall,
                        span,
                        vec![self.member_name(first.method), self.member_name(second.method)],
                    );
                    return ExtensionLookup::Ambiguous;
                }
            }
        }
        ExtensionLookup::NotFound
    }

    fn report_non_invocable_deconstruct(&mut self, member: MemberId, span: Span) {
        let catalog = self.ctx.catalog;
        let info = catalog.member(member);
        let invocable_value = match &info.kind {
            MemberKind::Field { type_id, .. } | MemberKind::Property { type_id, .. } => {
                *type_id == TypeId::DYNAMIC || catalog.is_delegate_type(*type_id)
            }
            _ => true,
        };
        if !invocable_value {
            self.report(DiagnosticKind::NonInvocableMember, span, vec![self.member_name(member)]);
        }
    }

    pub(crate) fn report_missing_deconstruct(&mut self, receiver: TypeId, arity: usize, span: Span) {
        self.report(
            DiagnosticKind::MissingDeconstruct,
            span,
            vec![self.type_name(receiver), arity.to_string()],
        );
    }
}

/// Can this method take `arity` arguments at all, ignoring ref kinds?
fn loosely_applicable(info: &MemberInfo, arity: usize) -> bool {
    let Some(sig) = info.signature() else {
        return false;
    };
    let has_params_array = sig.params.iter().any(|p| p.flags.contains(ParamFlags::PARAMS));
    sig.required_count() <= arity && (sig.params.len() >= arity || has_params_array)
}

fn strictly_applicable(info: &MemberInfo, arity: usize) -> bool {
    let Some(sig) = info.signature() else {
        return false;
    };
    !info.is_static()
        && !info.flags.contains(MemberFlags::ARGLIST)
        && !sig.is_generic()
        && sig.params.len() == arity
        && sig
            .params
            .iter()
            .all(|p| p.ref_kind == RefKind::Out && !p.is_optional())
}
