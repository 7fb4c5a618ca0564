//! The enumerable pattern: `GetEnumerator()` returning a type with a public
//! `Current` property and a public `bool MoveNext()`.
//!
//! For `await foreach` the names are `GetAsyncEnumerator` and
//! `MoveNextAsync`, and `MoveNextAsync` returns `Task<bool>` or
//! `ValueTask<bool>`.

use super::{EnumerationStrategy, EnumeratorInfo, EnumeratorMethod};
use crate::context::Feature;
use crate::operations::ReceiverKind;
use crate::state::CheckerState;
use csz_common::{DiagnosticKind, Span};
use csz_solver::{Conversion, MemberId, MemberKind, ParamInfo, RefKind, TypeId};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Name of the pattern, as the pattern warnings spell it.
const COLLECTION_PATTERN: &str = "collection";

/// Result of one strategy attempt.
#[derive(Debug)]
pub(super) enum Attempt {
    Found(EnumeratorInfo),
    /// Reported; classification stops here.
    Failed,
    /// Try the next strategy.
    NotFound,
}

pub(super) const fn get_enumerator_name(is_async: bool) -> &'static str {
    if is_async { "GetAsyncEnumerator" } else { "GetEnumerator" }
}

const fn move_next_name(is_async: bool) -> &'static str {
    if is_async { "MoveNextAsync" } else { "MoveNext" }
}

/// Resolved `Current` and `MoveNext` of an enumerator type.
struct EnumeratorShape {
    current: MemberId,
    current_type: TypeId,
    current_ref_kind: RefKind,
    move_next: MemberId,
}

impl CheckerState<'_> {
    /// Instance `GetEnumerator` on `collection`.
    ///
    /// The most-derived level with an applicable candidate decides. A static
    /// or non-public candidate, or several candidates, is only a warning and
    /// lets classification fall through to the interfaces.
    pub(super) fn find_instance_pattern(&mut self, collection: TypeId, is_async: bool, span: Span) -> Attempt {
        let catalog = self.ctx.catalog;
        let from = self.ctx.member.containing_type;
        let levels = catalog.lookup_members(collection, get_enumerator_name(is_async));

        for level in levels.iter() {
            let candidates: SmallVec<[MemberId; 2]> = level
                .members
                .iter()
                .copied()
                .filter(|&m| {
                    catalog
                        .member(m)
                        .signature()
                        .is_some_and(|sig| sig.required_count() == 0 && !sig.is_generic())
                        && catalog.is_accessible(m, from)
                })
                .collect();

            match candidates.as_slice() {
                [] => {}
                [only] => {
                    let info = catalog.member(*only);
                    if info.is_static() || !info.accessibility.is_public() {
                        self.pattern_warning(
                            DiagnosticKind::PatternStaticOrInaccessible,
                            span,
                            vec![
                                self.type_name(collection),
                                COLLECTION_PATTERN.to_string(),
                                self.member_name(*only),
                            ],
                        );
                        return Attempt::NotFound;
                    }
                    let Some(sig) = info.signature() else {
                        return Attempt::NotFound;
                    };
                    let enumerator_type = catalog.instantiate(sig.return_type, &level.substitution);
                    let method = EnumeratorMethod {
                        method: *only,
                        receiver: ReceiverKind::Instance,
                        type_arguments: Vec::new(),
                    };
                    return self.complete_pattern(
                        collection,
                        method,
                        enumerator_type,
                        is_async,
                        EnumerationStrategy::Pattern,
                        span,
                    );
                }
                [first, second, ..] => {
                    self.pattern_warning(
                        DiagnosticKind::PatternIsAmbiguous,
                        span,
                        vec![
                            self.type_name(collection),
                            COLLECTION_PATTERN.to_string(),
                            self.member_name(*first),
                            self.member_name(*second),
                        ],
                    );
                    return Attempt::NotFound;
                }
            }
        }
        Attempt::NotFound
    }

    /// Extension `GetEnumerator`, nearest scope first.
    pub(super) fn find_extension_pattern(&mut self, collection: TypeId, is_async: bool, span: Span) -> Attempt {
        if !self.ctx.options.supports(Feature::ExtensionGetEnumerator) {
            return Attempt::NotFound;
        }

        for scope in self.extension_candidates_by_scope(collection, get_enumerator_name(is_async)) {
            let matching: Vec<_> = scope
                .into_iter()
                .filter(|c| c.signature.call_params(true).iter().all(ParamInfo::is_optional))
                .collect();
            match matching.as_slice() {
                [] => {}
                [only] => {
                    let method = EnumeratorMethod {
                        method: only.method,
                        receiver: ReceiverKind::Extension,
                        type_arguments: only.type_arguments.clone(),
                    };
                    return self.complete_pattern(
                        collection,
                        method,
                        only.signature.return_type,
                        is_async,
                        EnumerationStrategy::Extension,
                        span,
                    );
                }
                [first, second, ..] => {
                    self.report(
                        DiagnosticKind::AmbiguousCall,
                        span,
                        vec![self.member_name(first.method), self.member_name(second.method)],
                    );
                    return Attempt::Failed;
                }
            }
        }
        Attempt::NotFound
    }

    /// Check the enumerator returned by a pattern `GetEnumerator`. A bad shape
    /// fails the whole classification; it never falls back to interfaces.
    fn complete_pattern(
        &mut self,
        collection: TypeId,
        method: EnumeratorMethod,
        enumerator_type: TypeId,
        is_async: bool,
        strategy: EnumerationStrategy,
        span: Span,
    ) -> Attempt {
        if enumerator_type.is_error() {
            return Attempt::Failed;
        }
        let Some(shape) = self.enumerator_shape(enumerator_type, is_async) else {
            let kind = if is_async {
                DiagnosticKind::BadGetAsyncEnumeratorShape
            } else {
                DiagnosticKind::BadGetEnumeratorShape
            };
            self.report(
                kind,
                span,
                vec![self.type_name(enumerator_type), self.member_name(method.method)],
            );
            return Attempt::Failed;
        };

        debug!(?strategy, enumerator = enumerator_type.0, "pattern enumerator");
        let disposal = self.resolve_disposal(enumerator_type, is_async);
        Attempt::Found(EnumeratorInfo {
            strategy,
            is_async,
            collection_type: collection,
            element_type: shape.current_type,
            get_enumerator: Some(method),
            enumerator_type,
            current: Some(shape.current),
            current_type: shape.current_type,
            current_ref_kind: shape.current_ref_kind,
            move_next: Some(shape.move_next),
            disposal,
            collection_conversion: Conversion::identity(),
            current_conversion: Conversion::identity(),
        })
    }

    fn enumerator_shape(&self, enumerator: TypeId, is_async: bool) -> Option<EnumeratorShape> {
        if self.ctx.catalog.types().nullable_underlying(enumerator).is_some() {
            trace!("nullable enumerator does not satisfy the pattern");
            return None;
        }
        let (current, current_type, current_ref_kind) = self.find_current(enumerator)?;
        let move_next = self.find_move_next(enumerator, is_async)?;
        Some(EnumeratorShape {
            current,
            current_type,
            current_ref_kind,
            move_next,
        })
    }

    /// A public instance `Current` property with a public getter.
    fn find_current(&self, enumerator: TypeId) -> Option<(MemberId, TypeId, RefKind)> {
        let catalog = self.ctx.catalog;
        let levels = catalog.lookup_members(enumerator, "Current");
        let level = levels.first()?;
        level.members.iter().find_map(|&m| {
            let info = catalog.member(m);
            match &info.kind {
                MemberKind::Property {
                    type_id,
                    ref_kind,
                    getter: Some(getter),
                    ..
                } if getter.is_public() && info.accessibility.is_public() && !info.is_static() => {
                    Some((m, catalog.instantiate(*type_id, &level.substitution), *ref_kind))
                }
                _ => None,
            }
        })
    }

    /// A public instance parameterless `MoveNext` returning `bool` (or an
    /// awaitable `bool` for async).
    fn find_move_next(&self, enumerator: TypeId, is_async: bool) -> Option<MemberId> {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        let levels = catalog.lookup_members(enumerator, move_next_name(is_async));
        let level = levels.first()?;
        level.members.iter().copied().find(|&m| {
            let info = catalog.member(m);
            let Some(sig) = info.signature() else {
                return false;
            };
            if !info.accessibility.is_public() || info.is_static() || sig.is_generic() {
                return false;
            }
            let return_type = catalog.instantiate(sig.return_type, &level.substitution);
            if is_async {
                sig.required_count() == 0
                    && [wk.task_t, wk.value_task_t].into_iter().any(|family| {
                        catalog
                            .instantiation_args(return_type, family)
                            .is_some_and(|args| args.as_slice() == [TypeId::BOOL])
                    })
            } else {
                sig.params.is_empty() && return_type == TypeId::BOOL
            }
        })
    }

    fn pattern_warning(&mut self, kind: DiagnosticKind, span: Span, args: Vec<String>) {
        if self.ctx.options.report_pattern_warnings {
            self.report(kind, span, args);
        }
    }
}
