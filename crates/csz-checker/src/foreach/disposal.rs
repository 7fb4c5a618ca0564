//! Enumerator disposal after the loop.

use super::Disposal;
use crate::context::Feature;
use crate::state::CheckerState;
use csz_solver::{MemberId, TypeId};
use tracing::trace;

impl CheckerState<'_> {
    /// Decide how `enumerator` is disposed.
    ///
    /// The interface wins over a pattern `Dispose`. Without either, sealed
    /// and value types provably need nothing; anything else gets a runtime
    /// `IDisposable` check (sync only).
    pub(super) fn resolve_disposal(&self, enumerator: TypeId, is_async: bool) -> Disposal {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        if enumerator.is_error() {
            return Disposal::None;
        }

        let (interface, interface_method) = if is_async {
            (wk.iasync_disposable, wk.iasync_disposable_dispose_async)
        } else {
            (wk.idisposable, wk.idisposable_dispose)
        };
        if catalog.implements_def(enumerator, interface) {
            return Disposal::Interface(interface_method);
        }

        if self.ctx.options.supports(Feature::PatternDispose) {
            if let Some(method) = self.find_pattern_dispose(enumerator, is_async) {
                trace!(method = method.0, "pattern-based disposal");
                return Disposal::Pattern(method);
            }
        }

        if is_async || catalog.is_sealed_type(enumerator) || catalog.is_value_type(enumerator) {
            Disposal::None
        } else {
            Disposal::RuntimeCheck
        }
    }

    /// Public instance `void Dispose()` or `ValueTask DisposeAsync()` whose
    /// parameters are all optional.
    fn find_pattern_dispose(&self, enumerator: TypeId, is_async: bool) -> Option<MemberId> {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        let name = if is_async { "DisposeAsync" } else { "Dispose" };
        let levels = catalog.lookup_members(enumerator, name);
        let level = levels.first()?;
        level.members.iter().copied().find(|&m| {
            let info = catalog.member(m);
            let Some(sig) = info.signature() else {
                return false;
            };
            let returns_expected = if is_async {
                catalog.def_of(sig.return_type).is_some_and(|(def, _)| def == wk.value_task)
            } else {
                sig.return_type == TypeId::VOID
            };
            info.accessibility.is_public()
                && !info.is_static()
                && !sig.is_generic()
                && sig.required_count() == 0
                && returns_expected
        })
    }
}
