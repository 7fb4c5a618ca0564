//! Enumeration through `IEnumerable<T>` / `IAsyncEnumerable<T>`, then the
//! non-generic `IEnumerable`.

use super::pattern::Attempt;
use super::{EnumerationStrategy, EnumeratorInfo, EnumeratorMethod};
use crate::operations::ReceiverKind;
use crate::state::CheckerState;
use csz_common::{DiagnosticKind, Span};
use csz_solver::{Conversion, ConversionOracle, RefKind, TypeFormatter, TypeId};
use tracing::debug;

impl CheckerState<'_> {
    /// Classify `collection` through the interfaces it implements. More than
    /// one instantiation of the generic family is an error, never a pick.
    pub(super) fn find_interface_enumeration(&mut self, collection: TypeId, is_async: bool, span: Span) -> Attempt {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        let family = if is_async { wk.iasync_enumerable_t } else { wk.ienumerable_t };

        match catalog.interface_instantiations(collection, family).as_slice() {
            [] => {}
            [only] => return Attempt::Found(self.generic_interface_info(collection, *only, is_async)),
            [..] => {
                let kind = if is_async {
                    DiagnosticKind::MultipleAsyncInterfaceInstantiations
                } else {
                    DiagnosticKind::MultipleInterfaceInstantiations
                };
                self.report(
                    kind,
                    span,
                    vec![
                        self.type_name(collection),
                        TypeFormatter::new(catalog).format_family(family),
                    ],
                );
                return Attempt::Failed;
            }
        }

        if !is_async && catalog.implements_def(collection, wk.ienumerable) {
            return Attempt::Found(self.non_generic_interface_info(collection));
        }
        Attempt::NotFound
    }

    fn generic_interface_info(&mut self, collection: TypeId, interface: TypeId, is_async: bool) -> EnumeratorInfo {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        let (family, enumerator_family, get_enumerator, current, move_next) = if is_async {
            (
                wk.iasync_enumerable_t,
                wk.iasync_enumerator_t,
                wk.iasync_enumerable_t_get_async_enumerator,
                wk.iasync_enumerator_t_current,
                wk.iasync_enumerator_t_move_next_async,
            )
        } else {
            (
                wk.ienumerable_t,
                wk.ienumerator_t,
                wk.ienumerable_t_get_enumerator,
                wk.ienumerator_t_current,
                wk.ienumerator_move_next,
            )
        };
        let element_type = catalog
            .instantiation_args(interface, family)
            .and_then(|args| args.first().copied())
            .unwrap_or(TypeId::ERROR);
        let enumerator_type = catalog.types().named(enumerator_family, &[element_type]);
        debug!(interface = interface.0, element = element_type.0, is_async, "generic interface enumeration");

        EnumeratorInfo {
            strategy: EnumerationStrategy::GenericInterface,
            is_async,
            collection_type: interface,
            element_type,
            get_enumerator: Some(EnumeratorMethod {
                method: get_enumerator,
                receiver: ReceiverKind::Instance,
                type_arguments: Vec::new(),
            }),
            enumerator_type,
            current: Some(current),
            current_type: element_type,
            current_ref_kind: RefKind::None,
            move_next: Some(move_next),
            disposal: self.resolve_disposal(enumerator_type, is_async),
            collection_conversion: catalog.classify_implicit(collection, interface),
            current_conversion: Conversion::identity(),
        }
    }

    fn non_generic_interface_info(&mut self, collection: TypeId) -> EnumeratorInfo {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        let interface = catalog.types().named(wk.ienumerable, &[]);
        let enumerator_type = catalog.types().named(wk.ienumerator, &[]);

        EnumeratorInfo {
            strategy: EnumerationStrategy::NonGenericInterface,
            is_async: false,
            collection_type: interface,
            element_type: TypeId::OBJECT,
            get_enumerator: Some(EnumeratorMethod {
                method: wk.ienumerable_get_enumerator,
                receiver: ReceiverKind::Instance,
                type_arguments: Vec::new(),
            }),
            enumerator_type,
            current: Some(wk.ienumerator_current),
            current_type: TypeId::OBJECT,
            current_ref_kind: RefKind::None,
            move_next: Some(wk.ienumerator_move_next),
            disposal: self.resolve_disposal(enumerator_type, false),
            collection_conversion: catalog.classify_implicit(collection, interface),
            current_conversion: Conversion::identity(),
        }
    }
}
