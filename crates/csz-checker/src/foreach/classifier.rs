//! Foreach strategy classification.

use super::pattern::{Attempt, get_enumerator_name};
use super::{Disposal, EnumerationStrategy, EnumeratorInfo, EnumeratorMethod};
use crate::operations::ReceiverKind;
use crate::state::CheckerState;
use crate::syntax::{Expr, ExprKind};
use csz_common::{DiagnosticKind, Span};
use csz_solver::{Conversion, ConversionKind, ConversionOracle, RefKind, TypeId};
use rustc_hash::FxHashSet;
use tracing::debug;

impl CheckerState<'_> {
    /// Classify the collection expression of a `foreach` / `await foreach`.
    #[tracing::instrument(level = "trace", skip_all, fields(is_async = is_async))]
    pub(crate) fn classify_collection(&mut self, collection: &Expr, is_async: bool) -> EnumeratorInfo {
        let span = collection.span;
        match &collection.kind {
            ExprKind::Null | ExprKind::Default => {
                self.report(DiagnosticKind::ForeachNullCollection, span, Vec::new());
                return EnumeratorInfo::error(TypeId::ERROR, is_async);
            }
            ExprKind::Lambda => {
                self.report(
                    DiagnosticKind::AnonymousMethodInForeach,
                    span,
                    vec!["lambda expression".to_string()],
                );
                return EnumeratorInfo::error(TypeId::ERROR, is_async);
            }
            ExprKind::MethodGroup(_) => {
                self.report(
                    DiagnosticKind::AnonymousMethodInForeach,
                    span,
                    vec!["method group".to_string()],
                );
                return EnumeratorInfo::error(TypeId::ERROR, is_async);
            }
            _ => {}
        }

        let value = self.bind_source(collection, &FxHashSet::default());
        let Some(collection_type) = value.type_id else {
            // A tuple literal with no natural type.
            let kind = missing_enumerator_kind(is_async, false);
            self.report(
                kind,
                span,
                vec![self.source_display(&value), get_enumerator_name(is_async).to_string()],
            );
            return EnumeratorInfo::error(TypeId::ERROR, is_async);
        };
        if collection_type.is_error() {
            return EnumeratorInfo::error(TypeId::ERROR, is_async);
        }
        self.classify_type(collection_type, is_async, span)
    }

    /// Classify a collection of known type. Diagnostics go to `span`.
    pub(crate) fn classify_type(&mut self, collection_type: TypeId, is_async: bool, span: Span) -> EnumeratorInfo {
        let underlying = self.ctx.catalog.types().nullable_underlying(collection_type);
        let unwrapped = underlying.unwrap_or(collection_type);

        match self.try_strategies(unwrapped, is_async, span) {
            Attempt::Found(mut info) => {
                if underlying.is_some() {
                    info.collection_conversion = unwrap_nullable(info.collection_conversion);
                }
                debug!(
                    strategy = ?info.strategy,
                    element = info.element_type.0,
                    disposal = ?info.disposal,
                    "foreach classified"
                );
                info
            }
            Attempt::Failed => EnumeratorInfo::error(collection_type, is_async),
            Attempt::NotFound => {
                self.report_missing_enumerator(collection_type, unwrapped, is_async, span);
                EnumeratorInfo::error(collection_type, is_async)
            }
        }
    }

    fn try_strategies(&mut self, collection: TypeId, is_async: bool, span: Span) -> Attempt {
        if !is_async {
            if let Some(element) = self.ctx.catalog.types().array_element(collection) {
                return Attempt::Found(self.array_info(collection, element));
            }
            if collection == TypeId::STRING {
                return Attempt::Found(self.string_info());
            }
        }
        if collection == TypeId::DYNAMIC {
            if is_async {
                self.report(DiagnosticKind::BadDynamicAwaitForeach, span, Vec::new());
                return Attempt::Failed;
            }
            return Attempt::Found(self.dynamic_info());
        }

        match self.find_instance_pattern(collection, is_async, span) {
            Attempt::NotFound => {}
            decided => return decided,
        }
        match self.find_interface_enumeration(collection, is_async, span) {
            Attempt::NotFound => {}
            decided => return decided,
        }
        self.find_extension_pattern(collection, is_async, span)
    }

    /// Nothing matched. Probe the other mode without leaving diagnostics so
    /// the message can suggest `foreach` vs `await foreach`.
    fn report_missing_enumerator(&mut self, collection_type: TypeId, unwrapped: TypeId, is_async: bool, span: Span) {
        let mark = self.ctx.diagnostics.mark();
        let other_mode_works = matches!(self.try_strategies(unwrapped, !is_async, span), Attempt::Found(_));
        self.ctx.diagnostics.rollback(mark);

        self.report(
            missing_enumerator_kind(is_async, other_mode_works),
            span,
            vec![
                self.type_name(collection_type),
                get_enumerator_name(is_async).to_string(),
            ],
        );
    }

    // =========================================================================
    // Built-in strategies
    // =========================================================================

    /// Arrays enumerate through the non-generic interface shape; `Current`
    /// is `object`.
    fn array_info(&self, array: TypeId, element: TypeId) -> EnumeratorInfo {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        let interface = catalog.types().named(wk.ienumerable, &[]);
        EnumeratorInfo {
            strategy: EnumerationStrategy::Array,
            is_async: false,
            collection_type: interface,
            element_type: element,
            get_enumerator: Some(instance_method(wk.ienumerable_get_enumerator)),
            enumerator_type: catalog.types().named(wk.ienumerator, &[]),
            current: Some(wk.ienumerator_current),
            current_type: TypeId::OBJECT,
            current_ref_kind: RefKind::None,
            move_next: Some(wk.ienumerator_move_next),
            disposal: Disposal::RuntimeCheck,
            collection_conversion: catalog.classify_implicit(array, interface),
            current_conversion: Conversion::identity(),
        }
    }

    fn string_info(&self) -> EnumeratorInfo {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        EnumeratorInfo {
            strategy: EnumerationStrategy::String,
            is_async: false,
            collection_type: TypeId::STRING,
            element_type: TypeId::CHAR,
            get_enumerator: Some(instance_method(wk.string_get_enumerator)),
            enumerator_type: catalog.types().named(wk.char_enumerator, &[]),
            current: Some(wk.char_enumerator_current),
            current_type: TypeId::CHAR,
            current_ref_kind: RefKind::None,
            move_next: Some(wk.char_enumerator_move_next),
            disposal: Disposal::Interface(wk.idisposable_dispose),
            collection_conversion: Conversion::identity(),
            current_conversion: Conversion::identity(),
        }
    }

    /// Late-bound enumeration; the members are bookkeeping stand-ins.
    fn dynamic_info(&self) -> EnumeratorInfo {
        let catalog = self.ctx.catalog;
        let wk = catalog.well_known();
        let interface = catalog.types().named(wk.ienumerable, &[]);
        EnumeratorInfo {
            strategy: EnumerationStrategy::Dynamic,
            is_async: false,
            collection_type: interface,
            element_type: TypeId::DYNAMIC,
            get_enumerator: Some(instance_method(wk.ienumerable_get_enumerator)),
            enumerator_type: catalog.types().named(wk.ienumerator, &[]),
            current: Some(wk.ienumerator_current),
            current_type: TypeId::DYNAMIC,
            current_ref_kind: RefKind::None,
            move_next: Some(wk.ienumerator_move_next),
            disposal: Disposal::RuntimeCheck,
            collection_conversion: catalog.classify_implicit(TypeId::DYNAMIC, interface),
            current_conversion: Conversion::identity(),
        }
    }
}

const fn missing_enumerator_kind(is_async: bool, other_mode_works: bool) -> DiagnosticKind {
    match (is_async, other_mode_works) {
        (false, false) => DiagnosticKind::ForeachMissingGetEnumerator,
        (false, true) => DiagnosticKind::ForeachMissingMemberWrongAsync,
        (true, false) => DiagnosticKind::AwaitForeachMissingGetAsyncEnumerator,
        (true, true) => DiagnosticKind::AwaitForeachMissingMemberWrongAsync,
    }
}

const fn instance_method(method: csz_solver::MemberId) -> EnumeratorMethod {
    EnumeratorMethod {
        method,
        receiver: ReceiverKind::Instance,
        type_arguments: Vec::new(),
    }
}

/// `T?` to `T` ahead of whatever conversion the strategy applies to `T`.
fn unwrap_nullable(inner: Conversion) -> Conversion {
    let nested = if inner.is_identity() { Vec::new() } else { vec![inner] };
    Conversion {
        kind: ConversionKind::ExplicitNullable,
        method: None,
        nested,
    }
}
