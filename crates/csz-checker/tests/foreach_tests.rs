use super::*;
use crate::syntax::{
    DeclaredType, DeconstructionKind, DeconstructionStatement, Expr, ExprKind, ForEachStatement, ForEachVariable,
    Statement, TargetSyntax,
};
use crate::test_support::{args_of, checker, kinds, sp};
use csz_common::{DiagnosticKind, Span};
use csz_solver::{
    Accessibility, CatalogBuilder, ConversionKind, DefId, MemberId, RefKind, TypeCatalog, TypeId,
};

const COLLECTION: Span = Span::new(20, 30);

fn single(declared: DeclaredType, ref_kind: RefKind) -> ForEachVariable {
    ForEachVariable::Single {
        declared,
        name: "item".to_string(),
        ref_kind,
        span: sp(5),
    }
}

fn foreach_over(collection: Expr, variable: ForEachVariable) -> ForEachStatement {
    ForEachStatement {
        is_await: false,
        variable,
        collection,
        body: Vec::new(),
        span: Span::new(0, 100),
    }
}

fn await_foreach_over(collection: TypeId) -> ForEachStatement {
    ForEachStatement {
        is_await: true,
        ..foreach_over(Expr::typed(COLLECTION, collection), single(DeclaredType::Var, RefKind::None))
    }
}

fn var_over(collection: TypeId) -> ForEachStatement {
    foreach_over(Expr::typed(COLLECTION, collection), single(DeclaredType::Var, RefKind::None))
}

fn bind_with(
    catalog: &TypeCatalog,
    options: &CheckerOptions,
    member: &MemberContext,
    stmt: &ForEachStatement,
) -> (ForEachOperation, Vec<DiagnosticKind>) {
    let mut state = checker(catalog, options, member);
    let op = state.bind_foreach(stmt);
    (op, kinds(&state))
}

fn bind(catalog: &TypeCatalog, stmt: &ForEachStatement) -> (ForEachOperation, Vec<DiagnosticKind>) {
    bind_with(catalog, &CheckerOptions::default(), &MemberContext::default(), stmt)
}

/// `class Numbers { Enumerator GetEnumerator(); }` where `Enumerator` is
/// built by `enumerator` and exposes `int Current` and `bool MoveNext()`.
fn pattern_collection(
    b: &mut CatalogBuilder,
    enumerator: impl FnOnce(&mut CatalogBuilder) -> DefId,
) -> (TypeId, DefId, MemberId) {
    let en = enumerator(b);
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::INT).finish();
    b.method(en, "MoveNext").returns(TypeId::BOOL).finish();
    let coll = b.class("Numbers").finish();
    let get = b.method(coll, "GetEnumerator").returns(en_ty).finish();
    (b.named(coll), en, get)
}

// =============================================================================
// Built-in strategies
// =============================================================================

#[test]
fn test_string_enumerates_chars_and_disposes_through_interface() {
    let catalog = CatalogBuilder::new().finish();
    let (op, kinds) = bind(&catalog, &var_over(TypeId::STRING));

    assert!(kinds.is_empty());
    assert!(!op.is_invalid);
    let wk = catalog.well_known();
    assert_eq!(op.info.strategy, EnumerationStrategy::String);
    assert_eq!(op.info.element_type, TypeId::CHAR);
    assert_eq!(op.info.current, Some(wk.char_enumerator_current));
    assert_eq!(op.info.disposal, Disposal::Interface(wk.idisposable_dispose));
    assert_eq!(op.variable.type_id(), TypeId::CHAR);
}

#[test]
fn test_array_reads_object_current_and_checks_disposal_at_runtime() {
    let b = CatalogBuilder::new();
    let ints = b.array(TypeId::INT);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(ints));
    assert!(kinds.is_empty());
    assert_eq!(op.info.strategy, EnumerationStrategy::Array);
    assert_eq!(op.info.element_type, TypeId::INT);
    assert_eq!(op.info.current_type, TypeId::OBJECT);
    assert_eq!(op.info.collection_conversion.kind, ConversionKind::ImplicitReference);
    assert_eq!(op.info.disposal, Disposal::RuntimeCheck);
    assert!(op.info.current_conversion.is_identity());
}

#[test]
fn test_array_with_explicit_type_unboxes_current() {
    let b = CatalogBuilder::new();
    let ints = b.array(TypeId::INT);
    let catalog = b.finish();

    let stmt = foreach_over(Expr::typed(COLLECTION, ints), single(DeclaredType::Explicit(TypeId::LONG), RefKind::None));
    let (op, kinds) = bind(&catalog, &stmt);
    assert!(kinds.is_empty());
    assert_eq!(op.element_conversion.kind, ConversionKind::ImplicitNumeric);
    assert_eq!(op.info.current_conversion.kind, ConversionKind::Unboxing);
    assert_eq!(op.variable.type_id(), TypeId::LONG);
}

#[test]
fn test_dynamic_collection_is_late_bound() {
    let catalog = CatalogBuilder::new().finish();

    let (op, kinds) = bind(&catalog, &var_over(TypeId::DYNAMIC));
    assert!(kinds.is_empty());
    assert_eq!(op.info.strategy, EnumerationStrategy::Dynamic);
    assert_eq!(op.variable.type_id(), TypeId::DYNAMIC);
    assert!(op.element_conversion.is_identity());

    let stmt = foreach_over(
        Expr::typed(COLLECTION, TypeId::DYNAMIC),
        single(DeclaredType::Explicit(TypeId::INT), RefKind::None),
    );
    let (op, kinds) = bind(&catalog, &stmt);
    assert!(kinds.is_empty());
    assert_eq!(op.element_conversion.kind, ConversionKind::ExplicitDynamic);
}

#[test]
fn test_await_foreach_over_dynamic_is_rejected() {
    let catalog = CatalogBuilder::new().finish();
    let (op, kinds) = bind(&catalog, &await_foreach_over(TypeId::DYNAMIC));
    assert_eq!(kinds, vec![DiagnosticKind::BadDynamicAwaitForeach]);
    assert!(op.info.is_error());
    assert!(op.is_invalid);
}

// =============================================================================
// Rejected collection expressions
// =============================================================================

#[test]
fn test_null_and_default_collections() {
    let catalog = CatalogBuilder::new().finish();
    for expr in [Expr::null(COLLECTION), Expr::new(COLLECTION, ExprKind::Default)] {
        let stmt = foreach_over(expr, single(DeclaredType::Var, RefKind::None));
        let (op, kinds) = bind(&catalog, &stmt);
        assert_eq!(kinds, vec![DiagnosticKind::ForeachNullCollection]);
        assert!(op.info.is_error());
    }
}

#[test]
fn test_lambda_and_method_group_collections() {
    let catalog = CatalogBuilder::new().finish();
    let options = CheckerOptions::default();
    let member = MemberContext::default();

    let mut state = checker(&catalog, &options, &member);
    state.bind_foreach(&foreach_over(
        Expr::new(COLLECTION, ExprKind::Lambda),
        single(DeclaredType::Var, RefKind::None),
    ));
    assert_eq!(kinds(&state), vec![DiagnosticKind::AnonymousMethodInForeach]);
    assert_eq!(
        args_of(&state, DiagnosticKind::AnonymousMethodInForeach),
        vec!["lambda expression".to_string()]
    );

    let mut state = checker(&catalog, &options, &member);
    state.bind_foreach(&foreach_over(
        Expr::new(COLLECTION, ExprKind::MethodGroup("Items".to_string())),
        single(DeclaredType::Var, RefKind::None),
    ));
    assert_eq!(
        args_of(&state, DiagnosticKind::AnonymousMethodInForeach),
        vec!["method group".to_string()]
    );
}

// =============================================================================
// Missing enumerators
// =============================================================================

#[test]
fn test_missing_get_enumerator_names_the_collection() {
    let mut b = CatalogBuilder::new();
    let widget = b.class("Widget").finish();
    let ty = b.named(widget);
    let catalog = b.finish();

    let options = CheckerOptions::default();
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);
    let op = state.bind_foreach(&var_over(ty));
    assert_eq!(kinds(&state), vec![DiagnosticKind::ForeachMissingGetEnumerator]);
    assert_eq!(
        args_of(&state, DiagnosticKind::ForeachMissingGetEnumerator),
        vec!["Widget".to_string(), "GetEnumerator".to_string()]
    );
    assert_eq!(state.diagnostics()[0].start, COLLECTION.start);
    assert_eq!(op.variable.type_id(), TypeId::ERROR);
}

#[test]
fn test_missing_enumerator_on_nullable_shows_the_nullable_type() {
    let mut b = CatalogBuilder::new();
    let widget = b.structure("Widget").finish();
    let nullable = b.nullable(b.named(widget));
    let catalog = b.finish();

    let options = CheckerOptions::default();
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);
    state.bind_foreach(&var_over(nullable));
    let args = args_of(&state, DiagnosticKind::ForeachMissingGetEnumerator);
    assert_eq!(args[0], catalog.display(nullable));
    assert_ne!(args[0], "Widget");
}

#[test]
fn test_sync_foreach_over_async_stream_suggests_await() {
    let mut b = CatalogBuilder::new();
    let stream_of_int = b.generic(b.well_known().iasync_enumerable_t, &[TypeId::INT]);
    let source = b.class("Feed").implements(stream_of_int).finish();
    let ty = b.named(source);
    let catalog = b.finish();

    let (_, kinds) = bind(&catalog, &var_over(ty));
    assert_eq!(kinds, vec![DiagnosticKind::ForeachMissingMemberWrongAsync]);
}

#[test]
fn test_await_foreach_over_array_suggests_plain_foreach() {
    let b = CatalogBuilder::new();
    let ints = b.array(TypeId::INT);
    let catalog = b.finish();

    let options = CheckerOptions::default();
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);
    state.bind_foreach(&await_foreach_over(ints));
    assert_eq!(kinds(&state), vec![DiagnosticKind::AwaitForeachMissingMemberWrongAsync]);
    assert_eq!(
        args_of(&state, DiagnosticKind::AwaitForeachMissingMemberWrongAsync)[1],
        "GetAsyncEnumerator"
    );
}

// =============================================================================
// Pattern and interfaces
// =============================================================================

#[test]
fn test_struct_pattern_enumerator_needs_no_disposal() {
    let mut b = CatalogBuilder::new();
    let (ty, _, get) = pattern_collection(&mut b, |b| b.structure("Enumerator").finish());
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(ty));
    assert!(kinds.is_empty());
    assert_eq!(op.info.strategy, EnumerationStrategy::Pattern);
    assert_eq!(op.info.element_type, TypeId::INT);
    assert_eq!(op.info.get_enumerator.as_ref().map(|m| m.method), Some(get));
    assert_eq!(op.info.disposal, Disposal::None);
}

#[test]
fn test_class_enumerator_implementing_idisposable() {
    let mut b = CatalogBuilder::new();
    let idisposable = b.named(b.well_known().idisposable);
    let (ty, _, _) = pattern_collection(&mut b, |b| b.class("Enumerator").implements(idisposable).finish());
    let catalog = b.finish();

    let (op, _) = bind(&catalog, &var_over(ty));
    assert_eq!(
        op.info.disposal,
        Disposal::Interface(catalog.well_known().idisposable_dispose)
    );
}

#[test]
fn test_pattern_dispose_depends_on_language_version() {
    let mut b = CatalogBuilder::new();
    let (ty, en, _) = pattern_collection(&mut b, |b| b.class("Enumerator").finish());
    let dispose = b.method(en, "Dispose").finish();
    let catalog = b.finish();

    let (op, _) = bind(&catalog, &var_over(ty));
    assert_eq!(op.info.disposal, Disposal::Pattern(dispose));

    let old = CheckerOptions::default().with_language_version(LanguageVersion::CSharp7_3);
    let (op, _) = bind_with(&catalog, &old, &MemberContext::default(), &var_over(ty));
    assert_eq!(op.info.disposal, Disposal::RuntimeCheck);
}

#[test]
fn test_bad_enumerator_shape_fails_without_fallback() {
    let mut b = CatalogBuilder::new();
    let en = b.class("Cursor").finish();
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::INT).finish();
    let ints = b.generic(b.well_known().ienumerable_t, &[TypeId::INT]);
    let coll = b.class("Numbers").implements(ints).finish();
    b.method(coll, "GetEnumerator").returns(en_ty).finish();
    let ty = b.named(coll);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(ty));
    assert_eq!(kinds, vec![DiagnosticKind::BadGetEnumeratorShape]);
    assert!(op.info.is_error());
}

#[test]
fn test_static_get_enumerator_warns_and_falls_through() {
    let mut b = CatalogBuilder::new();
    let ints = b.generic(b.well_known().ienumerable_t, &[TypeId::INT]);
    let coll = b.class("Numbers").implements(ints).finish();
    let object_enumerator = b.named(b.well_known().ienumerator);
    b.method(coll, "GetEnumerator")
        .returns(object_enumerator)
        .make_static()
        .finish();
    let ty = b.named(coll);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(ty));
    assert_eq!(kinds, vec![DiagnosticKind::PatternStaticOrInaccessible]);
    assert!(!op.is_invalid);
    assert_eq!(op.info.strategy, EnumerationStrategy::GenericInterface);
    assert_eq!(op.info.element_type, TypeId::INT);

    let quiet = CheckerOptions {
        report_pattern_warnings: false,
        ..CheckerOptions::default()
    };
    let (_, kinds) = bind_with(&catalog, &quiet, &MemberContext::default(), &var_over(ty));
    assert!(kinds.is_empty());
}

#[test]
fn test_internal_get_enumerator_warns() {
    let mut b = CatalogBuilder::new();
    let en = b.structure("Enumerator").finish();
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::INT).finish();
    b.method(en, "MoveNext").returns(TypeId::BOOL).finish();
    let coll = b.class("Numbers").finish();
    b.method(coll, "GetEnumerator")
        .returns(en_ty)
        .access(Accessibility::Internal)
        .finish();
    let ty = b.named(coll);
    let catalog = b.finish();

    let (_, kinds) = bind(&catalog, &var_over(ty));
    assert_eq!(
        kinds,
        vec![
            DiagnosticKind::PatternStaticOrInaccessible,
            DiagnosticKind::ForeachMissingGetEnumerator,
        ]
    );
}

#[test]
fn test_ambiguous_get_enumerator_warns_and_uses_interface() {
    let mut b = CatalogBuilder::new();
    let ints = b.generic(b.well_known().ienumerable_t, &[TypeId::INT]);
    let coll = b.class("Numbers").implements(ints).finish();
    let object_enumerator = b.named(b.well_known().ienumerator);
    b.method(coll, "GetEnumerator").returns(object_enumerator).finish();
    b.method(coll, "GetEnumerator")
        .optional_param("start", TypeId::INT)
        .returns(object_enumerator)
        .finish();
    let ty = b.named(coll);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(ty));
    assert_eq!(kinds, vec![DiagnosticKind::PatternIsAmbiguous]);
    assert_eq!(op.info.strategy, EnumerationStrategy::GenericInterface);
}

#[test]
fn test_two_generic_instantiations_are_an_error() {
    let mut b = CatalogBuilder::new();
    let family = b.well_known().ienumerable_t;
    let ints = b.generic(family, &[TypeId::INT]);
    let strings = b.generic(family, &[TypeId::STRING]);
    let coll = b.class("Mixed").implements(ints).implements(strings).finish();
    let ty = b.named(coll);
    let catalog = b.finish();

    let options = CheckerOptions::default();
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);
    let op = state.bind_foreach(&var_over(ty));
    assert_eq!(kinds(&state), vec![DiagnosticKind::MultipleInterfaceInstantiations]);
    assert_eq!(args_of(&state, DiagnosticKind::MultipleInterfaceInstantiations)[0], "Mixed");
    assert!(op.info.is_error());
}

#[test]
fn test_non_generic_enumerable_yields_object() {
    let mut b = CatalogBuilder::new();
    let legacy = b.named(b.well_known().ienumerable);
    let coll = b.class("Legacy").implements(legacy).finish();
    let ty = b.named(coll);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(ty));
    assert!(kinds.is_empty());
    assert_eq!(op.info.strategy, EnumerationStrategy::NonGenericInterface);
    assert_eq!(op.info.element_type, TypeId::OBJECT);
    assert_eq!(op.info.disposal, Disposal::RuntimeCheck);
}

#[test]
fn test_await_foreach_over_async_enumerable_class() {
    let mut b = CatalogBuilder::new();
    let stream = b.generic(b.well_known().iasync_enumerable_t, &[TypeId::STRING]);
    let source = b.class("Feed").implements(stream).finish();
    let ty = b.named(source);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &await_foreach_over(ty));
    assert!(kinds.is_empty());
    let wk = catalog.well_known();
    assert!(op.is_await);
    assert_eq!(op.info.strategy, EnumerationStrategy::GenericInterface);
    assert_eq!(op.info.element_type, TypeId::STRING);
    assert_eq!(op.info.move_next, Some(wk.iasync_enumerator_t_move_next_async));
    assert_eq!(
        op.info.disposal,
        Disposal::Interface(wk.iasync_disposable_dispose_async)
    );
}

#[test]
fn test_await_foreach_needs_async_streams() {
    let mut b = CatalogBuilder::new();
    let stream = b.generic(b.well_known().iasync_enumerable_t, &[TypeId::INT]);
    let source = b.class("Feed").implements(stream).finish();
    let ty = b.named(source);
    let catalog = b.finish();

    let old = CheckerOptions::default().with_language_version(LanguageVersion::CSharp7_3);
    let (op, kinds) = bind_with(&catalog, &old, &MemberContext::default(), &await_foreach_over(ty));
    assert_eq!(kinds, vec![DiagnosticKind::FeatureNotAvailable]);
    assert_eq!(op.info.element_type, TypeId::INT);
}

#[test]
fn test_nullable_collection_is_unwrapped() {
    let mut b = CatalogBuilder::new();
    let en = b.structure("Enumerator").finish();
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::INT).finish();
    b.method(en, "MoveNext").returns(TypeId::BOOL).finish();
    let range = b.structure("Range").finish();
    b.method(range, "GetEnumerator").returns(en_ty).finish();
    let range_ty = b.named(range);
    let nullable = b.nullable(range_ty);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(nullable));
    assert!(kinds.is_empty());
    assert_eq!(op.info.strategy, EnumerationStrategy::Pattern);
    assert_eq!(op.info.collection_type, range_ty);
    assert_eq!(op.info.collection_conversion.kind, ConversionKind::ExplicitNullable);
    assert!(op.info.collection_conversion.nested.is_empty());
}

// =============================================================================
// Extension GetEnumerator
// =============================================================================

#[test]
fn test_extension_get_enumerator_is_gated_on_version() {
    let mut b = CatalogBuilder::new();
    let en = b.structure("Enumerator").finish();
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::STRING).finish();
    b.method(en, "MoveNext").returns(TypeId::BOOL).finish();
    let widget = b.class("Widget").finish();
    let ty = b.named(widget);
    let ext = b.static_class("WidgetExtensions").finish();
    let method = b
        .method(ext, "GetEnumerator")
        .this_param("widget", ty)
        .returns(en_ty)
        .finish();
    let catalog = b.finish();
    let member = MemberContext::default().with_extension_scope(vec![ext]);

    let (op, kinds) = bind_with(&catalog, &CheckerOptions::default(), &member, &var_over(ty));
    assert!(kinds.is_empty());
    assert_eq!(op.info.strategy, EnumerationStrategy::Extension);
    assert_eq!(op.variable.type_id(), TypeId::STRING);
    let get = op.info.get_enumerator.expect("extension GetEnumerator");
    assert_eq!(get.method, method);
    assert_eq!(get.receiver, ReceiverKind::Extension);

    let v8 = CheckerOptions::default().with_language_version(LanguageVersion::CSharp8);
    let (_, kinds) = bind_with(&catalog, &v8, &member, &var_over(ty));
    assert_eq!(kinds, vec![DiagnosticKind::ForeachMissingGetEnumerator]);
}

#[test]
fn test_two_extension_get_enumerators_in_one_scope_are_ambiguous() {
    let mut b = CatalogBuilder::new();
    let en = b.structure("Enumerator").finish();
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::INT).finish();
    b.method(en, "MoveNext").returns(TypeId::BOOL).finish();
    let widget = b.class("Widget").finish();
    let ty = b.named(widget);
    let first = b.static_class("A").finish();
    let second = b.static_class("B").finish();
    for owner in [first, second] {
        b.method(owner, "GetEnumerator").this_param("w", ty).returns(en_ty).finish();
    }
    let catalog = b.finish();
    let member = MemberContext::default().with_extension_scope(vec![first, second]);

    let (op, kinds) = bind_with(&catalog, &CheckerOptions::default(), &member, &var_over(ty));
    assert_eq!(kinds, vec![DiagnosticKind::AmbiguousCall]);
    assert!(op.info.is_error());
}

#[test]
fn test_instance_get_enumerator_beats_extension_in_scope() {
    let mut b = CatalogBuilder::new();
    let (ty, _, instance) = pattern_collection(&mut b, |b| b.structure("Enumerator").finish());
    let text = b.structure("TextEnumerator").finish();
    let text_ty = b.named(text);
    b.property(text, "Current", TypeId::STRING).finish();
    b.method(text, "MoveNext").returns(TypeId::BOOL).finish();
    let ext = b.static_class("NumbersExtensions").finish();
    b.method(ext, "GetEnumerator").this_param("numbers", ty).returns(text_ty).finish();
    let catalog = b.finish();
    let member = MemberContext::default().with_extension_scope(vec![ext]);

    let (op, kinds) = bind_with(&catalog, &CheckerOptions::default(), &member, &var_over(ty));
    assert!(kinds.is_empty(), "{kinds:?}");
    assert_eq!(op.info.strategy, EnumerationStrategy::Pattern);
    let get = op.info.get_enumerator.as_ref().expect("instance GetEnumerator");
    assert_eq!(get.method, instance);
    assert_eq!(get.receiver, ReceiverKind::Instance);
    assert_eq!(op.info.element_type, TypeId::INT);
}

#[test]
fn test_new_get_enumerator_hides_base_method() {
    let mut b = CatalogBuilder::new();
    let (base_ty, _, _) = pattern_collection(&mut b, |b| b.structure("Enumerator").finish());
    let text = b.structure("TextEnumerator").finish();
    let text_ty = b.named(text);
    b.property(text, "Current", TypeId::STRING).finish();
    b.method(text, "MoveNext").returns(TypeId::BOOL).finish();
    let derived = b.class("Words").base(base_ty).finish();
    let hiding = b.method(derived, "GetEnumerator").returns(text_ty).hides().finish();
    let derived_ty = b.named(derived);
    let catalog = b.finish();

    let (op, kinds) = bind(&catalog, &var_over(derived_ty));
    assert!(kinds.is_empty(), "{kinds:?}");
    assert_eq!(op.info.strategy, EnumerationStrategy::Pattern);
    assert_eq!(op.info.get_enumerator.as_ref().map(|g| g.method), Some(hiding));
    assert_eq!(op.info.element_type, TypeId::STRING);
    assert_eq!(op.variable.type_id(), TypeId::STRING);
}

// =============================================================================
// Iteration variables
// =============================================================================

#[test]
fn test_explicit_type_without_conversion() {
    let b = CatalogBuilder::new();
    let ints = b.array(TypeId::INT);
    let catalog = b.finish();

    let options = CheckerOptions::default();
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);
    let stmt = foreach_over(
        Expr::typed(COLLECTION, ints),
        single(DeclaredType::Explicit(TypeId::STRING), RefKind::None),
    );
    let op = state.bind_foreach(&stmt);
    assert_eq!(kinds(&state), vec![DiagnosticKind::NoExplicitConversion]);
    assert_eq!(
        args_of(&state, DiagnosticKind::NoExplicitConversion),
        vec!["int".to_string(), "string".to_string()]
    );
    assert_eq!(op.variable.type_id(), TypeId::STRING);
    assert!(op.is_invalid);
}

#[test]
fn test_ref_iteration_over_by_value_current() {
    let b = CatalogBuilder::new();
    let ints = b.array(TypeId::INT);
    let catalog = b.finish();

    let stmt = foreach_over(Expr::typed(COLLECTION, ints), single(DeclaredType::Var, RefKind::Ref));
    let (_, kinds) = bind(&catalog, &stmt);
    assert_eq!(kinds, vec![DiagnosticKind::RefIterationOverByValueCurrent]);

    let async_member = MemberContext {
        is_async: true,
        ..MemberContext::default()
    };
    let (_, kinds) = bind_with(&catalog, &CheckerOptions::default(), &async_member, &stmt);
    assert_eq!(
        kinds,
        vec![DiagnosticKind::BadAsyncLocalType, DiagnosticKind::RefIterationOverByValueCurrent]
    );

    let v7 = CheckerOptions::default().with_language_version(LanguageVersion::CSharp7);
    let (_, kinds) = bind_with(&catalog, &v7, &MemberContext::default(), &stmt);
    assert_eq!(kinds[0], DiagnosticKind::FeatureNotAvailable);
}

#[test]
fn test_ref_iteration_over_ref_current() {
    let mut b = CatalogBuilder::new();
    let en = b.structure("SpanEnumerator").finish();
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::INT).by_ref(RefKind::Ref).finish();
    b.method(en, "MoveNext").returns(TypeId::BOOL).finish();
    let coll = b.structure("Buffer").finish();
    b.method(coll, "GetEnumerator").returns(en_ty).finish();
    let ty = b.named(coll);

    let ro = b.structure("ReadOnlyEnumerator").finish();
    let ro_ty = b.named(ro);
    b.property(ro, "Current", TypeId::INT).by_ref(RefKind::In).finish();
    b.method(ro, "MoveNext").returns(TypeId::BOOL).finish();
    let ro_coll = b.structure("ReadOnlyBuffer").finish();
    b.method(ro_coll, "GetEnumerator").returns(ro_ty).finish();
    let ro_coll_ty = b.named(ro_coll);
    let catalog = b.finish();

    let by_ref = foreach_over(Expr::typed(COLLECTION, ty), single(DeclaredType::Var, RefKind::Ref));
    let (op, kinds) = bind(&catalog, &by_ref);
    assert!(kinds.is_empty());
    assert_eq!(op.info.current_ref_kind, RefKind::Ref);

    let over_readonly = foreach_over(Expr::typed(COLLECTION, ro_coll_ty), single(DeclaredType::Var, RefKind::Ref));
    let (_, kinds) = bind(&catalog, &over_readonly);
    assert_eq!(kinds, vec![DiagnosticKind::RefIterationOverReadonlyCurrent]);

    let readonly = foreach_over(Expr::typed(COLLECTION, ro_coll_ty), single(DeclaredType::Var, RefKind::In));
    assert!(bind(&catalog, &readonly).1.is_empty());

    let widened = foreach_over(
        Expr::typed(COLLECTION, ty),
        single(DeclaredType::Explicit(TypeId::LONG), RefKind::Ref),
    );
    let (_, kinds) = bind(&catalog, &widened);
    assert_eq!(kinds, vec![DiagnosticKind::RefIterationRequiresIdentity]);
}

#[test]
fn test_deconstructing_iteration_variable() {
    let b = CatalogBuilder::new();
    let pair = b.tuple(&[TypeId::INT, TypeId::STRING]);
    let pairs = b.array(pair);
    let catalog = b.finish();

    let target = TargetSyntax::var_parenthesized(
        sp(5),
        vec![TargetSyntax::identifier(sp(6), "k"), TargetSyntax::identifier(sp(7), "v")],
    );
    let stmt = foreach_over(Expr::typed(COLLECTION, pairs), ForEachVariable::Deconstruction(target));
    let (op, kinds) = bind(&catalog, &stmt);
    assert!(kinds.is_empty());
    let IterationVariable::Deconstruction(deconstruction) = &op.variable else {
        panic!("expected a deconstructing iteration variable");
    };
    assert_eq!(deconstruction.plan.strategy, PlanStrategy::TuplePositional);
    assert_eq!(op.variable.type_id(), pair);
}

#[test]
fn test_iteration_variable_is_readonly_in_body() {
    let b = CatalogBuilder::new();
    let ints = b.array(TypeId::INT);
    let catalog = b.finish();

    let assign = Statement::Deconstruction(DeconstructionStatement {
        kind: DeconstructionKind::Assignment,
        target: TargetSyntax::parenthesized(
            sp(40),
            vec![TargetSyntax::identifier(sp(41), "item"), TargetSyntax::discard(sp(42))],
        ),
        value: Expr::tuple(Span::new(45, 50), vec![Expr::int(sp(46), 1), Expr::int(sp(47), 2)]),
        span: Span::new(40, 50),
    });
    let stmt = ForEachStatement {
        body: vec![assign],
        ..var_over(ints)
    };

    let options = CheckerOptions::default();
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);
    let op = state.bind_foreach(&stmt);
    assert_eq!(kinds(&state), vec![DiagnosticKind::ReadonlyLocalAssignment]);
    assert_eq!(
        args_of(&state, DiagnosticKind::ReadonlyLocalAssignment),
        vec!["item".to_string(), "foreach iteration variable".to_string()]
    );
    assert_eq!(op.body.len(), 1);
    assert!(op.is_invalid);
    // The iteration variable goes out of scope with the loop.
    assert!(state.scopes.lookup("item").is_none());
}
