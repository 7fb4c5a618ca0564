//! Foreach binding through the public entry points.

use csz_checker::syntax::{
    DeclaredType, Expr, ForEachStatement, ForEachVariable, LocalDeclaration, MethodBody, Statement, TargetSyntax,
};
use csz_checker::{
    CheckerOptions, Disposal, EnumerationStrategy, IterationVariable, LanguageVersion, MemberContext, Operation,
    check_body, resolve_foreach,
};
use csz_common::{DiagnosticKind, Span};
use csz_solver::{CatalogBuilder, RefKind, TypeCatalog, TypeId};

fn item(declared: DeclaredType) -> ForEachVariable {
    ForEachVariable::Single {
        declared,
        name: "item".to_string(),
        ref_kind: RefKind::None,
        span: Span::at(5, 4),
    }
}

fn over(collection: Expr, variable: ForEachVariable) -> ForEachStatement {
    ForEachStatement {
        is_await: false,
        variable,
        collection,
        body: Vec::new(),
        span: Span::new(0, 40),
    }
}

/// `class Bag { Enumerator GetEnumerator(); }` with a class enumerator that
/// has an instance `Dispose()` but no `IDisposable`.
fn bag_catalog() -> (TypeCatalog, TypeId) {
    let mut b = CatalogBuilder::new();
    let en = b.class("Enumerator").finish();
    let en_ty = b.named(en);
    b.property(en, "Current", TypeId::STRING).finish();
    b.method(en, "MoveNext").returns(TypeId::BOOL).finish();
    b.method(en, "Dispose").finish();
    let bag = b.class("Bag").finish();
    b.method(bag, "GetEnumerator").returns(en_ty).finish();
    let ty = b.named(bag);
    (b.finish(), ty)
}

#[test]
fn test_pattern_dispose_follows_language_version() {
    let (catalog, bag) = bag_catalog();
    let stmt = over(Expr::typed(Span::new(10, 13), bag), item(DeclaredType::Var));

    let latest = resolve_foreach(&catalog, &CheckerOptions::default(), &MemberContext::default(), &stmt);
    assert!(latest.diagnostics.is_empty());
    assert_eq!(latest.value.info.strategy, EnumerationStrategy::Pattern);
    assert!(matches!(latest.value.info.disposal, Disposal::Pattern(_)));

    let v7 = CheckerOptions::default().with_language_version(LanguageVersion::CSharp7_3);
    let older = resolve_foreach(&catalog, &v7, &MemberContext::default(), &stmt);
    assert!(older.diagnostics.is_empty());
    assert_eq!(older.value.info.disposal, Disposal::RuntimeCheck);
}

#[test]
fn test_missing_enumerator_is_reported_once_with_arguments() {
    let mut b = CatalogBuilder::new();
    let widget = b.structure("Widget").finish();
    let ty = b.named(widget);
    let catalog = b.finish();

    let stmt = over(Expr::typed(Span::new(10, 16), ty), item(DeclaredType::Var));
    let resolved = resolve_foreach(&catalog, &CheckerOptions::default(), &MemberContext::default(), &stmt);
    assert_eq!(resolved.kinds(), vec![DiagnosticKind::ForeachMissingGetEnumerator]);
    let diag = &resolved.diagnostics[0];
    assert_eq!((diag.start, diag.length), (10, 6));
    assert_eq!(diag.code, 1579);
    assert!(diag.message_text.contains("'Widget'"));
    assert!(resolved.value.is_invalid);
}

#[test]
fn test_foreach_over_parameter_with_deconstruction_and_nested_loop() {
    let b = CatalogBuilder::new();
    let pair = b.tuple(&[TypeId::STRING, TypeId::INT]);
    let pairs = b.array(pair);
    let catalog = b.finish();

    // void M((string, int)[] pairs) {
    //     foreach (var (name, count) in pairs)
    //         foreach (char c in name) { }
    // }
    let inner = over(
        Expr::local(Span::new(30, 34), "name"),
        ForEachVariable::Single {
            declared: DeclaredType::Explicit(TypeId::CHAR),
            name: "c".to_string(),
            ref_kind: RefKind::None,
            span: Span::at(25, 1),
        },
    );
    let outer = ForEachStatement {
        body: vec![Statement::ForEach(inner)],
        ..over(
            Expr::local(Span::new(15, 20), "pairs"),
            ForEachVariable::Deconstruction(TargetSyntax::var_parenthesized(
                Span::new(5, 14),
                vec![
                    TargetSyntax::identifier(Span::at(6, 4), "name"),
                    TargetSyntax::identifier(Span::at(12, 5), "count"),
                ],
            )),
        )
    };
    let body = MethodBody {
        name: "M".to_string(),
        parameters: vec![LocalDeclaration::new("pairs", pairs, Span::at(90, 5))],
        statements: vec![Statement::ForEach(outer)],
        ..MethodBody::default()
    };

    let result = check_body(&catalog, &CheckerOptions::default(), &body);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let [Operation::ForEach(outer)] = result.operations.as_slice() else {
        panic!("expected one foreach");
    };
    assert_eq!(outer.info.strategy, EnumerationStrategy::Array);
    assert!(matches!(outer.variable, IterationVariable::Deconstruction(_)));
    let [Operation::ForEach(inner)] = outer.body.as_slice() else {
        panic!("expected a nested foreach");
    };
    assert_eq!(inner.info.strategy, EnumerationStrategy::String);
    assert_eq!(inner.variable.type_id(), TypeId::CHAR);
}

#[test]
fn test_operation_tree_serializes() {
    let catalog = CatalogBuilder::new().finish();
    let stmt = over(Expr::typed(Span::new(10, 13), TypeId::STRING), item(DeclaredType::Var));
    let resolved = resolve_foreach(&catalog, &CheckerOptions::default(), &MemberContext::default(), &stmt);

    let json = serde_json::to_value(&resolved.value).expect("serialize foreach");
    assert_eq!(json["info"]["strategy"], "String");
    assert_eq!(json["is_await"], false);
}
