//! Deconstruction through the public entry points.

use csz_checker::syntax::{
    DeconstructionKind, DeconstructionStatement, Expr, LocalDeclaration, MethodBody, Statement, TargetSyntax,
};
use csz_checker::{
    CheckerOptions, MemberContext, Operation, PlanStrategy, TargetOperation, check_body, resolve_deconstruction,
};
use csz_common::{DiagnosticCategory, DiagnosticKind, Span};
use csz_solver::{CatalogBuilder, ConversionKind, TypeId};

fn at(start: u32) -> Span {
    Span::at(start, 1)
}

fn declaration(target: TargetSyntax, value: Expr, span: Span) -> DeconstructionStatement {
    DeconstructionStatement {
        kind: DeconstructionKind::Declaration,
        target,
        value,
        span,
    }
}

#[test]
fn test_explicit_targets_widen_and_keep_identity() {
    let catalog = CatalogBuilder::new().finish();
    // (long a, string b) = (1, "x");
    let stmt = declaration(
        TargetSyntax::parenthesized(
            at(0),
            vec![
                TargetSyntax::declared(at(1), TypeId::LONG, "a"),
                TargetSyntax::declared(at(2), TypeId::STRING, "b"),
            ],
        ),
        Expr::tuple(Span::new(10, 20), vec![Expr::int(at(11), 1), Expr::typed(at(13), TypeId::STRING)]),
        Span::new(0, 20),
    );

    let resolved = resolve_deconstruction(&catalog, &CheckerOptions::default(), &MemberContext::default(), &stmt);
    assert!(resolved.diagnostics.is_empty());
    let op = resolved.value;
    assert!(!op.is_invalid);
    assert_eq!(op.plan.strategy, PlanStrategy::TuplePositional);
    let conversions: Vec<ConversionKind> = op.plan.leaves().iter().map(|(_, c)| c.conversion.kind).collect();
    assert_eq!(conversions, vec![ConversionKind::ImplicitNumeric, ConversionKind::Identity]);
    assert_eq!(op.type_id, catalog.types().tuple(&[TypeId::LONG, TypeId::STRING]));
}

#[test]
fn test_void_source_reports_missing_deconstruct() {
    let catalog = CatalogBuilder::new().finish();
    let stmt = declaration(
        TargetSyntax::var_parenthesized(
            at(0),
            vec![TargetSyntax::identifier(at(1), "a"), TargetSyntax::identifier(at(2), "b")],
        ),
        Expr::typed(Span::new(10, 20), TypeId::VOID),
        Span::new(0, 20),
    );

    let resolved = resolve_deconstruction(&catalog, &CheckerOptions::default(), &MemberContext::default(), &stmt);
    assert!(resolved.has_errors());
    assert_eq!(
        resolved.kinds(),
        vec![DiagnosticKind::NoSuchMember, DiagnosticKind::MissingDeconstruct]
    );
    let missing = &resolved.diagnostics[1];
    assert_eq!(missing.args, vec!["void".to_string(), "2".to_string()]);
    assert_eq!(missing.start, 10);
    assert!(resolved.value.plan.is_error());
}

#[test]
fn test_cardinality_mismatch_carries_code_and_message() {
    let catalog = CatalogBuilder::new().finish();
    let options = CheckerOptions::default();
    let stmt = declaration(
        TargetSyntax::var_parenthesized(
            at(0),
            vec![
                TargetSyntax::identifier(at(1), "a"),
                TargetSyntax::identifier(at(2), "b"),
                TargetSyntax::identifier(at(3), "c"),
            ],
        ),
        Expr::tuple(Span::new(10, 20), vec![Expr::int(at(11), 1), Expr::int(at(13), 2)]),
        Span::new(0, 20),
    );

    let resolved = resolve_deconstruction(&catalog, &options, &MemberContext::default(), &stmt);
    let [diag] = resolved.diagnostics.as_slice() else {
        panic!("expected one diagnostic, got {:?}", resolved.kinds());
    };
    assert_eq!(diag.kind, DiagnosticKind::CardinalityMismatch);
    assert_eq!(diag.code, 8132);
    assert_eq!(diag.category, DiagnosticCategory::Error);
    assert_eq!(diag.file, options.file_name);
    assert_eq!(diag.message_text, "Cannot deconstruct a tuple of '2' elements into '3' variables.");
}

#[test]
fn test_body_threads_locals_between_statements() {
    let mut b = CatalogBuilder::new();
    let point = b.class("Point").finish();
    let point_ty = b.named(point);
    b.method(point, "Deconstruct")
        .out_param("x", TypeId::INT)
        .out_param("y", TypeId::INT)
        .finish();
    let catalog = b.finish();

    // void M(Point p) { var (x, y) = p; (x, y) = (y, x); }
    let body = MethodBody {
        name: "M".to_string(),
        context: MemberContext::default(),
        parameters: vec![LocalDeclaration::new("p", point_ty, at(90))],
        statements: vec![
            Statement::Deconstruction(declaration(
                TargetSyntax::var_parenthesized(
                    at(0),
                    vec![TargetSyntax::identifier(at(1), "x"), TargetSyntax::identifier(at(2), "y")],
                ),
                Expr::local(at(5), "p"),
                Span::new(0, 6),
            )),
            Statement::Deconstruction(DeconstructionStatement {
                kind: DeconstructionKind::Assignment,
                target: TargetSyntax::parenthesized(
                    at(10),
                    vec![TargetSyntax::identifier(at(11), "x"), TargetSyntax::identifier(at(12), "y")],
                ),
                value: Expr::tuple(Span::new(15, 20), vec![Expr::local(at(16), "y"), Expr::local(at(17), "x")]),
                span: Span::new(10, 20),
            }),
        ],
    };

    let result = check_body(&catalog, &CheckerOptions::default(), &body);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    assert_eq!(result.operations.len(), 2);

    let Operation::Deconstruction(declare) = &result.operations[0] else {
        panic!("expected a deconstruction");
    };
    assert!(matches!(declare.plan.strategy, PlanStrategy::MethodInvocation(_)));

    let Operation::Deconstruction(assign) = &result.operations[1] else {
        panic!("expected a deconstruction");
    };
    let TargetOperation::Tuple { elements, .. } = &assign.target else {
        panic!("expected a tuple target");
    };
    assert!(elements
        .iter()
        .all(|e| matches!(e, TargetOperation::Variable { type_id, .. } if *type_id == TypeId::INT)));
}
