use super::*;
use crate::test_support::{checker, kinds, sp};
use csz_common::DiagnosticKind;
use csz_solver::{CatalogBuilder, TypeId};

#[test]
fn test_options_from_json_defaults_missing_fields() {
    let options = CheckerOptions::from_json(r#"{ "languageVersion": "7.3" }"#).unwrap();
    assert_eq!(options.language_version, LanguageVersion::CSharp7_3);
    assert!(options.report_pattern_warnings);
    assert_eq!(options.file_name, "main.cs");
}

#[test]
fn test_options_from_json_all_fields() {
    let options = CheckerOptions::from_json(
        r#"{ "languageVersion": "9", "reportPatternWarnings": false, "fileName": "Program.cs" }"#,
    )
    .unwrap();
    assert_eq!(options.language_version, LanguageVersion::CSharp9);
    assert!(!options.report_pattern_warnings);
    assert_eq!(options.file_name, "Program.cs");
}

#[test]
fn test_options_from_json_rejects_unknown_version() {
    let err = CheckerOptions::from_json(r#"{ "languageVersion": "5" }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
    assert!(err.to_string().contains("invalid checker options"));
}

#[test]
fn test_language_version_parse() {
    assert_eq!(LanguageVersion::parse("7").unwrap(), LanguageVersion::CSharp7);
    assert_eq!(LanguageVersion::parse(" 8.0 ").unwrap(), LanguageVersion::CSharp8);
    assert_eq!(LanguageVersion::parse("preview").unwrap(), LanguageVersion::Latest);
    let err = LanguageVersion::parse("12.5").unwrap_err();
    assert!(matches!(err, ConfigError::UnknownLanguageVersion(ref v) if v == "12.5"));
    assert_eq!(err.to_string(), "unknown language version '12.5'");
}

#[test]
fn test_feature_gates_follow_version_order() {
    let v7 = CheckerOptions::default().with_language_version(LanguageVersion::CSharp7);
    assert!(v7.supports(Feature::Tuples));
    assert!(!v7.supports(Feature::RefForeach));

    let v8 = CheckerOptions::default().with_language_version(LanguageVersion::CSharp8);
    assert!(v8.supports(Feature::AsyncStreams));
    assert!(v8.supports(Feature::PatternDispose));
    assert!(!v8.supports(Feature::ExtensionGetEnumerator));

    assert!(CheckerOptions::default().supports(Feature::ExtensionGetEnumerator));
}

#[test]
fn test_check_feature_reports_versions() {
    let catalog = CatalogBuilder::new().finish();
    let options = CheckerOptions::default().with_language_version(LanguageVersion::CSharp6);
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);

    assert!(!state.check_feature(Feature::Tuples, sp(3)));
    assert_eq!(kinds(&state), vec![DiagnosticKind::FeatureNotAvailable]);
    assert_eq!(
        state.diagnostics()[0].args,
        vec!["tuples".to_string(), "6".to_string(), "7.0".to_string()]
    );
}

#[test]
fn test_bag_rollback_forgets_dedupe_keys() {
    let mut bag = DiagnosticBag::new("a.cs");
    assert!(bag.report(DiagnosticKind::CircularInference, sp(1), vec!["x".to_string()]));
    assert!(!bag.report(DiagnosticKind::CircularInference, sp(1), vec!["x".to_string()]));

    let mark = bag.mark();
    assert!(bag.report(DiagnosticKind::LocalDuplicate, sp(2), vec!["y".to_string()]));
    assert!(bag.has_errors_since(mark));
    bag.rollback(mark);
    assert_eq!(bag.len(), 1);
    assert!(!bag.has_errors_since(mark));
    assert!(bag.report(DiagnosticKind::LocalDuplicate, sp(2), vec!["y".to_string()]));
    assert_eq!(bag.since(mark).len(), 1);
}

#[test]
fn test_scopes_reject_shadowing_of_visible_names() {
    let catalog = CatalogBuilder::new().finish();
    let options = CheckerOptions::default();
    let member = MemberContext::default();
    let mut state = checker(&catalog, &options, &member);

    let outer = crate::syntax::LocalDeclaration::new("x", TypeId::INT, sp(1));
    state.declare_parameter(&outer);
    state.scopes.push();
    assert!(!state.scopes.declare(crate::scope::LocalSymbol::new(
        "x",
        TypeId::LONG,
        crate::scope::LocalKind::Local,
        sp(2),
    )));
    state.scopes.pop();
    assert_eq!(state.scopes.depth(), 1);
    assert_eq!(state.scopes.lookup("x").map(|l| l.type_id), Some(TypeId::INT));
}
