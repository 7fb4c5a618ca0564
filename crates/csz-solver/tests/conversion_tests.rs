use super::*;

fn kind(catalog: &TypeCatalog, source: TypeId, target: TypeId) -> ConversionKind {
    catalog.classify_implicit(source, target).kind
}

#[test]
fn test_identity_and_error_types() {
    let catalog = CatalogBuilder::new().finish();
    assert_eq!(kind(&catalog, TypeId::INT, TypeId::INT), ConversionKind::Identity);
    assert_eq!(kind(&catalog, TypeId::ERROR, TypeId::STRING), ConversionKind::Identity);
    assert_eq!(kind(&catalog, TypeId::OBJECT, TypeId::DYNAMIC), ConversionKind::Identity);
}

#[test]
fn test_implicit_numeric_table() {
    let catalog = CatalogBuilder::new().finish();
    assert_eq!(kind(&catalog, TypeId::INT, TypeId::LONG), ConversionKind::ImplicitNumeric);
    assert_eq!(kind(&catalog, TypeId::CHAR, TypeId::INT), ConversionKind::ImplicitNumeric);
    assert_eq!(kind(&catalog, TypeId::FLOAT, TypeId::DOUBLE), ConversionKind::ImplicitNumeric);
    assert_eq!(kind(&catalog, TypeId::LONG, TypeId::INT), ConversionKind::NoConversion);
    assert_eq!(kind(&catalog, TypeId::INT, TypeId::CHAR), ConversionKind::NoConversion);
    assert_eq!(
        catalog.classify_explicit(TypeId::LONG, TypeId::INT).kind,
        ConversionKind::ExplicitNumeric
    );
}

#[test]
fn test_integer_constants_narrow_when_in_range() {
    let catalog = CatalogBuilder::new().finish();
    let small = ExprShape::Constant {
        type_id: TypeId::INT,
        value: 200,
    };
    let large = ExprShape::Constant {
        type_id: TypeId::INT,
        value: 300,
    };
    assert_eq!(
        catalog.classify_expression(&small, TypeId::BYTE).kind,
        ConversionKind::ImplicitConstant
    );
    assert_eq!(
        catalog.classify_expression(&large, TypeId::BYTE).kind,
        ConversionKind::NoConversion
    );
    assert_eq!(
        catalog.classify_expression(&small, TypeId::CHAR).kind,
        ConversionKind::NoConversion
    );
}

#[test]
fn test_reference_boxing_and_unboxing() {
    let mut b = CatalogBuilder::new();
    let animal = b.class("Animal").finish();
    let animal_type = b.named(animal);
    let dog = b.class("Dog").base(animal_type).finish();
    let point = b.structure("Point").finish();
    let dog_type = b.named(dog);
    let point_type = b.named(point);
    let catalog = b.finish();

    assert_eq!(kind(&catalog, dog_type, animal_type), ConversionKind::ImplicitReference);
    assert_eq!(kind(&catalog, dog_type, TypeId::OBJECT), ConversionKind::ImplicitReference);
    assert_eq!(kind(&catalog, point_type, TypeId::OBJECT), ConversionKind::Boxing);
    assert_eq!(kind(&catalog, TypeId::INT, TypeId::OBJECT), ConversionKind::Boxing);
    assert_eq!(
        catalog.classify_explicit(animal_type, dog_type).kind,
        ConversionKind::ExplicitReference
    );
    assert_eq!(
        catalog.classify_explicit(TypeId::OBJECT, TypeId::INT).kind,
        ConversionKind::Unboxing
    );
    assert_eq!(
        catalog.classify_explicit(TypeId::STRING, TypeId::INT).kind,
        ConversionKind::NoConversion
    );
}

#[test]
fn test_array_converts_to_generic_enumerable() {
    let b = CatalogBuilder::new();
    let ienumerable_t = b.well_known().ienumerable_t;
    let ienumerable = b.well_known().ienumerable;
    let strings = b.array(TypeId::STRING);
    let enumerable_of_string = b.generic(ienumerable_t, &[TypeId::STRING]);
    let enumerable = b.named(ienumerable);
    let catalog = b.finish();

    assert_eq!(kind(&catalog, strings, enumerable_of_string), ConversionKind::ImplicitReference);
    assert_eq!(kind(&catalog, strings, enumerable), ConversionKind::ImplicitReference);
}

#[test]
fn test_dynamic_conversions() {
    let catalog = CatalogBuilder::new().finish();
    assert_eq!(kind(&catalog, TypeId::DYNAMIC, TypeId::INT), ConversionKind::ImplicitDynamic);
    assert_eq!(
        catalog.classify_explicit(TypeId::DYNAMIC, TypeId::INT).kind,
        ConversionKind::ExplicitDynamic
    );
    assert_eq!(
        catalog.classify_explicit(TypeId::DYNAMIC, TypeId::DYNAMIC).kind,
        ConversionKind::Identity
    );
}

#[test]
fn test_tuple_conversions_carry_nested_elements() {
    let b = CatalogBuilder::new();
    let source = b.tuple(&[TypeId::INT, TypeId::STRING]);
    let target = b.tuple(&[TypeId::LONG, TypeId::OBJECT]);
    let catalog = b.finish();

    let conversion = catalog.classify_implicit(source, target);
    assert_eq!(conversion.kind, ConversionKind::ImplicitTuple);
    assert_eq!(
        conversion.nested.iter().map(|c| c.kind).collect::<Vec<_>>(),
        vec![ConversionKind::ImplicitNumeric, ConversionKind::ImplicitReference]
    );
}

#[test]
fn test_tuple_literal_with_null_converts_element_wise() {
    let b = CatalogBuilder::new();
    let target = b.tuple(&[TypeId::INT, TypeId::STRING]);
    let catalog = b.finish();

    let literal = ExprShape::Tuple(vec![
        ExprShape::Constant {
            type_id: TypeId::INT,
            value: 1,
        },
        ExprShape::Null,
    ]);
    let conversion = catalog.classify_expression(&literal, target);
    assert_eq!(conversion.kind, ConversionKind::ImplicitTuple);
    assert_eq!(conversion.nested[1].kind, ConversionKind::NullLiteral);
    assert_eq!(catalog.natural_type(&literal), None);
}

#[test]
fn test_null_requires_reference_or_nullable_target() {
    let b = CatalogBuilder::new();
    let nullable_int = b.nullable(TypeId::INT);
    let catalog = b.finish();

    assert!(catalog.classify_expression(&ExprShape::Null, TypeId::STRING).exists());
    assert!(catalog.classify_expression(&ExprShape::Null, nullable_int).exists());
    assert!(!catalog.classify_expression(&ExprShape::Null, TypeId::INT).exists());
    assert_eq!(kind(&catalog, TypeId::INT, nullable_int), ConversionKind::ImplicitNullable);
}

#[test]
fn test_user_defined_conversions() {
    let mut b = CatalogBuilder::new();
    let meters = b.structure("Meters").finish();
    let meters_type = b.named(meters);
    let op = b.conversion(meters, TypeId::DOUBLE, meters_type, true);
    let back = b.conversion(meters, meters_type, TypeId::DOUBLE, false);
    let catalog = b.finish();

    let implicit = catalog.classify_implicit(TypeId::DOUBLE, meters_type);
    assert_eq!(implicit.kind, ConversionKind::ImplicitUserDefined);
    assert_eq!(implicit.method, Some(op));
    assert!(!catalog.classify_implicit(meters_type, TypeId::DOUBLE).exists());
    let explicit = catalog.classify_explicit(meters_type, TypeId::DOUBLE);
    assert_eq!(explicit.kind, ConversionKind::ExplicitUserDefined);
    assert_eq!(explicit.method, Some(back));
}
