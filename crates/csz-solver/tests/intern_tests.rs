use super::*;
use rayon::prelude::*;

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    // Intrinsics should be pre-registered at their fixed ids
    assert_eq!(
        interner.lookup(TypeId::INT),
        Some(TypeData::Intrinsic(IntrinsicKind::Int))
    );
    assert_eq!(
        interner.lookup(TypeId::DYNAMIC),
        Some(TypeData::Intrinsic(IntrinsicKind::Dynamic))
    );
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize);
}

#[test]
fn test_interner_deduplication() {
    let interner = TypeInterner::new();

    let pair1 = interner.tuple(&[TypeId::INT, TypeId::STRING]);
    let pair2 = interner.tuple(&[TypeId::INT, TypeId::STRING]);
    let swapped = interner.tuple(&[TypeId::STRING, TypeId::INT]);

    assert_eq!(pair1, pair2);
    assert_ne!(pair1, swapped);
}

#[test]
fn test_nullable_is_idempotent() {
    let interner = TypeInterner::new();
    let once = interner.nullable(TypeId::INT);
    let twice = interner.nullable(once);
    assert_eq!(once, twice);
    assert_eq!(interner.nullable_underlying(once), Some(TypeId::INT));
}

#[test]
fn test_parallel_interning_agrees() {
    let interner = TypeInterner::new();
    let ids: Vec<TypeId> = (0..64)
        .into_par_iter()
        .map(|_| interner.array(interner.tuple(&[TypeId::LONG, TypeId::CHAR])))
        .collect();
    assert!(ids.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn test_instantiate_substitutes_owner_params_only() {
    let mut b = CatalogBuilder::new();
    let list = b.class("List").type_params(&["T"]).finish();
    let other = b.class("Other").type_params(&["U"]).finish();
    let t = b.type_param(list, 0);
    let u = b.type_param(other, 0);
    let pair = b.tuple(&[t, u]);
    let catalog = b.finish();

    let subst = Substitution::for_type(list, TypeArgs::from_slice(&[TypeId::INT]));
    let result = catalog.instantiate(pair, &subst);
    assert_eq!(catalog.types().tuple_elements(result).as_deref(), Some(&[TypeId::INT, u][..]));
}

#[test]
fn test_infer_from_receiver_through_interface() {
    let mut b = CatalogBuilder::new();
    let ienumerable_t = b.well_known().ienumerable_t;
    let bag = b.class("Bag").finish();
    let enumerable_of_long = b.generic(ienumerable_t, &[TypeId::LONG]);
    b.add_interface(bag, enumerable_of_long);
    let m0 = b.method_type_param(0);
    let pattern = b.generic(ienumerable_t, &[m0]);
    let bag_type = b.named(bag);
    let catalog = b.finish();

    let args = catalog.infer_from_receiver(pattern, bag_type, 1);
    assert_eq!(args.as_deref(), Some(&[TypeId::LONG][..]));
}
