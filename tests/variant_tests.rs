//! Integration tests for the public `Variant` API: construction, retrieval,
//! sharing, and the fallible comparison semantics.

use std::sync::Arc;

use variant::{Operator, handlers, prelude::*};

/// A type with no comparison operators at all.
struct Foo {
    field: i32,
}

/// A type with equality but no ordering.
#[derive(PartialEq)]
struct OnlyEq {
    field: i32,
}

#[test]
fn test_round_trip() {
    let v = variant!(10);
    assert_eq!(v.value::<i32>(), Ok(10));
    assert_eq!(v.value_ref::<i32>(), Ok(&10));

    let v = variant!(String::from("hello"));
    assert_eq!(v.value::<String>(), Ok(String::from("hello")));

    let v = variant!(3.25f64);
    assert_eq!(v.value::<f64>(), Ok(3.25));
}

#[test]
fn test_lifecycle() {
    let mut v = Variant::empty();
    assert!(v.is_empty());
    assert!(!v.has_value());

    v.set(10);
    assert!(!v.is_empty());
    assert!(v.has_value());

    v.clear();
    assert!(v.is_empty());
    assert_eq!(v.type_id(), None);
    assert_eq!(v.type_name(), None);
    assert_eq!(v.strong_count(), None);
}

#[test]
fn test_default_is_empty() {
    assert!(Variant::default().is_empty());
}

#[test]
fn test_lenient_retrieval_forgives_emptiness() {
    let v = Variant::empty();
    assert_eq!(v.value::<i32>(), Ok(0));
    assert_eq!(v.value::<String>(), Ok(String::new()));
}

#[test]
fn test_strict_retrieval_fails_on_empty() {
    let v = Variant::empty();
    assert_eq!(
        v.value_ref::<i32>(),
        Err(VariantError::TypeMismatch {
            expected: std::any::type_name::<i32>(),
            found: None,
        })
    );
}

#[test]
fn test_retrieval_fails_on_wrong_type() {
    let v = variant!(10);

    // Lenient retrieval forgives emptiness, never type mismatch
    assert_eq!(
        v.value::<f32>(),
        Err(VariantError::TypeMismatch {
            expected: std::any::type_name::<f32>(),
            found: Some(std::any::type_name::<i32>()),
        })
    );
    assert!(v.value_ref::<f32>().is_err());
}

#[test]
fn test_try_value() {
    let v = variant!(10);
    assert_eq!(v.try_value::<i32>(), Some(&10));
    assert_eq!(v.try_value::<f32>(), None);
    assert_eq!(Variant::empty().try_value::<i32>(), None);
}

#[test]
fn test_is_type_exactness() {
    let v = variant!(10);
    assert!(v.is_type::<i32>());
    assert!(!v.is_type::<f32>());
    assert!(!v.is_type::<u32>());
    assert!(!Variant::empty().is_type::<i32>());
}

#[test]
fn test_from_value() {
    let v = Variant::from_value(42);
    assert_eq!(v.value_ref::<i32>(), Ok(&42));
}

#[test]
fn test_clone_shares_then_diverges() {
    let a = variant!(10);
    let mut b = a.clone();

    assert_eq!(a.try_eq(&b), Ok(true));
    assert_eq!(a.strong_count(), Some(2));
    assert_eq!(b.strong_count(), Some(2));

    // Reassigning `b` redirects only `b`'s slot
    b.set(20);
    assert_eq!(a.value_ref::<i32>(), Ok(&10));
    assert_eq!(b.value_ref::<i32>(), Ok(&20));
    assert_eq!(a.strong_count(), Some(1));
    assert_eq!(b.strong_count(), Some(1));
    assert_eq!(a.try_eq(&b), Ok(false));
}

#[test]
fn test_clear_releases_shared_reference() {
    let a = variant!(10);
    let mut b = a.clone();
    assert_eq!(a.strong_count(), Some(2));

    b.clear();
    assert_eq!(a.strong_count(), Some(1));
    assert_eq!(a.value_ref::<i32>(), Ok(&10));
}

#[test]
fn test_int_ordering() {
    let zero = variant!(0);
    let ten = variant!(10);

    assert_eq!(zero.try_lt(&ten), Ok(true));
    assert_eq!(ten.try_gt(&zero), Ok(true));
    assert_eq!(ten.try_lt(&zero), Ok(false));
    assert_eq!(ten.try_eq(&zero), Ok(false));
    assert_eq!(ten.try_ne(&zero), Ok(true));
}

#[test]
fn test_negation_based_le_ge() {
    let one = variant!(1);
    let two = variant!(2);

    // `a <= b` is defined as `!(a < b)`, so it behaves like `>=` for totally
    // ordered types
    assert_eq!(one.try_le(&two), Ok(false));
    assert_eq!(two.try_le(&one), Ok(true));
    assert_eq!(one.try_le(&one), Ok(true));

    // `a >= b` is defined as `!(b < a)`
    assert_eq!(one.try_ge(&two), Ok(true));
    assert_eq!(two.try_ge(&one), Ok(false));
    assert_eq!(one.try_ge(&one), Ok(true));
}

#[test]
fn test_cross_type_comparison_is_an_error() {
    let int = variant!(10);
    let float = variant!(10.0);

    let expected = Err(VariantError::IncompatibleTypes {
        left: std::any::type_name::<i32>(),
        right: std::any::type_name::<f64>(),
    });

    // Both equality and ordering fail across types
    assert_eq!(int.try_eq(&float), expected);
    assert_eq!(int.try_ne(&float), expected);
    assert_eq!(int.try_lt(&float), expected);
    assert_eq!(int.try_le(&float), expected);
    assert_eq!(int.try_ge(&float), expected);

    // The swapped-operand derivations report the operands as dispatched
    assert_eq!(
        int.try_gt(&float),
        Err(VariantError::IncompatibleTypes {
            left: std::any::type_name::<f64>(),
            right: std::any::type_name::<i32>(),
        })
    );
}

#[test]
fn test_operator_less_type_fails_both_operators() {
    let a = variant!(Foo { field: 10 });
    let b = variant!(Foo { field: 20 });

    assert_eq!(a.value_ref::<Foo>().map(|foo| foo.field), Ok(10));

    assert_eq!(
        a.try_eq(&b),
        Err(VariantError::OperatorUnsupported {
            operator: Operator::Eq,
            type_name: std::any::type_name::<Foo>(),
        })
    );
    assert_eq!(
        a.try_ne(&b),
        Err(VariantError::OperatorUnsupported {
            operator: Operator::Eq,
            type_name: std::any::type_name::<Foo>(),
        })
    );
    assert_eq!(
        a.try_lt(&b),
        Err(VariantError::OperatorUnsupported {
            operator: Operator::Lt,
            type_name: std::any::type_name::<Foo>(),
        })
    );
}

#[test]
fn test_equality_only_type() {
    let a = variant!(OnlyEq { field: 10 });
    let b = variant!(OnlyEq { field: 10 });
    let c = variant!(OnlyEq { field: 20 });

    assert_eq!(a.try_eq(&b), Ok(true));
    assert_eq!(a.try_eq(&c), Ok(false));
    assert_eq!(a.try_ne(&c), Ok(true));

    assert_eq!(
        a.try_lt(&b),
        Err(VariantError::OperatorUnsupported {
            operator: Operator::Lt,
            type_name: std::any::type_name::<OnlyEq>(),
        })
    );
}

#[test]
fn test_shared_handle_type() {
    let a: Variant = variant!(None::<Arc<i32>>);
    let b: Variant = variant!(None::<Arc<i32>>);

    // Two empty handles compare equal and neither is less than the other
    assert_eq!(a.try_eq(&b), Ok(true));
    assert_eq!(a.try_lt(&b), Ok(false));

    let c = variant!(Some(Arc::new(5)));
    assert_eq!(a.try_eq(&c), Ok(false));
    // `None` orders before `Some`
    assert_eq!(a.try_lt(&c), Ok(true));
}

#[test]
fn test_empty_container_comparisons() {
    let empty_a = Variant::empty();
    let empty_b = Variant::empty();
    let value = variant!(10);

    assert_eq!(empty_a.try_eq(&empty_b), Ok(true));
    assert_eq!(empty_a.try_ne(&empty_b), Ok(false));
    assert_eq!(empty_a.try_eq(&value), Ok(false));
    assert_eq!(value.try_eq(&empty_a), Ok(false));

    // Empty orders before any value and not before another empty
    assert_eq!(empty_a.try_lt(&value), Ok(true));
    assert_eq!(value.try_lt(&empty_a), Ok(false));
    assert_eq!(empty_a.try_lt(&empty_b), Ok(false));
    assert_eq!(value.try_gt(&empty_a), Ok(true));

    // The negation-based derivations apply to empties too
    assert_eq!(empty_a.try_le(&value), Ok(false));
    assert_eq!(empty_a.try_ge(&value), Ok(false));
    assert_eq!(empty_a.try_le(&empty_b), Ok(true));
    assert_eq!(empty_a.try_ge(&empty_b), Ok(true));
}

#[test]
fn test_identity_modes_agree() {
    let int = variant!(10);
    let other_int = variant!(20);
    let float = variant!(10.0);

    for mode in [IdentityMode::Named, IdentityMode::Interned] {
        assert_eq!(int.try_eq_in(&other_int, mode), Ok(false));
        assert_eq!(int.try_lt_in(&other_int, mode), Ok(true));
        assert!(matches!(
            int.try_eq_in(&float, mode),
            Err(VariantError::IncompatibleTypes { .. })
        ));
        assert!(matches!(
            int.try_lt_in(&float, mode),
            Err(VariantError::IncompatibleTypes { .. })
        ));
    }

    assert_eq!(IdentityMode::default(), IdentityMode::Named);
}

#[test]
fn test_custom_handler_disables_operators() {
    // An ordered type stored with the Opaque handler loses its operators
    let a = Variant::new_custom::<handlers::Opaque, _>(10);
    let b = Variant::new_custom::<handlers::Opaque, _>(10);

    assert_eq!(a.value_ref::<i32>(), Ok(&10));
    assert!(matches!(
        a.try_eq(&b),
        Err(VariantError::OperatorUnsupported {
            operator: Operator::Eq,
            ..
        })
    ));

    // Equatable keeps equality but not ordering
    let a = Variant::new_custom::<handlers::Equatable, _>(10);
    let b = Variant::new_custom::<handlers::Equatable, _>(10);
    assert_eq!(a.try_eq(&b), Ok(true));
    assert!(matches!(
        a.try_lt(&b),
        Err(VariantError::OperatorUnsupported {
            operator: Operator::Lt,
            ..
        })
    ));
}

#[test]
fn test_handler_survives_reassignment() {
    let mut v = variant!(10);
    v.set_custom::<handlers::Opaque, _>(20);

    let w = variant!(20);
    assert!(v.try_eq(&w).is_err());
    assert_eq!(v.value_ref::<i32>(), Ok(&20));
}

#[test]
fn test_handlers_of_both_sides_must_match_types_not_handlers() {
    // The left-hand cell's handler drives the comparison; the right-hand cell
    // only needs to hold the same type
    let ordered = variant!(10);
    let opaque = Variant::new_custom::<handlers::Opaque, _>(20);

    assert_eq!(ordered.try_lt(&opaque), Ok(true));
    assert!(opaque.try_lt(&ordered).is_err());
}

#[test]
fn test_try_value_mut_unique_vs_shared() {
    let mut v = variant!(10);

    // Unique ownership: mutation allowed
    if let Some(value) = v.try_value_mut::<i32>() {
        *value = 11;
    }
    assert_eq!(v.value_ref::<i32>(), Ok(&11));

    // Wrong type: denied
    assert_eq!(v.try_value_mut::<f32>(), None);

    // Shared cell: denied until the other reference goes away
    let shared = v.clone();
    assert_eq!(v.try_value_mut::<i32>(), None);
    drop(shared);
    assert_eq!(v.try_value_mut::<i32>(), Some(&mut 11));

    // Empty container: denied
    let mut empty = Variant::empty();
    assert_eq!(empty.try_value_mut::<i32>(), None);
}

#[test]
fn test_type_identity_queries() {
    let v = variant!(10);
    assert_eq!(v.type_id(), Some(std::any::TypeId::of::<i32>()));
    assert_eq!(v.type_name(), Some(std::any::type_name::<i32>()));
}

#[test]
fn test_debug_format() {
    let v = variant!(10);
    assert_eq!(format!("{v:?}"), format!("Variant({})", std::any::type_name::<i32>()));
    assert_eq!(format!("{:?}", Variant::empty()), "Variant(empty)");
}

#[test]
fn test_error_messages() {
    let int = variant!(10);
    let float = variant!(10.0);

    let error = int.try_eq(&float).unwrap_err();
    let message = error.to_string();
    assert!(message.contains("different types"));

    let foo = variant!(Foo { field: 1 });
    let error = foo.try_eq(&foo).unwrap_err();
    assert!(error.to_string().contains("not supported"));
}

#[test]
fn test_macro_accepts_trailing_comma() {
    let v = variant!(10,);
    assert_eq!(v.value_ref::<i32>(), Ok(&10));
}

#[test]
fn test_send_sync() {
    static_assertions::assert_not_impl_any!(Variant: Send, Sync);
}
