#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

//! Property-based tests for the intake form engine:
//! validators, schema builders, the form state controller and coercion.

use intake::{
    email, new_options, positive_number, FieldSchema, FieldValue, FormController, FormValues,
    Schema, SelectOption,
};
use proptest::prelude::*;

// =============================================================================
// Validator properties
// =============================================================================

proptest! {
    #[test]
    fn email_accepts_simple_addresses(
        local in "[a-z0-9]{1,10}",
        domain in "[a-z0-9]{1,10}",
        tld in "[a-z]{2,6}",
    ) {
        let value = FieldValue::Text(format!("{local}@{domain}.{tld}"));
        prop_assert!(email(&value).is_none());
    }

    #[test]
    fn email_rejects_at_free_text(s in "[a-z0-9][a-z0-9 ]{0,19}") {
        let value = FieldValue::Text(s);
        prop_assert!(email(&value).is_some());
    }

    #[test]
    fn email_passes_empty_values(s in "\\s{0,5}") {
        // Presence is `required`'s job, not the format rule's.
        prop_assert!(email(&FieldValue::Text(s)).is_none());
        prop_assert!(email(&FieldValue::Empty).is_none());
    }

    #[test]
    fn positive_number_matches_sign(n in -1000.0f64..1000.0) {
        let verdict = positive_number(&FieldValue::Number(n));
        prop_assert_eq!(verdict.is_none(), n > 0.0);
    }

    #[test]
    fn validators_never_panic(s in "\\PC{0,100}") {
        let value = FieldValue::Text(s);
        let _ = email(&value);
        let _ = intake::non_blank(&value);
        let _ = positive_number(&value);
    }
}

// =============================================================================
// Schema builder properties
// =============================================================================

proptest! {
    #[test]
    fn field_builder_never_panics(
        name in "[a-zA-Z][a-zA-Z0-9_]{0,20}",
        label in "\\PC{0,30}",
        placeholder in "\\PC{0,30}",
        required in any::<bool>(),
    ) {
        let field = FieldSchema::text(name.clone())
            .label(label)
            .placeholder(placeholder)
            .required(required);
        prop_assert_eq!(field.name, name);
    }

    #[test]
    fn unique_names_always_build(names in prop::collection::hash_set("[a-z]{1,8}", 1..=8)) {
        let fields: Vec<FieldSchema> = names.iter().map(FieldSchema::text).collect();
        let schema = Schema::new(fields).expect("unique names must be accepted");
        prop_assert_eq!(schema.len(), names.len());
    }

    #[test]
    fn duplicate_names_always_rejected(name in "[a-z]{1,8}") {
        let result = Schema::new(vec![
            FieldSchema::text(name.clone()),
            FieldSchema::number(name),
        ]);
        prop_assert!(result.is_err());
    }

    #[test]
    fn new_options_creates_correct_count(
        labels in prop::collection::vec("[a-zA-Z]{1,10}", 1..=10),
    ) {
        let options = new_options(labels.clone());
        prop_assert_eq!(options.len(), labels.len());
        for (opt, label) in options.iter().zip(labels.iter()) {
            prop_assert_eq!(&opt.label, label);
            prop_assert_eq!(&opt.value, label);
        }
    }
}

// =============================================================================
// Controller lifecycle properties
// =============================================================================

fn schema() -> Schema {
    Schema::new(vec![
        FieldSchema::text("name").required(true),
        FieldSchema::number("price").min(0.0),
        FieldSchema::select("category").options(vec![
            SelectOption::new("A", "a"),
            SelectOption::new("B", "b"),
        ]),
    ])
    .expect("valid schema")
}

proptest! {
    #[test]
    fn required_tracks_blankness(s in "\\PC{0,30}") {
        let mut controller = FormController::new(schema(), FormValues::new());
        controller.set_value("name", s.clone());
        controller.validate();
        prop_assert_eq!(controller.error("name").is_some(), s.trim().is_empty());
    }

    #[test]
    fn min_bound_tracks_comparison(n in -1000.0f64..1000.0) {
        let mut controller = FormController::new(schema(), FormValues::new());
        controller.set_value("name", "x");
        controller.set_value("price", n);
        controller.validate();
        prop_assert_eq!(controller.error("price").is_some(), n < 0.0);
    }

    #[test]
    fn reset_always_restores_defaults(
        default_name in "\\PC{0,20}",
        typed in "\\PC{0,20}",
        price in -100.0f64..100.0,
    ) {
        let defaults = FormValues::new().with("name", default_name.clone());
        let mut controller = FormController::new(schema(), defaults);

        controller.set_value("name", typed);
        controller.set_value("price", price);
        controller.validate();
        controller.reset();

        prop_assert_eq!(controller.values().get_str("name"), Some(default_name.as_str()));
        prop_assert_eq!(controller.value("price"), Some(&FieldValue::Empty));
        prop_assert!(controller.errors().is_empty());
    }

    #[test]
    fn hydration_always_wins(before in "\\PC{0,20}", after in "\\PC{0,20}") {
        let mut controller = FormController::new(schema(), FormValues::new());
        controller.set_value("name", before);
        controller.hydrate(&FormValues::new().with("name", after.clone()));
        prop_assert_eq!(controller.values().get_str("name"), Some(after.as_str()));
    }

    #[test]
    fn late_options_never_clobber(value in "[a-z]{1,6}", count in 1usize..=10) {
        let mut controller = FormController::new(schema(), FormValues::new());
        controller.set_value("category", value.clone());
        let options = (0..count)
            .map(|i| SelectOption::new(format!("Option {i}"), format!("{i}")))
            .collect();
        controller.set_options("category", options);
        prop_assert_eq!(controller.values().get_str("category"), Some(value.as_str()));
    }

    #[test]
    fn validate_is_deterministic(s in "\\PC{0,20}", n in -50.0f64..50.0) {
        let mut controller = FormController::new(schema(), FormValues::new());
        controller.set_value("name", s);
        controller.set_value("price", n);
        let first = controller.validate().clone();
        let second = controller.validate().clone();
        prop_assert_eq!(first, second);
    }
}

// =============================================================================
// Value object properties
// =============================================================================

proptest! {
    #[test]
    fn merge_prefers_other(a in "\\PC{0,20}", b in "\\PC{0,20}") {
        let mut values = FormValues::new().with("k", a);
        values.merge(&FormValues::new().with("k", b.clone()));
        prop_assert_eq!(values.get_str("k"), Some(b.as_str()));
    }

    #[test]
    fn text_values_roundtrip(s in "\\PC{0,100}") {
        let values = FormValues::new().with("k", s.clone());
        prop_assert_eq!(values.get_str("k"), Some(s.as_str()));
    }

    #[test]
    fn blank_text_counts_as_empty(s in "\\s{0,10}") {
        prop_assert!(FieldValue::Text(s).is_empty());
        prop_assert!(!FieldValue::Bool(false).is_empty());
        prop_assert!(!FieldValue::Number(0.0).is_empty());
    }
}
