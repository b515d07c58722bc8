//! Integration tests for record normalization.

use salvage::{Allow, JsonPath, Normalize, NormalizeOptions, RecordNormalizer, Schema, Validator};
use serde_json::{json, Value};

fn value_schema() -> salvage::ObjectSchema {
    Schema::object().field("value", Schema::number())
}

#[test]
fn test_valid_record_is_returned() {
    let normalizer = Normalize::record(value_schema());
    assert_eq!(
        normalizer.normalize(Some(&json!({"value": 42}))),
        Some(json!({"value": 42}))
    );
}

#[test]
fn test_non_object_becomes_null() {
    let normalizer = Normalize::record(value_schema());
    assert_eq!(
        normalizer.normalize(Some(&json!("not-an-object"))),
        Some(Value::Null)
    );
}

#[test]
fn test_absent_replaced_when_not_preserved() {
    let normalizer = Normalize::record(value_schema())
        .fallback(json!("X"))
        .preserve(false)
        .allow(Allow::Nullish);

    assert_eq!(normalizer.normalize(None), Some(json!("X")));
    assert_eq!(normalizer.normalize(Some(&json!(null))), Some(json!("X")));
}

#[test]
fn test_arrays_are_not_records() {
    let normalizer = Normalize::record(Schema::object()).fallback(json!({}));
    assert_eq!(normalizer.normalize(Some(&json!([1, 2]))), Some(json!({})));
}

#[test]
fn test_failure_never_leaks_partial_record() {
    let normalizer = Normalize::record(
        Schema::object()
            .field("id", Schema::number().integer())
            .field("name", Schema::string().min_len(1)),
    )
    .fallback(json!({"id": 0, "name": "unknown"}));

    // id is fine, name is not: the whole record is replaced
    assert_eq!(
        normalizer.normalize(Some(&json!({"id": 7, "name": ""}))),
        Some(json!({"id": 0, "name": "unknown"}))
    );
}

#[test]
fn test_nested_field_normalizers_default_individually() {
    let address = Normalize::record(
        Schema::object()
            .field("city", Schema::string())
            .field("zip", Schema::string().coerce()),
    );
    let user = Normalize::record(
        Schema::object()
            .field("name", Schema::string())
            .field("address", address),
    )
    .fallback(json!("invalid user"));

    // the inner record absorbs its own failure, so the outer one succeeds
    assert_eq!(
        user.normalize(Some(&json!({"name": "Ada", "address": "somewhere"}))),
        Some(json!({"name": "Ada", "address": null}))
    );

    // coercion inside the nested record is kept
    assert_eq!(
        user.normalize(Some(&json!({"name": "Ada", "address": {"city": "Paris", "zip": 75001}}))),
        Some(json!({"name": "Ada", "address": {"city": "Paris", "zip": "75001"}}))
    );

    // a missing nested field passes through as absent and stays out of the output
    assert_eq!(
        user.normalize(Some(&json!({"name": "Ada"}))),
        Some(json!({"name": "Ada"}))
    );

    // the outer fallback still covers its own fields
    assert_eq!(
        user.normalize(Some(&json!({"name": 1, "address": null}))),
        Some(json!("invalid user"))
    );
}

#[test]
fn test_nested_field_with_disallowed_absent() {
    let settings = Normalize::record(Schema::object())
        .allow(Allow::Nullable)
        .fallback(json!({}));
    let config = Normalize::record(Schema::object().field("settings", settings));

    assert_eq!(
        config.normalize(Some(&json!({}))),
        Some(json!({"settings": {}}))
    );
    assert_eq!(
        config.normalize(Some(&json!({"settings": null}))),
        Some(json!({"settings": null}))
    );
}

#[test]
fn test_options_form_matches_builder_form() {
    let built = Normalize::record(value_schema())
        .fallback(json!(-1))
        .allow(Allow::Nullable)
        .preserve(false);
    let configured = Normalize::record_with(
        value_schema(),
        NormalizeOptions::new()
            .fallback(json!(-1))
            .allow(Allow::Nullable)
            .preserve(false),
    );

    for input in [None, Some(json!(null)), Some(json!("x")), Some(json!({"value": 3}))] {
        assert_eq!(
            built.normalize(input.as_ref()),
            configured.normalize(input.as_ref()),
            "input {:?}",
            input
        );
    }
}

#[test]
fn test_options_from_json() {
    let options = NormalizeOptions::from_json(&json!({
        "fallback": {"value": 0},
        "allow": "none"
    }))
    .unwrap();
    let normalizer = RecordNormalizer::with_options(value_schema(), options);

    assert_eq!(normalizer.normalize(None), Some(json!({"value": 0})));
    assert_eq!(normalizer.normalize(Some(&json!(null))), Some(json!({"value": 0})));
}

#[test]
fn test_record_as_validator_flags_wrong_shape() {
    let normalizer = Normalize::record(value_schema());
    let checked = normalizer
        .check(Some(&json!(5)), &JsonPath::root().push_field("order"))
        .into_result()
        .unwrap();
    assert!(checked.substituted);
    assert_eq!(checked.value, Some(Value::Null));
}
