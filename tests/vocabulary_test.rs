//! Tests for the base keywords evaluated alongside custom keywords.

use addendum::{CompileError, SchemaLoader};
use serde_json::json;
use stillwater::Validation;

#[test]
fn test_type_keyword() {
    let schema = SchemaLoader::new()
        .compile(&json!({"type": ["string", "null"]}))
        .unwrap();

    assert!(schema.is_valid(&json!("x")));
    assert!(schema.is_valid(&json!(null)));

    let Validation::Failure(errors) = schema.validate(&json!(3)) else {
        panic!("expected failure");
    };
    assert_eq!(errors.first().keyword, "type");
    assert_eq!(errors.first().message, "expected string or null, given integer");
}

#[test]
fn test_integer_is_number() {
    let schema = SchemaLoader::new()
        .compile(&json!({"type": "number"}))
        .unwrap();

    assert!(schema.is_valid(&json!(3)));
    assert!(schema.is_valid(&json!(3.5)));
    assert!(!schema.is_valid(&json!("3")));
}

#[test]
fn test_required_and_additional_properties() {
    let schema = SchemaLoader::new()
        .compile(&json!({
            "properties": {"name": {"type": "string"}},
            "required": ["name", "id"],
            "additionalProperties": false
        }))
        .unwrap();

    let Validation::Failure(errors) = schema.validate(&json!({"extra": 1})) else {
        panic!("expected failure");
    };
    assert_eq!(errors.len(), 3);

    let required: Vec<&str> = errors
        .with_keyword("required")
        .iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(required, vec!["name is required", "id is required"]);

    let additional = errors.with_keyword("additionalProperties");
    assert_eq!(additional.len(), 1);
    assert_eq!(additional[0].path.to_pointer(), "/extra");
    assert_eq!(additional[0].message, "additional property extra is not allowed");
}

#[test]
fn test_additional_properties_schema() {
    let schema = SchemaLoader::new()
        .compile(&json!({"additionalProperties": {"type": "integer"}}))
        .unwrap();

    assert!(schema.is_valid(&json!({"a": 1, "b": 2})));
    assert!(!schema.is_valid(&json!({"a": 1, "b": "two"})));
}

#[test]
fn test_boolean_schemas() {
    let schema = SchemaLoader::new()
        .compile(&json!({"properties": {"never": false, "anything": true}}))
        .unwrap();

    assert!(schema.is_valid(&json!({"anything": [1, {}]})));

    let Validation::Failure(errors) = schema.validate(&json!({"never": 1})) else {
        panic!("expected failure");
    };
    assert_eq!(errors.first().keyword, "false");
    assert_eq!(errors.first().path.to_pointer(), "/never");
}

#[test]
fn test_unknown_keywords_are_annotations() {
    let schema = SchemaLoader::new()
        .compile(&json!({"title": "anything", "x-vendor": {"a": 1}}))
        .unwrap();

    assert!(schema.is_valid(&json!(42)));
}

#[test]
fn test_malformed_base_keywords() {
    let loader = SchemaLoader::new();

    let cases = [
        (json!({"type": []}), "type"),
        (json!({"type": 5}), "type"),
        (json!({"required": "name"}), "required"),
        (json!({"required": [1]}), "required"),
        (json!({"properties": []}), "properties"),
        (json!({"$defs": 1}), "$defs"),
        (json!({"$ref": 1}), "$ref"),
    ];

    for (document, expected) in cases {
        match loader.compile(&document) {
            Err(CompileError::InvalidKeyword { keyword, .. }) => assert_eq!(keyword, expected),
            other => panic!("unexpected result for {}: {:?}", document, other.err()),
        }
    }
}
