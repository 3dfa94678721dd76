//! Tests for keyword registration on schema loaders.

use addendum::{
    CustomKeyword, CustomKeywordError, DeclarationError, KeywordRegistry, RangeKeyword,
    RegistryError, SchemaLoader,
};
use serde_json::{json, Value};
use std::sync::Arc;

struct Always(&'static str);

impl CustomKeyword for Always {
    fn keyword(&self) -> &str {
        self.0
    }

    fn validate_declaration(&self, _keyword_value: &Value) -> Result<(), DeclarationError> {
        Ok(())
    }

    fn check_value(
        &self,
        _keyword_value: &Value,
        _instance: &Value,
    ) -> Result<(), CustomKeywordError> {
        Err(CustomKeywordError::new(self.0, "always fails"))
    }
}

#[test]
fn test_register_and_get() {
    let registry = KeywordRegistry::new();

    registry.register(RangeKeyword::new()).unwrap();

    assert!(registry.get("range").is_some());
    assert!(registry.get("missing").is_none());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_duplicate_registration_fails() {
    let loader = SchemaLoader::new();

    loader.register(RangeKeyword::new()).unwrap();

    let result = loader.register(Always("range"));
    assert_eq!(
        result,
        Err(RegistryError::DuplicateKeyword("range".to_string()))
    );
}

#[test]
fn test_duplicate_registration_keeps_first_handler() {
    let loader = SchemaLoader::new();
    loader.register(RangeKeyword::new()).unwrap();
    let _ = loader.register(Always("range"));

    let schema = loader.compile(&json!({"range": [1, 10]})).unwrap();

    // `Always` would reject 5; the range handler accepts it.
    assert!(schema.is_valid(&json!(5)));
}

#[test]
fn test_base_vocabulary_is_reserved() {
    let loader = SchemaLoader::new();

    for name in ["properties", "type", "required", "minimum", "$ref"] {
        assert_eq!(
            loader.register(Always(name)),
            Err(RegistryError::ReservedKeyword(name.to_string()))
        );
    }
    assert!(loader.registry().is_empty());
}

#[test]
fn test_empty_keyword_rejected() {
    let loader = SchemaLoader::new();
    assert_eq!(loader.register(Always("")), Err(RegistryError::EmptyKeyword));
}

#[test]
fn test_register_after_compile_fails() {
    let loader = SchemaLoader::new();
    loader.register(RangeKeyword::new()).unwrap();
    let schema = loader.compile(&json!({"always": true})).unwrap();

    let error = loader.register(Always("always")).unwrap_err();
    assert_eq!(
        error.to_string(),
        "cannot register keyword 'always' after schema compilation has started"
    );
    assert!(schema.is_valid(&json!(1)));
}

#[test]
fn test_shared_handler_across_loaders() {
    let handler: Arc<dyn CustomKeyword> = Arc::new(RangeKeyword::named("between"));

    let first = SchemaLoader::new();
    let second = SchemaLoader::new();
    first.register_shared(Arc::clone(&handler)).unwrap();
    second.register_shared(handler).unwrap();

    let document = json!({"between": [0, 1]});
    assert!(!first.compile(&document).unwrap().is_valid(&json!(2)));
    assert!(!second.compile(&document).unwrap().is_valid(&json!(2)));
}

#[test]
fn test_keywords_listed_in_registration_order() {
    let loader = SchemaLoader::new();
    loader.register(Always("zeta")).unwrap();
    loader.register(RangeKeyword::new()).unwrap();
    loader.register(Always("alpha")).unwrap();

    assert_eq!(loader.registry().keywords(), vec!["zeta", "range", "alpha"]);
}

#[test]
fn test_registry_error_messages() {
    assert_eq!(
        RegistryError::DuplicateKeyword("range".to_string()).to_string(),
        "keyword 'range' already registered"
    );
    assert_eq!(
        RegistryError::ReservedKeyword("type".to_string()).to_string(),
        "keyword 'type' is part of the base vocabulary"
    );
}
