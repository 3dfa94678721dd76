//! Keyword bindings on compiled schema nodes.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ResultError;
use crate::keyword::CustomKeyword;
use crate::path::JsonPath;

/// A custom keyword handler paired with the value it was declared with at
/// one schema node.
///
/// Bindings are created once, while compiling, after the handler accepted
/// the declaration. They are read-only afterwards and live as long as the
/// compiled schema.
#[derive(Clone)]
pub struct KeywordBinding {
    handler: Arc<dyn CustomKeyword>,
    value: Value,
}

impl KeywordBinding {
    pub(crate) fn new(handler: Arc<dyn CustomKeyword>, value: Value) -> Self {
        Self { handler, value }
    }

    /// The bound keyword's name.
    pub fn keyword(&self) -> &str {
        self.handler.keyword()
    }

    /// The declared keyword value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Runs the handler's value check against `instance`.
    ///
    /// On failure the handler's error is rendered and located at `path`,
    /// carrying a copy of the offending value.
    pub fn check(&self, instance: &Value, path: &JsonPath) -> Option<ResultError> {
        match self.handler.check_value(&self.value, instance) {
            Ok(()) => None,
            Err(error) => {
                tracing::trace!(
                    keyword = self.keyword(),
                    path = %path.to_pointer(),
                    "custom keyword rejected value"
                );
                Some(ResultError::from_custom(error, path.clone(), instance.clone()))
            }
        }
    }
}

impl fmt::Debug for KeywordBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordBinding")
            .field("keyword", &self.keyword())
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CustomKeywordError, DeclarationError};
    use serde_json::json;

    struct NotEqual;

    impl CustomKeyword for NotEqual {
        fn keyword(&self) -> &str {
            "not"
        }

        fn validate_declaration(&self, _keyword_value: &Value) -> Result<(), DeclarationError> {
            Ok(())
        }

        fn check_value(
            &self,
            keyword_value: &Value,
            instance: &Value,
        ) -> Result<(), CustomKeywordError> {
            if keyword_value == instance {
                Err(CustomKeywordError::new("not", "must not be {{.forbidden}}")
                    .with_detail("forbidden", keyword_value.clone()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_check_passes() {
        let binding = KeywordBinding::new(Arc::new(NotEqual), json!("x"));
        assert!(binding.check(&json!("y"), &JsonPath::root()).is_none());
    }

    #[test]
    fn test_check_locates_failure() {
        let binding = KeywordBinding::new(Arc::new(NotEqual), json!("x"));
        let path = JsonPath::root().push_field("name");

        let error = binding.check(&json!("x"), &path).unwrap();

        assert_eq!(error.keyword, "not");
        assert_eq!(error.message, "must not be x");
        assert_eq!(error.path, path);
        assert_eq!(error.value, json!("x"));
    }

    #[test]
    fn test_debug_names_keyword() {
        let binding = KeywordBinding::new(Arc::new(NotEqual), json!(1));
        let debug = format!("{:?}", binding);
        assert!(debug.contains("\"not\""));
    }
}
