//! The custom keyword capability.
//!
//! A custom keyword adds a named property to the schema vocabulary. It takes
//! part in two phases:
//!
//! 1. **Compilation.** Wherever the keyword appears in a schema node, the
//!    compiler calls [`CustomKeyword::validate_declaration`] with the value the
//!    schema author wrote. This happens eagerly, once per occurrence, before
//!    the node's children are compiled. The first rejection aborts the whole
//!    build and its message is returned to the caller as-is.
//! 2. **Validation.** For every document node visited at a schema position
//!    that declared the keyword, the validator calls
//!    [`CustomKeyword::check_value`] exactly once. A returned error becomes one
//!    [`ResultError`](crate::ResultError) located at that document node.
//!
//! # Example
//!
//! ```rust
//! use addendum::{CustomKeyword, CustomKeywordError, DeclarationError, SchemaLoader};
//! use serde_json::{json, Value};
//!
//! struct EvenNumber;
//!
//! impl CustomKeyword for EvenNumber {
//!     fn keyword(&self) -> &str {
//!         "even"
//!     }
//!
//!     fn validate_declaration(&self, keyword_value: &Value) -> Result<(), DeclarationError> {
//!         match keyword_value {
//!             Value::Bool(true) => Ok(()),
//!             _ => Err(DeclarationError::new("even must be set to true")),
//!         }
//!     }
//!
//!     fn check_value(
//!         &self,
//!         _keyword_value: &Value,
//!         instance: &Value,
//!     ) -> Result<(), CustomKeywordError> {
//!         match instance.as_i64() {
//!             Some(n) if n % 2 != 0 => {
//!                 Err(CustomKeywordError::new("even", "{{.value}} is not even")
//!                     .with_detail("value", n))
//!             }
//!             _ => Ok(()),
//!         }
//!     }
//! }
//!
//! let loader = SchemaLoader::new();
//! loader.register(EvenNumber).unwrap();
//! let schema = loader.compile(&json!({"even": true})).unwrap();
//!
//! assert!(schema.is_valid(&json!(4)));
//! assert!(!schema.is_valid(&json!(3)));
//! ```

mod binding;
mod decimal;
mod range;

pub use binding::KeywordBinding;
pub use range::RangeKeyword;

use serde_json::Value;

use crate::error::{CustomKeywordError, DeclarationError};

/// A handler for one custom schema keyword.
///
/// Handlers are shared by every schema compiled from the loader they were
/// registered with, and may be called from several threads at once. They
/// must not keep mutable state between calls; any caching has to be
/// internally synchronized.
///
/// Keyword values and instance values are borrowed from the compiled schema
/// and the document. Handlers never modify them.
pub trait CustomKeyword: Send + Sync {
    /// The keyword's name. Must be non-empty and stable.
    fn keyword(&self) -> &str;

    /// Checks the shape of the value the keyword was declared with.
    ///
    /// The returned error's message is shown to whoever tried to compile the
    /// schema, unchanged, so it must stand on its own.
    fn validate_declaration(&self, keyword_value: &Value) -> Result<(), DeclarationError>;

    /// Checks one document value against the declared keyword value.
    ///
    /// `keyword_value` has already passed
    /// [`validate_declaration`](Self::validate_declaration). Returning `Err`
    /// records exactly one violation, whether or not it carries details.
    fn check_value(
        &self,
        keyword_value: &Value,
        instance: &Value,
    ) -> Result<(), CustomKeywordError>;
}
