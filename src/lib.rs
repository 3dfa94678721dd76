//! # Addendum
//!
//! Custom keywords for JSON Schema validation.
//!
//! ## Overview
//!
//! Addendum lets you add your own keywords to the schema vocabulary. A
//! keyword handler takes part in both phases of validation:
//!
//! - while a schema is **compiled**, it checks that each declaration of the
//!   keyword is well formed, and a bad declaration aborts the build with the
//!   handler's own message;
//! - while a document is **validated**, it checks each document value the
//!   keyword applies to, and reports violations as templated errors that are
//!   accumulated with every other violation in the document.
//!
//! Keywords are registered per [`SchemaLoader`], never globally, so
//! independent loaders with different keywords do not interfere.
//!
//! ## Core Types
//!
//! - [`CustomKeyword`]: The capability a keyword handler implements
//! - [`CustomKeywordError`] / [`ErrorDetails`]: A handler's templated violation
//! - [`KeywordBinding`]: A handler bound to its declared value at one schema node
//! - [`KeywordRegistry`]: Per-loader handler storage
//! - [`SchemaLoader`] / [`Schema`]: Compilation and validation
//! - [`ResultError`] / [`ResultErrors`]: Located violations in a result
//!
//! ## Example
//!
//! ```rust
//! use addendum::{RangeKeyword, SchemaLoader};
//! use serde_json::json;
//! use stillwater::Validation;
//!
//! let loader = SchemaLoader::new();
//! loader.register(RangeKeyword::new()).unwrap();
//!
//! let schema = loader.compile(&json!({
//!     "properties": {"num": {"type": "number", "range": [10, 20]}}
//! })).unwrap();
//!
//! match schema.validate(&json!({"num": 1})) {
//!     Validation::Failure(errors) => {
//!         let error = errors.first();
//!         assert_eq!(error.keyword, "range");
//!         assert_eq!(error.path.to_pointer(), "/num");
//!         assert_eq!(error.message, "must be between 10 and 20");
//!     }
//!     Validation::Success(_) => unreachable!(),
//! }
//!
//! // A malformed declaration fails compilation with the handler's message.
//! let strict = SchemaLoader::new();
//! strict.register(RangeKeyword::new()).unwrap();
//! let error = strict.compile(&json!({"range": "invalid"})).unwrap_err();
//! assert_eq!(error.to_string(), "range must be an array containing exactly 2 numbers");
//! ```

pub mod error;
pub mod keyword;
pub mod path;
pub mod registry;
pub mod schema;
pub mod template;
pub(crate) mod validation;

pub use error::{
    CompileError, CustomKeywordError, DeclarationError, ErrorDetails, ResultError, ResultErrors,
};
pub use keyword::{CustomKeyword, KeywordBinding, RangeKeyword};
pub use path::{JsonPath, PathSegment};
pub use registry::{KeywordRegistry, RegistryError};
pub use schema::{Schema, SchemaLoader};

/// Type alias for validation results using ResultErrors
pub type ValidationResult<T> = stillwater::Validation<T, ResultErrors>;
