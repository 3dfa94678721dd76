//! Compiled schemas.
//!
//! A [`Schema`] is produced by [`SchemaLoader::compile`] and is immutable
//! afterwards. It can be shared freely between threads; validating a
//! document never touches shared mutable state.
//!
//! Only a small base vocabulary is evaluated here: `type`, `properties`,
//! `required`, `additionalProperties`, `items`, `$defs`/`definitions` and
//! local `$ref`. Other base keywords are accepted and ignored. Custom
//! keywords registered with the loader are evaluated wherever they appear.
//!
//! # Example
//!
//! ```rust
//! use addendum::{RangeKeyword, SchemaLoader};
//! use serde_json::json;
//!
//! let loader = SchemaLoader::new();
//! loader.register(RangeKeyword::new()).unwrap();
//!
//! let schema = loader.compile(&json!({
//!     "type": "object",
//!     "properties": {
//!         "num": {"type": "number", "range": [10, 20]},
//!         "num2": {"type": "number", "range": [20, 30]}
//!     }
//! })).unwrap();
//!
//! let result = schema.validate(&json!({"num": 1, "num2": 100}));
//! assert!(result.is_failure());
//! ```

pub(crate) mod loader;
pub(crate) mod node;
pub mod vocabulary;

pub use loader::{SchemaLoader, DEFAULT_MAX_DEPTH};

use std::sync::Arc;

use rayon::prelude::*;
use serde_json::Value;
use stillwater::Validation;

use crate::error::ResultErrors;
use crate::path::JsonPath;
use crate::validation::ValidationContext;
use crate::ValidationResult;

use node::{RefTable, SchemaNode};

/// A compiled schema with its custom keyword bindings.
#[derive(Debug)]
pub struct Schema {
    root: Arc<SchemaNode>,
    refs: RefTable,
    max_depth: usize,
}

impl Schema {
    pub(crate) fn new(root: Arc<SchemaNode>, refs: RefTable, max_depth: usize) -> Self {
        Self {
            root,
            refs,
            max_depth,
        }
    }

    /// Validates a document, accumulating every violation.
    ///
    /// Each custom keyword bound in the schema is checked exactly once per
    /// document value it applies to, including when a sub-schema is reused
    /// at several document paths.
    pub fn validate(&self, instance: &Value) -> ValidationResult<()> {
        let context = ValidationContext::new(&self.refs, self.max_depth);
        let mut errors = Vec::new();
        self.root
            .validate(instance, &JsonPath::root(), &context, &mut errors);

        match ResultErrors::from_vec(errors) {
            None => Validation::Success(()),
            Some(errors) => Validation::Failure(errors),
        }
    }

    /// Parses and validates a document.
    ///
    /// # Errors
    ///
    /// Returns the parse error if `text` is not JSON. Violations are reported
    /// in the returned `ValidationResult`, not as an `Err`.
    pub fn validate_str(&self, text: &str) -> Result<ValidationResult<()>, serde_json::Error> {
        let document: Value = serde_json::from_str(text)?;
        Ok(self.validate(&document))
    }

    /// Returns true if `instance` has no violations.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validate(instance).is_success()
    }

    /// Validates many documents in parallel, returning results in input order.
    pub fn validate_all(&self, instances: &[Value]) -> Vec<ValidationResult<()>> {
        instances
            .par_iter()
            .map(|instance| self.validate(instance))
            .collect()
    }

    /// Number of custom keyword bindings reachable from the root, not
    /// counting those only reachable through `$ref`.
    pub fn binding_count(&self) -> usize {
        self.root.binding_count()
    }
}

// Validation runs share one compiled schema across threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<Schema>();
    assert_sync::<Schema>();
};
