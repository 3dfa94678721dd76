//! Schema compilation errors.
//!
//! Compilation stops at the first problem. A custom keyword rejecting its own
//! declaration surfaces as [`CompileError::Declaration`], whose `Display` is
//! exactly the handler's message.

use std::fmt::{self, Display};

/// A custom keyword's rejection of the value it was declared with.
///
/// The message is what callers see, verbatim. The compiler records which
/// keyword raised it and where in the schema, but never alters the message.
///
/// # Example
///
/// ```rust
/// use addendum::DeclarationError;
///
/// let error = DeclarationError::new("range must be an array containing exactly 2 numbers");
/// assert_eq!(error.to_string(), "range must be an array containing exactly 2 numbers");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationError {
    message: String,
    keyword: Option<String>,
    schema_pointer: Option<String>,
}

impl DeclarationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            keyword: None,
            schema_pointer: None,
        }
    }

    /// The handler's message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The keyword whose declaration was rejected, once known to the compiler.
    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// JSON pointer of the schema node holding the rejected declaration.
    pub fn schema_pointer(&self) -> Option<&str> {
        self.schema_pointer.as_deref()
    }

    pub(crate) fn located(mut self, keyword: &str, schema_pointer: &str) -> Self {
        self.keyword = Some(keyword.to_string());
        self.schema_pointer = Some(schema_pointer.to_string());
        self
    }
}

impl Display for DeclarationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DeclarationError {}

/// Errors that abort schema compilation.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// A custom keyword rejected its declared value.
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    /// The schema text is not valid JSON.
    #[error("schema is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value in schema position is neither an object nor a boolean.
    #[error("'{schema_pointer}' is not a schema")]
    NotASchema { schema_pointer: String },

    /// A base keyword has a malformed value.
    #[error("invalid '{keyword}' at '{schema_pointer}': {reason}")]
    InvalidKeyword {
        keyword: String,
        schema_pointer: String,
        reason: String,
    },

    /// A `$ref` points at nothing compiled in this schema.
    #[error("reference '{reference}' at '{schema_pointer}' does not resolve")]
    UnresolvedReference {
        reference: String,
        schema_pointer: String,
    },

    /// A chain of `$ref`s leads back to where it started without stepping
    /// into any member or element of the document.
    #[error("reference '{reference}' at '{schema_pointer}' loops back to itself")]
    CircularReference {
        reference: String,
        schema_pointer: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_display_is_unwrapped() {
        let error: CompileError = DeclarationError::new("bad value")
            .located("range", "#/properties/num")
            .into();
        assert_eq!(error.to_string(), "bad value");

        match error {
            CompileError::Declaration(inner) => {
                assert_eq!(inner.keyword(), Some("range"));
                assert_eq!(inner.schema_pointer(), Some("#/properties/num"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_keyword_display() {
        let error = CompileError::InvalidKeyword {
            keyword: "type".to_string(),
            schema_pointer: "#".to_string(),
            reason: "unknown type 'decimal'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "invalid 'type' at '#': unknown type 'decimal'"
        );
    }
}
