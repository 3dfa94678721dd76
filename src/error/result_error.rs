//! Validation result error types.
//!
//! This module provides [`ResultError`] for a single violation found while
//! validating a document and [`ResultErrors`] for accumulating them.

use std::fmt::{self, Display};

use serde_json::Value;
use stillwater::prelude::*;

use crate::error::{CustomKeywordError, ErrorDetails};
use crate::path::JsonPath;
use crate::template;

/// A single violation with full context.
///
/// Built-in keywords and custom keywords produce the same shape:
/// - **keyword**: Which keyword rejected the value
/// - **path**: Where in the document the offending value sits
/// - **value**: The offending value itself
/// - **message**: The rendered, human-readable description
/// - **template** / **details**: The unrendered message and its placeholder
///   values, for programmatic consumers
///
/// # Example
///
/// ```rust
/// use addendum::{ErrorDetails, JsonPath, ResultError};
/// use serde_json::json;
///
/// let error = ResultError::new(
///     "range",
///     JsonPath::root().push_field("num"),
///     json!(1),
///     "must be between {{.min}} and {{.max}}",
///     ErrorDetails::new().with("min", json!(10)).with("max", json!(20)),
/// );
///
/// assert_eq!(error.message, "must be between 10 and 20");
/// assert_eq!(error.path.to_pointer(), "/num");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResultError {
    /// The keyword that reported the violation.
    pub keyword: String,
    /// The document location of the offending value.
    pub path: JsonPath,
    /// The offending value.
    pub value: Value,
    /// The rendered message.
    pub message: String,
    /// The message template before substitution.
    pub template: String,
    /// The values substituted into the template.
    pub details: ErrorDetails,
}

impl ResultError {
    /// Creates an error, rendering `template` against `details`.
    pub fn new(
        keyword: impl Into<String>,
        path: JsonPath,
        value: Value,
        template: impl Into<String>,
        details: ErrorDetails,
    ) -> Self {
        let template = template.into();
        let message = template::render(&template, &details);
        Self {
            keyword: keyword.into(),
            path,
            value,
            message,
            template,
            details,
        }
    }

    /// Completes a handler's error with the location it was raised at.
    pub fn from_custom(error: CustomKeywordError, path: JsonPath, value: Value) -> Self {
        let CustomKeywordError {
            keyword,
            template,
            details,
        } = error;
        Self::new(keyword, path, value, template, details)
    }
}

impl Display for ResultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = if self.path.is_root() {
            "(root)".to_string()
        } else {
            self.path.to_string()
        };

        write!(f, "{}: {}", path_str, self.message)
    }
}

impl std::error::Error for ResultError {}

// Compiled schemas are validated from many threads at once; keep the
// error types shareable.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ResultError>();
    assert_sync::<ResultError>();
};

/// A non-empty collection of violations.
///
/// `ResultErrors` wraps a `NonEmptyVec<ResultError>` so a failed
/// `Validation` always carries at least one error.
///
/// # Combining Errors
///
/// ```rust
/// use addendum::{ErrorDetails, JsonPath, ResultError, ResultErrors};
/// use serde_json::json;
/// use stillwater::prelude::*;
///
/// let first = ResultErrors::single(ResultError::new(
///     "required", JsonPath::root(), json!({}), "name is required", ErrorDetails::new(),
/// ));
/// let second = ResultErrors::single(ResultError::new(
///     "type",
///     JsonPath::root().push_field("age"),
///     json!("x"),
///     "expected integer",
///     ErrorDetails::new(),
/// ));
///
/// assert_eq!(first.combine(second).len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResultErrors(NonEmptyVec<ResultError>);

impl ResultErrors {
    /// Creates a `ResultErrors` containing a single error.
    pub fn single(error: ResultError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `ResultErrors` from a vec, or `None` if it is empty.
    pub fn from_vec(errors: Vec<ResultError>) -> Option<Self> {
        let mut errors = errors.into_iter();
        let head = Self::single(errors.next()?);
        Some(errors.fold(head, |acc, error| acc.combine(Self::single(error))))
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; present for API consistency.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ResultError> {
        self.0.iter()
    }

    /// Returns all errors at the specified document path.
    pub fn at_path(&self, path: &JsonPath) -> Vec<&ResultError> {
        self.0.iter().filter(|e| &e.path == path).collect()
    }

    /// Returns all errors reported by the specified keyword.
    pub fn with_keyword(&self, keyword: &str) -> Vec<&ResultError> {
        self.0.iter().filter(|e| e.keyword == keyword).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ResultError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ResultError>`.
    pub fn into_vec(self) -> Vec<ResultError> {
        self.0.into_vec()
    }
}

impl Semigroup for ResultErrors {
    fn combine(self, other: Self) -> Self {
        ResultErrors(self.0.combine(other.0))
    }
}

impl Display for ResultErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ResultErrors {}

impl IntoIterator for ResultErrors {
    type Item = ResultError;
    type IntoIter = std::vec::IntoIter<ResultError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultErrors {
    type Item = &'a ResultError;
    type IntoIter = Box<dyn Iterator<Item = &'a ResultError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_at(field: &str, keyword: &str) -> ResultError {
        ResultError::new(
            keyword,
            JsonPath::root().push_field(field),
            json!(null),
            "failed",
            ErrorDetails::new(),
        )
    }

    #[test]
    fn test_from_custom_keeps_template_and_details() {
        let custom = CustomKeywordError::new("range", "below {{.min}}").with_detail("min", 3);
        let error = ResultError::from_custom(custom, JsonPath::root().push_index(2), json!(1));

        assert_eq!(error.keyword, "range");
        assert_eq!(error.message, "below 3");
        assert_eq!(error.template, "below {{.min}}");
        assert_eq!(error.details.get("min"), Some(&json!(3)));
        assert_eq!(error.value, json!(1));
        assert_eq!(error.path.to_pointer(), "/2");
    }

    #[test]
    fn test_display_root() {
        let error = ResultError::new(
            "false",
            JsonPath::root(),
            json!(1),
            "no value is allowed",
            ErrorDetails::new(),
        );
        assert_eq!(error.to_string(), "(root): no value is allowed");
    }

    #[test]
    fn test_from_empty_vec_is_none() {
        assert!(ResultErrors::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn test_filters() {
        let errors = ResultErrors::single(error_at("a", "range"))
            .combine(ResultErrors::single(error_at("a", "type")))
            .combine(ResultErrors::single(error_at("b", "range")));

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.at_path(&JsonPath::root().push_field("a")).len(), 2);
        assert_eq!(errors.with_keyword("range").len(), 2);
        assert_eq!(errors.first().keyword, "range");
    }

    #[test]
    fn test_display_lists_every_error() {
        let errors = ResultErrors::single(error_at("name", "required"))
            .combine(ResultErrors::single(error_at("email", "type")));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("name: failed"));
        assert!(display.contains("email: failed"));
    }
}
