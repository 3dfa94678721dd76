//! Errors produced by custom keyword handlers.
//!
//! A handler reports a failed check by returning a [`CustomKeywordError`]: the
//! keyword's name, a message template, and the [`ErrorDetails`] used to fill
//! the template's placeholders. Location fields (document path, offending
//! value) are never set by the handler; the validator adds them when it turns
//! the error into a [`ResultError`](crate::ResultError).

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

use crate::template;

/// Placeholder values for a message template.
///
/// Keys are unique. Equality ignores insertion order.
///
/// # Example
///
/// ```rust
/// use addendum::ErrorDetails;
/// use serde_json::json;
///
/// let a = ErrorDetails::new().with("min", json!(1)).with("max", json!(2));
/// let b = ErrorDetails::new().with("max", json!(2)).with("min", json!(1));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorDetails(IndexMap<String, Value>);

impl ErrorDetails {
    /// Creates an empty details map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry and returns self for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an entry, returning the previous value for the key if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the map contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ErrorDetails {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A violation reported by a custom keyword's value check.
///
/// Construct with [`CustomKeywordError::new`] from the keyword name and a
/// message template, then attach the values the template refers to.
///
/// # Example
///
/// ```rust
/// use addendum::CustomKeywordError;
/// use serde_json::json;
///
/// let error = CustomKeywordError::new("range", "must be between {{.min}} and {{.max}}")
///     .with_detail("min", json!(10))
///     .with_detail("max", json!(20));
///
/// assert_eq!(error.default_message(), "must be between {{.min}} and {{.max}}");
/// assert_eq!(error.render(), "must be between 10 and 20");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CustomKeywordError {
    /// The keyword that reported the violation.
    pub keyword: String,
    /// Message template with `{{.name}}` placeholders.
    pub template: String,
    /// Values for the template's placeholders.
    pub details: ErrorDetails,
}

impl CustomKeywordError {
    /// Creates an error with no details.
    pub fn new(keyword: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            template: template.into(),
            details: ErrorDetails::new(),
        }
    }

    /// Adds one detail entry and returns self for chaining.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key, value);
        self
    }

    /// Replaces the details and returns self for chaining.
    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = details;
        self
    }

    /// The message with no substitution applied.
    pub fn default_message(&self) -> &str {
        &self.template
    }

    /// The template rendered against this error's details.
    pub fn render(&self) -> String {
        template::render(&self.template, &self.details)
    }
}

impl Display for CustomKeywordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.keyword, self.render())
    }
}

impl std::error::Error for CustomKeywordError {}
