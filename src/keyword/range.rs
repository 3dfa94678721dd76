//! Inclusive numeric range keyword.

use std::cmp::Ordering;

use serde_json::{Number, Value};

use crate::error::{CustomKeywordError, DeclarationError};
use crate::keyword::decimal::compare;
use crate::keyword::CustomKeyword;

/// Checks that numbers lie between two declared bounds, inclusive on both ends.
///
/// Declared as an array of exactly two numbers, `[min, max]`:
///
/// ```json
/// { "type": "number", "range": [10, 20] }
/// ```
///
/// Values that are not numbers are left to other keywords such as `type`.
/// A violation reports the declared bounds as the `min` and `max` details,
/// keeping the exact tokens the schema author wrote. Comparisons use the
/// exact decimal value of each token, never an `f64` approximation.
///
/// # Example
///
/// ```rust
/// use addendum::{RangeKeyword, SchemaLoader};
/// use serde_json::json;
///
/// let loader = SchemaLoader::new();
/// loader.register(RangeKeyword::new()).unwrap();
/// let schema = loader.compile(&json!({"range": [10, 20]})).unwrap();
///
/// assert!(schema.is_valid(&json!(10)));
/// assert!(schema.is_valid(&json!(20)));
/// assert!(!schema.is_valid(&json!(21)));
/// ```
#[derive(Debug, Clone)]
pub struct RangeKeyword {
    name: String,
}

impl RangeKeyword {
    /// A range keyword named `range`.
    pub fn new() -> Self {
        Self::named("range")
    }

    /// A range keyword registered under a different name.
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn bounds<'a>(&self, keyword_value: &'a Value) -> Option<(&'a Number, &'a Number)> {
        match keyword_value.as_array().map(Vec::as_slice) {
            Some([Value::Number(min), Value::Number(max)]) => Some((min, max)),
            _ => None,
        }
    }
}

impl Default for RangeKeyword {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomKeyword for RangeKeyword {
    fn keyword(&self) -> &str {
        &self.name
    }

    fn validate_declaration(&self, keyword_value: &Value) -> Result<(), DeclarationError> {
        let (min, max) = self.bounds(keyword_value).ok_or_else(|| {
            DeclarationError::new(format!(
                "{} must be an array containing exactly 2 numbers",
                self.name
            ))
        })?;

        match compare(min, max) {
            Some(Ordering::Less | Ordering::Equal) => Ok(()),
            Some(Ordering::Greater) => Err(DeclarationError::new(format!(
                "{} minimum {} is greater than its maximum {}",
                self.name, min, max
            ))),
            None => Err(DeclarationError::new(format!(
                "{} bounds {} and {} cannot be compared exactly",
                self.name, min, max
            ))),
        }
    }

    fn check_value(
        &self,
        keyword_value: &Value,
        instance: &Value,
    ) -> Result<(), CustomKeywordError> {
        let Value::Number(value) = instance else {
            return Ok(());
        };
        let Some((min, max)) = self.bounds(keyword_value) else {
            return Err(CustomKeywordError::new(
                self.name.clone(),
                "cannot check against malformed bounds {{.bounds}}",
            )
            .with_detail("bounds", keyword_value.clone()));
        };

        if within(value, min, max) {
            return Ok(());
        }

        Err(CustomKeywordError::new(
            self.name.clone(),
            "must be between {{.min}} and {{.max}}",
        )
        .with_detail("min", Value::Number(min.clone()))
        .with_detail("max", Value::Number(max.clone())))
    }
}

/// An undecidable comparison counts as outside the range.
fn within(value: &Number, min: &Number, max: &Number) -> bool {
    let at_least_min = matches!(compare(value, min), Some(Ordering::Greater | Ordering::Equal));
    let at_most_max = matches!(compare(value, max), Some(Ordering::Less | Ordering::Equal));
    at_least_min && at_most_max
}
