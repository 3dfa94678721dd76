//! Message template rendering.
//!
//! Error messages are written as templates with `{{.name}}` placeholders that
//! are filled from an [`ErrorDetails`] map. This is deliberately not a general
//! templating engine: the only construct is a dotted key inside double braces,
//! resolved by exact key match.
//!
//! # Example
//!
//! ```rust
//! use addendum::{template, ErrorDetails};
//! use serde_json::json;
//!
//! let details = ErrorDetails::new()
//!     .with("min", json!(10))
//!     .with("max", json!(20));
//!
//! let message = template::render("must be between {{.min}} and {{.max}}", &details);
//! assert_eq!(message, "must be between 10 and 20");
//! ```

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde_json::Value;

use crate::error::ErrorDetails;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*\.([A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)\s*\}\}")
            .expect("placeholder pattern is valid")
    })
}

/// Renders `template`, substituting every `{{.key}}` with `details[key]`.
///
/// String values are inserted without quotes; every other value uses its JSON
/// text, so numbers keep the exact token they were parsed from. Placeholders
/// without a matching entry are left as literal text and reported through
/// `tracing` at warn level.
pub fn render(template: &str, details: &ErrorDetails) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures<'_>| {
            let key = &caps[1];
            match details.get(key) {
                Some(value) => display_value(value),
                None => {
                    tracing::warn!(
                        placeholder = key,
                        template,
                        "no detail supplied for template placeholder"
                    );
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Returns the placeholder keys named by `template`, in order of appearance.
///
/// ```rust
/// use addendum::template;
///
/// let keys = template::placeholders("{{.min}} to {{ .max }}");
/// assert_eq!(keys, vec!["min", "max"]);
/// ```
pub fn placeholders(template: &str) -> Vec<&str> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
