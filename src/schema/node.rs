//! Compiled schema nodes and the document walk.
//!
//! Each node evaluates its own keywords against one document value and
//! recurses into child nodes for nested values. Every violation is pushed
//! onto a shared list; nothing stops the walk early.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

use crate::error::{ErrorDetails, ResultError};
use crate::keyword::KeywordBinding;
use crate::path::JsonPath;
use crate::schema::vocabulary::JsonType;
use crate::validation::ValidationContext;

/// Compiled `$ref` targets keyed by `#`-prefixed JSON pointer.
pub(crate) type RefTable = HashMap<String, Arc<SchemaNode>>;

/// A compiled sub-schema.
#[derive(Debug)]
pub(crate) enum SchemaNode {
    /// `true` accepts everything, `false` rejects everything.
    Bool(bool),
    Object(Box<ObjectNode>),
}

/// How members not named in `properties` are treated.
#[derive(Debug)]
pub(crate) enum AdditionalProperties {
    Deny,
    Validate(SchemaNode),
}

/// The keywords of one object schema.
#[derive(Debug, Default)]
pub(crate) struct ObjectNode {
    pub(crate) types: Option<Vec<JsonType>>,
    pub(crate) properties: IndexMap<String, SchemaNode>,
    pub(crate) required: Vec<String>,
    pub(crate) additional_properties: Option<AdditionalProperties>,
    pub(crate) items: Option<SchemaNode>,
    pub(crate) reference: Option<String>,
    pub(crate) bindings: Vec<KeywordBinding>,
}

impl SchemaNode {
    /// Validates `instance` against this node, appending violations to `errors`.
    pub(crate) fn validate(
        &self,
        instance: &Value,
        path: &JsonPath,
        context: &ValidationContext<'_>,
        errors: &mut Vec<ResultError>,
    ) {
        match self {
            SchemaNode::Bool(true) => {}
            SchemaNode::Bool(false) => errors.push(ResultError::new(
                "false",
                path.clone(),
                instance.clone(),
                "no value is allowed here",
                ErrorDetails::new(),
            )),
            SchemaNode::Object(node) => node.validate(instance, path, context, errors),
        }
    }

    /// Number of custom keyword bindings in this subtree, excluding `$defs`.
    pub(crate) fn binding_count(&self) -> usize {
        match self {
            SchemaNode::Bool(_) => 0,
            SchemaNode::Object(node) => {
                let children: usize = node
                    .properties
                    .values()
                    .map(SchemaNode::binding_count)
                    .sum();
                let items = node.items.as_ref().map_or(0, SchemaNode::binding_count);
                let additional = match &node.additional_properties {
                    Some(AdditionalProperties::Validate(schema)) => schema.binding_count(),
                    _ => 0,
                };
                node.bindings.len() + children + items + additional
            }
        }
    }
}

impl ObjectNode {
    fn validate(
        &self,
        instance: &Value,
        path: &JsonPath,
        context: &ValidationContext<'_>,
        errors: &mut Vec<ResultError>,
    ) {
        if let Some(types) = &self.types {
            self.validate_type(types, instance, path, errors);
        }

        match instance {
            Value::Object(obj) => self.validate_object(obj, instance, path, context, errors),
            Value::Array(elements) => {
                if let Some(items) = &self.items {
                    for (idx, element) in elements.iter().enumerate() {
                        items.validate(element, &path.push_index(idx), context, errors);
                    }
                }
            }
            _ => {}
        }

        if let Some(reference) = &self.reference {
            validate_reference(reference, instance, path, context, errors);
        }

        for binding in &self.bindings {
            if let Some(error) = binding.check(instance, path) {
                errors.push(error);
            }
        }
    }

    fn validate_type(
        &self,
        types: &[JsonType],
        instance: &Value,
        path: &JsonPath,
        errors: &mut Vec<ResultError>,
    ) {
        if types.iter().any(|t| t.matches(instance)) {
            return;
        }

        let expected = types
            .iter()
            .map(|t| t.name())
            .collect::<Vec<_>>()
            .join(" or ");
        errors.push(ResultError::new(
            "type",
            path.clone(),
            instance.clone(),
            "expected {{.expected}}, given {{.given}}",
            ErrorDetails::new()
                .with("expected", expected)
                .with("given", JsonType::of(instance).name()),
        ));
    }

    fn validate_object(
        &self,
        obj: &Map<String, Value>,
        instance: &Value,
        path: &JsonPath,
        context: &ValidationContext<'_>,
        errors: &mut Vec<ResultError>,
    ) {
        for name in &self.required {
            if !obj.contains_key(name) {
                errors.push(ResultError::new(
                    "required",
                    path.clone(),
                    instance.clone(),
                    "{{.property}} is required",
                    ErrorDetails::new().with("property", name.as_str()),
                ));
            }
        }

        for (name, schema) in &self.properties {
            if let Some(member) = obj.get(name) {
                schema.validate(member, &path.push_field(name), context, errors);
            }
        }

        let Some(additional) = &self.additional_properties else {
            return;
        };
        for (name, member) in obj {
            if self.properties.contains_key(name) {
                continue;
            }
            let member_path = path.push_field(name);
            match additional {
                AdditionalProperties::Deny => errors.push(ResultError::new(
                    "additionalProperties",
                    member_path,
                    member.clone(),
                    "additional property {{.property}} is not allowed",
                    ErrorDetails::new().with("property", name.as_str()),
                )),
                AdditionalProperties::Validate(schema) => {
                    schema.validate(member, &member_path, context, errors)
                }
            }
        }
    }
}

fn validate_reference(
    reference: &str,
    instance: &Value,
    path: &JsonPath,
    context: &ValidationContext<'_>,
    errors: &mut Vec<ResultError>,
) {
    if context.depth() >= context.max_depth() {
        errors.push(ResultError::new(
            "$ref",
            path.clone(),
            instance.clone(),
            "maximum reference depth {{.max_depth}} exceeded",
            ErrorDetails::new().with("max_depth", json!(context.max_depth())),
        ));
        return;
    }

    match context.resolve(reference) {
        Some(target) => target.validate(instance, path, &context.increment_depth(), errors),
        // Compilation rejects dangling references, so this only guards
        // against a corrupted table.
        None => errors.push(ResultError::new(
            "$ref",
            path.clone(),
            instance.clone(),
            "reference {{.reference}} does not resolve",
            ErrorDetails::new().with("reference", reference),
        )),
    }
}
