//! Schema loading and compilation.
//!
//! A [`SchemaLoader`] is one compilation scope: it owns the custom keywords
//! registered with it and compiles schema documents against them.
//!
//! Compilation is a single pre-order walk over the schema document. At every
//! schema node, declarations of registered keywords are checked first, in
//! registration order, before anything below the node is compiled. The first
//! rejected declaration ends compilation. Declaration checks are eager: each
//! occurrence is checked exactly once here, never again at validation time.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::CompileError;
use crate::keyword::{CustomKeyword, KeywordBinding};
use crate::path::JsonPath;
use crate::registry::{KeywordRegistry, RegistryError};
use crate::schema::node::{AdditionalProperties, ObjectNode, RefTable, SchemaNode};
use crate::schema::vocabulary::JsonType;
use crate::schema::Schema;

/// Default limit on nested `$ref` resolution during validation.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Builds compiled schemas for one set of custom keywords.
///
/// # Example
///
/// ```rust
/// use addendum::{RangeKeyword, SchemaLoader};
/// use serde_json::json;
///
/// let loader = SchemaLoader::new().with_max_depth(50);
/// loader.register(RangeKeyword::new()).unwrap();
///
/// let schema = loader
///     .compile_str(r#"{"properties": {"num": {"type": "number", "range": [10, 20]}}}"#)
///     .unwrap();
///
/// assert!(schema.is_valid(&json!({"num": 15})));
/// assert!(!schema.is_valid(&json!({"num": 25})));
/// ```
pub struct SchemaLoader {
    registry: KeywordRegistry,
    max_depth: usize,
}

impl SchemaLoader {
    /// Creates a loader with no custom keywords and the default max depth (100).
    pub fn new() -> Self {
        Self {
            registry: KeywordRegistry::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum `$ref` depth for schemas compiled by this loader.
    ///
    /// When a document walk follows more nested references than this, the
    /// offending node records a `$ref` violation instead of recursing.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Registers a custom keyword handler.
    ///
    /// Must be called before the first compilation; afterwards the loader's
    /// registry is sealed. See [`KeywordRegistry::register`] for the errors.
    pub fn register<K>(&self, handler: K) -> Result<(), RegistryError>
    where
        K: CustomKeyword + 'static,
    {
        self.registry.register(handler)
    }

    /// Registers a handler shared with other loaders.
    pub fn register_shared(&self, handler: Arc<dyn CustomKeyword>) -> Result<(), RegistryError> {
        self.registry.register_shared(handler)
    }

    /// Returns the loader's keyword registry.
    pub fn registry(&self) -> &KeywordRegistry {
        &self.registry
    }

    /// Parses and compiles a schema document.
    ///
    /// # Errors
    ///
    /// `CompileError::Parse` if `text` is not JSON, otherwise the errors of
    /// [`compile`](Self::compile).
    pub fn compile_str(&self, text: &str) -> Result<Schema, CompileError> {
        let document: Value = serde_json::from_str(text)?;
        self.compile(&document)
    }

    /// Compiles a schema document.
    ///
    /// # Errors
    ///
    /// - `CompileError::Declaration` with the handler's message, unchanged,
    ///   when a custom keyword rejects its declared value.
    /// - `CompileError::NotASchema` / `CompileError::InvalidKeyword` for
    ///   malformed base vocabulary.
    /// - `CompileError::UnresolvedReference` for a `$ref` with no target.
    /// - `CompileError::CircularReference` for `$ref`s that lead back to
    ///   themselves without descending into the document.
    pub fn compile(&self, document: &Value) -> Result<Schema, CompileError> {
        let handlers = self.registry.seal();
        let mut compiler = Compiler {
            handlers: &handlers,
            refs: HashMap::new(),
            references: Vec::new(),
        };

        let root = Arc::new(compiler.compile_node(document, &JsonPath::root())?);
        compiler.refs.insert("#".to_string(), Arc::clone(&root));
        compiler.check_references()?;

        let schema = Schema::new(root, compiler.refs, self.max_depth);
        tracing::debug!(
            keywords = handlers.len(),
            bindings = schema.binding_count(),
            "compiled schema"
        );
        Ok(schema)
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

struct Compiler<'a> {
    handlers: &'a [Arc<dyn CustomKeyword>],
    refs: RefTable,
    /// Every `$ref` seen, with the pointer of the node that holds it.
    references: Vec<(String, String)>,
}

impl Compiler<'_> {
    fn compile_node(
        &mut self,
        value: &Value,
        location: &JsonPath,
    ) -> Result<SchemaNode, CompileError> {
        let obj = match value {
            Value::Bool(b) => return Ok(SchemaNode::Bool(*b)),
            Value::Object(obj) => obj,
            _ => {
                return Err(CompileError::NotASchema {
                    schema_pointer: schema_pointer(location),
                })
            }
        };

        let mut node = ObjectNode {
            bindings: self.bind_keywords(obj, location)?,
            ..ObjectNode::default()
        };

        if let Some(types) = obj.get("type") {
            node.types = Some(compile_types(types, location)?);
        }

        if let Some(required) = obj.get("required") {
            node.required = compile_required(required, location)?;
        }

        if let Some(properties) = obj.get("properties") {
            node.properties = self.compile_properties(properties, location)?;
        }

        if let Some(additional) = obj.get("additionalProperties") {
            let at = location.push_field("additionalProperties");
            node.additional_properties = match additional {
                Value::Bool(true) => None,
                Value::Bool(false) => Some(AdditionalProperties::Deny),
                other => Some(AdditionalProperties::Validate(self.compile_node(other, &at)?)),
            };
        }

        if let Some(items) = obj.get("items") {
            node.items = Some(self.compile_node(items, &location.push_field("items"))?);
        }

        for defs_keyword in ["$defs", "definitions"] {
            if let Some(defs) = obj.get(defs_keyword) {
                self.compile_definitions(defs_keyword, defs, location)?;
            }
        }

        if let Some(reference) = obj.get("$ref") {
            let reference = reference.as_str().ok_or_else(|| {
                invalid_keyword("$ref", location, "must be a string")
            })?;
            self.references
                .push((reference.to_string(), schema_pointer(location)));
            node.reference = Some(reference.to_string());
        }

        Ok(SchemaNode::Object(Box::new(node)))
    }

    /// Checks every registered keyword present in `obj` and binds it.
    fn bind_keywords(
        &self,
        obj: &Map<String, Value>,
        location: &JsonPath,
    ) -> Result<Vec<KeywordBinding>, CompileError> {
        let mut bindings = Vec::new();
        for handler in self.handlers {
            let Some(value) = obj.get(handler.keyword()) else {
                continue;
            };
            handler
                .validate_declaration(value)
                .map_err(|e| e.located(handler.keyword(), &schema_pointer(location)))?;
            bindings.push(KeywordBinding::new(Arc::clone(handler), value.clone()));
        }
        Ok(bindings)
    }

    fn compile_properties(
        &mut self,
        properties: &Value,
        location: &JsonPath,
    ) -> Result<IndexMap<String, SchemaNode>, CompileError> {
        let members = properties
            .as_object()
            .ok_or_else(|| invalid_keyword("properties", location, "must be an object"))?;

        let base = location.push_field("properties");
        let mut compiled = IndexMap::with_capacity(members.len());
        for (name, schema) in members {
            let node = self.compile_node(schema, &base.push_field(name))?;
            compiled.insert(name.clone(), node);
        }
        Ok(compiled)
    }

    fn compile_definitions(
        &mut self,
        keyword: &str,
        defs: &Value,
        location: &JsonPath,
    ) -> Result<(), CompileError> {
        let members = defs
            .as_object()
            .ok_or_else(|| invalid_keyword(keyword, location, "must be an object"))?;

        let base = location.push_field(keyword);
        for (name, schema) in members {
            let at = base.push_field(name);
            let node = self.compile_node(schema, &at)?;
            self.refs.insert(schema_pointer(&at), Arc::new(node));
        }
        Ok(())
    }

    fn check_references(&self) -> Result<(), CompileError> {
        for (reference, holder) in &self.references {
            if !self.refs.contains_key(reference) {
                return Err(CompileError::UnresolvedReference {
                    reference: reference.clone(),
                    schema_pointer: holder.clone(),
                });
            }
        }

        // A `$ref` target is validated against the same document value as its
        // holder, so following target to target never descends. Such a chain
        // must end at a node without `$ref`.
        let next: HashMap<&str, &str> = self
            .references
            .iter()
            .map(|(reference, holder)| (holder.as_str(), reference.as_str()))
            .collect();

        for (reference, holder) in &self.references {
            let mut visited = HashSet::from([holder.as_str()]);
            let mut current = reference.as_str();
            while let Some(&target) = next.get(current) {
                if !visited.insert(current) {
                    return Err(CompileError::CircularReference {
                        reference: reference.clone(),
                        schema_pointer: holder.clone(),
                    });
                }
                current = target;
            }
        }
        Ok(())
    }
}

fn compile_types(value: &Value, location: &JsonPath) -> Result<Vec<JsonType>, CompileError> {
    let parse = |name: &Value| -> Result<JsonType, CompileError> {
        let name = name
            .as_str()
            .ok_or_else(|| invalid_keyword("type", location, "type names must be strings"))?;
        JsonType::from_name(name).ok_or_else(|| {
            invalid_keyword("type", location, &format!("unknown type '{}'", name))
        })
    };

    match value {
        Value::Array(names) if names.is_empty() => {
            Err(invalid_keyword("type", location, "must name at least one type"))
        }
        Value::Array(names) => names.iter().map(parse).collect(),
        single => Ok(vec![parse(single)?]),
    }
}

fn compile_required(value: &Value, location: &JsonPath) -> Result<Vec<String>, CompileError> {
    let names = value
        .as_array()
        .ok_or_else(|| invalid_keyword("required", location, "must be an array"))?;

    names
        .iter()
        .map(|name| {
            name.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid_keyword("required", location, "entries must be strings"))
        })
        .collect()
}

fn schema_pointer(location: &JsonPath) -> String {
    format!("#{}", location.to_pointer())
}

fn invalid_keyword(keyword: &str, location: &JsonPath, reason: &str) -> CompileError {
    CompileError::InvalidKeyword {
        keyword: keyword.to_string(),
        schema_pointer: schema_pointer(location),
        reason: reason.to_string(),
    }
}
