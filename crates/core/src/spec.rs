//! OpenAPI document structs for serde deserialization.
//!
//! This module defines the subset of an OpenAPI document the generator reads:
//! `info`, `components.schemas`, and `paths.<path>.<method>` with their
//! request bodies and responses. Every mapping keeps declaration order.

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{GenerateError, Result};
use crate::ir::{HttpMethod, SchemaNode, Shape};

/// Root specification.
#[derive(Debug, Clone, Deserialize)]
pub struct Specification {
    /// API title and version.
    pub info: Info,
    /// Shared, referenceable definitions.
    #[serde(default)]
    pub components: Components,
    /// Path -> operations.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

/// Title and version of the described API.
#[derive(Debug, Clone, Deserialize)]
pub struct Info {
    /// API title; also names the root declaration.
    pub title: String,
    /// API version string.
    pub version: String,
}

/// Components section containing the shared schemas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Components {
    /// Shared schemas by key.
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaNode>,
}

/// The operations declared under one path, in declaration order.
///
/// Keys that are not supported methods (`parameters`, `summary`, ...) are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct PathItem {
    /// Method -> operation.
    pub operations: IndexMap<HttpMethod, Operation>,
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Request body, when the operation accepts one.
    pub request_body: Option<RequestBody>,
    /// Status code -> response.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
}

/// A request body definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBody {
    /// Content type -> media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// A response definition.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Content type -> media type.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

/// Media type content (e.g., application/json).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaType {
    /// Body schema; absent schemas degrade to `unknown`.
    pub schema: Option<SchemaNode>,
}

impl Specification {
    /// Parse a specification from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a specification from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a specification from an already deserialized document tree.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| GenerateError::InvalidDocument(e.to_string()))
    }

    /// Shared schemas, in declaration order.
    pub fn schemas(&self) -> &IndexMap<String, SchemaNode> {
        &self.components.schemas
    }

    /// Every request and response content schema, mutably.
    pub(crate) fn content_schemas_mut(&mut self) -> impl Iterator<Item = &mut SchemaNode> {
        self.paths
            .values_mut()
            .flat_map(|item| item.operations.values_mut())
            .flat_map(|op| {
                let request = op
                    .request_body
                    .iter_mut()
                    .flat_map(|body| body.content.values_mut());
                let responses = op
                    .responses
                    .values_mut()
                    .flat_map(|response| response.content.values_mut());
                request.chain(responses)
            })
            .filter_map(|media| media.schema.as_mut())
    }
}

impl TryFrom<IndexMap<String, serde_json::Value>> for PathItem {
    type Error = String;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut operations = IndexMap::new();
        for (key, value) in raw {
            let Some(method) = HttpMethod::parse(&key) else {
                debug!(key = %key, "Skipping non-operation path item key.");
                continue;
            };
            let op: Operation = serde_json::from_value(value)
                .map_err(|e| format!("Invalid `{key}` operation: {e}"))?;
            operations.insert(method, op);
        }
        Ok(PathItem { operations })
    }
}

/// Schema as written in the document, before it becomes a [`SchemaNode`].
#[derive(Debug, Deserialize)]
pub(crate) struct RawSchema {
    #[serde(rename = "type")]
    schema_type: Option<SchemaType>,

    #[serde(rename = "$ref")]
    ref_path: Option<String>,

    properties: Option<IndexMap<String, SchemaNode>>,

    items: Option<Box<SchemaNode>>,

    #[serde(rename = "enum")]
    enum_values: Option<Vec<serde_json::Value>>,
}

/// Schema type can be a single type or an array of types (for nullable).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

impl SchemaType {
    /// The effective type: the single one, or the first non-null of a list.
    fn primary(&self) -> Option<&str> {
        match self {
            SchemaType::Single(t) => Some(t),
            SchemaType::Multiple(types) => types
                .iter()
                .map(String::as_str)
                .find(|t| *t != "null"),
        }
    }
}

/// Extract the shared schema key from a `$ref` pointer.
fn ref_to_key(ref_path: &str) -> String {
    ref_path
        .rsplit('/')
        .next()
        .unwrap_or(ref_path)
        .to_string()
}

impl From<RawSchema> for SchemaNode {
    fn from(raw: RawSchema) -> Self {
        if let Some(ref_path) = raw.ref_path {
            return SchemaNode::Reference(ref_to_key(&ref_path));
        }

        let declared = raw.schema_type.as_ref().and_then(SchemaType::primary);
        let shape = match declared {
            Some("object") => Shape::Object {
                properties: raw.properties.unwrap_or_default(),
            },
            Some("array") => Shape::Array {
                items: raw
                    .items
                    .unwrap_or_else(|| Box::new(SchemaNode::Inline(Shape::untyped()))),
            },
            Some("string") => Shape::String {
                enum_values: raw.enum_values.map(string_literals),
            },
            Some("number") => Shape::Number,
            Some("integer") => Shape::Integer,
            Some("boolean") => Shape::Boolean,
            Some(other) => Shape::Unknown {
                declared: Some(other.to_string()),
            },
            None => Shape::untyped(),
        };
        SchemaNode::Inline(shape)
    }
}

/// Keep the string members of an enum, in order.
fn string_literals(values: Vec<serde_json::Value>) -> Vec<String> {
    values
        .into_iter()
        .filter_map(|value| match value {
            serde_json::Value::String(s) => Some(s),
            other => {
                warn!(value = %other, "Dropping non-string enum value.");
                None
            }
        })
        .collect()
}
