//! Schema graph as consumed by the resolver and the synthesis engine.
//!
//! A schema node is either a pointer to a shared schema, a resolved pointer
//! (the target inlined and tagged with its key), or an inline shape. Each
//! shape variant carries only the data its kind needs.

use indexmap::IndexMap;
use serde::Deserialize;

use crate::spec::RawSchema;

/// One node of a schema graph.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawSchema")]
pub enum SchemaNode {
    /// Unresolved pointer to a shared schema, by key: `#/components/schemas/Widget` -> `Widget`
    Reference(String),
    /// A resolved pointer: the shared schema's shape, inlined, remembering its key.
    Shared {
        /// Key of the shared schema the shape came from.
        key: String,
        /// The inlined, fully resolved shape.
        shape: Box<Shape>,
    },
    /// A shape defined in place.
    Inline(Shape),
}

/// Data shape of a schema, tagged by its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// `type: object`; properties keep declaration order.
    Object {
        /// Property name -> schema.
        properties: IndexMap<String, SchemaNode>,
    },
    /// `type: array`; a missing `items` is an unknown element.
    Array {
        /// Element schema.
        items: Box<SchemaNode>,
    },
    /// `type: string`, optionally restricted to literal values.
    String {
        /// Allowed literals, in declaration order.
        enum_values: Option<Vec<String>>,
    },
    /// `type: number`
    Number,
    /// `type: integer`
    Integer,
    /// `type: boolean`
    Boolean,
    /// Missing or unrecognized type.
    Unknown {
        /// The declared type string, when there was one.
        declared: Option<String>,
    },
}

impl Shape {
    /// A shape with no declared type at all.
    pub fn untyped() -> Self {
        Shape::Unknown { declared: None }
    }

    /// Lower-case name of the kind, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Object { .. } => "object",
            Shape::Array { .. } => "array",
            Shape::String { .. } => "string",
            Shape::Number => "number",
            Shape::Integer => "integer",
            Shape::Boolean => "boolean",
            Shape::Unknown { .. } => "unknown",
        }
    }

    fn is_resolved(&self) -> bool {
        match self {
            Shape::Object { properties } => properties.values().all(SchemaNode::is_resolved),
            Shape::Array { items } => items.is_resolved(),
            _ => true,
        }
    }
}

impl SchemaNode {
    /// Pointer to the shared schema `key`.
    pub fn reference(key: impl Into<String>) -> Self {
        SchemaNode::Reference(key.into())
    }

    /// The shape behind this node, if it is not an unresolved pointer.
    pub fn shape(&self) -> Option<&Shape> {
        match self {
            SchemaNode::Reference(_) => None,
            SchemaNode::Shared { shape, .. } => Some(shape),
            SchemaNode::Inline(shape) => Some(shape),
        }
    }

    /// Shared schema key this node points at, resolved or not.
    pub fn shared_key(&self) -> Option<&str> {
        match self {
            SchemaNode::Reference(key) | SchemaNode::Shared { key, .. } => Some(key),
            SchemaNode::Inline(_) => None,
        }
    }

    /// Whether no unresolved pointer remains anywhere below this node.
    pub fn is_resolved(&self) -> bool {
        match self {
            SchemaNode::Reference(_) => false,
            SchemaNode::Shared { shape, .. } => shape.is_resolved(),
            SchemaNode::Inline(shape) => shape.is_resolved(),
        }
    }
}
