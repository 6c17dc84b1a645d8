//! Type synthesis: schema nodes to declarations.
//!
//! `synthesize` turns one node into a [`TypeRef`], emitting whatever
//! declarations the node needs into the context's [`ShapeRegistry`] on the
//! way. Shared schemas are synthesized once, under their own key, and every
//! later site that points at them gets the same reference back.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{GenerateError, Result};

use super::registry::ShapeRegistry;
use super::schema::{SchemaNode, Shape};
use super::types::{Declaration, Field, Primitive, TypeRef, UnionMember};
use super::utils::{compose_name, to_declaration_name};

/// Suffix appended to an array's name to name its element type.
const ITEM_SUFFIX: &str = "Item";

/// State threaded through one generation run.
#[derive(Debug)]
pub struct GenerationContext<'a> {
    schemas: &'a IndexMap<String, SchemaNode>,
    registry: ShapeRegistry,
    in_progress: Vec<String>,
}

impl<'a> GenerationContext<'a> {
    /// A fresh context over the specification's shared schemas.
    ///
    /// The declaration name of every shared schema that gets its own
    /// declaration is reserved, so nested shapes never take it first.
    pub fn new(schemas: &'a IndexMap<String, SchemaNode>) -> Self {
        let mut registry = ShapeRegistry::new();
        for (key, node) in schemas {
            if matches!(node, SchemaNode::Inline(_)) {
                registry.reserve(&to_declaration_name(key));
            }
        }
        Self {
            schemas,
            registry,
            in_progress: Vec::new(),
        }
    }

    /// Declarations and registrations made so far.
    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Emit a declaration directly, returning its final name.
    pub fn emit(&mut self, declaration: Declaration) -> String {
        self.registry.emit(declaration)
    }

    /// Consume the context, keeping its registry.
    pub fn into_registry(self) -> ShapeRegistry {
        self.registry
    }
}

/// Synthesize a type reference for `node`, proposing `proposed_name` for any
/// declaration the node itself needs.
pub fn synthesize(
    node: &SchemaNode,
    proposed_name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<TypeRef> {
    match node {
        SchemaNode::Reference(key) | SchemaNode::Shared { key, .. } => register_shared(key, ctx),
        SchemaNode::Inline(shape) => synthesize_shape(shape, proposed_name, ctx),
    }
}

/// Synthesize the shared schema `key` once and return its reference.
///
/// Later calls return the registered reference without emitting anything.
/// A shared schema that is just a pointer to another one becomes an alias
/// of its target.
pub fn register_shared(key: &str, ctx: &mut GenerationContext<'_>) -> Result<TypeRef> {
    if let Some(ty) = ctx.registry.shared(key) {
        return Ok(ty.clone());
    }

    let schemas = ctx.schemas;
    let node = schemas
        .get(key)
        .ok_or_else(|| GenerateError::SchemaNotFound {
            key: key.to_string(),
        })?;

    if let Some(pos) = ctx.in_progress.iter().position(|k| k == key) {
        let mut chain = ctx.in_progress[pos..].to_vec();
        chain.push(key.to_string());
        return Err(GenerateError::SchemaCycle {
            chain: chain.join(" -> "),
        });
    }

    ctx.in_progress.push(key.to_string());
    let name = to_declaration_name(key);
    let ty = match node {
        SchemaNode::Reference(target) | SchemaNode::Shared { key: target, .. } => {
            register_shared(target, ctx)
        }
        SchemaNode::Inline(shape) => build_declaration(shape, &name, ctx)
            .map(|declaration| TypeRef::Named(ctx.registry.emit_reserved(declaration))),
    };
    ctx.in_progress.pop();
    let ty = ty?;

    debug!(key = %key, ty = ?ty, "Registered shared schema.");
    ctx.registry.register_shared(key, ty.clone());
    Ok(ty)
}

/// The primitive a shape maps to when it needs no declaration of its own.
fn primitive_of(shape: &Shape) -> Option<Primitive> {
    match shape {
        Shape::String { enum_values } => match enum_values {
            Some(values) if !values.is_empty() => None,
            _ => Some(Primitive::String),
        },
        Shape::Number | Shape::Integer => Some(Primitive::Number),
        Shape::Boolean => Some(Primitive::Boolean),
        Shape::Unknown { .. } => Some(Primitive::Unknown),
        Shape::Object { .. } | Shape::Array { .. } => None,
    }
}

fn synthesize_shape(
    shape: &Shape,
    proposed_name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<TypeRef> {
    if let Shape::Unknown {
        declared: Some(declared),
    } = shape
    {
        debug!(name = %proposed_name, declared = %declared, "Unsupported schema type, using unknown.");
    }
    if let Some(primitive) = primitive_of(shape) {
        return Ok(TypeRef::Primitive(primitive));
    }

    let declaration = build_declaration(shape, proposed_name, ctx)?;
    Ok(TypeRef::Named(ctx.registry.emit(declaration)))
}

/// The declaration `shape` defines under `name`, synthesizing its members.
///
/// Shapes that map to a primitive become a primitive alias.
fn build_declaration(
    shape: &Shape,
    name: &str,
    ctx: &mut GenerationContext<'_>,
) -> Result<Declaration> {
    let declaration = match shape {
        Shape::Object { properties } => {
            let mut fields = Vec::with_capacity(properties.len());
            for (key, property) in properties {
                let property_name = compose_name(&[name, key]);
                let ty = synthesize(property, &property_name, ctx)?;
                fields.push(Field::new(key.clone(), ty));
            }
            Declaration::Record {
                name: name.to_string(),
                fields,
            }
        }
        Shape::Array { items } => {
            let item_name = compose_name(&[name, ITEM_SUFFIX]);
            let element = synthesize(items, &item_name, ctx)?;
            Declaration::ArrayAlias {
                name: name.to_string(),
                element,
            }
        }
        Shape::String {
            enum_values: Some(values),
        } if !values.is_empty() => Declaration::Union {
            name: name.to_string(),
            members: values.iter().cloned().map(UnionMember::Literal).collect(),
        },
        _ => Declaration::PrimitiveAlias {
            name: name.to_string(),
            primitive: primitive_of(shape).unwrap_or(Primitive::Unknown),
        },
    };
    Ok(declaration)
}
