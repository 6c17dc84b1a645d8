//! Reference resolution.
//!
//! Replaces every `$ref` pointer in a schema graph with the shape it points
//! at, following chains of pointers to the innermost target. Resolved
//! pointers stay tagged with their shared key so the synthesis engine can
//! still tell a shared schema from an inline one.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::{GenerateError, Result};
use crate::spec::Specification;

use super::schema::{SchemaNode, Shape};

/// Resolve a copy of `node` against the shared schemas in `registry`.
pub fn resolve(node: &SchemaNode, registry: &IndexMap<String, SchemaNode>) -> Result<SchemaNode> {
    let mut node = node.clone();
    resolve_in_place(&mut node, registry)?;
    Ok(node)
}

/// Resolve `node` in place. Property keys and their order are preserved.
///
/// Resolving an already resolved node is a no-op.
pub fn resolve_in_place(
    node: &mut SchemaNode,
    registry: &IndexMap<String, SchemaNode>,
) -> Result<()> {
    Resolver::new(registry).node(node)
}

/// Resolve every shared schema and every request/response content schema.
///
/// All lookups go against a snapshot of the shared schemas taken before any
/// of them is touched.
pub fn resolve_specification(spec: &mut Specification) -> Result<()> {
    let snapshot = spec.components.schemas.clone();

    for (key, node) in &mut spec.components.schemas {
        debug!(key = %key, "Resolving shared schema.");
        let mut resolver = Resolver::new(&snapshot);
        resolver.stack.push(key.clone());
        resolver.node(node)?;
    }

    let mut count = 0usize;
    for node in spec.content_schemas_mut() {
        resolve_in_place(node, &snapshot)?;
        count += 1;
    }
    debug!(
        shared = snapshot.len(),
        content = count,
        "Resolved specification schemas."
    );
    Ok(())
}

struct Resolver<'a> {
    registry: &'a IndexMap<String, SchemaNode>,
    /// Keys currently being resolved, outermost first.
    stack: Vec<String>,
}

impl<'a> Resolver<'a> {
    fn new(registry: &'a IndexMap<String, SchemaNode>) -> Self {
        Self {
            registry,
            stack: Vec::new(),
        }
    }

    fn node(&mut self, node: &mut SchemaNode) -> Result<()> {
        match node {
            SchemaNode::Reference(key) => {
                let target = self.target(key)?;
                *node = target;
                Ok(())
            }
            SchemaNode::Shared { shape, .. } => self.shape(shape),
            SchemaNode::Inline(shape) => self.shape(shape),
        }
    }

    fn shape(&mut self, shape: &mut Shape) -> Result<()> {
        match shape {
            Shape::Object { properties } => {
                for property in properties.values_mut() {
                    self.node(property)?;
                }
                Ok(())
            }
            Shape::Array { items } => self.node(items),
            _ => Ok(()),
        }
    }

    /// Resolved copy of the shared schema `key`, tagged with the innermost key of its chain.
    fn target(&mut self, key: &str) -> Result<SchemaNode> {
        if let Some(pos) = self.stack.iter().position(|k| k == key) {
            let mut chain = self.stack[pos..].to_vec();
            chain.push(key.to_string());
            return Err(GenerateError::SchemaCycle {
                chain: chain.join(" -> "),
            });
        }

        let registry = self.registry;
        let node = registry
            .get(key)
            .ok_or_else(|| GenerateError::SchemaNotFound {
                key: key.to_string(),
            })?;

        self.stack.push(key.to_string());
        let resolved = match node {
            SchemaNode::Reference(next) => self.target(next),
            SchemaNode::Shared { key: inner, shape } => {
                let mut shape = shape.clone();
                self.shape(&mut shape).map(|()| SchemaNode::Shared {
                    key: inner.clone(),
                    shape,
                })
            }
            SchemaNode::Inline(shape) => {
                let mut shape = Box::new(shape.clone());
                self.shape(&mut shape).map(|()| SchemaNode::Shared {
                    key: key.to_string(),
                    shape,
                })
            }
        };
        self.stack.pop();
        resolved
    }
}
