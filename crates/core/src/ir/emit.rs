//! TypeScript emission via the Emit trait.
//!
//! Each IR type renders itself; a declaration list renders as one module
//! with a blank line between declarations.

use super::types::{Declaration, Field, Primitive, TypeRef, UnionMember};
use super::utils::{escape_string, sanitize_field_key};

/// Trait for emitting TypeScript code from IR nodes.
pub trait Emit {
    /// Convert the node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Type references
// =============================================================================

impl Emit for Primitive {
    fn emit(&self) -> String {
        self.as_str().to_string()
    }
}

fn string_literal(value: &str) -> String {
    format!("\"{}\"", escape_string(value))
}

impl Emit for TypeRef {
    fn emit(&self) -> String {
        match self {
            TypeRef::Primitive(p) => p.emit(),
            TypeRef::Named(name) => name.clone(),
            TypeRef::Union(types) => types.iter().map(|t| t.emit()).collect::<Vec<_>>().join(" | "),
            TypeRef::Literal(value) => string_literal(value),
            TypeRef::Object(fields) => {
                if fields.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = fields.iter().map(|f| f.emit()).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
        }
    }
}

impl Emit for Field {
    fn emit(&self) -> String {
        format!("{}: {}", sanitize_field_key(&self.name), self.ty.emit())
    }
}

impl Emit for UnionMember {
    fn emit(&self) -> String {
        match self {
            UnionMember::Literal(value) => string_literal(value),
            UnionMember::Type(ty) => ty.emit(),
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for Declaration {
    fn emit(&self) -> String {
        match self {
            Declaration::Record { name, fields } => {
                let mut output = format!("export interface {name} {{\n");
                for field in fields {
                    output.push_str("  ");
                    output.push_str(&field.emit());
                    output.push_str(";\n");
                }
                output.push_str("}\n");
                output
            }
            Declaration::Union { name, members } => {
                let body = if members.is_empty() {
                    "never".to_string()
                } else {
                    members.iter().map(|m| m.emit()).collect::<Vec<_>>().join(" | ")
                };
                format!("export type {name} = {body};\n")
            }
            Declaration::ArrayAlias { name, element } => {
                let inner = element.emit();
                // Wrap unions in parentheses
                if matches!(element, TypeRef::Union(_)) {
                    format!("export type {name} = ({inner})[];\n")
                } else {
                    format!("export type {name} = {inner}[];\n")
                }
            }
            Declaration::PrimitiveAlias { name, primitive } => {
                format!("export type {name} = {};\n", primitive.emit())
            }
        }
    }
}

impl Emit for [Declaration] {
    fn emit(&self) -> String {
        self.iter().map(|d| d.emit()).collect::<Vec<_>>().join("\n")
    }
}

// =============================================================================
// Tests
// =============================================================================
