//! Declaration IR produced by type synthesis.
//!
//! This module defines the output side of the engine:
//! - TypeRef: how one type points at another (primitive, named, inline)
//! - Declaration: one named type definition handed to an emitter
//! - Field: a named member of a record

/// Primitive types a [`TypeRef`] can name directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Any string value.
    String,
    /// Any number (integers included).
    Number,
    /// `true` or `false`.
    Boolean,
    /// A shape the engine could not determine.
    Unknown,
}

impl Primitive {
    /// Keyword used for this primitive in type position.
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::String => "string",
            Primitive::Number => "number",
            Primitive::Boolean => "boolean",
            Primitive::Unknown => "unknown",
        }
    }
}

/// Reference to a type, used inside declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A primitive: string, number, boolean, unknown
    Primitive(Primitive),
    /// Reference to a declaration by name: "Widget"
    Named(String),
    /// Inline union: A | B
    Union(Vec<TypeRef>),
    /// String literal: "Demo"
    Literal(String),
    /// Inline record: { "200": Widget }
    Object(Vec<Field>),
}

impl TypeRef {
    /// The `unknown` primitive, used wherever a shape degrades.
    pub fn unknown() -> Self {
        TypeRef::Primitive(Primitive::Unknown)
    }

    /// Collapse a list of alternatives into a single reference.
    ///
    /// Equal alternatives are dropped (first occurrence wins), a single
    /// survivor is returned as-is, and an empty list becomes `unknown`.
    pub fn union_of(alternatives: Vec<TypeRef>) -> Self {
        let mut distinct: Vec<TypeRef> = Vec::with_capacity(alternatives.len());
        for alt in alternatives {
            if !distinct.contains(&alt) {
                distinct.push(alt);
            }
        }
        match distinct.len() {
            0 => TypeRef::unknown(),
            1 => distinct.remove(0),
            _ => TypeRef::Union(distinct),
        }
    }
}

/// A named member of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Raw key as it appears in the specification. Emitters sanitize it.
    pub name: String,
    /// Type of the field's value.
    pub ty: TypeRef,
}

impl Field {
    /// Build a field from a raw key and its type.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Insert a field, replacing an existing one of the same name in place.
///
/// Mirrors mapping-key semantics: a repeated key keeps its original position
/// and the last value wins.
pub fn upsert_field(fields: &mut Vec<Field>, field: Field) {
    if let Some(existing) = fields.iter_mut().find(|f| f.name == field.name) {
        existing.ty = field.ty;
    } else {
        fields.push(field);
    }
}

/// One alternative of a [`Declaration::Union`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnionMember {
    /// String literal alternative: "active"
    Literal(String),
    /// Type alternative
    Type(TypeRef),
}

/// One named output type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// interface Foo { ... }
    Record {
        /// Declaration name.
        name: String,
        /// Fields in emission order.
        fields: Vec<Field>,
    },
    /// type Foo = "a" | "b"
    Union {
        /// Declaration name.
        name: String,
        /// Alternatives in input order.
        members: Vec<UnionMember>,
    },
    /// type Foo = T[]
    ArrayAlias {
        /// Declaration name.
        name: String,
        /// Element type.
        element: TypeRef,
    },
    /// type Foo = string
    PrimitiveAlias {
        /// Declaration name.
        name: String,
        /// Aliased primitive.
        primitive: Primitive,
    },
}

impl Declaration {
    /// Name of the declaration.
    pub fn name(&self) -> &str {
        match self {
            Declaration::Record { name, .. }
            | Declaration::Union { name, .. }
            | Declaration::ArrayAlias { name, .. }
            | Declaration::PrimitiveAlias { name, .. } => name,
        }
    }

    /// Same declaration under a different name.
    pub fn renamed(self, new_name: String) -> Self {
        match self {
            Declaration::Record { fields, .. } => Declaration::Record {
                name: new_name,
                fields,
            },
            Declaration::Union { members, .. } => Declaration::Union {
                name: new_name,
                members,
            },
            Declaration::ArrayAlias { element, .. } => Declaration::ArrayAlias {
                name: new_name,
                element,
            },
            Declaration::PrimitiveAlias { primitive, .. } => Declaration::PrimitiveAlias {
                name: new_name,
                primitive,
            },
        }
    }

    /// Whether two declarations define the same type, ignoring their names.
    pub fn same_body(&self, other: &Declaration) -> bool {
        match (self, other) {
            (Declaration::Record { fields: a, .. }, Declaration::Record { fields: b, .. }) => a == b,
            (Declaration::Union { members: a, .. }, Declaration::Union { members: b, .. }) => {
                a == b
            }
            (
                Declaration::ArrayAlias { element: a, .. },
                Declaration::ArrayAlias { element: b, .. },
            ) => a == b,
            (
                Declaration::PrimitiveAlias { primitive: a, .. },
                Declaration::PrimitiveAlias { primitive: b, .. },
            ) => a == b,
            _ => false,
        }
    }

    /// Look up a record field by its raw name.
    pub fn field(&self, field_name: &str) -> Option<&TypeRef> {
        match self {
            Declaration::Record { fields, .. } => fields
                .iter()
                .find(|f| f.name == field_name)
                .map(|f| &f.ty),
            _ => None,
        }
    }
}
