//! Intermediate representation and the passes over it.
//!
//! The pipeline runs in three steps:
//! 1. Resolve: raw schema graph -> pointer-free schema graph
//! 2. Assemble: resolved specification -> ordered declaration list
//! 3. Emit: declaration list -> TypeScript text (via the `Emit` trait)
//!
//! ## Module Structure
//!
//! - `schema`: schema graph (SchemaNode, Shape)
//! - `types`: declaration IR (Declaration, TypeRef, Field)
//! - `api`: endpoint-level IR (HttpMethod, Endpoint, Degradation, Assembly)
//! - `resolve`: reference resolution with a cycle guard
//! - `registry`: shared-schema and declaration-name bookkeeping
//! - `synth`: schema node -> declarations + type reference
//! - `assemble`: paths and methods -> method/path/root records
//! - `emit`: declarations -> code strings
//! - `utils`: name synthesis and field key sanitizing

mod api;
mod assemble;
mod emit;
mod registry;
mod resolve;
mod schema;
mod synth;
mod types;
pub mod utils;

pub use api::{Assembly, ContentSite, Degradation, Endpoint, HttpMethod};
pub use assemble::assemble;
pub use emit::Emit;
pub use registry::ShapeRegistry;
pub use resolve::{resolve, resolve_in_place, resolve_specification};
pub use schema::{SchemaNode, Shape};
pub use synth::{GenerationContext, register_shared, synthesize};
pub use types::{Declaration, Field, Primitive, TypeRef, UnionMember, upsert_field};
