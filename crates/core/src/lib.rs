#![forbid(unsafe_code)]
#![deny(warnings, unused_must_use, dead_code, missing_debug_implementations)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! API specification to TypeScript declaration generator.
//!
//! Reads an OpenAPI-style document and produces one declaration per distinct
//! object, array, and enum shape, plus aggregate records describing every
//! endpoint's request and response types:
//! - Shared schemas are declared once, however many sites point at them
//! - Names are derived from paths, methods, status codes, and schema keys
//! - Generation is deterministic: the same document gives the same text

pub mod config;
mod emitter;
pub mod error;
pub mod ir;
pub mod spec;

pub use config::GenerateOptions;
pub use emitter::{Generated, generate, generate_spec};
pub use error::{GenerateError, Result};
pub use ir::{Assembly, Declaration, Degradation, Emit, HttpMethod, TypeRef};
pub use spec::Specification;
