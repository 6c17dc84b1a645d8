//! TypeScript declaration generator for API specifications.
//!
//! This module is a thin wrapper around the IR passes.
//! The pipeline is:
//! 1. Parse: document -> Specification
//! 2. Resolve: Specification -> Specification without `$ref` pointers
//! 3. Assemble: Specification -> Assembly (ordered declarations)
//! 4. Emit: Assembly -> String (via Emit trait)

use tracing::debug;

use crate::config::GenerateOptions;
use crate::error::Result;
use crate::ir::{Degradation, Emit, assemble, resolve_specification};
use crate::spec::Specification;

/// Output of one generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Emitted TypeScript declarations.
    pub types: String,
    /// `info.title` of the specification.
    pub title: String,
    /// `info.version` of the specification.
    pub version: String,
    /// Name of the root declaration.
    pub type_root: String,
    /// Content schemas that degraded to `unknown`.
    pub degradations: Vec<Degradation>,
}

/// Generate TypeScript declarations from an already deserialized document.
pub fn generate(document: serde_json::Value, options: &GenerateOptions) -> Result<Generated> {
    generate_spec(Specification::from_value(document)?, options)
}

/// Generate TypeScript declarations from a parsed specification.
pub fn generate_spec(mut spec: Specification, options: &GenerateOptions) -> Result<Generated> {
    resolve_specification(&mut spec)?;
    let assembly = assemble(&spec, options)?;
    let types = assembly.declarations.emit();

    debug!(
        title = %spec.info.title,
        root = %assembly.root,
        bytes = types.len(),
        "Generated declarations."
    );

    Ok(Generated {
        types,
        title: spec.info.title,
        version: spec.info.version,
        type_root: assembly.root,
        degradations: assembly.degradations,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::error::GenerateError;
    use serde_json::json;

    #[test]
    fn test_generate_from_value() {
        let document = json!({
            "info": { "title": "Tiny API", "version": "0.1.0" },
            "paths": {
                "/health": { "get": { "responses": {
                    "200": { "content": { "text/plain": { "schema": { "type": "string" } } } }
                } } }
            }
        });
        let generated = generate(document, &GenerateOptions::default()).unwrap();

        assert_eq!(generated.title, "Tiny API");
        assert_eq!(generated.version, "0.1.0");
        assert_eq!(generated.type_root, "TinyAPI");
        assert_eq!(
            generated.types,
            concat!(
                "export interface HealthGet {\n",
                "  response: { \"200\": string };\n",
                "}\n",
                "\n",
                "export interface Health {\n",
                "  get: HealthGet;\n",
                "}\n",
                "\n",
                "export interface TinyAPI {\n",
                "  title: \"Tiny API\";\n",
                "  version: \"0.1.0\";\n",
                "  Health: Health;\n",
                "}\n",
            )
        );
    }

    #[test]
    fn test_generate_rejects_non_specification() {
        let err = generate(json!({ "paths": {} }), &GenerateOptions::default()).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidDocument(_)));
    }

    #[test]
    fn test_generate_reports_degradations() {
        let document = json!({
            "info": { "title": "Demo", "version": "1" },
            "paths": { "/upload": { "post": {
                "requestBody": { "content": { "application/octet-stream": { "schema": { "type": "file" } } } },
                "responses": {}
            } } }
        });
        let generated = generate(document, &GenerateOptions::default()).unwrap();
        assert_eq!(generated.degradations.len(), 1);
        assert!(generated.types.contains("  request: unknown;\n"));
    }
}
