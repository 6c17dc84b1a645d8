//! Errors that abort a generation run.

use thiserror::Error;

/// Fatal conditions raised while loading, resolving, or assembling a specification.
///
/// Recoverable conditions (malformed or unsupported content schemas) are not
/// errors; they are reported as [`crate::Degradation`] values instead.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A reference names a shared schema that does not exist.
    #[error("Schema with key {key} not found")]
    SchemaNotFound {
        /// The missing shared schema key.
        key: String,
    },

    /// A chain of references loops back onto itself.
    #[error("Schema reference cycle detected: {chain}")]
    SchemaCycle {
        /// The offending chain, e.g. `Node -> Children -> Node`.
        chain: String,
    },

    /// The document parsed but does not have the shape of a specification.
    #[error("Invalid specification document: {0}")]
    InvalidDocument(String),

    /// The document is not valid JSON.
    #[error("Failed to parse specification JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is not valid YAML.
    #[error("Failed to parse specification YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias used across the crate.
pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
