//! API-level IR for assembled endpoints.
//!
//! This module defines what the assembler hands back:
//! - HttpMethod: the supported operation keys
//! - Endpoint: one (path, method) pair with its request/response types
//! - Degradation: a recovered, non-fatal problem
//! - Assembly: the ordered declaration list plus the above

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

use super::types::{Declaration, TypeRef};

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    /// `get`
    Get,
    /// `post`
    Post,
    /// `put`
    Put,
    /// `patch`
    Patch,
    /// `delete`
    Delete,
}

impl HttpMethod {
    /// Every supported method.
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    /// Key used for this method in a path item.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Parse a path item key; anything that is not a supported method is `None`.
    pub fn parse(key: &str) -> Option<Self> {
        HttpMethod::ALL.into_iter().find(|m| m.as_str() == key)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One assembled (path, method) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// URL path (e.g., "/widgets/{id}")
    pub path: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Name of the method-level declaration
    pub type_name: String,
    /// Request body type (None = the operation declares no body)
    pub request: Option<TypeRef>,
    /// Status code -> response type
    pub responses: IndexMap<String, TypeRef>,
}

/// Where in an endpoint a degraded schema sits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSite {
    /// The request body
    Request,
    /// The response for a status code
    Response(String),
}

impl fmt::Display for ContentSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSite::Request => f.write_str("request"),
            ContentSite::Response(status) => write!(f, "response {status}"),
        }
    }
}

/// A recovered problem: the affected field became `unknown` and generation went on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degradation {
    /// A content entry with neither a type nor a reference (or no schema at all).
    MalformedContent {
        /// Endpoint path
        path: String,
        /// Endpoint method
        method: HttpMethod,
        /// Request or response status
        site: ContentSite,
        /// Content type of the entry
        content_type: String,
    },
    /// A content schema whose declared type is outside the recognized set.
    UnsupportedShape {
        /// Endpoint path
        path: String,
        /// Endpoint method
        method: HttpMethod,
        /// Request or response status
        site: ContentSite,
        /// Content type of the entry
        content_type: String,
        /// The declared type
        declared: String,
    },
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::MalformedContent {
                path,
                method,
                site,
                content_type,
            } => write!(
                f,
                "{method} {path} {site} ({content_type}): schema has neither a type nor a reference"
            ),
            Degradation::UnsupportedShape {
                path,
                method,
                site,
                content_type,
                declared,
            } => write!(
                f,
                "{method} {path} {site} ({content_type}): unsupported type `{declared}`"
            ),
        }
    }
}

/// Result of one generation pass.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Declarations in emission order
    pub declarations: Vec<Declaration>,
    /// Name of the root declaration
    pub root: String,
    /// Assembled endpoints, in path then method order
    pub endpoints: Vec<Endpoint>,
    /// Recovered problems, in the order they were met
    pub degradations: Vec<Degradation>,
}

impl Assembly {
    /// Look up a declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name() == name)
    }

    /// The root declaration.
    pub fn root_declaration(&self) -> Option<&Declaration> {
        self.declaration(&self.root)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_http_method_parse() {
        assert_eq!(HttpMethod::parse("get"), Some(HttpMethod::Get));
        assert_eq!(HttpMethod::parse("delete"), Some(HttpMethod::Delete));
        assert_eq!(HttpMethod::parse("GET"), None);
        assert_eq!(HttpMethod::parse("parameters"), None);
    }

    #[test]
    fn test_http_method_deserializes_lowercase() {
        let methods: Vec<HttpMethod> = serde_json::from_str(r#"["get", "patch"]"#).unwrap();
        assert_eq!(methods, [HttpMethod::Get, HttpMethod::Patch]);
    }

    #[test]
    fn test_degradation_display() {
        let d = Degradation::UnsupportedShape {
            path: "/files".into(),
            method: HttpMethod::Post,
            site: ContentSite::Response("200".into()),
            content_type: "application/octet-stream".into(),
            declared: "file".into(),
        };
        assert_eq!(
            d.to_string(),
            "post /files response 200 (application/octet-stream): unsupported type `file`"
        );
    }
}
