//! Endpoint assembly: specification -> ordered declarations.
//!
//! Walks every path and method in declaration order, synthesizes the types
//! of each request and response body, and wraps them in three layers of
//! aggregate records:
//! - one per method: `{ request?, response: { <status>: T } }`
//! - one per path: `{ get: WidgetsGet, post: WidgetsPost }`
//! - one root: `{ title, version, <Path>: ... }`

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::config::GenerateOptions;
use crate::error::Result;
use crate::spec::{MediaType, Operation, Specification};

use super::api::{Assembly, ContentSite, Degradation, Endpoint, HttpMethod};
use super::schema::{SchemaNode, Shape};
use super::synth::{GenerationContext, register_shared, synthesize};
use super::types::{Declaration, Field, TypeRef, upsert_field};
use super::utils::{compose_name, to_declaration_name};

const PAYLOAD_SUFFIX: &str = "Payload";
const RESPONSE_SUFFIX: &str = "Response";

/// Assemble every endpoint of `spec` into declarations.
///
/// Shared schemas are registered first, in declaration order, so endpoint
/// bodies that point at them reuse their declarations.
pub fn assemble(spec: &Specification, options: &GenerateOptions) -> Result<Assembly> {
    let mut ctx = GenerationContext::new(spec.schemas());
    for key in spec.schemas().keys() {
        register_shared(key, &mut ctx)?;
    }

    let mut endpoints = Vec::new();
    let mut degradations = Vec::new();
    let mut root_fields = vec![
        Field::new("title", TypeRef::Literal(spec.info.title.clone())),
        Field::new("version", TypeRef::Literal(spec.info.version.clone())),
    ];

    for (path, item) in &spec.paths {
        let path_name = to_declaration_name(path);
        let mut path_fields = Vec::new();

        for (&method, operation) in &item.operations {
            if !options.includes(method) {
                debug!(path = %path, method = %method, "Skipping filtered method.");
                continue;
            }
            let scope = OperationScope {
                path,
                method,
                proposed_name: compose_name(&[&path_name, method.as_str()]),
            };
            let endpoint = scope.assemble(operation, &mut ctx, &mut degradations)?;
            upsert_field(
                &mut path_fields,
                Field::new(method.as_str(), TypeRef::Named(endpoint.type_name.clone())),
            );
            endpoints.push(endpoint);
        }

        let path_type = ctx.emit(Declaration::Record {
            name: path_name.clone(),
            fields: path_fields,
        });
        upsert_field(&mut root_fields, Field::new(path_name, TypeRef::Named(path_type)));
    }

    let root_name = to_declaration_name(
        options
            .root_name
            .as_deref()
            .unwrap_or(&spec.info.title),
    );
    let root = ctx.emit(Declaration::Record {
        name: root_name,
        fields: root_fields,
    });

    let declarations = ctx.into_registry().into_declarations();
    debug!(
        root = %root,
        declarations = declarations.len(),
        endpoints = endpoints.len(),
        degradations = degradations.len(),
        "Assembled specification."
    );

    Ok(Assembly {
        declarations,
        root,
        endpoints,
        degradations,
    })
}

/// One (path, method) pair being assembled.
struct OperationScope<'s> {
    path: &'s str,
    method: HttpMethod,
    proposed_name: String,
}

impl OperationScope<'_> {
    fn assemble(
        &self,
        operation: &Operation,
        ctx: &mut GenerationContext<'_>,
        degradations: &mut Vec<Degradation>,
    ) -> Result<Endpoint> {
        let request = match &operation.request_body {
            Some(body) => {
                let proposed = compose_name(&[&self.proposed_name, PAYLOAD_SUFFIX]);
                Some(self.content_type(
                    &ContentSite::Request,
                    &body.content,
                    &proposed,
                    ctx,
                    degradations,
                )?)
            }
            None => None,
        };

        let mut responses = IndexMap::new();
        for (status, response) in &operation.responses {
            let proposed = compose_name(&[&self.proposed_name, RESPONSE_SUFFIX, status]);
            let ty = self.content_type(
                &ContentSite::Response(status.clone()),
                &response.content,
                &proposed,
                ctx,
                degradations,
            )?;
            responses.insert(status.clone(), ty);
        }

        let mut fields = Vec::new();
        if let Some(request) = &request {
            upsert_field(&mut fields, Field::new("request", request.clone()));
        }
        let response_fields = responses
            .iter()
            .map(|(status, ty)| Field::new(status.clone(), ty.clone()))
            .collect();
        upsert_field(&mut fields, Field::new("response", TypeRef::Object(response_fields)));

        let type_name = ctx.emit(Declaration::Record {
            name: self.proposed_name.clone(),
            fields,
        });
        debug!(path = %self.path, method = %self.method, name = %type_name, "Assembled endpoint.");

        Ok(Endpoint {
            path: self.path.to_string(),
            method: self.method,
            type_name,
            request,
            responses,
        })
    }

    /// Type of one body: the union of its content entries' types.
    fn content_type(
        &self,
        site: &ContentSite,
        content: &IndexMap<String, MediaType>,
        proposed_name: &str,
        ctx: &mut GenerationContext<'_>,
        degradations: &mut Vec<Degradation>,
    ) -> Result<TypeRef> {
        let mut alternatives = Vec::with_capacity(content.len());
        for (content_type, media) in content {
            let ty = match &media.schema {
                None | Some(SchemaNode::Inline(Shape::Unknown { declared: None })) => {
                    degrade(degradations, Degradation::MalformedContent {
                        path: self.path.to_string(),
                        method: self.method,
                        site: site.clone(),
                        content_type: content_type.clone(),
                    })
                }
                Some(SchemaNode::Inline(Shape::Unknown {
                    declared: Some(declared),
                })) => degrade(degradations, Degradation::UnsupportedShape {
                    path: self.path.to_string(),
                    method: self.method,
                    site: site.clone(),
                    content_type: content_type.clone(),
                    declared: declared.clone(),
                }),
                Some(node) => synthesize(node, proposed_name, ctx)?,
            };
            alternatives.push(ty);
        }
        Ok(TypeRef::union_of(alternatives))
    }
}

fn degrade(degradations: &mut Vec<Degradation>, degradation: Degradation) -> TypeRef {
    warn!(degradation = %degradation, "Content schema degraded to unknown.");
    degradations.push(degradation);
    TypeRef::unknown()
}
