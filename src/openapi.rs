//! Test-point derivation from an OpenAPI description.
//!
//! Every templated GET path in the API description is expanded against the
//! declared enumerations of its path parameters; one [`TestPoint`] is
//! produced per parameter-value combination. The expansion is deterministic:
//! parameters are bound in template order and the leftmost parameter varies
//! slowest, so repeated derivation over the same model yields the identical
//! sequence.

use indexmap::IndexMap;
use openapiv3::{
    MediaType, OpenAPI, Operation, Parameter, ParameterData, ParameterSchemaOrContent, PathItem,
    ReferenceOr, Schema, SchemaKind, StatusCode, Type,
};
use serde_json::Value;
use url::Url;

use crate::error::{Error, Result};

/// Placeholder bound to a path parameter that declares neither an
/// enumeration nor a default, so that every parameter contributes arity 1 to
/// the cross-product.
const SYNTHETIC_PARAMETER_VALUE: &str = "1";

/// A concrete, request-ready endpoint derived from one (path,
/// parameter-combination) pair of the API description.
#[derive(Debug, Clone)]
pub struct TestPoint {
    base_url: Url,
    path_template: String,
    template_replacements: IndexMap<String, String>,
    content_media_types: IndexMap<String, MediaType>,
}

impl TestPoint {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The raw path template, e.g. `/collections/{collectionId}/items`.
    pub fn path_template(&self) -> &str {
        &self.path_template
    }

    /// Parameter name to bound value, in template order.
    pub fn template_replacements(&self) -> &IndexMap<String, String> {
        &self.template_replacements
    }

    /// Media types declared on the GET operation's success response, keyed by
    /// media-type string. The descriptors are opaque to this crate.
    pub fn content_media_types(&self) -> &IndexMap<String, MediaType> {
        &self.content_media_types
    }

    /// The path template with all parameter placeholders substituted.
    pub fn request_path(&self) -> String {
        let mut path = self.path_template.clone();
        for (name, value) in &self.template_replacements {
            path = path.replace(&format!("{{{}}}", name), value);
        }
        path
    }

    /// The fully resolved request URL.
    pub fn request_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.request_path()
        )
    }
}

/// Parses an OpenAPI 3.x description from JSON, falling back to YAML.
pub fn load_api_document(document: &str) -> Result<OpenAPI> {
    match serde_json::from_str(document) {
        Ok(api) => Ok(api),
        Err(json_err) => serde_yaml::from_str(document).map_err(|yaml_err| {
            Error::InvalidApiDocument(format!(
                "not parseable as JSON ({}) or YAML ({})",
                json_err, yaml_err
            ))
        }),
    }
}

/// Derives the test points for every GET operation in the API description.
///
/// A model without GET operations yields an empty sequence.
pub fn retrieve_test_points(api: &OpenAPI, base_url: &Url) -> Vec<TestPoint> {
    derive_test_points(api, base_url, None)
}

/// Derives test points restricted to paths under the passed template prefix,
/// matched on whole segments: `/collections` covers `/collections` and
/// `/collections/{collectionId}/items` but not `/collectionsFoo`.
pub fn retrieve_test_points_for_path(
    api: &OpenAPI,
    base_url: &Url,
    path_filter: &str,
) -> Vec<TestPoint> {
    derive_test_points(api, base_url, Some(path_filter))
}

fn derive_test_points(api: &OpenAPI, base_url: &Url, path_filter: Option<&str>) -> Vec<TestPoint> {
    let mut test_points = Vec::new();
    for (path_template, item) in api.paths.paths.iter() {
        let Some(path_item) = item.as_item() else {
            continue;
        };
        let Some(operation) = path_item.get.as_ref() else {
            continue;
        };
        if let Some(filter) = path_filter {
            if !matches_path_filter(path_template, filter) {
                continue;
            }
        }

        let parameter_names = template_parameter_names(path_template);
        let value_sets: Vec<Vec<String>> = parameter_names
            .iter()
            .map(|name| parameter_values(api, find_path_parameter(api, path_item, operation, name)))
            .collect();
        let content_media_types = success_response_content(operation);

        for combination in cartesian_product(&value_sets) {
            let template_replacements = parameter_names
                .iter()
                .map(|name| name.to_string())
                .zip(combination)
                .collect();
            test_points.push(TestPoint {
                base_url: base_url.clone(),
                path_template: path_template.clone(),
                template_replacements,
                content_media_types: content_media_types.clone(),
            });
        }
    }
    test_points
}

/// The ordered sequence of values a path parameter can take: its declared
/// enumeration when present (declaration order, duplicates kept), else its
/// schema default, else the synthetic placeholder. Never empty, so a path
/// never silently vanishes from coverage.
pub fn parameter_values(api: &OpenAPI, parameter: Option<&ParameterData>) -> Vec<String> {
    let Some(schema) = parameter.and_then(|data| parameter_schema(api, data)) else {
        return vec![SYNTHETIC_PARAMETER_VALUE.to_string()];
    };
    let enumerated = enumerated_values(&schema.schema_kind);
    if !enumerated.is_empty() {
        return enumerated;
    }
    if let Some(default) = schema.schema_data.default.as_ref().and_then(scalar_to_string) {
        return vec![default];
    }
    vec![SYNTHETIC_PARAMETER_VALUE.to_string()]
}

/// Template parameter names in first-occurrence order.
fn template_parameter_names(path_template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path_template;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
        rest = &rest[start + len + 1..];
    }
    names
}

/// Finds the declaration of a path parameter, preferring operation-level
/// declarations over path-item-level ones.
fn find_path_parameter<'a>(
    api: &'a OpenAPI,
    path_item: &'a PathItem,
    operation: &'a Operation,
    name: &str,
) -> Option<&'a ParameterData> {
    operation
        .parameters
        .iter()
        .chain(path_item.parameters.iter())
        .filter_map(|parameter| resolve_parameter(api, parameter))
        .filter_map(|parameter| match parameter {
            Parameter::Path { parameter_data, .. } => Some(parameter_data),
            _ => None,
        })
        .find(|data| data.name == name)
}

fn resolve_parameter<'a>(
    api: &'a OpenAPI,
    parameter: &'a ReferenceOr<Parameter>,
) -> Option<&'a Parameter> {
    match parameter {
        ReferenceOr::Item(item) => Some(item),
        ReferenceOr::Reference { reference } => {
            let name = reference.strip_prefix("#/components/parameters/")?;
            api.components.as_ref()?.parameters.get(name)?.as_item()
        }
    }
}

fn parameter_schema<'a>(api: &'a OpenAPI, data: &'a ParameterData) -> Option<&'a Schema> {
    match &data.format {
        ParameterSchemaOrContent::Schema(schema) => resolve_schema(api, schema),
        ParameterSchemaOrContent::Content(_) => None,
    }
}

fn resolve_schema<'a>(api: &'a OpenAPI, schema: &'a ReferenceOr<Schema>) -> Option<&'a Schema> {
    match schema {
        ReferenceOr::Item(item) => Some(item),
        ReferenceOr::Reference { reference } => {
            let name = reference.strip_prefix("#/components/schemas/")?;
            api.components.as_ref()?.schemas.get(name)?.as_item()
        }
    }
}

fn enumerated_values(kind: &SchemaKind) -> Vec<String> {
    match kind {
        SchemaKind::Type(Type::String(string)) => {
            string.enumeration.iter().flatten().cloned().collect()
        }
        SchemaKind::Type(Type::Integer(integer)) => integer
            .enumeration
            .iter()
            .flatten()
            .map(|value| value.to_string())
            .collect(),
        SchemaKind::Type(Type::Number(number)) => number
            .enumeration
            .iter()
            .flatten()
            .map(|value| value.to_string())
            .collect(),
        SchemaKind::Any(any) => any.enumeration.iter().filter_map(scalar_to_string).collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn success_response_content(operation: &Operation) -> IndexMap<String, MediaType> {
    operation
        .responses
        .responses
        .get(&StatusCode::Code(200))
        .and_then(|response| response.as_item())
        .map(|response| response.content.clone())
        .unwrap_or_default()
}

fn matches_path_filter(path_template: &str, path_filter: &str) -> bool {
    let filter = path_filter.trim_end_matches('/');
    path_template == filter || path_template.starts_with(&format!("{}/", filter))
}

/// Cross-product of the per-parameter value sequences; the first sequence
/// varies slowest, mirroring nested-loop enumeration. An empty input yields
/// one empty combination, so parameterless paths still produce a test point.
fn cartesian_product(value_sets: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut combinations = vec![Vec::new()];
    for values in value_sets {
        let mut expanded = Vec::with_capacity(combinations.len() * values.len());
        for combination in &combinations {
            for value in values {
                let mut next = combination.clone();
                next.push(value.clone());
                expanded.push(next);
            }
        }
        combinations = expanded;
    }
    combinations
}
