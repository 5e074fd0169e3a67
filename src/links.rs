//! Queries over the `links` arrays of OGC API response payloads.
//!
//! All functions operate on raw [`serde_json::Value`]s rather than typed
//! structs: the payloads under test may be structurally defective (a link
//! without `rel`, a non-string `href`), and typed deserialization would
//! reject exactly the documents these checks are meant to report on.

use serde_json::Value;

/// Standard link relations
pub mod rel {
    pub const SELF: &str = "self";
    pub const ALTERNATE: &str = "alternate";
    pub const CONFORMANCE: &str = "conformance";
    pub const DATA: &str = "data";
    pub const SERVICE_DESC: &str = "service-desc";
    pub const ITEMS: &str = "items";
    pub const NEXT: &str = "next";
    pub const PREV: &str = "prev";
}

/// Standard media types
pub mod media_type {
    pub const JSON: &str = "application/json";
    pub const GEOJSON: &str = "application/geo+json";
    pub const HTML: &str = "text/html";
    pub const OPENAPI_JSON: &str = "application/vnd.oai.openapi+json;version=3.0";
}

/// Finds the first link with the passed relation, in document order.
///
/// First occurrence wins by contract: when several links share a relation,
/// callers wanting all of them must use
/// [`find_links_by_rel_and_media_types`].
pub fn find_link_by_rel<'a>(links: &'a [Value], expected_rel: &str) -> Option<&'a Value> {
    links
        .iter()
        .find(|link| link.get("rel").and_then(Value::as_str) == Some(expected_rel))
}

/// Finds all links with the passed relation whose `type` is one of the passed
/// media types, preserving document order.
pub fn find_links_by_rel_and_media_types<'a>(
    links: &'a [Value],
    media_types: &[&str],
    expected_rel: &str,
) -> Vec<&'a Value> {
    links
        .iter()
        .filter(|link| {
            link.get("rel").and_then(Value::as_str) == Some(expected_rel)
                && link
                    .get("type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| media_types.contains(&t))
        })
        .collect()
}

/// Collects the hrefs of links missing the `rel` or `type` property, i.e.
/// the structurally incomplete ones. A link that lacks even a string `href`
/// is still reported, identified by its JSON rendering.
pub fn links_without_rel_or_type(links: &[Value]) -> Vec<String> {
    links
        .iter()
        .filter(|link| !link_includes_rel_and_type(link))
        .map(|link| match link.get("href").and_then(Value::as_str) {
            Some(href) => href.to_string(),
            None => link.to_string(),
        })
        .collect()
}

/// Returns the subset of the required media types for which no link declares
/// that `type`.
pub fn unsupported_media_types(links: &[Value], required_media_types: &[&str]) -> Vec<String> {
    required_media_types
        .iter()
        .filter(|media_type| {
            !links
                .iter()
                .any(|link| link.get("type").and_then(Value::as_str) == Some(**media_type))
        })
        .map(|media_type| media_type.to_string())
        .collect()
}

/// A link is complete only if both `rel` and `type` are present.
pub fn link_includes_rel_and_type(link: &Value) -> bool {
    link.get("rel").is_some() && link.get("type").is_some()
}

/// Checks whether a top-level property exists in the passed document.
pub fn has_property(property_name: &str, document: &Value) -> bool {
    document.get(property_name).is_some()
}

/// Parses the id of the first feature in the passed feature collection that
/// has a string `id`, if any.
pub fn parse_feature_id(collection_items: &Value) -> Option<&str> {
    collection_items
        .get("features")?
        .as_array()?
        .iter()
        .find_map(|feature| feature.get("id").and_then(Value::as_str))
}
