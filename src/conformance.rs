//! Requirement classes a server under test may claim conformance to.

use serde_json::Value;

/// Conformance class URIs (WFS 3.0 draft)
pub mod classes {
    pub const CORE: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/core";
    pub const HTML: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/html";
    pub const GEOJSON: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/geojson";
    pub const GMLSF0: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/gmlsf0";
    pub const GMLSF2: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/gmlsf2";
    pub const OPENAPI30: &str = "http://www.opengis.net/spec/wfs-1/3.0/req/oas30";
}

/// The closed set of known requirement classes.
///
/// Encoding classes carry the media types they require: one for features and
/// collections payloads, one for other resources. `Core` and `OpenApi30`
/// carry none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequirementClass {
    Core,
    Html,
    GeoJson,
    GmlSf0,
    GmlSf2,
    OpenApi30,
}

impl RequirementClass {
    pub const ALL: [RequirementClass; 6] = [
        RequirementClass::Core,
        RequirementClass::Html,
        RequirementClass::GeoJson,
        RequirementClass::GmlSf0,
        RequirementClass::GmlSf2,
        RequirementClass::OpenApi30,
    ];

    /// The conformance class URI identifying this requirement class.
    pub fn conformance_class(&self) -> &'static str {
        match self {
            RequirementClass::Core => classes::CORE,
            RequirementClass::Html => classes::HTML,
            RequirementClass::GeoJson => classes::GEOJSON,
            RequirementClass::GmlSf0 => classes::GMLSF0,
            RequirementClass::GmlSf2 => classes::GMLSF2,
            RequirementClass::OpenApi30 => classes::OPENAPI30,
        }
    }

    /// The media type required for features and collections payloads, if this
    /// class mandates one.
    pub fn media_type_features_and_collections(&self) -> Option<&'static str> {
        match self {
            RequirementClass::Html => Some("text/html"),
            RequirementClass::GeoJson => Some("application/geo+json"),
            RequirementClass::GmlSf0 => Some(
                "application/gml+xml;version=3.2;profile=http://www.opengis.net/def/profile/ogc/2.0/gml-sf0",
            ),
            RequirementClass::GmlSf2 => Some(
                "application/gml+xml;version=3.2;profile=http://www.opengis.net/def/profile/ogc/2.0/gml-sf2",
            ),
            RequirementClass::Core | RequirementClass::OpenApi30 => None,
        }
    }

    /// The media type required for other resources, if this class mandates
    /// one.
    pub fn media_type_other_resources(&self) -> Option<&'static str> {
        match self {
            RequirementClass::Html => Some("text/html"),
            RequirementClass::GeoJson => Some("application/json"),
            RequirementClass::GmlSf0 | RequirementClass::GmlSf2 => Some("application/xml"),
            RequirementClass::Core | RequirementClass::OpenApi30 => None,
        }
    }

    pub fn has_media_type_for_features_and_collections(&self) -> bool {
        self.media_type_features_and_collections().is_some()
    }

    pub fn has_media_type_for_other_resources(&self) -> bool {
        self.media_type_other_resources().is_some()
    }

    /// Looks up the requirement class identified by the passed conformance
    /// class URI. Unknown URIs yield `None`.
    pub fn by_conformance_class(conformance_class: &str) -> Option<RequirementClass> {
        Self::ALL
            .into_iter()
            .find(|class| class.conformance_class() == conformance_class)
    }

    /// Scans a conformance declaration (`{"conformsTo": [...]}`)
    /// for known requirement classes, in declaration order. Unknown URIs are
    /// skipped; a missing or malformed `conformsTo` yields an empty list.
    pub fn from_conformance_declaration(declaration: &Value) -> Vec<RequirementClass> {
        declaration
            .get("conformsTo")
            .and_then(Value::as_array)
            .map(|classes| {
                classes
                    .iter()
                    .filter_map(Value::as_str)
                    .filter_map(Self::by_conformance_class)
                    .collect()
            })
            .unwrap_or_default()
    }
}
