//! Spatial extent parsing for collection descriptions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Spatial extent of a collection: `[minx, miny, maxx, maxy]` in WGS 84.
///
/// Only 2-D bounding boxes are supported; see [`parse_spatial_extent`] for
/// how 3-D extents are handled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Renders the bbox as the value of a `bbox` query parameter:
    /// `minx,miny,maxx,maxy`.
    pub fn as_query_parameter(&self) -> String {
        format!("{},{},{},{}", self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Parses the spatial extent from a collection description.
///
/// Returns `Ok(None)` if the collection declares no extent, or the extent has
/// no `spatial` array. A 4-coordinate array yields a [`BBox`]; a 6-coordinate
/// (3-D) array is rejected with [`Error::UnsupportedExtent`] rather than
/// truncated; any other length is [`Error::InvalidExtent`].
pub fn parse_spatial_extent(collection: &Value) -> Result<Option<BBox>> {
    let Some(spatial) = extent_component(collection, "spatial") else {
        return Ok(None);
    };
    match spatial.len() {
        4 => Ok(Some(BBox::new(
            coerce_to_f64(&spatial[0])?,
            coerce_to_f64(&spatial[1])?,
            coerce_to_f64(&spatial[2])?,
            coerce_to_f64(&spatial[3])?,
        ))),
        6 => Err(Error::UnsupportedExtent(
            "bbox with 6 coordinates is currently not supported".to_string(),
        )),
        n => Err(Error::InvalidExtent(format!(
            "bbox with {} coordinates is invalid",
            n
        ))),
    }
}

/// Looks up `extent.<key>` in a collection description, requiring the extent
/// to be an object and the component to be an array.
pub(crate) fn extent_component<'a>(collection: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    collection.get("extent")?.as_object()?.get(key)?.as_array()
}

/// Coerces a heterogeneous JSON value (integer, float, double or numeric
/// string) to an `f64`. Anything else fails with
/// [`Error::InvalidCoordinate`]; there is no silent fallback.
pub fn coerce_to_f64(value: &Value) -> Result<f64> {
    let coord = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| Error::InvalidCoordinate(n.to_string()))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidCoordinate(s.clone()))?,
        other => return Err(Error::InvalidCoordinate(other.to_string())),
    };
    if !coord.is_finite() {
        return Err(Error::InvalidCoordinate(value.to_string()));
    }
    Ok(coord)
}
