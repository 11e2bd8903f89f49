use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// GeoJSON-style geometry tag carried by a facility location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum GeoJsonType {
    Point,
    Polygon,
}

/// Geographic location stored on a facility: a geometry tag plus a flat
/// ordered coordinate sequence. Input arrives as (longitude, latitude)
/// pairs; storage flattens them so the sequence reads lon, lat, lon, lat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeoLocation {
    #[serde(rename = "type")]
    pub location_type: GeoJsonType,
    pub coordinates: Vec<f64>,
}

impl GeoLocation {
    pub fn from_pairs(location_type: GeoJsonType, pairs: &[[f64; 2]]) -> Self {
        Self {
            location_type,
            coordinates: pairs.iter().flat_map(|pair| [pair[0], pair[1]]).collect(),
        }
    }

    /// First (longitude, latitude) pair, the one the denormalized scalar
    /// columns and every geo predicate are driven by.
    pub fn primary_pair(&self) -> Option<(f64, f64)> {
        match self.coordinates.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        }
    }
}
