//! Search documents: curated documents reshaped for index ingestion.

use serde::{Deserialize, Serialize};

use crate::curated::{ApplicationClass, GeoPoint, ValueCategory};
use crate::staging::StagingRow;

/// Geo point in the search engine's named-field convention.
///
/// The named fields remove the axis-order ambiguity of the GeoJSON
/// `[lon, lat]` pair at the type level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoLatLon {
    pub lat: f64,
    pub lon: f64,
}

impl GeoLatLon {
    /// Re-express a GeoJSON point as named lat/lon fields.
    ///
    /// Returns `None` when either coordinate is not a finite number,
    /// in which case the field is omitted from the search document
    /// rather than excluding the document.
    pub fn from_point(point: &GeoPoint) -> Option<Self> {
        let [lon, lat] = point.coordinates;
        if lon.is_finite() && lat.is_finite() {
            Some(Self { lat, lon })
        } else {
            None
        }
    }
}

/// One document of the `ottawa_permits` search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchDocument {
    #[serde(flatten)]
    pub row: StagingRow,
    #[serde(rename = "LABELS")]
    pub labels: Vec<String>,
    #[serde(rename = "APPL_TYPE_2")]
    pub application_class: ApplicationClass,
    #[serde(rename = "VALUE_CATEGORY")]
    pub value_category: Option<ValueCategory>,
    /// Omitted entirely when no well-formed geo point was available.
    #[serde(rename = "GEO_POINT", skip_serializing_if = "Option::is_none")]
    pub geo_point: Option<GeoLatLon>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_point_preserves_axes() {
        let point = GeoPoint::new(-75.7, 45.4);
        let geo = GeoLatLon::from_point(&point).unwrap();

        assert_eq!(geo.lon, -75.7);
        assert_eq!(geo.lat, 45.4);
    }

    #[test]
    fn test_from_point_rejects_non_finite() {
        let point = GeoPoint::new(f64::NAN, 45.4);
        assert!(GeoLatLon::from_point(&point).is_none());
    }

    #[test]
    fn test_missing_geo_field_is_omitted() {
        let doc = SearchDocument {
            row: StagingRow::with_permit_id("A1"),
            labels: vec![],
            application_class: ApplicationClass::Construction,
            value_category: None,
            geo_point: None,
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("GEO_POINT").is_none());
    }

    #[test]
    fn test_geo_field_named_lat_lon() {
        let doc = SearchDocument {
            row: StagingRow::with_permit_id("A1"),
            labels: vec![],
            application_class: ApplicationClass::Construction,
            value_category: None,
            geo_point: Some(GeoLatLon {
                lat: 45.4,
                lon: -75.7,
            }),
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["GEO_POINT"]["lat"], 45.4);
        assert_eq!(value["GEO_POINT"]["lon"], -75.7);
    }
}
