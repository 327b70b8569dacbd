//! Curated documents: staging rows enriched with derived fields.

use serde::{Deserialize, Serialize};

use crate::staging::StagingRow;

/// GeoJSON point, `{type: "Point", coordinates: [lon, lat]}`.
///
/// Coordinate order follows GeoJSON: longitude first, latitude second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    /// Build a point from longitude and latitude, in that order.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            kind: "Point".to_string(),
            coordinates: [lon, lat],
        }
    }

    pub fn lon(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn lat(&self) -> f64 {
        self.coordinates[1]
    }
}

/// Semantic permit classification derived from the application type
/// and extracted labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationClass {
    Demolition,
    Renovation,
    #[serde(rename = "Destruct+Construct")]
    DestructConstruct,
    Construction,
}

/// Bucketed declared value of the work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueCategory {
    Low,
    Medium,
    High,
}

/// One document of the `permits_curated` collection.
///
/// Every curated document carries a valid [`GeoPoint`]; rows whose
/// geo-point could not be constructed are excluded by the enricher,
/// not stored with a null field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedDocument {
    #[serde(flatten)]
    pub row: StagingRow,
    /// Deduplicated keyword tags matched from the description.
    #[serde(rename = "LABELS")]
    pub labels: Vec<String>,
    #[serde(rename = "APPL_TYPE_2")]
    pub application_class: ApplicationClass,
    /// Absent when the value could not be bucketed.
    #[serde(rename = "VALUE_CATEGORY")]
    pub value_category: Option<ValueCategory>,
    #[serde(rename = "GEO_POINT")]
    pub geo_point: GeoPoint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_shape() {
        let point = GeoPoint::new(-75.7, 45.4);
        let value = serde_json::to_value(&point).unwrap();

        assert_eq!(value["type"], "Point");
        assert_eq!(value["coordinates"][0], -75.7);
        assert_eq!(value["coordinates"][1], 45.4);
    }

    #[test]
    fn test_destruct_construct_rename() {
        let class = ApplicationClass::DestructConstruct;
        assert_eq!(
            serde_json::to_value(class).unwrap(),
            serde_json::json!("Destruct+Construct")
        );
    }

    #[test]
    fn test_curated_document_flattens_row() {
        let doc = CuratedDocument {
            row: StagingRow::with_permit_id("A1"),
            labels: vec!["deck".to_string()],
            application_class: ApplicationClass::Construction,
            value_category: Some(ValueCategory::Medium),
            geo_point: GeoPoint::new(-75.7, 45.4),
        };

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["PERMIT"], "A1");
        assert_eq!(value["APPL_TYPE_2"], "Construction");
        assert_eq!(value["VALUE_CATEGORY"], "Medium");
        assert_eq!(value["GEO_POINT"]["type"], "Point");
    }
}
