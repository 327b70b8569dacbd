//! Flattened staging rows, the relational projection of raw records.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the `permits_staging` table.
///
/// Field names serialize with the original dataset's uppercase column
/// names so the same shape flows through every storage tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StagingRow {
    /// Permit identifier, unique within a staging set.
    #[serde(rename = "PERMIT")]
    pub permit_id: String,
    #[serde(rename = "APPL_TYPE")]
    pub application_type: Option<String>,
    #[serde(rename = "BLG_TYPE")]
    pub building_type: Option<String>,
    /// Declared value of the work; 0.0 when the source was not numeric.
    #[serde(rename = "VALUE")]
    pub value: f64,
    #[serde(rename = "WARD")]
    pub ward: Option<String>,
    #[serde(rename = "DESCRIPTION")]
    pub description: Option<String>,
    /// Parse failures become `None`, never an error.
    #[serde(rename = "ISSUED_DATE")]
    pub issued_date: Option<NaiveDateTime>,
    #[serde(rename = "LOCATION")]
    pub location: Option<String>,
    #[serde(rename = "CONTRACTOR")]
    pub contractor: Option<String>,
    #[serde(rename = "GEOMETRY_TYPE")]
    pub geometry_type: Option<String>,
    /// Coordinate pair serialized to a JSON string for relational
    /// storage; `None` when the raw geometry had no composite shape.
    #[serde(rename = "COORDINATES")]
    pub coordinates: Option<String>,
}

impl StagingRow {
    /// Minimal row with only the required identifier set, used as a
    /// starting point in tests.
    pub fn with_permit_id(permit_id: impl Into<String>) -> Self {
        Self {
            permit_id: permit_id.into(),
            application_type: None,
            building_type: None,
            value: 0.0,
            ward: None,
            description: None,
            issued_date: None,
            location: None,
            contractor: None,
            geometry_type: None,
            coordinates: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_uppercase_columns() {
        let row = StagingRow::with_permit_id("A1");
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["PERMIT"], "A1");
        assert!(value.get("permit_id").is_none());
        assert_eq!(value["VALUE"], 0.0);
    }
}
