//! Index settings and mappings for the permits search index.

use serde_json::{json, Value};

/// The name of the search index.
pub const INDEX_NAME: &str = "ottawa_permits";

/// Get the index settings and explicit field-type mappings.
///
/// Keyword fields cover the identifier and categorical columns,
/// `DESCRIPTION`/`LOCATION` are full-text, `ISSUED_DATE` accepts
/// strict dates or epoch millis, and `GEO_POINT` is a geo_point.
pub fn get_index_settings() -> Value {
    json!({
        "mappings": {
            "properties": {
                "PERMIT": { "type": "keyword" },
                "APPL_TYPE": { "type": "keyword" },
                "APPL_TYPE_2": { "type": "keyword" },
                "BLG_TYPE": { "type": "keyword" },
                "VALUE": { "type": "float" },
                "VALUE_CATEGORY": { "type": "keyword" },
                "WARD": { "type": "keyword" },
                "DESCRIPTION": { "type": "text" },
                "LABELS": { "type": "keyword" },
                "ISSUED_DATE": {
                    "type": "date",
                    "format": "strict_date_optional_time||epoch_millis"
                },
                "LOCATION": { "type": "text" },
                "CONTRACTOR": { "type": "keyword" },
                "GEO_POINT": { "type": "geo_point" }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = get_index_settings();
        let properties = &settings["mappings"]["properties"];

        assert_eq!(properties["PERMIT"]["type"], "keyword");
        assert_eq!(properties["VALUE"]["type"], "float");
        assert_eq!(properties["DESCRIPTION"]["type"], "text");
        assert_eq!(properties["GEO_POINT"]["type"], "geo_point");
        assert_eq!(
            properties["ISSUED_DATE"]["format"],
            "strict_date_optional_time||epoch_millis"
        );
    }

    #[test]
    fn test_index_name() {
        assert_eq!(INDEX_NAME, "ottawa_permits");
    }
}
