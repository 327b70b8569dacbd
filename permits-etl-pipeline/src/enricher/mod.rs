//! Record enricher.
//!
//! Derives the four semantic fields of a curated document from a
//! staging row: keyword labels, application-type classification,
//! value bucketing, and the validated geo point. Rows whose geo point
//! cannot be constructed are excluded entirely; this is the only
//! row-dropping rule past normalization. Pure transform.

pub mod rules;

use serde_json::Value;
use tracing::debug;

use permits_etl_shared::{ApplicationClass, CuratedDocument, GeoPoint, StagingRow, ValueCategory};
use rules::{CLASSIFICATION_RULES, DEFAULT_CLASS, LABEL_RULES};

/// Enricher that turns staging rows into curated documents.
pub struct RecordEnricher;

impl RecordEnricher {
    /// Enrich a batch of staging rows, dropping geo-invalid rows.
    pub fn enrich(rows: Vec<StagingRow>) -> Vec<CuratedDocument> {
        let total = rows.len();
        let documents: Vec<CuratedDocument> =
            rows.into_iter().filter_map(Self::enrich_row).collect();

        debug!(
            input = total,
            output = documents.len(),
            "Enriched staging rows"
        );
        documents
    }

    /// Enrich a single row, or `None` when its geo point is invalid.
    pub fn enrich_row(row: StagingRow) -> Option<CuratedDocument> {
        let labels = extract_labels(row.description.as_deref());
        let application_class = classify(row.application_type.as_deref(), &labels);
        let value_category = categorize_value(row.value);
        let geo_point = row
            .coordinates
            .as_deref()
            .and_then(|raw| build_geo_point(&Value::String(raw.to_string())))?;

        Some(CuratedDocument {
            row,
            labels,
            application_class,
            value_category,
            geo_point,
        })
    }
}

/// Extract keyword labels from a description.
///
/// Matching is case-insensitive substring search over the label rule
/// table. The result is a set: each label appears at most once even if
/// several of its trigger words match. A missing description yields an
/// empty set, never a failure.
pub fn extract_labels(description: Option<&str>) -> Vec<String> {
    let Some(description) = description else {
        return Vec::new();
    };
    let description = description.to_lowercase();

    LABEL_RULES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|word| description.contains(word)))
        .map(|(label, _)| label.to_string())
        .collect()
}

/// Classify a permit from its application type and extracted labels.
///
/// The rule table is evaluated in order; the first matching rule wins
/// and the catch-all is `Construction`.
pub fn classify(application_type: Option<&str>, labels: &[String]) -> ApplicationClass {
    let application_type = application_type.unwrap_or("").to_lowercase();

    for rule in CLASSIFICATION_RULES {
        if (rule.matches)(&application_type, labels) {
            return rule.class;
        }
    }
    DEFAULT_CLASS
}

/// Bucket a permit value into Low / Medium / High.
///
/// Boundaries are half-open at the lower bound: values below 50 000
/// are Low, values in [50 000, 200 000) are Medium, the rest High.
/// Non-finite values have no category.
pub fn categorize_value(value: f64) -> Option<ValueCategory> {
    if !value.is_finite() {
        return None;
    }
    if value < 50_000.0 {
        Some(ValueCategory::Low)
    } else if value < 200_000.0 {
        Some(ValueCategory::Medium)
    } else {
        Some(ValueCategory::High)
    }
}

/// Build a GeoJSON point from a coordinate structure.
///
/// Accepts either a serialized JSON string or an already-parsed
/// two-element array. Wrong arity, a null or non-numeric component,
/// or a string that fails to parse all make construction fail. Source
/// order is preserved: first element longitude, second latitude.
pub fn build_geo_point(value: &Value) -> Option<GeoPoint> {
    let parsed;
    let value = match value {
        Value::String(s) => {
            parsed = serde_json::from_str::<Value>(s).ok()?;
            &parsed
        }
        other => other,
    };

    let items = value.as_array()?;
    if items.len() != 2 {
        return None;
    }
    let lon = items[0].as_f64()?;
    let lat = items[1].as_f64()?;

    Some(GeoPoint::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row_with_coordinates(permit_id: &str, coordinates: &str) -> StagingRow {
        let mut row = StagingRow::with_permit_id(permit_id);
        row.coordinates = Some(coordinates.to_string());
        row
    }

    #[test]
    fn test_labels_are_case_insensitive() {
        let labels = extract_labels(Some("NEW DECK and Garage"));
        assert_eq!(labels, vec!["garage".to_string(), "deck".to_string()]);
    }

    #[test]
    fn test_labels_deduplicated_across_triggers() {
        // Both "roof" and "roofing" trigger the same label.
        let labels = extract_labels(Some("roofing repair on the roof"));
        assert_eq!(labels, vec!["roofing".to_string()]);
    }

    #[test]
    fn test_labels_multiple_matches() {
        let labels = extract_labels(Some("pool, deck and shed addition"));
        assert_eq!(labels, vec!["pool", "deck", "shed", "addition"]);
    }

    #[test]
    fn test_missing_description_yields_empty_set() {
        assert!(extract_labels(None).is_empty());
    }

    #[test]
    fn test_classification_demolition_wins_over_renovation() {
        let labels = vec!["renovation".to_string()];
        let class = classify(Some("Demolition Permit"), &labels);
        assert_eq!(class, ApplicationClass::Demolition);
    }

    #[test]
    fn test_classification_interior_alteration() {
        let class = classify(Some("Interior Alteration"), &[]);
        assert_eq!(class, ApplicationClass::Renovation);
    }

    #[test]
    fn test_classification_default_is_construction() {
        let class = classify(Some("New Construction"), &[]);
        assert_eq!(class, ApplicationClass::Construction);

        let class = classify(None, &[]);
        assert_eq!(class, ApplicationClass::Construction);
    }

    #[test]
    fn test_classification_destruct_construct_requires_label() {
        // Reachable only with an explicit demolition label, which the
        // first rule also catches; preserved order means rule one wins.
        let labels = vec!["demolition".to_string()];
        let class = classify(Some("New Construction"), &labels);
        assert_eq!(class, ApplicationClass::Demolition);
    }

    #[test]
    fn test_value_bucket_boundaries() {
        assert_eq!(categorize_value(49_999.99), Some(ValueCategory::Low));
        assert_eq!(categorize_value(50_000.0), Some(ValueCategory::Medium));
        assert_eq!(categorize_value(199_999.99), Some(ValueCategory::Medium));
        assert_eq!(categorize_value(200_000.0), Some(ValueCategory::High));
    }

    #[test]
    fn test_value_bucket_non_finite_absent() {
        assert_eq!(categorize_value(f64::NAN), None);
        assert_eq!(categorize_value(f64::INFINITY), None);
    }

    #[test]
    fn test_geo_point_from_pair() {
        let point = build_geo_point(&json!([-75.7, 45.4])).unwrap();
        assert_eq!(point.kind, "Point");
        assert_eq!(point.coordinates, [-75.7, 45.4]);
    }

    #[test]
    fn test_geo_point_from_serialized_string() {
        let point = build_geo_point(&json!("[-75.7, 45.4]")).unwrap();
        assert_eq!(point.lon(), -75.7);
        assert_eq!(point.lat(), 45.4);
    }

    #[test]
    fn test_geo_point_rejects_malformed_input() {
        assert!(build_geo_point(&json!([null, 45.4])).is_none());
        assert!(build_geo_point(&json!([-75.7, 45.4, 12.0])).is_none());
        assert!(build_geo_point(&json!([-75.7])).is_none());
        assert!(build_geo_point(&json!("not json")).is_none());
        assert!(build_geo_point(&json!({"lon": -75.7, "lat": 45.4})).is_none());
        assert!(build_geo_point(&json!(null)).is_none());
    }

    #[test]
    fn test_enrich_drops_geo_invalid_rows() {
        let valid = row_with_coordinates("A1", "[-75.7, 45.4]");
        let invalid = row_with_coordinates("B2", "[null, 45.4]");
        let mut missing = StagingRow::with_permit_id("C3");
        missing.coordinates = None;

        let documents = RecordEnricher::enrich(vec![valid, invalid, missing]);

        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].row.permit_id, "A1");
    }

    #[test]
    fn test_enrich_row_derives_all_fields() {
        let mut row = row_with_coordinates("A1", "[-75.7, 45.4]");
        row.description = Some("new deck".to_string());
        row.value = 75_000.0;

        let document = RecordEnricher::enrich_row(row).unwrap();

        assert_eq!(document.labels, vec!["deck".to_string()]);
        assert_eq!(document.application_class, ApplicationClass::Construction);
        assert_eq!(document.value_category, Some(ValueCategory::Medium));
        assert_eq!(document.geo_point.coordinates, [-75.7, 45.4]);
    }
}
