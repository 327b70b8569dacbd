//! Summary report types and aggregation.
//!
//! The report is a read-only view over the four storage tiers: record
//! counts per zone plus basic analytics over the curated snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use permits_etl_shared::CuratedDocument;

/// Number of labels listed under `top_labels`.
const TOP_LABEL_COUNT: usize = 5;

/// Record counts per storage tier.
#[derive(Debug, Clone, Serialize)]
pub struct DataZones {
    pub raw_objects: u64,
    pub staging_rows: u64,
    pub curated_documents: u64,
    pub indexed_documents: u64,
}

/// Basic analytics over staging and curated data.
#[derive(Debug, Clone, Serialize)]
pub struct Analytics {
    pub avg_permit_value: f64,
    pub value_category_distribution: BTreeMap<String, u64>,
    pub top_labels: Vec<String>,
}

/// The full pipeline summary report.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub timestamp: String,
    pub data_zones: DataZones,
    pub analytics: Analytics,
}

/// Aggregates computed in memory from the curated snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct CuratedSummary {
    pub value_category_distribution: BTreeMap<String, u64>,
    pub top_labels: Vec<String>,
}

/// Summarize the curated snapshot: value-category distribution and the
/// most frequent labels.
///
/// Documents without a value category are counted under `Unknown`.
/// Label ties are broken alphabetically so the output is stable.
pub fn summarize_curated(documents: &[CuratedDocument]) -> CuratedSummary {
    let mut distribution: BTreeMap<String, u64> = BTreeMap::new();
    let mut label_counts: BTreeMap<&str, u64> = BTreeMap::new();

    for document in documents {
        let category = document
            .value_category
            .map(|c| {
                serde_json::to_value(c)
                    .ok()
                    .and_then(|v| v.as_str().map(String::from))
                    .unwrap_or_else(|| "Unknown".to_string())
            })
            .unwrap_or_else(|| "Unknown".to_string());
        *distribution.entry(category).or_insert(0) += 1;

        for label in &document.labels {
            *label_counts.entry(label.as_str()).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(&str, u64)> = label_counts.into_iter().collect();
    // BTreeMap iteration is alphabetical, so a stable sort on count
    // keeps ties in alphabetical order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let top_labels = ranked
        .into_iter()
        .take(TOP_LABEL_COUNT)
        .map(|(label, _)| label.to_string())
        .collect();

    CuratedSummary {
        value_category_distribution: distribution,
        top_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use permits_etl_shared::{ApplicationClass, GeoPoint, StagingRow, ValueCategory};

    fn document(
        permit_id: &str,
        labels: &[&str],
        value_category: Option<ValueCategory>,
    ) -> CuratedDocument {
        CuratedDocument {
            row: StagingRow::with_permit_id(permit_id),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            application_class: ApplicationClass::Construction,
            value_category,
            geo_point: GeoPoint::new(-75.7, 45.4),
        }
    }

    #[test]
    fn test_distribution_counts_categories() {
        let documents = vec![
            document("A1", &[], Some(ValueCategory::Low)),
            document("B2", &[], Some(ValueCategory::Low)),
            document("C3", &[], Some(ValueCategory::High)),
            document("D4", &[], None),
        ];

        let summary = summarize_curated(&documents);

        assert_eq!(summary.value_category_distribution["Low"], 2);
        assert_eq!(summary.value_category_distribution["High"], 1);
        assert_eq!(summary.value_category_distribution["Unknown"], 1);
    }

    #[test]
    fn test_top_labels_ranked_by_frequency() {
        let documents = vec![
            document("A1", &["deck", "pool"], None),
            document("B2", &["deck"], None),
            document("C3", &["deck", "garage"], None),
            document("D4", &["pool"], None),
        ];

        let summary = summarize_curated(&documents);

        assert_eq!(summary.top_labels[0], "deck");
        assert_eq!(summary.top_labels[1], "pool");
        assert_eq!(summary.top_labels[2], "garage");
    }

    #[test]
    fn test_top_labels_capped_at_five() {
        let documents = vec![document(
            "A1",
            &["deck", "pool", "garage", "shed", "porch", "solar"],
            None,
        )];

        let summary = summarize_curated(&documents);
        assert_eq!(summary.top_labels.len(), 5);
    }

    #[test]
    fn test_empty_snapshot() {
        let summary = summarize_curated(&[]);
        assert!(summary.value_category_distribution.is_empty());
        assert!(summary.top_labels.is_empty());
    }
}
