//! Record normalizer.
//!
//! Flattens heterogeneous nested raw records into the uniform staging
//! row shape, dropping rows without a permit id and deduplicating on
//! it. Pure transform; no store is touched.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

use permits_etl_shared::{RawRecord, StagingRow};

/// Normalizer that flattens raw permit records into staging rows.
pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Normalize a batch of raw records.
    ///
    /// Rows with a missing permit id are dropped. Duplicate permit ids
    /// are collapsed to one row, first occurrence wins, regardless of
    /// whether the duplicate rows differ in content.
    pub fn normalize(records: Vec<RawRecord>) -> Vec<StagingRow> {
        let total = records.len();
        let mut seen = HashSet::new();
        let mut rows = Vec::with_capacity(total);

        for record in records {
            let Some(row) = Self::flatten(record) else {
                continue;
            };
            if seen.insert(row.permit_id.clone()) {
                rows.push(row);
            }
        }

        debug!(input = total, output = rows.len(), "Normalized raw records");
        rows
    }

    /// Flatten one record, or `None` when the permit id is absent.
    fn flatten(record: RawRecord) -> Option<StagingRow> {
        let permit = record.permits;
        let permit_id = permit.permit?;

        Some(StagingRow {
            permit_id,
            application_type: permit.appl_type,
            building_type: permit.blg_type,
            value: coerce_value(permit.value.as_ref()),
            ward: permit.ward,
            description: permit.description,
            issued_date: permit.issued_date.as_ref().and_then(parse_issued_date),
            location: permit.location.or(record.properties.location),
            contractor: permit.contractor,
            geometry_type: record.geometry.geometry_type,
            coordinates: serialize_coordinates(record.geometry.coordinates.as_ref()),
        })
    }
}

/// Coerce a loosely-typed value field to a number, defaulting to 0 on
/// any parse failure.
fn coerce_value(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Parse an issue date from a string or epoch-millis number.
///
/// Unparseable input yields `None`, never an error.
fn parse_issued_date(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::Number(n) => {
            let millis = n.as_i64()?;
            DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                return Some(dt.naive_utc());
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                return Some(dt);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
                return Some(dt);
            }
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return date.and_hms_opt(0, 0, 0);
            }
            None
        }
        _ => None,
    }
}

/// Serialize a composite coordinate structure to a JSON string for
/// relational storage; scalar or absent input yields `None`.
fn serialize_coordinates(coordinates: Option<&Value>) -> Option<String> {
    match coordinates {
        Some(v) if v.is_array() || v.is_object() => Some(v.to_string()),
        _ => None,
    }
}
