//! Search projector.
//!
//! Reshapes curated documents into the search-engine-friendly form:
//! the GeoJSON `[lon, lat]` point becomes a named `{lat, lon}` object.
//! A geo point that cannot be re-expressed drops the field from the
//! document rather than excluding the document, unlike the curated
//! stage's hard filter. Pure transform.

use tracing::debug;

use permits_etl_shared::{CuratedDocument, GeoLatLon, SearchDocument};

/// Projector that reshapes curated documents for index ingestion.
pub struct SearchProjector;

impl SearchProjector {
    /// Project a batch of curated documents.
    pub fn project(documents: Vec<CuratedDocument>) -> Vec<SearchDocument> {
        let projected: Vec<SearchDocument> = documents
            .into_iter()
            .map(Self::project_document)
            .collect();

        debug!(count = projected.len(), "Projected curated documents");
        projected
    }

    /// Project a single document.
    ///
    /// Axis values are preserved: the GeoJSON pair stored `[lon, lat]`,
    /// so the named fields take `lat` from the second element and
    /// `lon` from the first.
    pub fn project_document(document: CuratedDocument) -> SearchDocument {
        let geo_point = GeoLatLon::from_point(&document.geo_point);

        SearchDocument {
            row: document.row,
            labels: document.labels,
            application_class: document.application_class,
            value_category: document.value_category,
            geo_point,
        }
    }
}
