//! # Permits ETL Shared
//!
//! Shared data structures for the building-permits ETL pipeline.
//!
//! The types here trace the four storage tiers a permit record moves
//! through: raw object storage ([`RawRecord`]), the relational staging
//! table ([`StagingRow`]), the curated document collection
//! ([`CuratedDocument`]), and the search index ([`SearchDocument`]).

pub mod curated;
pub mod raw;
pub mod search;
pub mod staging;

pub use curated::{ApplicationClass, CuratedDocument, GeoPoint, ValueCategory};
pub use raw::{RawGeometry, RawPermit, RawProperties, RawRecord};
pub use search::{GeoLatLon, SearchDocument};
pub use staging::StagingRow;
