//! Raw permit records as they arrive from object storage.
//!
//! One record per newline-delimited JSON line. The input is
//! heterogeneous: any of the three sub-objects may be missing, and the
//! loosely-typed fields (`VALUE`, `ISSUED_DATE`, `coordinates`) may
//! carry numbers, strings, or arbitrary JSON. Deserialization is
//! therefore defensive — absent sections default to empty sections
//! instead of failing the record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One raw building-permit entry with nested sub-objects.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Permit-level fields.
    #[serde(default)]
    pub permits: RawPermit,
    /// Property-level fields (fallback location text).
    #[serde(default)]
    pub properties: RawProperties,
    /// Geometry attached to the permit, if any.
    #[serde(default)]
    pub geometry: RawGeometry,
}

/// The `permits` sub-object of a raw record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawPermit {
    /// Permit identifier. Records without one are dropped downstream.
    #[serde(default, rename = "PERMIT")]
    pub permit: Option<String>,
    #[serde(default, rename = "APPL_TYPE")]
    pub appl_type: Option<String>,
    #[serde(default, rename = "BLG_TYPE")]
    pub blg_type: Option<String>,
    /// Monetary value; number or string in the source data.
    #[serde(default, rename = "VALUE")]
    pub value: Option<Value>,
    #[serde(default, rename = "WARD")]
    pub ward: Option<String>,
    #[serde(default, rename = "DESCRIPTION")]
    pub description: Option<String>,
    /// Issue date; string or epoch-millis number in the source data.
    #[serde(default, rename = "ISSUED_DATE")]
    pub issued_date: Option<Value>,
    /// Permit-level location text, preferred over the property-level one.
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default, rename = "CONTRACTOR")]
    pub contractor: Option<String>,
}

/// The `properties` sub-object of a raw record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProperties {
    /// Fallback location text when the permit carries none.
    #[serde(default)]
    pub location: Option<String>,
}

/// The `geometry` sub-object of a raw record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawGeometry {
    /// Geometry type, e.g. `"Point"`.
    #[serde(default, rename = "type")]
    pub geometry_type: Option<String>,
    /// Coordinate structure; expected to be a `[lon, lat]` pair but
    /// kept loose until validated by the enricher.
    #[serde(default)]
    pub coordinates: Option<Value>,
}
