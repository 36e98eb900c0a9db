// crates/costmap-core/src/raw.rs
//! Raw input shapes as they come out of the two source files.
//!
//! NOTE: these mirror external file formats. They are converted into
//! [`crate::model`] types by the loader and are not part of the public API.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Required table columns, in the order they are reported when missing.
pub const REQUIRED_COLUMNS: [&str; 4] = ["Country", "costIndex", "incomeIndex", "PPI"];

/// One table row. Every cell stays textual so coercion happens in one place.
#[derive(Debug, Deserialize)]
pub struct CountryRowRaw {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "costIndex", default)]
    pub cost_index: Option<String>,
    #[serde(rename = "incomeIndex", default)]
    pub income_index: Option<String>,
    #[serde(rename = "PPI", default)]
    pub ppi: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub population: Option<String>,
    #[serde(default)]
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureCollectionRaw {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub features: Vec<FeatureRaw>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureRaw {
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default)]
    pub geometry: Value,
}

impl FeatureRaw {
    pub fn admin(&self) -> Option<&str> {
        self.properties.get("ADMIN").and_then(Value::as_str)
    }
}

/// Parses a population cell, tolerating thousands separators.
pub fn parse_population(cell: &str) -> Option<u64> {
    let cleaned: String = cell
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' '))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<u64>().ok().or_else(|| {
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v.round() as u64)
    })
}
