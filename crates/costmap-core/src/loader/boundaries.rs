// crates/costmap-core/src/loader/boundaries.rs
//! Geographic boundary file: a GeoJSON `FeatureCollection`.

use crate::error::{CostMapError, Result};
use crate::model::BoundaryFeature;
use crate::raw::FeatureCollectionRaw;
use serde_json::Value;
use std::io::Read;

/// Parses boundary features from any reader. Every feature must carry a
/// string `ADMIN` property; geometry is kept verbatim.
pub fn load_boundaries_from_reader<R: Read>(reader: R) -> Result<Vec<BoundaryFeature>> {
    let raw: FeatureCollectionRaw = serde_json::from_reader(reader)?;
    from_raw(raw)
}

pub fn parse_boundaries(text: &str) -> Result<Vec<BoundaryFeature>> {
    let raw: FeatureCollectionRaw = serde_json::from_str(text)?;
    from_raw(raw)
}

fn from_raw(raw: FeatureCollectionRaw) -> Result<Vec<BoundaryFeature>> {
    if let Some(kind) = raw.kind.as_deref() {
        if kind != "FeatureCollection" {
            return Err(CostMapError::InvalidData(format!(
                "expected a FeatureCollection, found `{kind}`"
            )));
        }
    }

    raw.features
        .into_iter()
        .enumerate()
        .map(|(idx, f)| {
            let admin = f.admin().map(str::to_string).ok_or_else(|| {
                CostMapError::InvalidData(format!("feature #{idx} has no ADMIN property"))
            })?;
            let geometry = match f.geometry {
                Value::Null => String::new(),
                other => other.to_string(),
            };
            Ok(BoundaryFeature::new(admin, geometry))
        })
        .collect()
}
