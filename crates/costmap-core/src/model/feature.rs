// crates/costmap-core/src/model/feature.rs
use super::{Indices, Metric};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One polygon record from the boundary source, keyed by its `ADMIN` name.
///
/// Geometry is opaque to the engine and kept as the raw JSON text of the
/// source feature, so the struct stays bincode-friendly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryFeature {
    pub admin: String,
    pub geometry: String,
    /// Joined indices. `None` until a table row with the same name is found.
    pub indices: Option<Indices>,
}

impl BoundaryFeature {
    pub fn new(admin: impl Into<String>, geometry: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
            geometry: geometry.into(),
            indices: None,
        }
    }

    pub fn admin(&self) -> &str {
        &self.admin
    }

    pub fn is_matched(&self) -> bool {
        self.indices.is_some()
    }

    /// Re-emits the feature as GeoJSON with the joined indices merged into
    /// `properties` under their source column names. Missing values are
    /// written as `null`.
    pub fn to_geojson(&self) -> Result<Value> {
        let geometry: Value = if self.geometry.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&self.geometry)?
        };

        let mut properties = Map::new();
        properties.insert("ADMIN".into(), Value::String(self.admin.clone()));
        if let Some(indices) = &self.indices {
            for metric in Metric::ALL {
                properties.insert(metric.column().into(), json!(indices.get(metric)));
            }
        }

        Ok(json!({
            "type": "Feature",
            "properties": properties,
            "geometry": geometry,
        }))
    }
}

/// Wraps features back into a GeoJSON `FeatureCollection`.
pub fn to_feature_collection(features: &[BoundaryFeature]) -> Result<Value> {
    let features = features
        .iter()
        .map(BoundaryFeature::to_geojson)
        .collect::<Result<Vec<_>>>()?;
    Ok(json!({ "type": "FeatureCollection", "features": features }))
}
