// crates/costmap-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for a joined dataset.
///
/// Returned by [`crate::Dataset::stats`]; the counts reflect the dataset
/// after the join, not the raw files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStats {
    pub rows: usize,
    pub features: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Rows with all three indices present.
    pub complete_rows: usize,
}

/// Comparison operator for threshold queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Above,
    Below,
}

impl Threshold {
    #[inline]
    pub fn admits(self, value: f64, threshold: f64) -> bool {
        match self {
            Threshold::Above => value > threshold,
            Threshold::Below => value < threshold,
        }
    }
}
