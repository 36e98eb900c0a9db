// crates/costmap-core/src/model/mod.rs
pub mod dataset;
pub mod feature;
pub mod metric;
pub mod record;

pub use dataset::{Dataset, Outlier, RankedRow, SortOrder};
pub use feature::{to_feature_collection, BoundaryFeature};
pub use metric::Metric;
pub use record::{coerce_index, CountryRecord, Indices, Region, FLAG_CDN_URL};
