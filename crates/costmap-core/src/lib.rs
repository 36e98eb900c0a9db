// crates/costmap-core/src/lib.rs
//! # costmap-core
//!
//! Engine behind the cost-of-living dashboard: loads a GeoJSON boundary
//! file and a CSV of USA-benchmarked indices, joins them by country name,
//! and derives what the map, table, comparison widget and scatterplot need.
//!
//! ```no_run
//! use costmap_core::prelude::*;
//!
//! let ds = Dataset::load_default()?;
//! let cmp = ds.compare_by_name("Canada", "France")?;
//! for line in cmp.messages() {
//!     println!("{line}");
//! }
//! # Ok::<(), costmap_core::CostMapError>(())
//! ```

pub mod barrier;
pub mod common;
pub mod compare;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod join;
pub mod loader;
pub mod model;
pub mod regression;
pub mod scale;
pub mod text;
pub mod traits;
// Raw input shapes (used by the loader only)
#[doc(hidden)]
pub mod raw;

// Re-exports
pub use crate::common::{DatasetStats, Threshold};
pub use crate::error::{CostMapError, Result};
pub use model::{BoundaryFeature, CountryRecord, Dataset, Indices, Metric, Region, SortOrder};

pub mod prelude {
    pub use crate::barrier::{BarrierEvent, BarrierState, JoinBarrier};
    pub use crate::common::{DatasetStats, Threshold};
    pub use crate::compare::{compare, Comparison, DeltaOutcome, Direction};
    pub use crate::dashboard::{Dashboard, MapView, ScatterView};
    pub use crate::error::{CostMapError, Result};
    pub use crate::join::{join, JoinReport};
    pub use crate::model::*;
    pub use crate::regression::{linear_regression, Point, Regression, RegressionError};
    pub use crate::scale::{ColorPolicy, ColorScale, LegendEntry, Rgb, ScaleConfig, NO_DATA_COLOR};
    pub use crate::traits::{MetricSource, NameMatch};
}
