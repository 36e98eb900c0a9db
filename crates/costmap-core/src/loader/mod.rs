// crates/costmap-core/src/loader/mod.rs

//! # Data Loader
//!
//! Handles the physical layer (files, decompression, HTTP) and delegates to
//! the format parsers (GeoJSON boundaries, CSV table). The two loads run
//! concurrently and meet at a [`JoinBarrier`].

use crate::barrier::{BarrierEvent, JoinBarrier};
use crate::error::{CostMapError, Result};
use crate::model::{BoundaryFeature, CountryRecord, Dataset};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

pub mod boundaries;
pub mod common_io;
pub mod table;

#[cfg(feature = "snapshot")]
pub mod snapshot;

#[cfg(feature = "fetch")]
pub mod fetch;

pub use boundaries::{load_boundaries_from_reader, parse_boundaries};
pub use table::{load_rows_from_reader, parse_rows};

static DEFAULT_DATASET: OnceCell<Dataset> = OnceCell::new();

/// Reads and parses the boundary file at `path`.
pub fn load_boundaries(path: &Path) -> Result<Vec<BoundaryFeature>> {
    load_boundaries_from_reader(common_io::open_stream(path)?)
}

/// Reads and parses the table file at `path`.
pub fn load_rows(path: &Path) -> Result<Vec<CountryRecord>> {
    load_rows_from_reader(common_io::open_stream(path)?)
}

/// Runs both loaders on their own threads and joins through a barrier.
/// Completion order does not matter; the first failure wins.
pub(crate) fn load_with<FB, FR>(load_b: FB, load_r: FR) -> Result<Dataset>
where
    FB: FnOnce() -> Result<Vec<BoundaryFeature>> + Send,
    FR: FnOnce() -> Result<Vec<CountryRecord>> + Send,
{
    let barrier = JoinBarrier::new();
    let events = std::thread::scope(|s| {
        let b = s.spawn(|| barrier.offer_boundaries(load_b()));
        let r = s.spawn(|| barrier.offer_rows(load_r()));
        [b.join(), r.join()]
    });

    let mut reason = None;
    for event in events {
        match event {
            Ok(BarrierEvent::Joined(ds)) => return Ok(ds),
            Ok(BarrierEvent::Unavailable(r)) => {
                reason.get_or_insert(r);
            }
            Ok(BarrierEvent::Waiting | BarrierEvent::AlreadyJoined) => {}
            Err(_) => {
                reason.get_or_insert_with(|| "loader thread panicked".to_string());
            }
        }
    }
    Err(CostMapError::Unavailable(
        reason.unwrap_or_else(|| "inputs never completed".to_string()),
    ))
}

impl Dataset {
    pub fn default_data_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    pub fn default_boundaries_filename() -> &'static str {
        "countries.geojson"
    }

    pub fn default_table_filename() -> &'static str {
        "costOfLiving.csv"
    }

    /// Loads both files concurrently and joins them.
    pub fn load(boundaries: impl AsRef<Path>, table: impl AsRef<Path>) -> Result<Self> {
        let (b, t) = (boundaries.as_ref(), table.as_ref());
        load_with(|| load_boundaries(b), || load_rows(t))
    }

    /// Loads the sample data shipped in `data/`, once per process.
    pub fn load_default() -> Result<Self> {
        DEFAULT_DATASET
            .get_or_try_init(|| {
                let dir = Self::default_data_dir();
                Self::load(
                    dir.join(Self::default_boundaries_filename()),
                    dir.join(Self::default_table_filename()),
                )
            })
            .cloned()
    }

    /// Parses both sources from in-memory text (e.g. fetched by a browser).
    pub fn from_texts(geojson: &str, csv: &str) -> Result<Self> {
        Dataset::from_parts(parse_boundaries(geojson)?, parse_rows(csv)?)
    }
}
