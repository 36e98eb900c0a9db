// crates/costmap-core/src/loader/snapshot.rs
#![cfg(feature = "snapshot")]

use super::common_io;
use crate::error::{CostMapError, Result};
use crate::model::Dataset;
use bincode::Options;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

#[cfg(feature = "compact")]
use flate2::{read::GzDecoder, write::GzEncoder, Compression};

#[cfg(not(feature = "compact"))]
pub const CACHE_SUFFIX: &str = ".snapshot.bin";
#[cfg(feature = "compact")]
pub const CACHE_SUFFIX: &str = ".snapshot.bin.gz";

/// Upper bound on a decoded snapshot.
const SNAPSHOT_LIMIT: u64 = 256 * 1024 * 1024;

#[derive(Debug, Clone, Copy)]
pub enum CompressionMode {
    Gzip,
    None,
}

impl CompressionMode {
    fn active() -> Self {
        #[cfg(feature = "compact")]
        return CompressionMode::Gzip;
        #[cfg(not(feature = "compact"))]
        return CompressionMode::None;
    }
}

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_limit(SNAPSHOT_LIMIT)
        .allow_trailing_bytes()
}

/// Cache image written by [`Dataset::load_cached`]: the joined dataset plus
/// the two sources it was built from.
#[derive(Serialize)]
struct CacheImage<'a> {
    boundaries: &'a str,
    table: &'a str,
    dataset: &'a Dataset,
}

#[derive(Deserialize)]
struct CacheImageOwned {
    boundaries: String,
    table: String,
    dataset: Dataset,
}

/// Absolute form of `path` when it exists, so `./a` and `a` key alike.
fn source_key(path: &Path) -> String {
    fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .to_string_lossy()
        .into_owned()
}

impl Dataset {
    /// Writes a bincode image of the joined dataset.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        write_generic(path.as_ref(), self, CompressionMode::active())
    }

    /// Reads a dataset written by [`Dataset::save_snapshot`].
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self> {
        read_generic(path.as_ref())
    }

    /// **Smart Load:** uses the cache next to `table` when it was built from
    /// these same two files and is newer than both; otherwise loads, joins
    /// and rewrites it.
    pub fn load_cached(boundaries: impl AsRef<Path>, table: impl AsRef<Path>) -> Result<Self> {
        let (boundaries, table) = (boundaries.as_ref(), table.as_ref());
        let cache_path = common_io::get_cache_path(table, CACHE_SUFFIX);
        let (b_key, t_key) = (source_key(boundaries), source_key(table));

        if common_io::is_cache_fresh(&[boundaries, table], &cache_path) {
            match read_generic::<CacheImageOwned>(&cache_path) {
                Ok(image) if image.boundaries == b_key && image.table == t_key => {
                    debug!("using snapshot {}", cache_path.display());
                    return Ok(image.dataset);
                }
                Ok(image) => info!(
                    "snapshot {} was built from {} + {}; rebuilding",
                    cache_path.display(),
                    image.boundaries,
                    image.table
                ),
                Err(e) => warn!("ignoring unreadable snapshot {}: {e}", cache_path.display()),
            }
        }

        let ds = Self::load(boundaries, table)?;
        let image = CacheImage {
            boundaries: &b_key,
            table: &t_key,
            dataset: &ds,
        };
        // Best-effort: a read-only data directory still gets a dataset.
        match write_generic(&cache_path, &image, CompressionMode::active()) {
            Ok(()) => info!("wrote snapshot {}", cache_path.display()),
            Err(e) => warn!("could not write snapshot {}: {e}", cache_path.display()),
        }
        Ok(ds)
    }
}

/// Reads any value written by [`write_generic`] under the active compression.
fn read_generic<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| {
        CostMapError::NotFound(format!("Snapshot not found at {}: {}", path.display(), e))
    })?;
    let reader = BufReader::new(file);

    let mut stream: Box<dyn Read> = match CompressionMode::active() {
        #[cfg(feature = "compact")]
        CompressionMode::Gzip => Box::new(GzDecoder::new(reader)),
        _ => Box::new(reader),
    };

    let mut data = Vec::new();
    stream.read_to_end(&mut data)?;
    Ok(options().deserialize(&data)?)
}

/// Writes any serializable value with the snapshot options.
fn write_generic<T: Serialize>(path: &Path, value: &T, compression: CompressionMode) -> Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    let mut encoder: Box<dyn Write> = match compression {
        CompressionMode::Gzip => {
            #[cfg(feature = "compact")]
            {
                Box::new(GzEncoder::new(writer, Compression::default()))
            }
            #[cfg(not(feature = "compact"))]
            {
                return Err(CostMapError::InvalidData(
                    "Gzip requested but 'compact' disabled".into(),
                ));
            }
        }
        CompressionMode::None => Box::new(writer),
    };

    options().serialize_into(&mut encoder, value)?;
    encoder.flush()?;
    Ok(())
}
