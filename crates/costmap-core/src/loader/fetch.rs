// crates/costmap-core/src/loader/fetch.rs
#![cfg(feature = "fetch")]

use super::{boundaries, table};
use crate::error::Result;
use crate::model::Dataset;
use log::info;

/// Downloads a text resource, failing on non-2xx statuses.
pub fn fetch_text(url: &str) -> Result<String> {
    info!("fetching {url}");
    let body = reqwest::blocking::get(url)?.error_for_status()?.text()?;
    Ok(body)
}

impl Dataset {
    /// Fetches both sources over HTTP concurrently and joins them.
    pub fn fetch(boundaries_url: &str, table_url: &str) -> Result<Self> {
        super::load_with(
            || fetch_text(boundaries_url).and_then(|t| boundaries::parse_boundaries(&t)),
            || fetch_text(table_url).and_then(|t| table::parse_rows(&t)),
        )
    }
}
