// crates/costmap-core/src/loader/table.rs
//! Tabular indicator file: CSV with a header row.

use crate::error::{CostMapError, Result};
use crate::model::{coerce_index, CountryRecord, Indices, Region};
use crate::raw::{parse_population, CountryRowRaw, REQUIRED_COLUMNS};
use log::{debug, warn};
use std::collections::HashSet;
use std::io::Read;

/// Parses table rows from any reader.
///
/// Required columns: `Country, costIndex, incomeIndex, PPI`. Optional:
/// `region, population, abbreviation`. Country names must be unique and
/// are kept byte-for-byte, since the join matches them exactly; only
/// headers and the value cells are trimmed.
pub fn load_rows_from_reader<R: Read>(reader: R) -> Result<Vec<CountryRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    debug!("table header: {:?}", headers);
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CostMapError::MissingColumn(column));
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for (idx, row) in rdr.deserialize::<CountryRowRaw>().enumerate() {
        let row = row?;
        let lineno = idx + 2;
        let name = row.country;
        if name.trim().is_empty() {
            return Err(CostMapError::InvalidData(format!(
                "line {lineno}: empty Country cell"
            )));
        }
        if !seen.insert(name.clone()) {
            return Err(CostMapError::DuplicateCountry(name));
        }

        let cell = |v: &Option<String>| v.as_deref().and_then(coerce_index);
        let indices = Indices::new(cell(&row.cost_index), cell(&row.income_index), cell(&row.ppi));
        if !indices.is_complete() {
            debug!("line {lineno}: `{name}` has incomplete indices {indices:?}");
        }

        let region = match row.region.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            Some(r) => match r.parse::<Region>() {
                Ok(region) => Some(region),
                Err(_) => {
                    warn!("line {lineno}: unknown region `{r}` for `{name}`");
                    None
                }
            },
            None => None,
        };

        out.push(CountryRecord {
            name,
            indices,
            region,
            population: row.population.as_deref().and_then(parse_population),
            abbreviation: row
                .abbreviation
                .map(|a| a.trim().to_string())
                .filter(|a| !a.is_empty()),
        });
    }
    Ok(out)
}

/// Parses table rows from an in-memory string.
pub fn parse_rows(text: &str) -> Result<Vec<CountryRecord>> {
    load_rows_from_reader(text.as_bytes())
}
