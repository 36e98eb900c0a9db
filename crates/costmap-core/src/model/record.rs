// crates/costmap-core/src/model/record.rs
use super::Metric;
use crate::error::CostMapError;
use crate::text::fold_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Base URL used to resolve flag images from a two-letter code.
pub const FLAG_CDN_URL: &str = "https://flagcdn.com/w40";

/// The three indices of a country. `None` means "no data".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Indices {
    pub cost: Option<f64>,
    pub income: Option<f64>,
    pub ppi: Option<f64>,
}

impl Indices {
    pub fn new(cost: Option<f64>, income: Option<f64>, ppi: Option<f64>) -> Self {
        Self { cost, income, ppi }
    }

    #[inline]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Cost => self.cost,
            Metric::Income => self.income,
            Metric::PurchasingPower => self.ppi,
        }
    }

    /// True when all three indices carry a value.
    pub fn is_complete(&self) -> bool {
        Metric::ALL.iter().all(|m| self.get(*m).is_some())
    }
}

/// Coerces a table cell into an index value.
///
/// Blank or non-numeric cells, and anything that parses to a non-finite
/// number, become "no data" rather than zero.
pub fn coerce_index(cell: &str) -> Option<f64> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    cell.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Geographic regions used for categorical coloring in the scatterplot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Asia,
    Caribbean,
    Europe,
    LatinAmerica,
    MiddleEast,
    NorthAmerica,
    Oceania,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::Africa,
        Region::Asia,
        Region::Caribbean,
        Region::Europe,
        Region::LatinAmerica,
        Region::MiddleEast,
        Region::NorthAmerica,
        Region::Oceania,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Caribbean => "Caribbean",
            Region::Europe => "Europe",
            Region::LatinAmerica => "Latin America",
            Region::MiddleEast => "Middle East",
            Region::NorthAmerica => "North America",
            Region::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = CostMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = fold_key(s.trim());
        Region::ALL
            .into_iter()
            .find(|r| fold_key(r.name()) == key)
            .ok_or_else(|| CostMapError::InvalidData(format!("unknown region: {s}")))
    }
}

/// One row of the unified dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub name: String,
    pub indices: Indices,
    pub region: Option<Region>,
    pub population: Option<u64>,
    pub abbreviation: Option<String>,
}

impl CountryRecord {
    pub fn new(name: impl Into<String>, indices: Indices) -> Self {
        Self {
            name: name.into(),
            indices,
            region: None,
            population: None,
            abbreviation: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cost_index(&self) -> Option<f64> {
        self.indices.cost
    }

    pub fn income_index(&self) -> Option<f64> {
        self.indices.income
    }

    pub fn purchasing_power_index(&self) -> Option<f64> {
        self.indices.ppi
    }

    /// Flag image URL, if the row carries a two-letter code.
    pub fn flag_url(&self) -> Option<String> {
        self.abbreviation
            .as_deref()
            .map(str::trim)
            .filter(|code| code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic()))
            .map(|code| format!("{FLAG_CDN_URL}/{}.png", code.to_ascii_lowercase()))
    }
}
