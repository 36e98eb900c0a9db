// crates/costmap-core/src/model/metric.rs
use crate::error::CostMapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three USA-benchmarked indices carried by every country.
///
/// Selecting which index to read always goes through this enum and
/// [`crate::traits::MetricSource::value`]; there is no lookup by
/// constructed field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Cost,
    Income,
    PurchasingPower,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Cost, Metric::Income, Metric::PurchasingPower];

    /// Label shown in the metric selector.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Cost => "Cost of Living",
            Metric::Income => "Income",
            Metric::PurchasingPower => "Savings Power",
        }
    }

    /// Heading used by the legend and the hover panel.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Cost => "Cost of Living Index (relative to U.S.)",
            Metric::Income => "Income Index (relative to U.S.)",
            Metric::PurchasingPower => "Purchasing Power Index (relative to U.S.)",
        }
    }

    /// Sentence subject used in comparison messages.
    pub fn subject(self) -> &'static str {
        match self {
            Metric::Cost => "Cost of living",
            Metric::Income => "Income",
            Metric::PurchasingPower => "Purchasing power",
        }
    }

    /// Column header in the source table, also the GeoJSON property name.
    pub fn column(self) -> &'static str {
        match self {
            Metric::Cost => "costIndex",
            Metric::Income => "incomeIndex",
            Metric::PurchasingPower => "PPI",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Metric::Cost => "cost",
            Metric::Income => "income",
            Metric::PurchasingPower => "ppi",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Metric {
    type Err = CostMapError;

    /// Accepts selector labels, column names and short names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "cost" | "cost of living" | "costindex" | "col" => Ok(Metric::Cost),
            "income" | "incomeindex" => Ok(Metric::Income),
            "ppi" | "savings power" | "purchasing power" | "purchasing-power"
            | "purchasing_power" => Ok(Metric::PurchasingPower),
            _ => Err(CostMapError::InvalidData(format!("unknown metric: {s}"))),
        }
    }
}
