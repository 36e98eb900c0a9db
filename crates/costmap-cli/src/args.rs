use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for costmap
#[derive(Debug, Parser)]
#[command(
    name = "costmap",
    version,
    about = "Inspect, compare and chart country cost-of-living indices"
)]
pub struct CliArgs {
    /// GeoJSON boundary file (default: bundled countries.geojson)
    #[arg(short = 'b', long = "boundaries", global = true)]
    pub boundaries: Option<String>,

    /// CSV indicator table (default: bundled costOfLiving.csv)
    #[arg(short = 't', long = "table", global = true)]
    pub table: Option<String>,

    /// Load a previously written snapshot instead of the two source files
    #[arg(long = "snapshot", global = true, conflicts_with_all = ["boundaries", "table"])]
    pub snapshot: Option<PathBuf>,

    /// Re-express every index relative to this country (its values become 100)
    #[arg(long = "benchmark", global = true)]
    pub benchmark: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MetricArg {
    Cost,
    Income,
    Ppi,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    Name,
    Cost,
    Income,
    Ppi,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    Quantile,
    Sequential,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThresholdArg {
    Above,
    Below,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the joined dataset
    Stats,

    /// List countries as a table
    Countries {
        #[arg(short, long, value_enum, default_value = "cost")]
        sort: SortArg,
    },

    /// Show all indices for one country
    Country {
        /// Country name (exact, or case/accent-insensitive)
        name: String,
    },

    /// Compare country A against country B
    Compare { a: String, b: String },

    /// Print the legend of the choropleth scale
    Legend {
        #[arg(short, long, value_enum, default_value = "cost")]
        metric: MetricArg,
        #[arg(short, long, value_enum, default_value = "quantile")]
        policy: PolicyArg,
        /// Quantile buckets / sequential legend stops
        #[arg(long, default_value_t = 10)]
        buckets: usize,
    },

    /// Print the fill color of every boundary feature
    Map {
        #[arg(short, long, value_enum, default_value = "cost")]
        metric: MetricArg,
        #[arg(short, long, value_enum, default_value = "quantile")]
        policy: PolicyArg,
        #[arg(long, default_value_t = 10)]
        buckets: usize,
    },

    /// Fit cost of living against income
    Regression {
        /// List countries whose residual exceeds this many standard deviations
        #[arg(long)]
        outliers: Option<f64>,
    },

    /// Countries whose metric is above or below a threshold
    Query {
        #[arg(value_enum)]
        metric: MetricArg,
        #[arg(value_enum)]
        op: ThresholdArg,
        threshold: f64,
    },

    /// Report boundary features and table rows that did not join
    Unmatched,

    /// Write a snapshot of the joined dataset
    Snapshot {
        /// Output path
        out: PathBuf,
    },
}
