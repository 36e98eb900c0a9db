//! costmap: Command-line interface for costmap-core
//!
//! Loads the boundary file and the indicator table (concurrently, joined
//! once both are in), then prints what the dashboard would render: the
//! ranked table, a country comparison, the choropleth legend and fills, or
//! the income/cost regression.
//!
//! Usage examples
//! --------------
//!
//! - Summary of the join
//!   $ costmap stats
//!
//! - Ranked table, highest income first
//!   $ costmap countries --sort income
//!
//! - Compare two countries
//!   $ costmap compare Canada France
//!
//! - Legend for a continuous 0–120 scale
//!   $ costmap legend --metric ppi --policy sequential
//!
//! - Everything relative to Germany instead of the U.S.
//!   $ costmap --benchmark Germany countries
//!
//! Logging goes through `env_logger`; set `RUST_LOG=debug` to see every
//! join match.
mod args;

use crate::args::{CliArgs, Commands, MetricArg, PolicyArg, SortArg, ThresholdArg};
use anyhow::{bail, Context};
use clap::Parser;
use costmap_core::format::{format_index, format_population, format_regression, number_formatting};
use costmap_core::prelude::*;
use log::info;

impl From<MetricArg> for Metric {
    fn from(m: MetricArg) -> Self {
        match m {
            MetricArg::Cost => Metric::Cost,
            MetricArg::Income => Metric::Income,
            MetricArg::Ppi => Metric::PurchasingPower,
        }
    }
}

impl From<SortArg> for SortOrder {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Name => SortOrder::Name,
            SortArg::Cost => SortOrder::Metric(Metric::Cost),
            SortArg::Income => SortOrder::Metric(Metric::Income),
            SortArg::Ppi => SortOrder::Metric(Metric::PurchasingPower),
        }
    }
}

impl From<ThresholdArg> for Threshold {
    fn from(t: ThresholdArg) -> Self {
        match t {
            ThresholdArg::Above => Threshold::Above,
            ThresholdArg::Below => Threshold::Below,
        }
    }
}

fn scale_config(policy: PolicyArg, buckets: usize) -> ScaleConfig {
    let policy = match policy {
        PolicyArg::Quantile => ColorPolicy::Quantile,
        PolicyArg::Sequential => ColorPolicy::Sequential,
    };
    ScaleConfig {
        policy,
        buckets,
        ..ScaleConfig::default()
    }
}

fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

fn load_dataset(args: &CliArgs) -> anyhow::Result<Dataset> {
    if let Some(path) = &args.snapshot {
        #[cfg(feature = "snapshot")]
        return Dataset::load_snapshot(path)
            .with_context(|| format!("data unavailable: {}", path.display()));
        #[cfg(not(feature = "snapshot"))]
        bail!("--snapshot {} requires the 'snapshot' feature", path.display());
    }

    let dir = Dataset::default_data_dir();
    let boundaries = args.boundaries.clone().unwrap_or_else(|| {
        dir.join(Dataset::default_boundaries_filename())
            .to_string_lossy()
            .to_string()
    });
    let table = args.table.clone().unwrap_or_else(|| {
        dir.join(Dataset::default_table_filename())
            .to_string_lossy()
            .to_string()
    });
    info!("boundaries: {boundaries}, table: {table}");

    if is_url(&boundaries) || is_url(&table) {
        #[cfg(feature = "fetch")]
        return Dataset::fetch(&boundaries, &table).context("data unavailable");
        #[cfg(not(feature = "fetch"))]
        bail!("reading URLs requires the 'fetch' feature");
    }

    #[cfg(feature = "snapshot")]
    let loaded = Dataset::load_cached(&boundaries, &table);
    #[cfg(not(feature = "snapshot"))]
    let loaded = Dataset::load(&boundaries, &table);

    loaded.context("data unavailable")
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let mut ds = load_dataset(&args)?;
    if let Some(benchmark) = &args.benchmark {
        ds = ds
            .rebased(benchmark)
            .with_context(|| format!("cannot rebase on {benchmark}"))?;
        println!("(indices relative to {benchmark} = 100)");
    }

    match args.command {
        Commands::Stats => {
            let stats = ds.stats();
            println!("Dataset statistics:");
            println!("  Table rows: {}", stats.rows);
            println!("  Complete rows: {}", stats.complete_rows);
            println!("  Boundary features: {}", stats.features);
            println!("  Matched features: {}", stats.matched);
            println!("  Features without data: {}", stats.unmatched);
        }

        Commands::Countries { sort } => {
            let order: SortOrder = sort.into();
            println!(
                "{:>4}  {:<28} {:>10} {:>10} {:>10}",
                "#", "Country", "Cost", "Income", "PPI"
            );
            let rows: Vec<(Option<usize>, &CountryRecord)> = match order {
                SortOrder::Metric(metric) => ds
                    .ranked(metric)
                    .into_iter()
                    .map(|r| (r.rank, r.record))
                    .collect(),
                SortOrder::Name => ds
                    .countries_sorted(order)
                    .into_iter()
                    .enumerate()
                    .map(|(i, r)| (Some(i + 1), r))
                    .collect(),
            };
            for (rank, r) in rows {
                let rank = rank.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
                println!(
                    "{:>4}  {:<28} {:>10} {:>10} {:>10}",
                    rank,
                    r.name,
                    format_index(r.cost_index()),
                    format_index(r.income_index()),
                    format_index(r.purchasing_power_index()),
                );
            }
        }

        Commands::Country { name } => match ds.country(&name) {
            Some(c) => {
                println!("Country: {}", c.name);
                for metric in Metric::ALL {
                    println!("{}: {}", metric.title(), format_index(c.value(metric)));
                }
                println!(
                    "Region: {}",
                    c.region.map(|r| r.to_string()).unwrap_or_default()
                );
                println!("Population: {}", format_population(c.population));
                if let Some(url) = c.flag_url() {
                    println!("Flag: {url}");
                }
            }
            None => bail!("No country found for: {name}"),
        },

        Commands::Compare { a, b } => {
            let cmp = ds.compare_by_name(&a, &b)?;
            let lines = cmp.messages();
            if lines.is_empty() {
                println!("No differences to report between {} and {}", cmp.a, cmp.b);
            }
            for line in lines {
                println!("{line}");
            }
            for metric in Metric::ALL {
                if cmp.get(metric).outcome == DeltaOutcome::Unavailable {
                    println!("{}: not available", metric.subject());
                }
            }
        }

        Commands::Legend {
            metric,
            policy,
            buckets,
        } => {
            let metric: Metric = metric.into();
            let scale = ds.color_scale(metric, &scale_config(policy, buckets))?;
            println!("{}", metric.title());
            for entry in scale.legend() {
                println!("  {}  {}", entry.color, entry.label);
            }
        }

        Commands::Map {
            metric,
            policy,
            buckets,
        } => {
            let mut dash = Dashboard::new(ds).with_scale(scale_config(policy, buckets))?;
            let view = dash.select_metric(metric.into())?;
            println!("{}", view.title);
            for fill in view.fills {
                println!("  {}  {:<28} {}", fill.color, fill.admin, format_index(fill.value));
            }
        }

        Commands::Regression { outliers } => match ds.regression() {
            Ok(fit) => {
                println!("Cost of living vs income ({} countries)", fit.n);
                println!("  {}", format_regression(&fit));
                let [lo, hi] = fit.endpoints;
                println!(
                    "  line from ({}, {}) to ({}, {})",
                    number_formatting(lo.x),
                    number_formatting(lo.y),
                    number_formatting(hi.x),
                    number_formatting(hi.y)
                );
                if let Some(k) = outliers {
                    let found = ds.regression_outliers(k)?;
                    println!("Outliers beyond {k} standard deviations:");
                    if found.is_empty() {
                        println!("  (none)");
                    }
                    for o in found {
                        println!(
                            "  {:<28} residual {:>8} ({:+.2} sd)",
                            o.record.name,
                            number_formatting(o.residual),
                            o.score
                        );
                    }
                }
            }
            Err(e) => println!("Not enough data for a regression line: {e}"),
        },

        Commands::Query {
            metric,
            op,
            threshold,
        } => {
            let metric: Metric = metric.into();
            let found = ds.query(metric, op.into(), threshold);
            if found.is_empty() {
                println!("No countries match");
            }
            for r in found {
                println!("{:<28} {}", r.name, format_index(r.value(metric)));
            }
        }

        Commands::Unmatched => {
            let report = ds.join_report();
            println!("Boundary features without table data:");
            for name in &report.unmatched_features {
                println!("  {name}");
            }
            println!("Table rows without a boundary feature:");
            for name in &report.unused_rows {
                println!("  {name}");
            }
            for miss in &report.near_misses {
                println!(
                    "  note: `{}` and `{}` differ only by case or accents",
                    miss.feature, miss.row
                );
            }
        }

        Commands::Snapshot { out } => {
            #[cfg(feature = "snapshot")]
            {
                ds.save_snapshot(&out)?;
                println!("Wrote {}", out.display());
            }
            #[cfg(not(feature = "snapshot"))]
            bail!("writing {} requires the 'snapshot' feature", out.display());
        }
    }

    Ok(())
}
