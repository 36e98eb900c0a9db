// crates/costmap-core/src/model/dataset.rs
use super::{BoundaryFeature, CountryRecord, Indices, Metric};
use crate::common::{DatasetStats, Threshold};
use crate::compare::{compare, Comparison};
use crate::error::{CostMapError, Result};
use crate::join::{join, JoinReport};
use crate::regression::{linear_regression, residual_std_dev, Point, Regression, RegressionError};
use crate::scale::{ColorScale, ScaleConfig};
use crate::traits::{MetricSource, NameMatch};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Ordering for country lists handed to tables and selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "by", content = "metric")]
pub enum SortOrder {
    /// Alphabetical by name.
    Name,
    /// Descending by the metric; rows without data go last.
    Metric(Metric),
}

/// A row of the ranked table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedRow<'a> {
    /// 1-based; `None` for rows without data for the metric.
    pub rank: Option<usize>,
    pub record: &'a CountryRecord,
    pub value: Option<f64>,
}

/// A country flagged by the regression outlier listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outlier<'a> {
    pub record: &'a CountryRecord,
    pub point: Point,
    pub residual: f64,
    /// Residual expressed in residual standard deviations.
    pub score: f64,
}

/// The unified, joined dataset. Written once by the joiner, read by
/// every consumer afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    rows: Vec<CountryRecord>,
    features: Vec<BoundaryFeature>,
    report: JoinReport,
}

impl Dataset {
    /// Validates the rows and runs the join.
    pub fn from_parts(mut features: Vec<BoundaryFeature>, rows: Vec<CountryRecord>) -> Result<Self> {
        let mut names = HashSet::with_capacity(rows.len());
        for row in &rows {
            if !names.insert(row.name.as_str()) {
                return Err(CostMapError::DuplicateCountry(row.name.clone()));
            }
        }
        let report = join(&mut features, &rows);
        Ok(Self {
            rows,
            features,
            report,
        })
    }

    pub fn rows(&self) -> &[CountryRecord] {
        &self.rows
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    pub fn join_report(&self) -> &JoinReport {
        &self.report
    }

    pub fn stats(&self) -> DatasetStats {
        DatasetStats {
            rows: self.rows.len(),
            features: self.features.len(),
            matched: self.report.matched,
            unmatched: self.features.iter().filter(|f| !f.is_matched()).count(),
            complete_rows: self.rows.iter().filter(|r| r.indices.is_complete()).count(),
        }
    }

    /// Exact-name lookup, falling back to an accent- and case-insensitive
    /// match for user-typed input.
    pub fn country(&self, name: &str) -> Option<&CountryRecord> {
        let name = name.trim();
        self.rows
            .iter()
            .find(|r| r.is_named(name))
            .or_else(|| self.rows.iter().find(|r| r.is_named_folded(name)))
    }

    fn require(&self, name: &str) -> Result<&CountryRecord> {
        self.country(name)
            .ok_or_else(|| CostMapError::UnknownCountry(name.to_string()))
    }

    /// Country list for selectors and the data table.
    pub fn countries_sorted(&self, order: SortOrder) -> Vec<&CountryRecord> {
        let mut out: Vec<&CountryRecord> = self.rows.iter().collect();
        match order {
            SortOrder::Name => out.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::Metric(metric) => {
                out.sort_by(|a, b| descending_missing_last(a.value(metric), b.value(metric)))
            }
        }
        out
    }

    /// Table rows ranked by `metric`, highest first.
    pub fn ranked(&self, metric: Metric) -> Vec<RankedRow<'_>> {
        let mut next = 0;
        self.countries_sorted(SortOrder::Metric(metric))
            .into_iter()
            .map(|record| {
                let value = record.value(metric);
                let rank = value.map(|_| {
                    next += 1;
                    next
                });
                RankedRow {
                    rank,
                    record,
                    value,
                }
            })
            .collect()
    }

    /// Countries whose `metric` lies strictly above or below `threshold`,
    /// ordered by that metric descending. Rows without data never qualify.
    pub fn query(&self, metric: Metric, op: Threshold, threshold: f64) -> Vec<&CountryRecord> {
        self.countries_sorted(SortOrder::Metric(metric))
            .into_iter()
            .filter(|r| r.value(metric).is_some_and(|v| op.admits(v, threshold)))
            .collect()
    }

    /// Re-expresses every index relative to `benchmark` (its values become
    /// 100) and re-runs the join on the new values.
    ///
    /// A benchmark index that is missing or zero leaves that metric without
    /// data for every country.
    pub fn rebased(&self, benchmark: &str) -> Result<Dataset> {
        let base = self.require(benchmark)?.indices;
        let scale = |v: Option<f64>, b: Option<f64>| match (v, b) {
            (Some(v), Some(b)) if b != 0.0 => Some(v / b * 100.0).filter(|x| x.is_finite()),
            _ => None,
        };
        let rows = self
            .rows
            .iter()
            .map(|r| CountryRecord {
                indices: Indices::new(
                    scale(r.indices.cost, base.cost),
                    scale(r.indices.income, base.income),
                    scale(r.indices.ppi, base.ppi),
                ),
                ..r.clone()
            })
            .collect();
        Dataset::from_parts(self.features.clone(), rows)
    }

    /// Compares two countries by name.
    pub fn compare_by_name(&self, a: &str, b: &str) -> Result<Comparison> {
        Ok(compare(self.require(a)?, self.require(b)?))
    }

    /// Color scale for `metric`, built from the joined feature values.
    pub fn color_scale(&self, metric: Metric, config: &ScaleConfig) -> Result<ColorScale> {
        ColorScale::build(config, self.features.iter().map(|f| f.value(metric)))
    }

    /// Scatterplot points for every row with both coordinates.
    pub fn points(&self, x: Metric, y: Metric) -> Vec<(&CountryRecord, Point)> {
        self.rows
            .iter()
            .filter_map(|r| Point::from_options(r.value(x), r.value(y)).map(|p| (r, p)))
            .collect()
    }

    /// Cost of living regressed on income.
    pub fn regression(&self) -> std::result::Result<Regression, RegressionError> {
        self.regression_on(Metric::Income, Metric::Cost)
    }

    pub fn regression_on(
        &self,
        x: Metric,
        y: Metric,
    ) -> std::result::Result<Regression, RegressionError> {
        let points: Vec<Point> = self.points(x, y).into_iter().map(|(_, p)| p).collect();
        linear_regression(&points)
    }

    /// Countries whose cost-on-income residual exceeds `k` residual
    /// standard deviations, largest first.
    pub fn regression_outliers(
        &self,
        k: f64,
    ) -> std::result::Result<Vec<Outlier<'_>>, RegressionError> {
        let fit = self.regression()?;
        let pairs = self.points(Metric::Income, Metric::Cost);
        let points: Vec<Point> = pairs.iter().map(|(_, p)| *p).collect();
        let sd = match residual_std_dev(&fit, &points) {
            Some(sd) if sd > 0.0 => sd,
            _ => return Ok(Vec::new()),
        };

        let mut out: Vec<Outlier<'_>> = pairs
            .into_iter()
            .filter_map(|(record, point)| {
                let residual = fit.residual(point);
                let score = residual / sd;
                (score.abs() > k).then_some(Outlier {
                    record,
                    point,
                    residual,
                    score,
                })
            })
            .collect();
        out.sort_by(|a, b| b.score.abs().total_cmp(&a.score.abs()));
        Ok(out)
    }
}

fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
