// crates/costmap-core/src/dashboard.rs
//! Application state for the presentation layer.
//!
//! A [`Dashboard`] owns the joined dataset plus the current selections.
//! Every selection change is a mutation followed by a pure recompute of
//! the affected view; renderers receive those views and nothing else.

use crate::compare::Comparison;
use crate::error::Result;
use crate::format::{format_regression, round_to};
use crate::model::{CountryRecord, Dataset, Metric, Region, SortOrder};
use crate::regression::{Point, Regression};
use crate::scale::{ColorPolicy, ColorScale, LegendEntry, Rgb, ScaleConfig};
use crate::traits::MetricSource;
use serde::Serialize;

/// Fill for one boundary feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureFill {
    pub admin: String,
    pub value: Option<f64>,
    pub color: Rgb,
}

/// Everything the choropleth renderer needs for one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub metric: Metric,
    pub title: &'static str,
    pub legend: Vec<LegendEntry>,
    pub fills: Vec<FeatureFill>,
    #[serde(skip)]
    pub scale: ColorScale,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub name: String,
    pub region: Option<Region>,
    pub population: Option<u64>,
    pub x: f64,
    pub y: f64,
}

/// Fitted line, rounded for display (slope/intercept 2 dp, R² 3 dp).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionView {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub endpoints: [Point; 2],
    pub label: String,
}

impl From<&Regression> for RegressionView {
    fn from(fit: &Regression) -> Self {
        Self {
            slope: round_to(fit.slope, 2),
            intercept: round_to(fit.intercept, 2),
            r_squared: round_to(fit.r_squared, 3),
            endpoints: fit.endpoints,
            label: format_regression(fit),
        }
    }
}

/// Income (x) against cost of living (y), with the fitted line or the
/// reason there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub points: Vec<ScatterPoint>,
    pub fit: std::result::Result<RegressionView, String>,
}

pub struct Dashboard {
    dataset: Dataset,
    metric: Metric,
    scale: ScaleConfig,
    pair: Option<(String, String)>,
}

impl Dashboard {
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            metric: Metric::Cost,
            scale: ScaleConfig::default(),
            pair: None,
        }
    }

    pub fn with_scale(mut self, config: ScaleConfig) -> Result<Self> {
        config.validate()?;
        self.scale = config;
        Ok(self)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn scale_config(&self) -> &ScaleConfig {
        &self.scale
    }

    pub fn selected_pair(&self) -> Option<(&str, &str)> {
        self.pair.as_ref().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn select_metric(&mut self, metric: Metric) -> Result<MapView> {
        self.metric = metric;
        self.map_view()
    }

    pub fn select_policy(&mut self, policy: ColorPolicy) -> Result<MapView> {
        self.scale.policy = policy;
        self.map_view()
    }

    /// Stores the pair only when both names resolve.
    pub fn select_pair(&mut self, a: &str, b: &str) -> Result<Comparison> {
        let comparison = self.dataset.compare_by_name(a, b)?;
        self.pair = Some((comparison.a.clone(), comparison.b.clone()));
        Ok(comparison)
    }

    pub fn comparison(&self) -> Option<Result<Comparison>> {
        self.pair
            .as_ref()
            .map(|(a, b)| self.dataset.compare_by_name(a, b))
    }

    pub fn map_view(&self) -> Result<MapView> {
        let metric = self.metric;
        let scale = self.dataset.color_scale(metric, &self.scale)?;
        let fills = self
            .dataset
            .features()
            .iter()
            .map(|f| {
                let value = f.value(metric);
                FeatureFill {
                    admin: f.admin.clone(),
                    value,
                    color: scale.color_for(value),
                }
            })
            .collect();
        Ok(MapView {
            metric,
            title: metric.title(),
            legend: scale.legend(),
            fills,
            scale,
        })
    }

    pub fn table(&self, order: SortOrder) -> Vec<&CountryRecord> {
        self.dataset.countries_sorted(order)
    }

    pub fn scatter(&self) -> ScatterView {
        let points = self
            .dataset
            .points(Metric::Income, Metric::Cost)
            .into_iter()
            .map(|(r, p)| ScatterPoint {
                name: r.name.clone(),
                region: r.region,
                population: r.population,
                x: p.x,
                y: p.y,
            })
            .collect();
        let fit = self
            .dataset
            .regression()
            .map(|fit| RegressionView::from(&fit))
            .map_err(|e| e.to_string());
        ScatterView { points, fit }
    }
}
