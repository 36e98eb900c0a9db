// crates/costmap-core/src/compare.rs
//! # Comparison Engine
//!
//! Pairwise percentage deltas between two countries. Every metric is
//! computed independently; a zero or missing denominator makes that one
//! metric unavailable without affecting the others.

use crate::format::format_percent;
use crate::model::{CountryRecord, Metric};
use crate::traits::MetricSource;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Which way A differs from B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Higher,
    Lower,
    Equal,
}

impl Direction {
    fn of(delta: f64) -> Self {
        match delta.partial_cmp(&0.0) {
            Some(Ordering::Greater) => Direction::Higher,
            Some(Ordering::Less) => Direction::Lower,
            _ => Direction::Equal,
        }
    }
}

/// Result of one metric's comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeltaOutcome {
    /// `delta` is the fraction `a / b - 1`; multiply by 100 for percent.
    Available { delta: f64, direction: Direction },
    /// Either side missing, non-finite, or `b` is zero.
    Unavailable,
}

impl DeltaOutcome {
    pub fn delta(&self) -> Option<f64> {
        match self {
            DeltaOutcome::Available { delta, .. } => Some(*delta),
            DeltaOutcome::Unavailable => None,
        }
    }

    pub fn direction(&self) -> Option<Direction> {
        match self {
            DeltaOutcome::Available { direction, .. } => Some(*direction),
            DeltaOutcome::Unavailable => None,
        }
    }
}

/// `a / b - 1`, or [`DeltaOutcome::Unavailable`] when that is not a finite number.
pub fn relative_delta(a: Option<f64>, b: Option<f64>) -> DeltaOutcome {
    match (a, b) {
        (Some(a), Some(b)) if a.is_finite() && b.is_finite() && b != 0.0 => {
            let delta = a / b - 1.0;
            if delta.is_finite() {
                DeltaOutcome::Available {
                    delta,
                    direction: Direction::of(delta),
                }
            } else {
                DeltaOutcome::Unavailable
            }
        }
        _ => DeltaOutcome::Unavailable,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub metric: Metric,
    pub outcome: DeltaOutcome,
    /// Human-readable sentence; absent for unavailable or zero deltas.
    pub message: Option<String>,
}

/// Full comparison of A against B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub a: String,
    pub b: String,
    pub cost: MetricDelta,
    pub income: MetricDelta,
    pub ppi: MetricDelta,
    /// Wealth sentence derived from the purchasing-power delta.
    pub narrative: Option<String>,
}

impl Comparison {
    pub fn get(&self, metric: Metric) -> &MetricDelta {
        match metric {
            Metric::Cost => &self.cost,
            Metric::Income => &self.income,
            Metric::PurchasingPower => &self.ppi,
        }
    }

    pub fn cost_delta(&self) -> Option<f64> {
        self.cost.outcome.delta()
    }

    pub fn income_delta(&self) -> Option<f64> {
        self.income.outcome.delta()
    }

    pub fn ppi_delta(&self) -> Option<f64> {
        self.ppi.outcome.delta()
    }

    /// Per-metric sentences in display order, without the narrative.
    pub fn metric_messages(&self) -> Vec<&str> {
        [&self.cost, &self.income, &self.ppi]
            .into_iter()
            .filter_map(|d| d.message.as_deref())
            .collect()
    }

    /// All sentences in display order: the three metrics, then the narrative.
    pub fn messages(&self) -> Vec<&str> {
        let mut out = self.metric_messages();
        out.extend(self.narrative.as_deref());
        out
    }
}

/// Compares `a` against `b` on all three indices.
pub fn compare(a: &CountryRecord, b: &CountryRecord) -> Comparison {
    let metric_delta = |metric: Metric| {
        let outcome = relative_delta(a.value(metric), b.value(metric));
        let message = phrase(&outcome, |pct, word| {
            format!(
                "{} in {} is {} {} than in {}",
                metric.subject(),
                a.name,
                pct,
                word,
                b.name
            )
        });
        MetricDelta {
            metric,
            outcome,
            message,
        }
    };

    let cost = metric_delta(Metric::Cost);
    let income = metric_delta(Metric::Income);
    let ppi = metric_delta(Metric::PurchasingPower);

    let narrative = phrase(&ppi.outcome, |pct, word| {
        let word = if word == "higher" { "wealthier" } else { "poorer" };
        format!("People in {} are {} {} than people in {}", a.name, pct, word, b.name)
    });

    Comparison {
        a: a.name.clone(),
        b: b.name.clone(),
        cost,
        income,
        ppi,
        narrative,
    }
}

fn phrase(outcome: &DeltaOutcome, build: impl FnOnce(String, &str) -> String) -> Option<String> {
    match outcome {
        DeltaOutcome::Available { delta, direction } => {
            let word = match direction {
                Direction::Higher => "higher",
                Direction::Lower => "lower",
                Direction::Equal => return None,
            };
            Some(build(format_percent(delta.abs()), word))
        }
        DeltaOutcome::Unavailable => None,
    }
}
