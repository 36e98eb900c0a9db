// crates/costmap-core/src/scale.rs
//! # Index Color Mapper
//!
//! One [`ColorScale`] object drives both polygon fills and the legend, so
//! the two can never disagree. Two policies are supported:
//!
//! - **Quantile**: equal-population buckets over the observed values.
//! - **Sequential**: a fixed domain (0–120 by default) mapped through a
//!   continuous gradient.
//!
//! Missing values always map to [`NO_DATA_COLOR`].

use crate::error::{CostMapError, Result};
use crate::format::number_formatting;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An sRGB color. Serializes as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn lerp(a: Rgb, b: Rgb, t: f64) -> Rgb {
        let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
        Rgb::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.hex()
    }
}

impl TryFrom<String> for Rgb {
    type Error = CostMapError;

    fn try_from(s: String) -> Result<Self> {
        Rgb::from_hex(&s).ok_or_else(|| CostMapError::InvalidData(format!("not a #rrggbb color: {s}")))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

/// Ten-step viridis ramp, light (low values) to dark (high values).
pub const VIRIDIS_10: [Rgb; 10] = [
    Rgb::new(0xfd, 0xe7, 0x25),
    Rgb::new(0xb5, 0xde, 0x2b),
    Rgb::new(0x6e, 0xce, 0x58),
    Rgb::new(0x35, 0xb7, 0x79),
    Rgb::new(0x1f, 0x9e, 0x89),
    Rgb::new(0x26, 0x82, 0x8e),
    Rgb::new(0x31, 0x68, 0x8e),
    Rgb::new(0x3e, 0x49, 0x89),
    Rgb::new(0x48, 0x28, 0x78),
    Rgb::new(0x44, 0x01, 0x54),
];

/// Reserved fill for features without data. Not part of any palette.
pub const NO_DATA_COLOR: Rgb = Rgb::new(0xd9, 0xd9, 0xd9);

pub const NO_DATA_LABEL: &str = "No data";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorPolicy {
    #[default]
    Quantile,
    Sequential,
}

impl std::str::FromStr for ColorPolicy {
    type Err = CostMapError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quantile" | "q" => Ok(ColorPolicy::Quantile),
            "sequential" | "continuous" | "s" => Ok(ColorPolicy::Sequential),
            _ => Err(CostMapError::InvalidData(format!("unknown color policy: {s}"))),
        }
    }
}

/// Scale parameters. Defaults: 10 quantile buckets, sequential domain 0–120.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub policy: ColorPolicy,
    /// Bucket count for quantile scales, stop count for sequential legends.
    pub buckets: usize,
    pub domain: (f64, f64),
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            policy: ColorPolicy::Quantile,
            buckets: 10,
            domain: (0.0, 120.0),
        }
    }
}

impl ScaleConfig {
    pub fn quantile(buckets: usize) -> Self {
        Self {
            policy: ColorPolicy::Quantile,
            buckets,
            ..Self::default()
        }
    }

    pub fn sequential(lo: f64, hi: f64) -> Self {
        Self {
            policy: ColorPolicy::Sequential,
            domain: (lo, hi),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.buckets == 0 {
            return Err(CostMapError::InvalidData("bucket count must be at least 1".into()));
        }
        let (lo, hi) = self.domain;
        if !(lo.is_finite() && hi.is_finite() && hi > lo) {
            return Err(CostMapError::InvalidData(format!(
                "sequential domain must be finite and increasing, got {lo}..{hi}"
            )));
        }
        Ok(())
    }
}

/// One legend row: swatch, lower bound and its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub color: Rgb,
    pub lower: Option<f64>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantileScale {
    thresholds: Vec<f64>,
    colors: Vec<Rgb>,
    min: Option<f64>,
}

impl QuantileScale {
    /// Builds thresholds from the finite values in `values`.
    pub fn new(values: impl IntoIterator<Item = Option<f64>>, buckets: usize) -> Self {
        let buckets = buckets.max(1);
        let mut sorted: Vec<f64> = values
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let thresholds = if sorted.is_empty() {
            Vec::new()
        } else {
            (1..buckets)
                .map(|i| quantile_sorted(&sorted, i as f64 / buckets as f64))
                .collect()
        };

        Self {
            thresholds,
            colors: palette(buckets),
            min: sorted.first().copied(),
        }
    }

    /// Interior breakpoints; `buckets - 1` of them, empty for an empty domain.
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn bucket_of(&self, value: f64) -> Option<usize> {
        if !value.is_finite() || self.min.is_none() {
            return None;
        }
        Some(self.thresholds.partition_point(|t| *t <= value))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequentialScale {
    domain: (f64, f64),
    stops: Vec<Rgb>,
    legend_stops: usize,
}

impl SequentialScale {
    pub fn new(domain: (f64, f64), legend_stops: usize) -> Self {
        Self {
            domain,
            stops: VIRIDIS_10.to_vec(),
            legend_stops: legend_stops.max(1),
        }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn position(&self, value: f64) -> f64 {
        let (lo, hi) = self.domain;
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }
}

/// The shared scale object used for fills and legend alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColorScale {
    Quantile(QuantileScale),
    Sequential(SequentialScale),
}

impl ColorScale {
    /// Builds a scale for `config` over the observed `values`.
    /// Sequential scales ignore the values; their domain is fixed.
    pub fn build(config: &ScaleConfig, values: impl IntoIterator<Item = Option<f64>>) -> Result<Self> {
        config.validate()?;
        Ok(match config.policy {
            ColorPolicy::Quantile => ColorScale::Quantile(QuantileScale::new(values, config.buckets)),
            ColorPolicy::Sequential => {
                ColorScale::Sequential(SequentialScale::new(config.domain, config.buckets))
            }
        })
    }

    pub fn policy(&self) -> ColorPolicy {
        match self {
            ColorScale::Quantile(_) => ColorPolicy::Quantile,
            ColorScale::Sequential(_) => ColorPolicy::Sequential,
        }
    }

    /// Fill color for a value. Missing or non-finite input gets
    /// [`NO_DATA_COLOR`]; this never panics.
    pub fn color_for(&self, value: Option<f64>) -> Rgb {
        let Some(v) = value.filter(|v| v.is_finite()) else {
            return NO_DATA_COLOR;
        };
        match self {
            ColorScale::Quantile(q) => q
                .bucket_of(v)
                .and_then(|i| q.colors.get(i).copied())
                .unwrap_or(NO_DATA_COLOR),
            ColorScale::Sequential(s) => interpolate(&s.stops, s.position(v)),
        }
    }

    /// Legend rows generated from this very scale, followed by a
    /// "No data" row.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut out = Vec::new();
        match self {
            ColorScale::Quantile(q) => {
                if let Some(min) = q.min {
                    out.push(LegendEntry {
                        color: self.color_for(Some(min)),
                        lower: Some(min),
                        label: format!("{}", min.round()),
                    });
                    for t in &q.thresholds {
                        out.push(LegendEntry {
                            color: self.color_for(Some(*t)),
                            lower: Some(*t),
                            label: number_formatting(*t),
                        });
                    }
                }
            }
            ColorScale::Sequential(s) => {
                let (lo, hi) = s.domain;
                let n = s.legend_stops;
                for i in 0..n {
                    let v = if n == 1 {
                        lo
                    } else {
                        lo + (hi - lo) * i as f64 / (n - 1) as f64
                    };
                    out.push(LegendEntry {
                        color: self.color_for(Some(v)),
                        lower: Some(v),
                        label: number_formatting(v),
                    });
                }
            }
        }
        out.push(LegendEntry {
            color: NO_DATA_COLOR,
            lower: None,
            label: NO_DATA_LABEL.to_string(),
        });
        out
    }
}

/// Quantile of an ascending slice with linear interpolation between
/// order statistics (`p` in `[0, 1]`).
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = (n - 1) as f64 * p.clamp(0.0, 1.0);
            let i0 = pos.floor() as usize;
            let lower = sorted[i0];
            match sorted.get(i0 + 1) {
                Some(upper) => lower + (upper - lower) * (pos - i0 as f64),
                None => lower,
            }
        }
    }
}

/// `n` colors sampled evenly along the viridis ramp.
pub fn palette(n: usize) -> Vec<Rgb> {
    if n == VIRIDIS_10.len() {
        return VIRIDIS_10.to_vec();
    }
    if n == 1 {
        return vec![VIRIDIS_10[0]];
    }
    (0..n)
        .map(|i| interpolate(&VIRIDIS_10, i as f64 / (n - 1) as f64))
        .collect()
}

fn interpolate(stops: &[Rgb], t: f64) -> Rgb {
    match stops {
        [] => NO_DATA_COLOR,
        [only] => *only,
        _ => {
            let pos = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
            let i0 = (pos.floor() as usize).min(stops.len() - 2);
            Rgb::lerp(stops[i0], stops[i0 + 1], pos - i0 as f64)
        }
    }
}
