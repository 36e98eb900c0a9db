// crates/costmap-core/src/regression.rs
//! # Regression Engine
//!
//! Ordinary least squares of `y` on `x`. Results are full precision;
//! rounding for display lives in [`crate::format::format_regression`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Builds a point only when both coordinates are present.
    pub fn from_options(x: Option<f64>, y: Option<f64>) -> Option<Self> {
        Some(Self::new(x?, y?))
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RegressionError {
    #[error("insufficient data for regression: {valid} valid point(s)")]
    InsufficientData { valid: usize },
    #[error("insufficient data for regression: all x values are identical")]
    ZeroVariance,
}

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Line endpoints at the smallest and largest `x` in the fit.
    pub endpoints: [Point; 2],
    /// Number of points that took part in the fit.
    pub n: usize,
}

impl Regression {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Observed minus fitted value.
    pub fn residual(&self, p: Point) -> f64 {
        p.y - self.predict(p.x)
    }
}

/// Fits a line through the points whose coordinates are both finite.
/// Points with a NaN or infinite coordinate are skipped, not zero-filled.
pub fn linear_regression(points: &[Point]) -> Result<Regression, RegressionError> {
    let valid: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();
    let n = valid.len();
    if n < 2 {
        return Err(RegressionError::InsufficientData { valid: n });
    }

    let nf = n as f64;
    let mean_x = valid.iter().map(|p| p.x).sum::<f64>() / nf;
    let mean_y = valid.iter().map(|p| p.y).sum::<f64>() / nf;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for p in &valid {
        let dx = p.x - mean_x;
        let dy = p.y - mean_y;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let first_x = valid[0].x;
    if sxx <= 0.0 || valid.iter().all(|p| p.x == first_x) {
        return Err(RegressionError::ZeroVariance);
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    // Horizontal data is fitted exactly by a horizontal line.
    let r_squared = if syy == 0.0 {
        1.0
    } else {
        let ss_res: f64 = valid
            .iter()
            .map(|p| {
                let e = p.y - (slope * p.x + intercept);
                e * e
            })
            .sum();
        1.0 - ss_res / syy
    };

    let (min_x, max_x) = valid
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.x), hi.max(p.x))
        });

    Ok(Regression {
        slope,
        intercept,
        r_squared,
        endpoints: [
            Point::new(min_x, slope * min_x + intercept),
            Point::new(max_x, slope * max_x + intercept),
        ],
        n,
    })
}

/// Standard deviation of the residuals of `fit` over `points`
/// (population form, finite points only).
pub fn residual_std_dev(fit: &Regression, points: &[Point]) -> Option<f64> {
    let residuals: Vec<f64> = points
        .iter()
        .filter(|p| p.is_finite())
        .map(|p| fit.residual(*p))
        .collect();
    if residuals.is_empty() {
        return None;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let var = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    Some(var.sqrt())
}
