// crates/costmap-core/src/format.rs
//! Display helpers shared by the CLI and the browser bindings.

use crate::model::{BoundaryFeature, Metric};
use crate::regression::Regression;
use crate::scale::NO_DATA_LABEL;
use crate::traits::MetricSource;

pub const HOVER_PROMPT: &str = "Hover over a country";

/// Rounds half away from zero to `dp` decimal places.
pub fn round_to(value: f64, dp: u32) -> f64 {
    let factor = 10f64.powi(dp as i32);
    (value * factor).round() / factor
}

/// One decimal, thousands separators, no trailing `.0`.
///
/// ```rust
/// use costmap_core::format::number_formatting;
///
/// assert_eq!(number_formatting(105.94), "105.9");
/// assert_eq!(number_formatting(85.0), "85");
/// assert_eq!(number_formatting(12345.67), "12,345.7");
/// ```
pub fn number_formatting(value: f64) -> String {
    if !value.is_finite() {
        return NO_DATA_LABEL.to_string();
    }
    let tenths = (value.abs() * 10.0).round() as u64;
    let negative = value < 0.0 && tenths > 0;
    let (whole, tenth) = (tenths / 10, tenths % 10);

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(whole));
    if tenth > 0 {
        out.push('.');
        out.push_str(&tenth.to_string());
    }
    out
}

/// Formats an optional index, using the "No data" label when absent.
pub fn format_index(value: Option<f64>) -> String {
    value
        .map(number_formatting)
        .unwrap_or_else(|| NO_DATA_LABEL.to_string())
}

/// Population with thousands separators, or the "No data" label.
pub fn format_population(value: Option<u64>) -> String {
    value
        .map(group_thousands)
        .unwrap_or_else(|| NO_DATA_LABEL.to_string())
}

/// Renders a fraction as a percentage with two decimals (`0.0625` → `6.25%`).
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// `y = 2.00x + 3.00 (R² = 1.000)`
pub fn format_regression(fit: &Regression) -> String {
    let sign = if fit.intercept < 0.0 { '-' } else { '+' };
    format!(
        "y = {:.2}x {} {:.2} (R² = {:.3})",
        fit.slope,
        sign,
        fit.intercept.abs(),
        fit.r_squared
    )
}

/// Text for the hover info panel of the map.
pub fn hover_panel(metric: Metric, feature: Option<&BoundaryFeature>) -> String {
    match feature {
        Some(f) => format!(
            "{}\n{}\n{}",
            metric.title(),
            f.admin,
            format_index(f.value(metric))
        ),
        None => format!("{}\n{}", metric.title(), HOVER_PROMPT),
    }
}

/// Popup listing all three indices of a feature.
pub fn popup(feature: &BoundaryFeature) -> String {
    format!(
        "{}\nCost of Living Index: {}\nIncome Index: {}\nPPI: {}",
        feature.admin,
        format_index(feature.value(Metric::Cost)),
        format_index(feature.value(Metric::Income)),
        format_index(feature.value(Metric::PurchasingPower)),
    )
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
