//! Basic usage example for costmap-rs
//!
//! This example demonstrates how to:
//! - Load and join the bundled boundaries and cost-of-living table
//! - Build a color scale and its legend
//! - Compare two countries
//! - Fit the cost-on-income regression

use costmap_core::format::{format_index, format_regression};
use costmap_core::prelude::*;

fn main() -> Result<()> {
    println!("=== costmap-rs Basic Usage Example ===\n");

    println!("Loading and joining data...");
    let ds = Dataset::load_default()?;
    let stats = ds.stats();
    println!(
        "✓ {} of {} features matched a table row ({} rows)\n",
        stats.matched, stats.features, stats.rows
    );

    // Example 1: unmatched features
    println!("--- Example 1: Features without data ---");
    for name in &ds.join_report().unmatched_features {
        println!("  {name}");
    }
    println!();

    // Example 2: legend for the default quantile scale
    println!("--- Example 2: {} legend ---", Metric::Cost.title());
    let scale = ds.color_scale(Metric::Cost, &ScaleConfig::default())?;
    for entry in scale.legend() {
        println!("  {} {}", entry.color, entry.label);
    }
    println!();

    // Example 3: Canada vs France
    println!("--- Example 3: Compare Canada and France ---");
    let cmp = ds.compare_by_name("Canada", "France")?;
    for msg in cmp.messages() {
        println!("  {msg}");
    }
    if let Some(narrative) = &cmp.narrative {
        println!("  {narrative}");
    }
    println!();

    // Example 4: top three by purchasing power
    println!("--- Example 4: Highest purchasing power ---");
    for row in ds.ranked(Metric::PurchasingPower).iter().take(3) {
        println!(
            "  {}. {} ({})",
            row.rank.unwrap_or_default(),
            row.record.name(),
            format_index(row.value)
        );
    }
    println!();

    // Example 5: regression
    println!("--- Example 5: Cost of living vs income ---");
    match ds.regression() {
        Ok(fit) => println!("  {}", format_regression(&fit)),
        Err(e) => println!("  {e}"),
    }

    println!("\n=== Example completed successfully ===");
    Ok(())
}
