// crates/costmap-core/src/join.rs
//! # Joiner
//!
//! Left join from boundary features into table rows by exact `ADMIN` ==
//! `Country` match. No normalization is applied to either side; names that
//! only differ by case or diacritics are reported as near misses and left
//! unmatched.

use crate::model::{BoundaryFeature, CountryRecord};
use crate::text::fold_key;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A boundary name and a table name that are equal once folded, but not
/// byte-for-byte.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearMiss {
    pub feature: String,
    pub row: String,
}

/// Outcome of a join pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinReport {
    /// Number of features that received indices (duplicates counted).
    pub matched: usize,
    /// Feature names that found no row, in feature order, deduplicated.
    pub unmatched_features: Vec<String>,
    /// Row names that no feature referenced, in row order.
    pub unused_rows: Vec<String>,
    pub near_misses: Vec<NearMiss>,
    /// Feature names that occur more than once in the boundary source.
    pub duplicate_features: Vec<String>,
}

impl JoinReport {
    pub fn unmatched(&self) -> usize {
        self.unmatched_features.len()
    }
}

/// Annotates `features` in place with the indices of the row whose name
/// equals the feature's `ADMIN`.
///
/// Running it twice with the same inputs leaves the features in the same
/// state: unmatched features are reset to "no data" on every pass.
pub fn join(features: &mut [BoundaryFeature], rows: &[CountryRecord]) -> JoinReport {
    // First row wins if the table ever carries a name twice.
    let mut by_name: HashMap<&str, &CountryRecord> = HashMap::with_capacity(rows.len());
    for row in rows {
        by_name.entry(row.name.as_str()).or_insert(row);
    }

    let mut report = JoinReport::default();
    let mut used: HashSet<&str> = HashSet::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut unmatched_seen: HashSet<String> = HashSet::new();

    for feature in features.iter_mut() {
        if !seen.insert(feature.admin.clone()) && !report.duplicate_features.contains(&feature.admin)
        {
            warn!("boundary source lists `{}` more than once", feature.admin);
            report.duplicate_features.push(feature.admin.clone());
        }

        match by_name.get(feature.admin.as_str()) {
            Some(row) => {
                debug!("join match: {}", feature.admin);
                feature.indices = Some(row.indices);
                used.insert(row.name.as_str());
                report.matched += 1;
            }
            None => {
                feature.indices = None;
                if unmatched_seen.insert(feature.admin.clone()) {
                    report.unmatched_features.push(feature.admin.clone());
                }
            }
        }
    }

    report.unused_rows = rows
        .iter()
        .filter(|r| !used.contains(r.name.as_str()))
        .map(|r| r.name.clone())
        .collect();

    report.near_misses = near_misses(&report.unmatched_features, &report.unused_rows);
    for miss in &report.near_misses {
        warn!(
            "`{}` (boundary) and `{}` (table) differ only by case or accents; left unmatched",
            miss.feature, miss.row
        );
    }

    info!(
        "joined {} features ({} unmatched, {} table rows unused)",
        report.matched,
        report.unmatched(),
        report.unused_rows.len()
    );
    report
}

fn near_misses(unmatched: &[String], unused: &[String]) -> Vec<NearMiss> {
    let folded_rows: HashMap<String, &String> =
        unused.iter().map(|name| (fold_key(name), name)).collect();

    unmatched
        .iter()
        .filter_map(|feature| {
            folded_rows.get(&fold_key(feature)).map(|row| NearMiss {
                feature: feature.clone(),
                row: (*row).clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Indices;

    #[test]
    fn near_miss_requires_folded_equality() {
        let misses = near_misses(
            &["Curaçao".to_string(), "Kosovo".to_string()],
            &["curacao".to_string(), "Serbia".to_string()],
        );
        assert_eq!(
            misses,
            vec![NearMiss {
                feature: "Curaçao".into(),
                row: "curacao".into()
            }]
        );
    }

    #[test]
    fn duplicate_feature_is_reported_once() {
        let mut features = vec![
            BoundaryFeature::new("Chile", ""),
            BoundaryFeature::new("Chile", ""),
            BoundaryFeature::new("Chile", ""),
        ];
        let rows = vec![CountryRecord::new(
            "Chile",
            Indices::new(Some(50.0), Some(40.0), Some(80.0)),
        )];
        let report = join(&mut features, &rows);
        assert_eq!(report.matched, 3);
        assert_eq!(report.duplicate_features, vec!["Chile".to_string()]);
    }
}
