// crates/costmap-core/src/traits.rs
use crate::model::{BoundaryFeature, CountryRecord, Indices, Metric};
use crate::text::equals_folded;

/// Name-based matching helpers for types that expose a canonical name.
///
/// [`NameMatch::is_named`] is the exact, case-sensitive comparison the
/// join relies on. [`NameMatch::is_named_folded`] is accent- and
/// case-insensitive and is only used for diagnostics and user lookups.
///
/// # Examples
/// ```rust
/// use costmap_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("Curaçao").is_named("Curaçao"));
/// assert!(!Place("Curaçao").is_named("Curacao"));
/// assert!(Place("Curaçao").is_named_folded("curacao"));
/// ```
pub trait NameMatch {
    /// Returns the canonical name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn is_named(&self, q: &str) -> bool {
        self.name_str() == q
    }

    #[inline]
    fn is_named_folded(&self, q: &str) -> bool {
        equals_folded(self.name_str(), q)
    }
}

impl NameMatch for CountryRecord {
    fn name_str(&self) -> &str {
        &self.name
    }
}

impl NameMatch for BoundaryFeature {
    fn name_str(&self) -> &str {
        &self.admin
    }
}

/// Anything that can answer "what is this entity's value for a metric?".
///
/// Every downstream consumer (color mapper, table, scatterplot) reads
/// values through this trait, so "no data" is handled in one place.
pub trait MetricSource {
    fn indices(&self) -> Option<&Indices>;

    #[inline]
    fn value(&self, metric: Metric) -> Option<f64> {
        self.indices().and_then(|i| i.get(metric))
    }
}

impl MetricSource for CountryRecord {
    fn indices(&self) -> Option<&Indices> {
        Some(&self.indices)
    }
}

impl MetricSource for BoundaryFeature {
    fn indices(&self) -> Option<&Indices> {
        self.indices.as_ref()
    }
}
