// crates/costmap-core/src/text.rs

/// Convert a string into a folded key suitable for comparison.
///
/// This performs:
/// 1\) Transliterate Unicode → ASCII (e.g. `Côte d'Ivoire` -> `Cote d'Ivoire`)
/// 2\) Normalize to lowercase
///
/// The join itself never uses folded keys; they only feed near-miss
/// diagnostics and case-insensitive lookups on user input.
///
/// # Examples
///
/// ```rust
/// use costmap_core::text::fold_key;
///
/// assert_eq!(fold_key("Curaçao"), "curacao");
/// assert_eq!(fold_key("TÜRKIYE"), "turkiye");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Compares two strings for equality after Unicode folding and normalization.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folding_ignores_accents_and_case_only() {
        assert!(equals_folded("Curaçao", "CURACAO"));
        assert!(equals_folded("Côte d'Ivoire", "cote d'ivoire"));
        assert!(!equals_folded("Niger", "Nigeria"));
        assert!(!equals_folded(" Chad", "Chad"));
    }
}
