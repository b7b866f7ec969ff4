//! One-hot expansion of categorical columns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Expands one categorical column into indicator columns.
///
/// Categories are the sorted distinct training values. A value that was not
/// seen during fitting encodes to an all-zero block instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    column: String,
    categories: Vec<String>,
}

impl OneHotEncoder {
    pub fn fit(column: &str, values: &[String]) -> Self {
        let categories: BTreeSet<&String> = values.iter().collect();
        Self {
            column: column.to_string(),
            categories: categories.into_iter().cloned().collect(),
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of indicator columns this encoder produces.
    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// Position of `value` among the fitted categories.
    pub fn category_index(&self, value: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|category| category.as_str().cmp(value))
            .ok()
    }

    /// Write the indicator block for `value` into `out`.
    ///
    /// `out` must be `width()` long and zeroed; unseen values leave it untouched.
    pub fn encode_into(&self, value: &str, out: &mut [f64]) {
        if let Some(index) = self.category_index(value) {
            out[index] = 1.0;
        }
    }

    /// Output names in `<column>_<category>` form.
    pub fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|category| format!("{}_{}", self.column, category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_categories_are_sorted_and_unique() {
        let encoder = OneHotEncoder::fit("marital", &strings(&["single", "married", "single", "divorced"]));
        assert_eq!(encoder.categories(), &strings(&["divorced", "married", "single"])[..]);
        assert_eq!(encoder.width(), 3);
    }

    #[test]
    fn test_encode_known_value() {
        let encoder = OneHotEncoder::fit("loan", &strings(&["yes", "no"]));
        let mut out = [0.0; 2];
        encoder.encode_into("yes", &mut out);
        assert_eq!(out, [0.0, 1.0]);
    }

    #[test]
    fn test_encode_unseen_value_is_all_zero() {
        let encoder = OneHotEncoder::fit("job", &strings(&["admin.", "technician"]));
        let mut out = [0.0; 2];
        encoder.encode_into("astronaut", &mut out);
        assert_eq!(out, [0.0, 0.0]);
    }

    #[test]
    fn test_feature_names() {
        let encoder = OneHotEncoder::fit("contact", &strings(&["cellular", "unknown"]));
        assert_eq!(
            encoder.feature_names(),
            strings(&["contact_cellular", "contact_unknown"])
        );
    }
}
