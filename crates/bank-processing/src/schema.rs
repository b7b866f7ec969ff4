//! Column schema of the bank marketing dataset.
//!
//! The field lists below fix both the set of required request fields and the
//! order in which they are checked, so validation errors are deterministic.

/// Numeric feature columns, in declared order.
pub const NUMERIC_FEATURES: [&str; 7] = [
    "age", "balance", "day", "duration", "campaign", "pdays", "previous",
];

/// Categorical feature columns, in declared order.
pub const CATEGORICAL_FEATURES: [&str; 9] = [
    "job", "marital", "education", "default", "housing", "loan", "contact", "month", "poutcome",
];

/// Every field a prediction request must carry, in the order they are checked.
pub const REQUIRED_FIELDS: [&str; 16] = [
    "age", "job", "marital", "education", "default", "balance", "housing", "loan", "contact",
    "day", "month", "duration", "campaign", "pdays", "previous", "poutcome",
];

/// Name of the label column in the training data.
pub const TARGET_COLUMN: &str = "y";

/// Label of the positive class (client subscribed).
pub const POSITIVE_LABEL: &str = "yes";

/// Label of the negative class.
pub const NEGATIVE_LABEL: &str = "no";

/// Sentinel used to fill missing categorical values.
pub const MISSING_CATEGORY: &str = "unknown";

/// Returns `true` if `name` is one of the numeric feature columns.
#[inline]
pub fn is_numeric_feature(name: &str) -> bool {
    NUMERIC_FEATURES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_required_fields_cover_all_features_once() {
        let required: HashSet<_> = REQUIRED_FIELDS.iter().copied().collect();
        let features: HashSet<_> = NUMERIC_FEATURES
            .iter()
            .chain(CATEGORICAL_FEATURES.iter())
            .copied()
            .collect();

        assert_eq!(required.len(), REQUIRED_FIELDS.len());
        assert_eq!(required, features);
        assert!(!required.contains(TARGET_COLUMN));
    }

    #[test]
    fn test_feature_kind_lookup() {
        assert!(is_numeric_feature("pdays"));
        assert!(!is_numeric_feature("job"));
        assert!(!is_numeric_feature("y"));
    }
}
