//! Imputation module for handling missing values.
//!
//! - Median imputation for numeric columns
//! - Constant imputation for categorical columns

mod statistical;

pub use statistical::{ConstantImputer, MedianImputer};
