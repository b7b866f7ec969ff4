//! Dataset loading and preprocessing for the bank marketing classifier.
//!
//! # Overview
//!
//! This library covers everything between raw input and the model matrix:
//!
//! - **Schema**: the 7 numeric and 9 categorical client fields plus the `y` label
//! - **Dataset**: semicolon-delimited CSV loading and a seeded train/test split
//! - **Record validation**: turning a JSON request body into a typed [`ClientRecord`]
//! - **Preprocessing**: median/constant imputation, standardization and one-hot
//!   encoding, combined in a serializable [`ColumnTransformer`]
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bank_processing::{ColumnTransformer, TransformerConfig, load_dataset, split_target};
//!
//! let df = load_dataset("bank.csv")?;
//! let (features, labels) = split_target(&df, "y")?;
//!
//! let (transformer, matrix) =
//!     ColumnTransformer::fit_transform(&features, &TransformerConfig::default())?;
//! println!("{} rows x {} features", matrix.nrows(), transformer.n_features_out());
//! ```
//!
//! # Request validation
//!
//! ```rust,ignore
//! use bank_processing::ClientRecord;
//!
//! let record = ClientRecord::from_json(&body)?;
//! let row = transformer.align(&record.to_dataframe()?)?;
//! let x = transformer.transform(&row)?;
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod imputers;
pub mod record;
pub mod schema;
pub mod transform;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, TransformerConfig, TransformerConfigBuilder};
pub use dataset::{TrainTestSplit, load_dataset, split_target, train_test_split};
pub use error::{ProcessingError, Result as ProcessingResult, ResultExt};
pub use imputers::{ConstantImputer, MedianImputer};
pub use record::{ClientRecord, RecordError};
pub use transform::{ColumnTransformer, OneHotEncoder, StandardScaler};
