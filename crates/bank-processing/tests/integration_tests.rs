//! Integration tests for dataset loading and preprocessing.
//!
//! These tests run the loading, splitting and transform stages end to end on
//! a small sample of the bank marketing export.

use bank_processing::schema::{CATEGORICAL_FEATURES, NUMERIC_FEATURES, TARGET_COLUMN};
use bank_processing::{
    ClientRecord, ColumnTransformer, ProcessingError, RecordError, TransformerConfig,
    load_dataset, split_target, train_test_split,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_sample() -> DataFrame {
    load_dataset(fixtures_path().join("bank_sample.csv")).expect("Failed to load fixture")
}

fn fitted_on_sample() -> ColumnTransformer {
    let df = load_sample();
    let (features, _) = split_target(&df, TARGET_COLUMN).unwrap();
    ColumnTransformer::fit(&features, &TransformerConfig::default()).unwrap()
}

fn request_body() -> serde_json::Value {
    json!({
        "age": 35, "job": "technician", "marital": "married",
        "education": "secondary", "default": "no", "balance": 1500,
        "housing": "yes", "loan": "no", "contact": "cellular", "day": 15,
        "month": "may", "duration": 200, "campaign": 1, "pdays": -1,
        "previous": 0, "poutcome": "unknown"
    })
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_semicolon_csv() {
    let df = load_sample();
    assert_eq!(df.shape(), (80, 17));
    assert_eq!(df.column("job").unwrap().dtype(), &DataType::String);
    assert!(df.column("age").unwrap().dtype().is_integer());
    // One balance cell is empty in the fixture.
    assert_eq!(df.column("balance").unwrap().null_count(), 1);
}

#[test]
fn test_load_unreadable_file_is_an_error() {
    let result = load_dataset(fixtures_path().join("missing.csv"));
    assert!(matches!(result, Err(ProcessingError::Io(_))));
}

// ============================================================================
// Split + fit + transform
// ============================================================================

#[test]
fn test_split_then_transform() {
    let df = load_sample();
    let split = train_test_split(&df, 0.2, 42).unwrap();
    assert_eq!(split.train.height(), 64);
    assert_eq!(split.test.height(), 16);

    let (train_x, _) = split_target(&split.train, TARGET_COLUMN).unwrap();
    let (test_x, test_y) = split_target(&split.test, TARGET_COLUMN).unwrap();
    assert_eq!(test_y.len(), 16);

    let transformer = ColumnTransformer::fit(&train_x, &TransformerConfig::default()).unwrap();
    let matrix = transformer.transform(&test_x).unwrap();

    assert_eq!(matrix.nrows(), 16);
    assert_eq!(matrix.ncols(), transformer.n_features_out());
    assert!(matrix.iter().all(|v| v.is_finite()));
}

#[test]
fn test_output_width_is_numeric_plus_categories() {
    let transformer = fitted_on_sample();

    let categories: usize = CATEGORICAL_FEATURES
        .iter()
        .map(|c| transformer.encoder(c).unwrap().width())
        .sum();
    assert_eq!(
        transformer.n_features_out(),
        NUMERIC_FEATURES.len() + categories
    );
    assert_eq!(
        transformer.feature_names_out().len(),
        transformer.n_features_out()
    );
    assert_eq!(transformer.feature_names_in().len(), 16);
}

#[test]
fn test_each_indicator_block_has_one_hot_for_training_rows() {
    let df = load_sample();
    let (features, _) = split_target(&df, TARGET_COLUMN).unwrap();
    let (transformer, matrix) =
        ColumnTransformer::fit_transform(&features, &TransformerConfig::default()).unwrap();

    let categorical_sum: f64 = matrix
        .row(0)
        .iter()
        .skip(NUMERIC_FEATURES.len())
        .sum();
    assert_eq!(categorical_sum, CATEGORICAL_FEATURES.len() as f64);
    assert_eq!(matrix.nrows(), features.height());
    assert!(transformer.encoder("month").unwrap().width() > 1);
}

// ============================================================================
// Request records
// ============================================================================

#[test]
fn test_record_transforms_to_one_row() {
    let transformer = fitted_on_sample();
    let record = ClientRecord::from_json(&request_body()).unwrap();

    let aligned = transformer.align(&record.to_dataframe().unwrap()).unwrap();
    let matrix = transformer.transform(&aligned).unwrap();
    assert_eq!(matrix.dim(), (1, transformer.n_features_out()));
}

#[test]
fn test_unseen_category_is_tolerated() {
    let transformer = fitted_on_sample();
    let mut body = request_body();
    body["job"] = json!("astronaut");
    let record = ClientRecord::from_json(&body).unwrap();

    let aligned = transformer.align(&record.to_dataframe().unwrap()).unwrap();
    let matrix = transformer.transform(&aligned).unwrap();

    let names = transformer.feature_names_out();
    let job_total: f64 = names
        .iter()
        .zip(matrix.row(0).iter())
        .filter(|(name, _)| name.starts_with("job_"))
        .map(|(_, v)| v)
        .sum();
    assert_eq!(job_total, 0.0);
}

#[test]
fn test_missing_duration_is_rejected() {
    let mut body = request_body();
    body.as_object_mut().unwrap().remove("duration");
    let err = ClientRecord::from_json(&body).unwrap_err();
    assert_eq!(err, RecordError::MissingField("duration"));
    assert_eq!(err.to_string(), "Missing required field: duration");
}

#[test]
fn test_transformer_survives_json_round_trip() {
    let transformer = fitted_on_sample();
    let json = serde_json::to_string_pretty(&transformer).unwrap();
    let restored: ColumnTransformer = serde_json::from_str(&json).unwrap();

    let record = ClientRecord::from_json(&request_body()).unwrap();
    let row = record.to_dataframe().unwrap();
    assert_eq!(
        restored.transform(&restored.align(&row).unwrap()).unwrap(),
        transformer.transform(&transformer.align(&row).unwrap()).unwrap()
    );
}
