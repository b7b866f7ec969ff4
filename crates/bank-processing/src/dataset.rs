//! Loading and partitioning of the training dataset.

use polars::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{ProcessingError, Result, ResultExt};
use crate::utils::column_series;

/// Field separator of the bank marketing CSV export.
pub const CSV_SEPARATOR: u8 = b';';

/// Read a semicolon-delimited CSV with a header row.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ProcessingError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("dataset not found: {}", path.display()),
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .map_parse_options(|options| options.with_separator(CSV_SEPARATOR))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("While opening '{}'", path.display()))?
        .finish()
        .context(format!("While reading '{}'", path.display()))?;

    if df.height() == 0 {
        return Err(ProcessingError::InvalidData(format!(
            "'{}' contains no rows",
            path.display()
        )));
    }

    info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Separate the feature columns from the target column.
///
/// Every column other than `target` is a feature.
pub fn split_target(df: &DataFrame, target: &str) -> Result<(DataFrame, Series)> {
    let labels = column_series(df, target)
        .context("While splitting features from target")?
        .clone();
    let features = df.drop(target)?;
    Ok((features, labels))
}

/// Row partitions produced by [`train_test_split`].
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: DataFrame,
    pub test: DataFrame,
}

/// Number of rows assigned to the test partition: `ceil(n * test_size)`.
pub fn test_rows_for(n_rows: usize, test_size: f64) -> usize {
    (n_rows as f64 * test_size).ceil() as usize
}

/// Shuffle row indices with a seeded generator and partition them.
///
/// The first `ceil(n * test_size)` shuffled rows form the test partition and
/// the rest the training partition, so every row lands in exactly one of
/// them. The same seed always yields the same partitions.
pub fn train_test_split(df: &DataFrame, test_size: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(ProcessingError::InvalidConfig(format!(
            "test_size must be in (0, 1), got {}",
            test_size
        )));
    }

    let n_rows = df.height();
    let n_test = test_rows_for(n_rows, test_size);
    if n_test == 0 || n_test >= n_rows {
        return Err(ProcessingError::InvalidData(format!(
            "cannot split {} rows with test_size {}",
            n_rows, test_size
        )));
    }

    let mut indices: Vec<IdxSize> = (0..n_rows as IdxSize).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_idx, train_idx) = indices.split_at(n_test);
    let test = df.take(&IdxCa::from_vec("idx".into(), test_idx.to_vec()))?;
    let train = df.take(&IdxCa::from_vec("idx".into(), train_idx.to_vec()))?;

    debug!(
        "Split {} rows into {} train / {} test (seed {})",
        n_rows,
        train.height(),
        test.height(),
        seed
    );

    Ok(TrainTestSplit { train, test })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn numbered(n: i64) -> DataFrame {
        let labels: Vec<&str> = (0..n)
            .map(|i| if i % 2 == 0 { "no" } else { "yes" })
            .collect();
        df!["id" => (0..n).collect::<Vec<_>>(), "y" => labels].unwrap()
    }

    fn ids(df: &DataFrame) -> Vec<i64> {
        df.column("id")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn test_test_rows_rounds_up() {
        assert_eq!(test_rows_for(10, 0.2), 2);
        assert_eq!(test_rows_for(11, 0.2), 3);
        assert_eq!(test_rows_for(4521, 0.2), 905);
    }

    #[test]
    fn test_split_partitions_every_row_once() {
        let df = numbered(23);
        let split = train_test_split(&df, 0.2, 42).unwrap();

        assert_eq!(split.test.height(), 5);
        assert_eq!(split.train.height(), 18);

        let mut all: Vec<i64> = ids(&split.train);
        all.extend(ids(&split.test));
        all.sort_unstable();
        assert_eq!(all, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_reproducible() {
        let df = numbered(50);
        let a = train_test_split(&df, 0.2, 42).unwrap();
        let b = train_test_split(&df, 0.2, 42).unwrap();
        assert_eq!(ids(&a.test), ids(&b.test));
        assert_eq!(ids(&a.train), ids(&b.train));
    }

    #[test]
    fn test_split_depends_on_seed() {
        let df = numbered(50);
        let a = train_test_split(&df, 0.2, 42).unwrap();
        let b = train_test_split(&df, 0.2, 7).unwrap();
        assert_ne!(ids(&a.test), ids(&b.test));
    }

    #[test]
    fn test_split_rejects_bad_test_size() {
        let df = numbered(10);
        assert!(matches!(
            train_test_split(&df, 0.0, 42),
            Err(ProcessingError::InvalidConfig(_))
        ));
        assert!(matches!(
            train_test_split(&df, 1.0, 42),
            Err(ProcessingError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_split_rejects_single_row() {
        let df = numbered(1);
        assert!(matches!(
            train_test_split(&df, 0.2, 42),
            Err(ProcessingError::InvalidData(_))
        ));
    }

    #[test]
    fn test_split_target() {
        let df = numbered(4);
        let (features, labels) = split_target(&df, "y").unwrap();
        assert_eq!(features.get_column_names_str(), vec!["id"]);
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn test_split_target_missing_column() {
        let df = numbered(4);
        let err = split_target(&df, "target").unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dataset("/definitely/not/here.csv").unwrap_err();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
