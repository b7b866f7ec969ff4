//! Fit/transform stages that turn a feature frame into a model matrix.

mod column_transformer;
mod one_hot;
mod scaler;

pub use column_transformer::ColumnTransformer;
pub use one_hot::OneHotEncoder;
pub use scaler::StandardScaler;
