//! Validation of loosely-typed prediction requests.
//!
//! A request body arrives as arbitrary JSON. [`ClientRecord::from_json`] is
//! the single place it is checked and coerced; everything downstream works
//! with the typed record.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::error::Result;
use crate::schema::{CATEGORICAL_FEATURES, NUMERIC_FEATURES, REQUIRED_FIELDS, is_numeric_feature};

/// Rejections of a prediction request body. Each message is returned to the
/// client verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("Request body must be a JSON object")]
    NotAnObject,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {0}. Expected a number.")]
    InvalidNumber(&'static str),

    #[error("Invalid value for {0}. Expected a string.")]
    InvalidCategory(&'static str),
}

impl RecordError {
    /// The offending field, if the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotAnObject => None,
            Self::MissingField(name) | Self::InvalidNumber(name) | Self::InvalidCategory(name) => {
                Some(*name)
            }
        }
    }
}

/// One client observation, without the target label.
///
/// `None` marks a value that is present in the request but missing in
/// substance (`null` categories, `"nan"` numbers); the fitted imputers
/// replace it at inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub age: Option<f64>,
    pub job: Option<String>,
    pub marital: Option<String>,
    pub education: Option<String>,
    pub default: Option<String>,
    pub balance: Option<f64>,
    pub housing: Option<String>,
    pub loan: Option<String>,
    pub contact: Option<String>,
    pub day: Option<f64>,
    pub month: Option<String>,
    pub duration: Option<f64>,
    pub campaign: Option<f64>,
    pub pdays: Option<f64>,
    pub previous: Option<f64>,
    pub poutcome: Option<String>,
}

impl ClientRecord {
    /// Parse and validate a request body.
    ///
    /// Checks run in a fixed order: the body must be an object, then every
    /// required field must be present (first absent one is reported), then
    /// numeric fields are coerced, then categorical ones. Unknown keys are
    /// ignored.
    pub fn from_json(body: &Value) -> std::result::Result<Self, RecordError> {
        let object = body.as_object().ok_or(RecordError::NotAnObject)?;

        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|field| !object.contains_key(**field))
        {
            return Err(RecordError::MissingField(*missing));
        }

        let extra: Vec<&str> = object
            .keys()
            .map(String::as_str)
            .filter(|key| !REQUIRED_FIELDS.contains(key))
            .collect();
        if !extra.is_empty() {
            debug!("Ignoring unexpected request fields: {:?}", extra);
        }

        let mut numbers = [None; NUMERIC_FEATURES.len()];
        for (slot, name) in numbers.iter_mut().zip(NUMERIC_FEATURES) {
            *slot = coerce_number(field(object, name)).ok_or(RecordError::InvalidNumber(name))?;
        }
        let [age, balance, day, duration, campaign, pdays, previous] = numbers;

        let mut categories: [Option<String>; CATEGORICAL_FEATURES.len()] = Default::default();
        for (slot, name) in categories.iter_mut().zip(CATEGORICAL_FEATURES) {
            *slot =
                coerce_category(field(object, name)).ok_or(RecordError::InvalidCategory(name))?;
        }
        let [job, marital, education, default, housing, loan, contact, month, poutcome] =
            categories;

        Ok(Self {
            age,
            job,
            marital,
            education,
            default,
            balance,
            housing,
            loan,
            contact,
            day,
            month,
            duration,
            campaign,
            pdays,
            previous,
            poutcome,
        })
    }

    /// Value of a numeric field by name. `None` if `name` is not numeric.
    pub fn numeric(&self, name: &str) -> Option<Option<f64>> {
        let value = match name {
            "age" => self.age,
            "balance" => self.balance,
            "day" => self.day,
            "duration" => self.duration,
            "campaign" => self.campaign,
            "pdays" => self.pdays,
            "previous" => self.previous,
            _ => return None,
        };
        Some(value)
    }

    /// Value of a categorical field by name. `None` if `name` is not categorical.
    pub fn categorical(&self, name: &str) -> Option<Option<&str>> {
        let value = match name {
            "job" => &self.job,
            "marital" => &self.marital,
            "education" => &self.education,
            "default" => &self.default,
            "housing" => &self.housing,
            "loan" => &self.loan,
            "contact" => &self.contact,
            "month" => &self.month,
            "poutcome" => &self.poutcome,
            _ => return None,
        };
        Some(value.as_deref())
    }

    /// A one-row frame with the 16 fields in request order.
    ///
    /// Numeric columns are `Float64`, categorical columns `String`.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let columns = REQUIRED_FIELDS
            .iter()
            .map(|&name| {
                if is_numeric_feature(name) {
                    Column::new(name.into(), [self.numeric(name).flatten()])
                } else {
                    Column::new(name.into(), [self.categorical(name).flatten()])
                }
            })
            .collect::<Vec<_>>();
        Ok(DataFrame::new(columns)?)
    }
}

static NULL: Value = Value::Null;

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> &'a Value {
    object.get(name).unwrap_or(&NULL)
}

/// Coerce a JSON value to a float the way a lenient numeric parse would.
///
/// Returns `None` when the value is not numeric; `Some(None)` for NaN.
fn coerce_number(value: &Value) -> Option<Option<f64>> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if number.is_nan() {
        Some(None)
    } else if number.is_infinite() {
        None
    } else {
        Some(Some(number))
    }
}

/// Coerce a JSON value to a category label.
///
/// Returns `None` for arrays and objects; `Some(None)` for `null`.
fn coerce_category(value: &Value) -> Option<Option<String>> {
    match value {
        Value::String(s) => Some(Some(s.clone())),
        Value::Null => Some(None),
        Value::Number(n) => Some(Some(n.to_string())),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => None,
    }
}
