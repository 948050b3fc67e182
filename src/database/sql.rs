//! Partial-update SQL generation.
//!
//! Each entity declares its updatable fields as an enum implementing
//! [`UpdateField`]; that enum is the field-to-column table. The builder only
//! positions values for parameterized execution, it never writes them into
//! SQL text.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SqlError {
    #[error("No data")]
    NoData,
}

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SqlValue {
    Text(Option<String>),
    Int(Option<i32>),
    Numeric(Option<Decimal>),
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(Some(v.to_string()))
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(Some(v))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(v: Option<String>) -> Self {
        SqlValue::Text(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(Some(v))
    }
}

impl From<Option<i32>> for SqlValue {
    fn from(v: Option<i32>) -> Self {
        SqlValue::Int(v)
    }
}

impl From<Decimal> for SqlValue {
    fn from(v: Decimal) -> Self {
        SqlValue::Numeric(Some(v))
    }
}

impl From<Option<Decimal>> for SqlValue {
    fn from(v: Option<Decimal>) -> Self {
        SqlValue::Numeric(v)
    }
}

/// A field that may appear in a partial update.
pub trait UpdateField: Copy {
    /// Name as it appears in request bodies.
    fn name(self) -> &'static str;

    /// Storage column. Defaults to the field name when no translation exists.
    fn column(self) -> &'static str {
        self.name()
    }
}

/// Output of [`sql_for_partial_update`].
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    /// `"col"=$1, "other"=$2`
    pub set_cols: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Placeholder for the first parameter after the SET values, used for the row key.
    pub fn next_placeholder(&self) -> String {
        format!("${}", self.values.len() + 1)
    }
}

/// Build the SET clause for a partial update.
///
/// Fragments and values follow the iteration order of `data`, with
/// placeholders numbered from 1. An empty update is rejected with
/// [`SqlError::NoData`] so callers never issue an `UPDATE` without columns.
pub fn sql_for_partial_update<F, I>(data: I) -> Result<PartialUpdate, SqlError>
where
    F: UpdateField,
    I: IntoIterator<Item = (F, SqlValue)>,
{
    let mut cols = Vec::new();
    let mut values = Vec::new();

    for (idx, (field, value)) in data.into_iter().enumerate() {
        cols.push(format!("\"{}\"=${}", field.column(), idx + 1));
        values.push(value);
    }

    if cols.is_empty() {
        return Err(SqlError::NoData);
    }

    Ok(PartialUpdate {
        set_cols: cols.join(", "),
        values,
    })
}
