use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{double_option, non_null};
use crate::database::sql::{SqlValue, UpdateField};
use crate::validation::validate_fraction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    /// Serialized as a decimal string, e.g. `"0.1"`.
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// A job nested under its company; the handle is implied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobSummary {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub salary: Option<i32>,
    #[serde(default)]
    #[validate(custom = "validate_fraction")]
    pub equity: Option<Decimal>,
    #[validate(length(min = 1, max = 25, message = "must be between 1 and 25 characters"))]
    pub company_handle: String,
}

/// Body of `PATCH /jobs/:id`. Neither the id nor the company can change.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(custom = "validate_fraction")]
    pub equity: Option<Option<Decimal>>,
}

impl JobUpdate {
    /// Supplied fields in declaration order.
    pub fn changes(&self) -> Vec<(JobField, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push((JobField::Title, SqlValue::from(title.clone())));
        }
        if let Some(salary) = self.salary {
            changes.push((JobField::Salary, SqlValue::from(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push((JobField::Equity, SqlValue::from(equity)));
        }
        changes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobField {
    Title,
    Salary,
    Equity,
}

impl UpdateField for JobField {
    fn name(self) -> &'static str {
        match self {
            JobField::Title => "title",
            JobField::Salary => "salary",
            JobField::Equity => "equity",
        }
    }
}
