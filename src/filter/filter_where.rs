use std::collections::HashMap;

use super::error::FilterError;
use crate::database::sql::SqlValue;

/// A WHERE clause and the values for its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    /// Predicates joined with AND, without the WHERE keyword. Empty when unfiltered.
    pub conditions: String,
    pub params: Vec<SqlValue>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// `" WHERE ..."` or nothing, ready to append after a FROM clause.
    pub fn to_sql(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.conditions)
        }
    }
}

/// Accumulates predicates, numbering placeholders as values are pushed.
pub struct FilterWhere {
    param_values: Vec<SqlValue>,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self {
            param_values: vec![],
            conditions: vec![],
        }
    }

    /// Case-insensitive substring match. LIKE wildcards in `text` match literally.
    pub fn ilike_contains(&mut self, column: &str, text: &str) -> &mut Self {
        let pattern = format!("%{}%", escape_like(text));
        let placeholder = self.param(SqlValue::from(pattern));
        self.conditions.push(format!("\"{}\" ILIKE {}", column, placeholder));
        self
    }

    pub fn gte(&mut self, column: &str, value: i32) -> &mut Self {
        let placeholder = self.param(SqlValue::from(value));
        self.conditions.push(format!("\"{}\" >= {}", column, placeholder));
        self
    }

    pub fn lte(&mut self, column: &str, value: i32) -> &mut Self {
        let placeholder = self.param(SqlValue::from(value));
        self.conditions.push(format!("\"{}\" <= {}", column, placeholder));
        self
    }

    /// `"column" > 0`, a fixed predicate with no parameter.
    pub fn positive(&mut self, column: &str) -> &mut Self {
        self.conditions.push(format!("\"{}\" > 0", column));
        self
    }

    pub fn build(&mut self) -> WhereClause {
        WhereClause {
            conditions: self.conditions.join(" AND "),
            params: std::mem::take(&mut self.param_values),
        }
    }

    fn param(&mut self, value: SqlValue) -> String {
        self.param_values.push(value);
        format!("${}", self.param_values.len())
    }
}

impl Default for FilterWhere {
    fn default() -> Self {
        Self::new()
    }
}

fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Index raw query pairs by key, rejecting keys outside `known` and repeats.
pub fn collect_known<'a>(
    params: &'a [(String, String)],
    known: &[&str],
) -> Result<HashMap<&'a str, &'a str>, FilterError> {
    let mut found = HashMap::new();
    for (key, value) in params {
        if !known.contains(&key.as_str()) {
            return Err(FilterError::UnknownKey(key.clone()));
        }
        if found.insert(key.as_str(), value.as_str()).is_some() {
            return Err(FilterError::DuplicateKey(key.clone()));
        }
    }
    Ok(found)
}

pub fn parse_text(key: &str, raw: &str) -> Result<String, FilterError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(FilterError::invalid(key, "must not be empty"));
    }
    Ok(text.to_string())
}

pub fn parse_non_negative(key: &str, raw: &str) -> Result<i32, FilterError> {
    match raw.trim().parse::<i32>() {
        Ok(n) if n >= 0 => Ok(n),
        Ok(_) => Err(FilterError::invalid(key, "must not be negative")),
        Err(_) => Err(FilterError::invalid(key, "must be an integer")),
    }
}

pub fn parse_bool(key: &str, raw: &str) -> Result<bool, FilterError> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(FilterError::invalid(key, "must be true or false")),
    }
}
