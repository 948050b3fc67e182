//! Field rules shared by request bodies, and the bridge from `validator`
//! errors to the API's `field_errors` map.

use rust_decimal::Decimal;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{ValidationError, ValidationErrors};

/// Field name to problem description.
pub type FieldErrors = BTreeMap<String, String>;

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Company handles: lowercase letters, digits and hyphens.
pub fn validate_handle(handle: &str) -> Result<(), ValidationError> {
    if handle.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') {
        Ok(())
    } else {
        Err(rule_error("handle", "may only contain lowercase letters, digits and hyphens"))
    }
}

/// Equity is a fraction in `[0, 1]`.
pub fn validate_fraction(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE {
        Err(rule_error("fraction", "must be between 0 and 1"))
    } else {
        Ok(())
    }
}

/// First failure per field, keyed by the camelCase name clients send.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, failures)| {
            let failure = failures.first()?;
            let message = failure
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| failure.code.to_string());
            Some((to_camel_case(field), message))
        })
        .collect()
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
