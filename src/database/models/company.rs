use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::job::JobSummary;
use super::{double_option, non_null};
use crate::database::sql::{SqlValue, UpdateField};
use crate::validation::validate_handle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

/// A company with its jobs attached, as returned by `GET /companies/:handle`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<JobSummary>,
}

/// Body of `POST /companies`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    #[validate(
        length(min = 1, max = 25, message = "must be between 1 and 25 characters"),
        custom = "validate_handle"
    )]
    pub handle: String,
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: String,
    pub description: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub num_employees: Option<i32>,
    #[serde(default)]
    #[validate(url(message = "must be an absolute URL"))]
    pub logo_url: Option<String>,
}

/// Body of `PATCH /companies/:handle`. The handle itself is not updatable,
/// and `null` is only accepted for the nullable columns.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyUpdate {
    #[serde(default, deserialize_with = "non_null")]
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "non_null")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(range(min = 0, message = "must not be negative"))]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(url(message = "must be an absolute URL"))]
    pub logo_url: Option<Option<String>>,
}

impl CompanyUpdate {
    /// Supplied fields in declaration order.
    pub fn changes(&self) -> Vec<(CompanyField, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(name) = &self.name {
            changes.push((CompanyField::Name, SqlValue::from(name.clone())));
        }
        if let Some(description) = &self.description {
            changes.push((CompanyField::Description, SqlValue::from(description.clone())));
        }
        if let Some(num_employees) = self.num_employees {
            changes.push((CompanyField::NumEmployees, SqlValue::from(num_employees)));
        }
        if let Some(logo_url) = &self.logo_url {
            changes.push((CompanyField::LogoUrl, SqlValue::from(logo_url.clone())));
        }
        changes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanyField {
    Name,
    Description,
    NumEmployees,
    LogoUrl,
}

impl UpdateField for CompanyField {
    fn name(self) -> &'static str {
        match self {
            CompanyField::Name => "name",
            CompanyField::Description => "description",
            CompanyField::NumEmployees => "numEmployees",
            CompanyField::LogoUrl => "logoUrl",
        }
    }

    fn column(self) -> &'static str {
        match self {
            CompanyField::NumEmployees => "num_employees",
            CompanyField::LogoUrl => "logo_url",
            other => other.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::sql::sql_for_partial_update;
    use serde_json::json;

    #[test]
    fn update_translates_camel_case_fields() {
        let update: CompanyUpdate = serde_json::from_value(json!({
            "logoUrl": "http://c1.img",
            "numEmployees": 12,
            "name": "C1 New"
        }))
        .unwrap();
        let sql = sql_for_partial_update(update.changes()).unwrap();

        assert_eq!(sql.set_cols, r#""name"=$1, "num_employees"=$2, "logo_url"=$3"#);
        assert_eq!(
            sql.values,
            vec![
                SqlValue::from("C1 New"),
                SqlValue::from(12),
                SqlValue::from("http://c1.img")
            ]
        );
    }

    #[test]
    fn explicit_null_clears_nullable_field() {
        let update: CompanyUpdate = serde_json::from_value(json!({ "numEmployees": null })).unwrap();
        assert_eq!(update.num_employees, Some(None));
        assert_eq!(update.changes(), vec![(CompanyField::NumEmployees, SqlValue::Int(None))]);
    }

    #[test]
    fn handle_is_not_updatable() {
        let result: Result<CompanyUpdate, _> = serde_json::from_value(json!({ "handle": "new" }));
        assert!(result.is_err());
    }

    #[test]
    fn new_company_rules() {
        let company: NewCompany = serde_json::from_value(json!({
            "handle": "Bad Handle",
            "name": "",
            "description": "d",
            "numEmployees": -1
        }))
        .unwrap();
        let errors = crate::validation::field_errors(&company.validate().unwrap_err());

        assert!(errors.contains_key("handle"));
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("numEmployees"));
    }

    #[test]
    fn lowercase_handle_with_digits_is_valid() {
        let company: NewCompany = serde_json::from_value(json!({
            "handle": "acme-2",
            "name": "Acme",
            "description": "d",
            "logoUrl": "http://acme.example.com/logo.png"
        }))
        .unwrap();
        assert!(company.validate().is_ok());
    }

    #[test]
    fn null_is_refused_for_required_columns() {
        let result: Result<CompanyUpdate, _> =
            serde_json::from_value(json!({ "name": null, "description": "x" }));
        assert!(result.is_err());

        let result: Result<CompanyUpdate, _> = serde_json::from_value(json!({ "description": null }));
        assert!(result.is_err());
    }

    #[test]
    fn update_checks_supplied_values_only() {
        let update: CompanyUpdate =
            serde_json::from_value(json!({ "numEmployees": -1, "logoUrl": null })).unwrap();
        let errors = crate::validation::field_errors(&update.validate().unwrap_err());

        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("numEmployees"));
    }

    #[test]
    fn detail_nests_jobs() {
        let detail = CompanyDetail {
            company: Company {
                handle: "c1".into(),
                name: "C1".into(),
                description: "Desc1".into(),
                num_employees: Some(1),
                logo_url: None,
            },
            jobs: vec![],
        };
        let value = serde_json::to_value(&detail).unwrap();

        assert_eq!(value["handle"], "c1");
        assert_eq!(value["numEmployees"], 1);
        assert_eq!(value["jobs"], json!([]));
    }
}
