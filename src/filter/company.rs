use super::error::FilterError;
use super::filter_where::{collect_known, parse_non_negative, parse_text, FilterWhere, WhereClause};

const NAME: &str = "name";
const MIN_EMPLOYEES: &str = "minEmployees";
const MAX_EMPLOYEES: &str = "maxEmployees";

/// Search filters accepted by `GET /companies`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyFilter {
    pub name: Option<String>,
    pub min_employees: Option<i32>,
    pub max_employees: Option<i32>,
}

impl CompanyFilter {
    pub const KEYS: [&'static str; 3] = [NAME, MIN_EMPLOYEES, MAX_EMPLOYEES];

    pub fn from_params(params: &[(String, String)]) -> Result<Self, FilterError> {
        let found = collect_known(params, &Self::KEYS)?;

        let filter = Self {
            name: found.get(NAME).map(|v| parse_text(NAME, v)).transpose()?,
            min_employees: found
                .get(MIN_EMPLOYEES)
                .map(|v| parse_non_negative(MIN_EMPLOYEES, v))
                .transpose()?,
            max_employees: found
                .get(MAX_EMPLOYEES)
                .map(|v| parse_non_negative(MAX_EMPLOYEES, v))
                .transpose()?,
        };
        filter.validate()?;
        Ok(filter)
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(FilterError::InvertedRange {
                    min: MIN_EMPLOYEES,
                    max: MAX_EMPLOYEES,
                });
            }
        }
        Ok(())
    }

    pub fn to_where(&self) -> WhereClause {
        let mut w = FilterWhere::new();
        if let Some(name) = &self.name {
            w.ilike_contains("name", name);
        }
        if let Some(min) = self.min_employees {
            w.gte("num_employees", min);
        }
        if let Some(max) = self.max_employees {
            w.lte("num_employees", max);
        }
        w.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::sql::SqlValue;

    fn params(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn no_params_means_unfiltered() {
        let filter = CompanyFilter::from_params(&[]).unwrap();
        assert_eq!(filter, CompanyFilter::default());
        assert!(filter.to_where().is_empty());
    }

    #[test]
    fn builds_all_predicates() {
        let filter = CompanyFilter::from_params(&params(&[
            ("maxEmployees", "300"),
            ("name", "Net"),
            ("minEmployees", "2"),
        ]))
        .unwrap();
        let clause = filter.to_where();

        assert_eq!(
            clause.conditions,
            r#""name" ILIKE $1 AND "num_employees" >= $2 AND "num_employees" <= $3"#
        );
        assert_eq!(
            clause.params,
            vec![SqlValue::from("%Net%"), SqlValue::from(2), SqlValue::from(300)]
        );
    }

    #[test]
    fn inverted_range_fails() {
        let err = CompanyFilter::from_params(&params(&[("minEmployees", "10"), ("maxEmployees", "2")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "minEmployees cannot be greater than maxEmployees"
        );
    }

    #[test]
    fn equal_bounds_are_fine() {
        let filter = CompanyFilter::from_params(&params(&[("minEmployees", "5"), ("maxEmployees", "5")])).unwrap();
        assert_eq!(filter.min_employees, Some(5));
        assert_eq!(filter.max_employees, Some(5));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!(
            CompanyFilter::from_params(&params(&[("handle", "c1")])),
            Err(FilterError::UnknownKey("handle".into()))
        );
    }

    #[test]
    fn name_value_stays_out_of_sql() {
        let filter = CompanyFilter::from_params(&params(&[("name", "' OR 1=1 --")])).unwrap();
        let clause = filter.to_where();
        assert!(!clause.conditions.contains("OR 1=1"));
        assert_eq!(clause.params, vec![SqlValue::from("%' OR 1=1 --%")]);
    }
}
