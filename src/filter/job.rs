use super::error::FilterError;
use super::filter_where::{collect_known, parse_bool, parse_non_negative, parse_text, FilterWhere, WhereClause};

const TITLE: &str = "title";
const MIN_SALARY: &str = "minSalary";
const HAS_EQUITY: &str = "hasEquity";

/// Search filters accepted by `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobFilter {
    pub title: Option<String>,
    pub min_salary: Option<i32>,
    /// Only `Some(true)` narrows the listing.
    pub has_equity: Option<bool>,
}

impl JobFilter {
    pub const KEYS: [&'static str; 3] = [TITLE, MIN_SALARY, HAS_EQUITY];

    pub fn from_params(params: &[(String, String)]) -> Result<Self, FilterError> {
        let found = collect_known(params, &Self::KEYS)?;

        Ok(Self {
            title: found.get(TITLE).map(|v| parse_text(TITLE, v)).transpose()?,
            min_salary: found
                .get(MIN_SALARY)
                .map(|v| parse_non_negative(MIN_SALARY, v))
                .transpose()?,
            has_equity: found.get(HAS_EQUITY).map(|v| parse_bool(HAS_EQUITY, v)).transpose()?,
        })
    }

    pub fn to_where(&self) -> WhereClause {
        let mut w = FilterWhere::new();
        if let Some(title) = &self.title {
            w.ilike_contains("title", title);
        }
        if let Some(min) = self.min_salary {
            w.gte("salary", min);
        }
        if self.has_equity == Some(true) {
            w.positive("equity");
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
    fn title_and_min_salary() {
        let clause = JobFilter::from_params(&params(&[("title", "j"), ("minSalary", "20")]))
            .unwrap()
            .to_where();

        assert_eq!(clause.conditions, r#""title" ILIKE $1 AND "salary" >= $2"#);
        assert_eq!(clause.params, vec![SqlValue::from("%j%"), SqlValue::from(20)]);
    }

    #[test]
    fn has_equity_adds_fixed_predicate() {
        let clause = JobFilter::from_params(&params(&[("hasEquity", "true"), ("minSalary", "20")]))
            .unwrap()
            .to_where();

        assert_eq!(clause.conditions, r#""salary" >= $1 AND "equity" > 0"#);
        assert_eq!(clause.params, vec![SqlValue::from(20)]);
    }

    #[test]
    fn has_equity_false_does_not_filter() {
        let clause = JobFilter::from_params(&params(&[("hasEquity", "false")])).unwrap().to_where();
        assert!(clause.is_empty());
    }

    #[test]
    fn rejects_bad_values_and_keys() {
        assert!(JobFilter::from_params(&params(&[("minSalary", "lots")])).is_err());
        assert!(JobFilter::from_params(&params(&[("hasEquity", "1")])).is_err());
        assert_eq!(
            JobFilter::from_params(&params(&[("companyHandle", "c1")])),
            Err(FilterError::UnknownKey("companyHandle".into()))
        );
    }
}
