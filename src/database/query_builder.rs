use sqlx::postgres::{PgArguments, PgRow};
use sqlx::{FromRow, PgPool, Postgres};

use super::sql::SqlValue;

/// A statement and its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlValue>,
}

impl SqlResult {
    pub fn new(query: impl Into<String>, params: Vec<SqlValue>) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub async fn fetch_all<T>(&self, pool: &PgPool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.query, params = self.params.len(), "fetch_all");
        self.query_as::<T>().fetch_all(pool).await
    }

    pub async fn fetch_optional<T>(&self, pool: &PgPool) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %self.query, params = self.params.len(), "fetch_optional");
        self.query_as::<T>().fetch_optional(pool).await
    }

    /// Run the statement and return the number of affected rows.
    pub async fn execute(&self, pool: &PgPool) -> Result<u64, sqlx::Error> {
        tracing::debug!(sql = %self.query, params = self.params.len(), "execute");
        let mut q = sqlx::query(&self.query);
        for p in self.params.iter() {
            q = bind_param_query(q, p);
        }
        Ok(q.execute(pool).await?.rows_affected())
    }

    fn query_as<T>(&self) -> sqlx::query::QueryAs<'_, Postgres, T, PgArguments>
    where
        T: for<'r> FromRow<'r, PgRow>,
    {
        let mut q = sqlx::query_as::<_, T>(&self.query);
        for p in self.params.iter() {
            q = bind_param_query_as(q, p);
        }
        q
    }
}

pub fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, Postgres, PgArguments>,
    v: &SqlValue,
) -> sqlx::query::Query<'q, Postgres, PgArguments> {
    match v {
        SqlValue::Text(s) => q.bind(s.clone()),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Numeric(d) => q.bind(*d),
    }
}

pub fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, Postgres, O, PgArguments>,
    v: &SqlValue,
) -> sqlx::query::QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    match v {
        SqlValue::Text(s) => q.bind(s.clone()),
        SqlValue::Int(i) => q.bind(*i),
        SqlValue::Numeric(d) => q.bind(*d),
    }
}
