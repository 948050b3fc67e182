pub mod company_service;
pub mod job_service;

pub use company_service::CompanyService;
pub use job_service::JobService;

use crate::database::sql::SqlError;
use crate::filter::FilterError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Sql(#[from] SqlError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// SQLSTATE of a database-side error, if the error came from Postgres.
fn sql_state(err: &sqlx::Error) -> Option<String> {
    err.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code.into_owned())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    sql_state(err).as_deref() == Some(UNIQUE_VIOLATION)
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    sql_state(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}
