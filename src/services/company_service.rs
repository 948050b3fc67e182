use sqlx::PgPool;
use tracing::{debug, info};

use super::{is_unique_violation, ServiceError};
use crate::database::models::{Company, CompanyDetail, CompanyUpdate, JobSummary, NewCompany};
use crate::database::query_builder::SqlResult;
use crate::database::sql::{sql_for_partial_update, SqlValue};
use crate::filter::CompanyFilter;

const COMPANY_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

pub struct CompanyService {
    pool: PgPool,
}

impl CompanyService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a company. Fails with BadRequest when the handle or name is taken.
    pub async fn create(&self, data: &NewCompany) -> Result<Company, ServiceError> {
        let duplicate: Option<(String,)> = sqlx::query_as("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.handle)
            .fetch_optional(&self.pool)
            .await?;

        if duplicate.is_some() {
            return Err(ServiceError::BadRequest(format!("Duplicate company: {}", data.handle)));
        }

        let sql = format!(
            "INSERT INTO companies ({COMPANY_COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COMPANY_COLUMNS}"
        );
        let company = sqlx::query_as::<_, Company>(&sql)
            .bind(&data.handle)
            .bind(&data.name)
            .bind(&data.description)
            .bind(data.num_employees)
            .bind(&data.logo_url)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::BadRequest(format!("Duplicate company: {}", data.handle))
                } else {
                    e.into()
                }
            })?;

        info!("Created company {}", company.handle);
        Ok(company)
    }

    /// All companies matching `filter`, ordered by name.
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, ServiceError> {
        filter.validate()?;

        let where_clause = filter.to_where();
        let query = SqlResult::new(
            format!(
                "SELECT {COMPANY_COLUMNS} FROM companies{} ORDER BY name",
                where_clause.to_sql()
            ),
            where_clause.params,
        );

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// A company with its jobs. Fails with NotFound when the handle is unknown.
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, ServiceError> {
        let company = sqlx::query_as::<_, Company>(&format!(
            "SELECT {COMPANY_COLUMNS} FROM companies WHERE handle = $1"
        ))
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, JobSummary>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(&self.pool)
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Partial update. Only supplied fields change; the handle never does.
    pub async fn update(&self, handle: &str, data: &CompanyUpdate) -> Result<Company, ServiceError> {
        let update = sql_for_partial_update(data.changes())?;
        let handle_idx = update.next_placeholder();

        let sql = format!(
            "UPDATE companies SET {} WHERE handle = {} RETURNING {COMPANY_COLUMNS}",
            update.set_cols, handle_idx
        );
        debug!(sql = %sql, "company update");

        let mut params = update.values;
        params.push(SqlValue::from(handle));

        SqlResult::new(sql, params)
            .fetch_optional::<Company>(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::BadRequest("Duplicate company name".to_string())
                } else {
                    e.into()
                }
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("No company: {}", handle)))
    }

    /// Delete a company and, through the foreign key, its jobs.
    pub async fn remove(&self, handle: &str) -> Result<(), ServiceError> {
        let deleted = SqlResult::new("DELETE FROM companies WHERE handle = $1", vec![SqlValue::from(handle)])
            .execute(&self.pool)
            .await?;

        if deleted == 0 {
            return Err(ServiceError::NotFound(format!("No company: {}", handle)));
        }

        info!("Deleted company {}", handle);
        Ok(())
    }
}
