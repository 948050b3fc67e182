use sqlx::PgPool;
use tracing::info;

use super::{is_foreign_key_violation, is_unique_violation, ServiceError};
use crate::database::models::{Job, JobUpdate, NewJob};
use crate::database::query_builder::SqlResult;
use crate::database::sql::{sql_for_partial_update, SqlValue};
use crate::filter::JobFilter;

const JOB_COLUMNS: &str = "id, title, salary, equity, company_handle";

pub struct JobService {
    pool: PgPool,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a job for an existing company. Titles are unique across all jobs.
    pub async fn create(&self, data: &NewJob) -> Result<Job, ServiceError> {
        let duplicate: Option<(i32,)> = sqlx::query_as("SELECT id FROM jobs WHERE title = $1")
            .bind(&data.title)
            .fetch_optional(&self.pool)
            .await?;

        if duplicate.is_some() {
            return Err(ServiceError::BadRequest(format!("Duplicate job: {}", data.title)));
        }

        let company: Option<(String,)> = sqlx::query_as("SELECT handle FROM companies WHERE handle = $1")
            .bind(&data.company_handle)
            .fetch_optional(&self.pool)
            .await?;

        if company.is_none() {
            return Err(ServiceError::BadRequest(format!("No company: {}", data.company_handle)));
        }

        let job = sqlx::query_as::<_, Job>(&format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) VALUES ($1, $2, $3, $4) RETURNING {JOB_COLUMNS}"
        ))
        .bind(&data.title)
        .bind(data.salary)
        .bind(data.equity)
        .bind(&data.company_handle)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ServiceError::BadRequest(format!("Duplicate job: {}", data.title))
            } else if is_foreign_key_violation(&e) {
                ServiceError::BadRequest(format!("No company: {}", data.company_handle))
            } else {
                e.into()
            }
        })?;

        info!("Created job {} for {}", job.id, job.company_handle);
        Ok(job)
    }

    /// All jobs matching `filter`, ordered by id.
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<Job>, ServiceError> {
        let where_clause = filter.to_where();
        let query = SqlResult::new(
            format!("SELECT {JOB_COLUMNS} FROM jobs{} ORDER BY id", where_clause.to_sql()),
            where_clause.params,
        );

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn get(&self, id: i32) -> Result<Job, ServiceError> {
        sqlx::query_as::<_, Job>(&format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("No job: {}", id)))
    }

    /// Partial update of title, salary and equity.
    pub async fn update(&self, id: i32, data: &JobUpdate) -> Result<Job, ServiceError> {
        let update = sql_for_partial_update(data.changes())?;
        let sql = format!(
            "UPDATE jobs SET {} WHERE id = {} RETURNING {JOB_COLUMNS}",
            update.set_cols,
            update.next_placeholder()
        );

        let mut params = update.values;
        params.push(SqlValue::from(id));

        SqlResult::new(sql, params)
            .fetch_optional::<Job>(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ServiceError::BadRequest("Duplicate job title".to_string())
                } else {
                    e.into()
                }
            })?
            .ok_or_else(|| ServiceError::NotFound(format!("No job: {}", id)))
    }

    pub async fn remove(&self, id: i32) -> Result<(), ServiceError> {
        let deleted = SqlResult::new("DELETE FROM jobs WHERE id = $1", vec![SqlValue::from(id)])
            .execute(&self.pool)
            .await?;

        if deleted == 0 {
            return Err(ServiceError::NotFound(format!("No job: {}", id)));
        }

        info!("Deleted job {}", id);
        Ok(())
    }
}
