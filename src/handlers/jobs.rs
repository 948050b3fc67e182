// handlers/jobs.rs - /jobs handlers

use axum::extract::{Path, Query, State};

use crate::database::models::{Job, JobUpdate, NewJob};
use crate::error::ApiError;
use crate::filter::JobFilter;
use crate::middleware::{AdminUser, ApiResponse, ApiResult, ValidatedJson};
use crate::services::JobService;
use crate::state::AppState;

/// Job ids arrive as path text; anything but an integer is a 400, not a 404.
fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::bad_request(format!("Invalid job id: {}", raw)))
}

/// POST /jobs - admin only
///
/// Body: `{ title, salary?, equity?, companyHandle }`
/// Returns `201 { job }` with the generated id.
pub async fn create(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(data): ValidatedJson<NewJob>,
) -> ApiResult<Job> {
    let job = JobService::new(state.pool).create(&data).await?;
    Ok(ApiResponse::created("job", job))
}

/// GET /jobs - optional `title`, `minSalary`, `hasEquity`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Job>> {
    let filter = JobFilter::from_params(&params)?;
    let jobs = JobService::new(state.pool).find_all(&filter).await?;
    Ok(ApiResponse::success("jobs", jobs))
}

pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Job> {
    let job = JobService::new(state.pool).get(parse_id(&id)?).await?;
    Ok(ApiResponse::success("job", job))
}

/// PATCH /jobs/:id - admin only; `title`, `salary`, `equity`
pub async fn update(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
    ValidatedJson(data): ValidatedJson<JobUpdate>,
) -> ApiResult<Job> {
    let job = JobService::new(state.pool).update(parse_id(&id)?, &data).await?;
    Ok(ApiResponse::success("job", job))
}

/// DELETE /jobs/:id - admin only
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<String>,
) -> ApiResult<i32> {
    let id = parse_id(&id)?;
    JobService::new(state.pool).remove(id).await?;
    Ok(ApiResponse::success("deleted", id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_ids_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("abc").unwrap_err().status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert!(parse_id("1.5").is_err());
    }
}
