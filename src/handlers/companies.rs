// handlers/companies.rs - /companies handlers

use axum::extract::{Path, Query, State};

use crate::database::models::{Company, CompanyDetail, CompanyUpdate, NewCompany};
use crate::filter::CompanyFilter;
use crate::middleware::{AdminUser, ApiResponse, ApiResult, ValidatedJson};
use crate::services::CompanyService;
use crate::state::AppState;

/// POST /companies - admin only
///
/// Body: `{ handle, name, description, numEmployees?, logoUrl? }`
/// Returns `201 { company }`.
pub async fn create(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    ValidatedJson(data): ValidatedJson<NewCompany>,
) -> ApiResult<Company> {
    let company = CompanyService::new(state.pool).create(&data).await?;
    Ok(ApiResponse::created("company", company))
}

/// GET /companies - optional `name`, `minEmployees`, `maxEmployees`
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Vec<Company>> {
    let filter = CompanyFilter::from_params(&params)?;
    let companies = CompanyService::new(state.pool).find_all(&filter).await?;
    Ok(ApiResponse::success("companies", companies))
}

/// GET /companies/:handle - company with its jobs
pub async fn show(State(state): State<AppState>, Path(handle): Path<String>) -> ApiResult<CompanyDetail> {
    let company = CompanyService::new(state.pool).get(&handle).await?;
    Ok(ApiResponse::success("company", company))
}

/// PATCH /companies/:handle - admin only
///
/// Body: any of `{ name, description, numEmployees, logoUrl }`. `null` clears
/// a nullable field.
pub async fn update(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(handle): Path<String>,
    ValidatedJson(data): ValidatedJson<CompanyUpdate>,
) -> ApiResult<Company> {
    let company = CompanyService::new(state.pool).update(&handle, &data).await?;
    Ok(ApiResponse::success("company", company))
}

/// DELETE /companies/:handle - admin only
pub async fn delete(
    State(state): State<AppState>,
    AdminUser(_admin): AdminUser,
    Path(handle): Path<String>,
) -> ApiResult<String> {
    CompanyService::new(state.pool).remove(&handle).await?;
    Ok(ApiResponse::success("deleted", handle))
}
