use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use std::collections::HashMap;

use super::auth::CurrentUser;
use crate::auth::Principal;
use crate::error::ApiError;

/// Any authenticated principal.
#[derive(Debug, Clone)]
pub struct LoggedIn(pub Principal);

/// An authenticated principal with the admin flag.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Principal);

/// An admin, or the user named by the `:username` path segment.
#[derive(Debug, Clone)]
pub struct SelfOrAdmin(pub Principal);

fn current_principal(parts: &Parts) -> Option<Principal> {
    parts
        .extensions
        .get::<CurrentUser>()
        .and_then(|CurrentUser(principal)| principal.clone())
}

#[async_trait]
impl<S> FromRequestParts<S> for LoggedIn
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_principal(parts)
            .map(LoggedIn)
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match current_principal(parts) {
            Some(principal) if principal.is_admin => Ok(AdminUser(principal)),
            Some(principal) => {
                tracing::warn!("Admin route refused for {}", principal.username);
                Err(ApiError::unauthorized("Unauthorized"))
            }
            None => Err(ApiError::unauthorized("Unauthorized")),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SelfOrAdmin
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = current_principal(parts).ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()))?;
        let target = params.get("username").map(String::as_str).unwrap_or_default();

        if principal.is_self_or_admin(target) {
            Ok(SelfOrAdmin(principal))
        } else {
            Err(ApiError::unauthorized("Unauthorized"))
        }
    }
}
