use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use validator::Validate;

use crate::error::ApiError;
use crate::validation::field_errors;

/// JSON body deserialized into `T` and checked against its field rules.
///
/// Every failure is a 400: malformed JSON, wrong shape or types, unknown
/// fields, and rule violations (reported per field).
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ApiError::invalid_json(e.body_text()))?;

        let data: T = serde_json::from_value(value).map_err(|e| ApiError::validation_error(e.to_string(), None))?;

        data.validate()
            .map_err(|errors| ApiError::validation_error("Invalid request body", Some(field_errors(&errors))))?;

        Ok(ValidatedJson(data))
    }
}
