use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_jwt, Principal};
use crate::state::AppState;

/// Principal resolved for the current request, if any.
#[derive(Clone, Debug, Default)]
pub struct CurrentUser(pub Option<Principal>);

/// Resolve the bearer token into a principal.
///
/// Never rejects: a missing or bad token leaves the request anonymous and the
/// route guards decide whether that is acceptable.
pub async fn authenticate_jwt(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let principal = match extract_bearer_token(request.headers()) {
        Some(token) => match verify_jwt(token, &state.config.security.jwt_secret) {
            Ok(claims) => {
                tracing::debug!("Authenticated {} (admin: {})", claims.username, claims.is_admin);
                Some(Principal::from(claims))
            }
            Err(e) => {
                tracing::debug!("Ignoring bearer token: {}", e);
                None
            }
        },
        None => None,
    };

    request.extensions_mut().insert(CurrentUser(principal));
    next.run(request).await
}

/// Extract JWT token from Authorization header
fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let auth_str = headers.get(AUTHORIZATION)?.to_str().ok()?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .or_else(|| auth_str.strip_prefix("bearer "))?
        .trim();

    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}
