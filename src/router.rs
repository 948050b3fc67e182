use axum::{
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers::{companies, jobs, public};
use crate::is_development;
use crate::middleware::authenticate_jwt;
use crate::state::AppState;

/// The complete application: routes, auth resolution and global layers.
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Resources: reads are public, writes check AdminUser in the handler
        .merge(company_routes())
        .merge(job_routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authenticate_jwt))
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes))
        .with_state(state);

    let router = match cors_layer(&config) {
        Some(cors) => router.layer(cors),
        None => router,
    };

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:handle",
            get(companies::show)
                .patch(companies::update)
                .delete(companies::delete),
        )
}

fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/:id",
            get(jobs::show).patch(jobs::update).delete(jobs::delete),
        )
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }

    if is_development!(config) {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}
