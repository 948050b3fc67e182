// handlers/public.rs - GET / and GET /health

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::database::DatabaseManager;
use crate::state::AppState;

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Jobly API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "companies": "/companies[/:handle] (GET public, POST/PATCH/DELETE admin)",
            "jobs": "/jobs[/:id] (GET public, POST/PATCH/DELETE admin)",
            "health": "/health (public)",
        }
    }))
}

/// Reports 503 when the database cannot be reached.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(&state.pool).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}
