use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

pub const GREETING: &str = "Hello From Assessment Creator Back-End";

/// Liveness greeting under the versioned prefix.
#[utoipa::path(
    get,
    path = "/api/v2/",
    tag = "Assessment_creator",
    responses(
        (status = 200, description = "The API is up and running", body = String, content_type = "text/plain")
    )
)]
pub async fn hello() -> &'static str {
    tracing::info!("Hello endpoint called.");
    GREETING
}

/// Operational probe outside the versioned prefix.
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
