pub mod assessment;
pub mod docs;
pub mod health;

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{dto::assessment_dto::ErrorResponse, error::Error, AppState};

pub const API_PREFIX: &str = "/api/v2";

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(API_PREFIX, get(health::hello))
        .route(&format!("{}/", API_PREFIX), get(health::hello))
        .route(
            &format!("{}/generate_assessment", API_PREFIX),
            post(assessment::generate_assessment),
        )
        .route(
            &format!("{}/swagger.json", API_PREFIX),
            get(docs::openapi_json),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
        }),
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    Error::Internal(detail).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panics_become_server_errors() {
        let resp = handle_panic(Box::new("card list exhausted"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let resp = handle_panic(Box::new(42_u8));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
