use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value as JsonValue;

use crate::{
    dto::assessment_dto::{AssessmentRequest, AssessmentResponse, ErrorResponse},
    error::Result,
    utils::validation::validate_assessment_request,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/v2/generate_assessment",
    tag = "Assessment_creator",
    request_body = AssessmentRequest,
    responses(
        (status = 200, description = "Assessment generated", body = AssessmentResponse),
        (status = 400, description = "Missing or invalid input data", body = ErrorResponse),
        (status = 500, description = "Generation failed or unexpected error", body = ErrorResponse)
    )
)]
#[axum::debug_handler]
pub async fn generate_assessment(
    State(state): State<AppState>,
    payload: std::result::Result<Json<JsonValue>, JsonRejection>,
) -> Result<impl IntoResponse> {
    tracing::info!("GenerateAssessment endpoint called.");

    let payload = match payload {
        Ok(Json(value)) => Some(value),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Request body rejected");
            None
        }
    };
    tracing::debug!(?payload, "Received assessment data");

    let request =
        validate_assessment_request(payload, state.assessment_service.vocabulary()).map_err(|e| {
            tracing::warn!("Invalid assessment request: {}", e);
            e
        })?;

    let assessment = state
        .assessment_service
        .generate_assessment(&request)
        .await?;
    tracing::info!(cards = request.cards.len(), "Assessment generated successfully.");

    Ok((StatusCode::OK, Json(AssessmentResponse { assessment })))
}
