use axum::Json;
use utoipa::OpenApi;

use crate::dto::assessment_dto::{AssessmentRequest, AssessmentResponse, Card, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Assessment Creator",
        version = "1.0",
        description = "Assessment Creator Back-end"
    ),
    paths(
        crate::routes::health::hello,
        crate::routes::assessment::generate_assessment,
    ),
    components(schemas(AssessmentRequest, Card, AssessmentResponse, ErrorResponse)),
    tags(
        (name = "Assessment_creator", description = "Main operations for creating assessments")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
