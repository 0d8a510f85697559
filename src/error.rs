use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

/// Message returned to callers when the upstream model call fails. The cause
/// is logged but never echoed back.
pub const GENERATION_FAILURE_MESSAGE: &str = "Error in getting response from Gemini api";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Missing key in input data: '{0}'")]
    MissingKey(String),

    #[error("{0}")]
    Validation(String),

    #[error("{}", GENERATION_FAILURE_MESSAGE)]
    Generation(#[source] anyhow::Error),

    #[error("{0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut lines = Vec::new();
        collect_violations("", &errors, &mut lines);
        lines.sort();
        Error::Validation(lines.join("\n"))
    }
}

// Flattens nested validator errors into `cards[1].noOfQuestions: <message>`
// lines keyed by the JSON field names clients send.
fn collect_violations(prefix: &str, errors: &validator::ValidationErrors, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            camel_case(field)
        } else {
            format!("{}.{}", prefix, camel_case(field))
        };
        match kind {
            ValidationErrorsKind::Field(violations) => {
                out.extend(violations.iter().map(|v| format!("{}: {}", path, v)));
            }
            ValidationErrorsKind::Struct(inner) => collect_violations(&path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_violations(&format!("{}[{}]", path, idx), inner, out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) | Error::MissingKey(_) | Error::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_message = match &self {
            Error::BadRequest(_) | Error::MissingKey(_) | Error::Validation(_) => self.to_string(),
            Error::Generation(cause) => {
                tracing::error!(error = ?cause, "Generation request failed");
                format!("An error occurred: {}", self)
            }
            Error::Config(msg) => {
                tracing::error!("Configuration error surfaced to a request: {}", msg);
                "An unexpected error occurred".to_string()
            }
            Error::Internal(msg) => {
                tracing::error!("Unexpected failure: {}", msg);
                format!("An error occurred: {}", msg)
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        assert_eq!(
            Error::MissingKey("role".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Validation("bad level".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::MissingKey("cards".into()).to_string(),
            "Missing key in input data: 'cards'"
        );
    }

    #[test]
    fn validation_errors_use_camel_case_paths() {
        use crate::dto::assessment_dto::{AssessmentRequest, Card};
        use validator::Validate;

        let req = AssessmentRequest {
            role: "QA".into(),
            cards: vec![
                Card {
                    keywords: vec!["SQL".into()],
                    tools: vec![],
                    level: "easy".into(),
                    no_of_questions: 1,
                },
                Card {
                    keywords: vec!["SQL".into()],
                    tools: vec![],
                    level: "easy".into(),
                    no_of_questions: 0,
                },
            ],
        };
        let err = Error::from(req.validate().unwrap_err());
        assert_eq!(
            err.to_string(),
            "cards[1].noOfQuestions: noOfQuestions must be at least 1"
        );
    }

    #[test]
    fn generation_error_hides_cause() {
        let err = Error::Generation(anyhow::anyhow!("connection reset by 10.0.0.7"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), GENERATION_FAILURE_MESSAGE);
    }
}
