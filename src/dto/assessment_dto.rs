use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use utoipa::ToSchema;
use validator::Validate;

/// One group of topics producing one generated segment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Keywords associated with the questions
    #[validate(length(min = 1, message = "keywords must contain at least one keyword"))]
    pub keywords: Vec<String>,
    /// Tools and technologies involved in the questions
    #[serde(default)]
    pub tools: Vec<String>,
    /// Difficulty level of the questions
    #[validate(length(min = 1, message = "level must not be empty"))]
    pub level: String,
    /// Number of questions for the level
    #[serde(deserialize_with = "integer_convertible")]
    #[validate(range(min = 1, message = "noOfQuestions must be at least 1"))]
    pub no_of_questions: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssessmentRequest {
    /// Role of the person for whom questions are created
    #[validate(length(min = 1, message = "role must not be empty"))]
    pub role: String,
    /// List of cards with keywords, tools, level, and question count
    #[validate(length(min = 1, message = "cards must contain at least one card"), nested)]
    pub cards: Vec<Card>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AssessmentResponse {
    pub assessment: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

// Clients send the count as a JSON integer, a whole-valued float or a
// numeric string.
fn integer_convertible<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = JsonValue::deserialize(deserializer)?;
    let count = match &raw {
        JsonValue::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        JsonValue::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    count.ok_or_else(|| {
        serde::de::Error::custom(format!("noOfQuestions '{}' is not an integer", raw))
    })
}
