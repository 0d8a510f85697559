use crate::dto::assessment_dto::AssessmentRequest;
use crate::error::{Error, Result};
use crate::models::level::LevelVocabulary;
use serde_json::Value as JsonValue;
use validator::Validate;

pub const NO_DATA_MESSAGE: &str = "No data provided or invalid JSON format";

const REQUIRED_KEYS: [&str; 2] = ["role", "cards"];
const REQUIRED_CARD_KEYS: [&str; 3] = ["keywords", "level", "noOfQuestions"];

pub fn validate<T: Validate>(val: &T) -> Result<()> {
    val.validate()?;
    Ok(())
}

/// Turns a decoded request body into a fully checked [`AssessmentRequest`].
///
/// `None` stands for a body that was absent or not valid JSON. Every card is
/// checked here, so a bad card rejects the request before any model call.
pub fn validate_assessment_request(
    payload: Option<JsonValue>,
    vocabulary: LevelVocabulary,
) -> Result<AssessmentRequest> {
    let body = match payload {
        Some(JsonValue::Object(map)) if !map.is_empty() => map,
        _ => return Err(Error::BadRequest(NO_DATA_MESSAGE.to_string())),
    };

    for key in REQUIRED_KEYS {
        if !body.contains_key(key) {
            return Err(Error::MissingKey(key.to_string()));
        }
    }
    if let Some(JsonValue::Array(cards)) = body.get("cards") {
        for card in cards.iter().filter_map(JsonValue::as_object) {
            if let Some(key) = REQUIRED_CARD_KEYS.iter().find(|k| !card.contains_key(**k)) {
                return Err(Error::MissingKey(key.to_string()));
            }
        }
    }

    let request: AssessmentRequest = serde_path_to_error::deserialize(JsonValue::Object(body))
        .map_err(|e| Error::Validation(format!("Invalid input data: {}", e)))?;
    validate(&request)?;

    if request.role.trim().is_empty() {
        return Err(Error::Validation("role must not be empty".to_string()));
    }
    for (idx, card) in request.cards.iter().enumerate() {
        if !vocabulary.contains(&card.level) {
            return Err(Error::Validation(format!(
                "Invalid level '{}' in card {}: level must be {}",
                card.level,
                idx,
                vocabulary.describe()
            )));
        }
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn card(level: &str, count: JsonValue) -> JsonValue {
        json!({
            "keywords": ["REST", "HTTP"],
            "tools": ["Postman"],
            "level": level,
            "noOfQuestions": count,
        })
    }

    fn request(cards: Vec<JsonValue>) -> Option<JsonValue> {
        Some(json!({ "role": "Backend Engineer", "cards": cards }))
    }

    #[test]
    fn accepts_well_formed_request() {
        let req = validate_assessment_request(
            request(vec![card("medium", json!(2)), card("Complex", json!("4"))]),
            LevelVocabulary::EasyMediumComplex,
        )
        .unwrap();
        assert_eq!(req.role, "Backend Engineer");
        assert_eq!(req.cards.len(), 2);
        assert_eq!(req.cards[1].no_of_questions, 4);
    }

    #[test]
    fn empty_or_unparseable_body_is_generic_bad_request() {
        for payload in [None, Some(json!({})), Some(json!(null)), Some(json!([1, 2]))] {
            let err = validate_assessment_request(payload, LevelVocabulary::default()).unwrap_err();
            assert!(matches!(&err, Error::BadRequest(m) if m == NO_DATA_MESSAGE));
        }
    }

    #[test]
    fn reports_missing_top_level_keys() {
        let err = validate_assessment_request(
            Some(json!({ "cards": [card("easy", json!(1))] })),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(&err, Error::MissingKey(k) if k == "role"));

        let err = validate_assessment_request(
            Some(json!({ "role": "QA" })),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(&err, Error::MissingKey(k) if k == "cards"));
    }

    #[test]
    fn reports_missing_card_keys() {
        let err = validate_assessment_request(
            request(vec![json!({ "keywords": ["SQL"], "level": "easy" })]),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(&err, Error::MissingKey(k) if k == "noOfQuestions"));
    }

    #[test]
    fn rejects_empty_cards_and_role() {
        let err = validate_assessment_request(request(vec![]), LevelVocabulary::default())
            .unwrap_err();
        assert!(matches!(&err, Error::Validation(m) if m.contains("cards")));

        let err = validate_assessment_request(
            Some(json!({ "role": "   ", "cards": [card("easy", json!(1))] })),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(&err, Error::Validation(m) if m.contains("role")));
    }

    #[test]
    fn rejects_non_positive_counts() {
        for count in [json!(0), json!(-3), json!("0")] {
            let err = validate_assessment_request(
                request(vec![card("easy", count)]),
                LevelVocabulary::default(),
            )
            .unwrap_err();
            assert!(matches!(&err, Error::Validation(m) if m.contains("noOfQuestions")));
        }
    }

    #[test]
    fn rejects_empty_keywords() {
        let err = validate_assessment_request(
            request(vec![json!({
                "keywords": [],
                "tools": [],
                "level": "easy",
                "noOfQuestions": 1,
            })]),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(&err, Error::Validation(m) if m.contains("keywords")));
    }

    #[test]
    fn type_errors_name_the_field_path() {
        let err = validate_assessment_request(
            Some(json!({
                "role": "QA",
                "cards": [{ "keywords": ["a"], "level": "easy", "noOfQuestions": 1, "tools": null }]
            })),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(
            matches!(&err, Error::Validation(m) if m.contains("cards[0].tools")),
            "unexpected error: {:?}",
            err
        );

        let err = validate_assessment_request(
            Some(json!({ "role": "QA", "cards": {} })),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(
            matches!(&err, Error::Validation(m) if m.contains("cards")),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn count_conversion_follows_integer_semantics() {
        let req = validate_assessment_request(
            request(vec![card("easy", json!(1)), card("medium", json!(2.0))]),
            LevelVocabulary::default(),
        )
        .unwrap();
        assert_eq!(req.cards[1].no_of_questions, 2);

        let err = validate_assessment_request(
            request(vec![card("easy", json!(1)), card("medium", json!(true))]),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(
            matches!(&err, Error::Validation(m) if m.contains("cards[1].noOfQuestions")),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn rule_violations_use_wire_field_names() {
        let err = validate_assessment_request(
            request(vec![card("easy", json!(1)), card("medium", json!(0))]),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(
            matches!(&err, Error::Validation(m) if m.contains("cards[1].noOfQuestions")
                && !m.contains("no_of_questions")),
            "unexpected error: {:?}",
            err
        );
    }

    #[test]
    fn level_check_follows_configured_vocabulary() {
        for level in ["LOW", "low", "Low"] {
            assert!(validate_assessment_request(
                request(vec![card(level, json!(1))]),
                LevelVocabulary::LowMediumHigh,
            )
            .is_ok());

            let err = validate_assessment_request(
                request(vec![card(level, json!(1))]),
                LevelVocabulary::EasyMediumComplex,
            )
            .unwrap_err();
            assert!(matches!(&err, Error::Validation(m) if m.contains("Invalid level")));
        }
    }

    #[test]
    fn one_bad_card_rejects_whole_request() {
        let err = validate_assessment_request(
            request(vec![card("easy", json!(1)), card("extreme", json!(2))]),
            LevelVocabulary::default(),
        )
        .unwrap_err();
        assert!(matches!(&err, Error::Validation(m) if m.contains("'extreme' in card 1")));
    }
}
