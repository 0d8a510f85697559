use crate::dto::assessment_dto::Card;
use crate::error::{Error, Result};
use crate::models::level::LevelVocabulary;

/// Renders the instruction for one card.
///
/// The output depends only on the inputs:
/// `I want {N} assessment questions of {level} complexity for {role} on {keywords}[ using {tools}].`
/// The tools clause is left out when the card lists no tools.
pub fn build_prompt(role: &str, card: &Card, vocabulary: LevelVocabulary) -> Result<String> {
    if card.no_of_questions < 1 {
        return Err(Error::Validation(
            "Number of questions must be at least 1".to_string(),
        ));
    }
    if !vocabulary.contains(&card.level) {
        return Err(Error::Validation(format!(
            "Invalid level '{}': level must be {}",
            card.level,
            vocabulary.describe()
        )));
    }

    let tools_clause = if card.tools.is_empty() {
        String::new()
    } else {
        format!(" using {}", card.tools.join(", "))
    };

    Ok(format!(
        "I want {} assessment questions of {} complexity for {} on {}{}.",
        card.no_of_questions,
        card.level,
        role,
        card.keywords.join(", "),
        tools_clause
    ))
}
