use crate::dto::assessment_dto::AssessmentRequest;
use crate::error::Result;
use crate::models::level::LevelVocabulary;
use crate::services::generation_client::GenerationClient;
use crate::services::prompt_builder::build_prompt;
use std::sync::Arc;
use std::time::Duration;

pub const SEGMENT_SEPARATOR: &str = "\n\n";

/// Runs the cards of one request through the generation client, strictly in
/// order, one call per card.
#[derive(Clone)]
pub struct AssessmentService {
    client: Arc<dyn GenerationClient>,
    vocabulary: LevelVocabulary,
    card_delay: Duration,
}

impl AssessmentService {
    pub fn new(
        client: Arc<dyn GenerationClient>,
        vocabulary: LevelVocabulary,
        card_delay: Duration,
    ) -> Self {
        Self {
            client,
            vocabulary,
            card_delay,
        }
    }

    pub fn vocabulary(&self) -> LevelVocabulary {
        self.vocabulary
    }

    /// Concatenates one segment per card, each followed by a blank line.
    ///
    /// The first failing card aborts the request; nothing generated so far
    /// is returned.
    pub async fn generate_assessment(&self, request: &AssessmentRequest) -> Result<String> {
        let total = request.cards.len();
        let mut result = String::new();

        for (idx, card) in request.cards.iter().enumerate() {
            if idx > 0 && !self.card_delay.is_zero() {
                tokio::time::sleep(self.card_delay).await;
            }

            let prompt = build_prompt(&request.role, card, self.vocabulary)?;
            tracing::info!(card = idx + 1, total, "Generating assessment segment");

            let segment = self.client.generate(&prompt).await.map_err(|e| {
                tracing::warn!(card = idx + 1, total, "Aborting assessment: {}", e);
                e
            })?;

            result.push_str(&segment);
            result.push_str(SEGMENT_SEPARATOR);
        }

        tracing::info!(cards = total, chars = result.len(), "Assessment assembled");
        Ok(result)
    }
}
