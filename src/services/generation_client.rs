use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::level::LevelVocabulary;
use crate::services::key_rotation::KeyRotation;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;

const EXAMPLE_FORMAT: &str = "MCQ strictly has to be in below format:\
Format: \n **Question 1 question\
\nA. Option 1\
\nB. Option 2\
\nC. Option 3\
\nD. Option 4\
\n**Answer: A. Option 1 \
\n no need to separate questions topic wise and mentioned the topic";

/// Produces the text for one prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    client: Client,
    api_url: Url,
    keys: KeyRotation,
    generation_config: JsonValue,
    safety_settings: JsonValue,
    vocabulary: LevelVocabulary,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("api_url", &self.api_url.as_str())
            .field("keys", &self.keys)
            .field("vocabulary", &self.vocabulary)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: &'a JsonValue,
    safety_settings: &'a JsonValue,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn into_first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
    }
}

impl GeminiClient {
    pub fn new(config: &Config, client: Client) -> Result<Self> {
        Ok(Self {
            client,
            api_url: config.gemini_api_url.clone(),
            keys: KeyRotation::new(config.gemini_api_keys.clone())?,
            generation_config: config.generation_config.clone(),
            safety_settings: config.safety_settings.clone(),
            vocabulary: config.level_vocabulary,
        })
    }

    /// Full text sent upstream: rubric, the card prompt, then the answer
    /// format the model must follow.
    pub fn wrap_prompt(&self, prompt: &str) -> String {
        wrap_prompt(prompt, self.vocabulary)
    }
}

pub fn rubric_preamble(vocabulary: LevelVocabulary) -> String {
    let [low, mid, high] = vocabulary.levels().map(capitalize);
    format!(
        "I am creating an assessment with the following specifications. \
         {} complexity should be blooms level 1 and 2 that test recall and comprehension. \
         {} complexity should be blooms level 3 of type application. \
         {} complexity should be blooms level 4 of type analytics, preferably scenario-based",
        low, mid, high
    )
}

pub fn wrap_prompt(prompt: &str, vocabulary: LevelVocabulary) -> String {
    format!("{}\n {}{}", rubric_preamble(vocabulary), prompt, EXAMPLE_FORMAT)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[async_trait]
impl GenerationClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let text = self.wrap_prompt(prompt);
        let (slot, key) = self.keys.next_key();
        tracing::debug!(key_slot = slot, prompt_len = text.len(), "Sending generation request");

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &text }],
            }],
            generation_config: &self.generation_config,
            safety_settings: &self.safety_settings,
        };

        // without_url keeps the key query parameter out of error messages.
        let res = self
            .client
            .post(self.api_url.clone())
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                Error::Generation(
                    anyhow::Error::new(e.without_url()).context("generation request failed"),
                )
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Generation(anyhow::anyhow!(
                "generation endpoint returned {}: {}",
                status,
                text
            )));
        }

        let parsed: GenerateContentResponse = res.json().await.map_err(|e| {
            Error::Generation(
                anyhow::Error::new(e.without_url()).context("undecodable generation response"),
            )
        })?;

        let answer = parsed.into_first_text().ok_or_else(|| {
            Error::Generation(anyhow::anyhow!(
                "generation response has no candidates[0].content.parts[0].text"
            ))
        })?;
        tracing::debug!(key_slot = slot, answer_len = answer.len(), "Generation response received");
        Ok(answer)
    }
}
