use crate::error::{Error, Result};
use crate::models::level::LevelVocabulary;
use dotenvy::dotenv;
use serde_json::Value as JsonValue;
use std::env;
use std::sync::OnceLock;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
const DEFAULT_CARD_DELAY_MS: u64 = 1_000;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Clone)]
pub struct Config {
    pub server_address: String,
    pub gemini_api_url: Url,
    pub gemini_api_keys: Vec<String>,
    pub generation_config: JsonValue,
    pub safety_settings: JsonValue,
    pub level_vocabulary: LevelVocabulary,
    pub card_delay: Duration,
    pub http_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_address", &self.server_address)
            .field("gemini_api_url", &self.gemini_api_url.as_str())
            .field("gemini_api_keys", &format!("[{} REDACTED]", self.gemini_api_keys.len()))
            .field("generation_config", &self.generation_config)
            .field("safety_settings", &self.safety_settings)
            .field("level_vocabulary", &self.level_vocabulary)
            .field("card_delay", &self.card_delay)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            gemini_api_url: parse_url(
                "GEMINI_API_URL",
                &get_env_or("GEMINI_API_URL", DEFAULT_GEMINI_API_URL),
            )?,
            gemini_api_keys: parse_api_keys(&get_env("GEMINI_API_KEYS")?)?,
            generation_config: get_env_json("GENERATION_CONFIG", JsonValue::Object(Default::default()))?,
            safety_settings: get_env_json("SAFETY_SETTINGS", JsonValue::Array(Vec::new()))?,
            level_vocabulary: get_env_parse_or("LEVEL_VOCABULARY", LevelVocabulary::default())?,
            card_delay: Duration::from_millis(get_env_parse_or(
                "CARD_DELAY_MS",
                DEFAULT_CARD_DELAY_MS,
            )?),
            http_timeout: Duration::from_secs(get_env_parse_or(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn get_env_json(name: &str, default: JsonValue) -> Result<JsonValue> {
    match env::var(name) {
        Ok(raw) => serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("Invalid JSON for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

/// Splits a comma separated key list, dropping blanks. At least one key is
/// required for the rotation to have anything to hand out.
pub fn parse_api_keys(raw: &str) -> Result<Vec<String>> {
    let keys: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect();
    if keys.is_empty() {
        return Err(Error::Config(
            "GEMINI_API_KEYS must contain at least one key".to_string(),
        ));
    }
    Ok(keys)
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
