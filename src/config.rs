use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::auth::ApiKey;
use crate::error::{Result, TicketLensError};

const DEFAULT_DB_NAME: &str = "tickets.db";
const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.5;
const DEFAULT_MAX_TOKENS: u32 = 400;

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    openai_api_key: Option<String>,
    #[serde(default)]
    db_name: Option<String>,
    #[serde(default)]
    api_base_url: Option<String>,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    temperature: Option<f32>,
    #[serde(default)]
    max_tokens: Option<u32>,
}

/// Settings read once at startup and passed by reference to each stage.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: ApiKey,
    pub db_path: PathBuf,
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TicketLensError::Config(format!(
                "Missing {} file.",
                path.display()
            )));
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(contents)
            .map_err(|e| TicketLensError::Config(format!("Malformed configuration: {e}")))?;

        let api_key = ApiKey::from(raw.openai_api_key.unwrap_or_default());
        if api_key.is_blank() {
            return Err(TicketLensError::Config(
                "OpenAI API key not found in configuration".to_string(),
            ));
        }

        let db_name = raw
            .db_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DB_NAME.to_string());

        Ok(Self {
            api_key,
            db_path: PathBuf::from(db_name),
            api_base_url: raw
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            model: raw.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: raw.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: raw.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        })
    }
}
