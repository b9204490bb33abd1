use config::{Config as Cfg, File};
use serde::Deserialize;
use std::env;

use crate::error::AppError;

const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TEXT_MODEL: &str = "mixtral-8x7b-32768";
/// Model identifier echoed in response bodies, distinct from the wire id.
const DEFAULT_MODEL_LABEL: &str = "mixtral-8x7b";

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(flatten)]
    pub common: CommonConfig,
    pub models: ModelConfig,
    pub groq: GroqApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommonConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    5001
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Model id sent to the upstream API.
    pub text_model: String,
    /// Model id reported back to clients.
    pub model_label: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroqApiConfig {
    pub api_key: String,
    pub api_base: String,
    /// When false, the mock provider is wired in instead of the Groq client.
    pub enabled: bool,
}

impl CommonConfig {
    fn load() -> Result<Self, AppError> {
        let config = Cfg::builder()
            .add_source(File::with_name("configuration").required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl AiConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let common = CommonConfig::load()?;
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(AiConfig {
            common,
            models: ModelConfig {
                text_model: get_env("AI_TEXT_MODEL", Some(DEFAULT_TEXT_MODEL), is_prod)?,
                model_label: get_env("AI_MODEL_LABEL", Some(DEFAULT_MODEL_LABEL), is_prod)?,
            },
            groq: GroqApiConfig {
                // A missing key must not abort startup; calls fail upstream instead.
                api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
                api_base: get_env("GROQ_API_BASE", Some(DEFAULT_API_BASE), is_prod)?,
                enabled: get_env("GROQ_ENABLED", Some("true"), is_prod)?
                    .parse()
                    .unwrap_or(true),
            },
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod && default.is_none() {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
