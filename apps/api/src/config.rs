use anyhow::{bail, Context, Result};

use crate::outreach::prompts::{DEFAULT_SENDER_NAME, DEFAULT_SENDER_PERSONA};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_SUMMARIZER_TEMPERATURE: f32 = 0.3;
pub const DEFAULT_GENERATOR_TEMPERATURE: f32 = 0.7;

/// Model and sampling temperature for one pipeline stage.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSettings {
    pub model: String,
    pub temperature: f32,
}

/// The sender the generated message is written on behalf of.
#[derive(Debug, Clone, PartialEq)]
pub struct SenderProfile {
    pub name: String,
    pub persona: String,
}

impl Default for SenderProfile {
    fn default() -> Self {
        Self {
            name: DEFAULT_SENDER_NAME.to_string(),
            persona: DEFAULT_SENDER_PERSONA.to_string(),
        }
    }
}

/// Everything the two pipeline stages need besides the completion handle.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineSettings {
    /// Low temperature: summaries should be repeatable.
    pub summarizer: StageSettings,
    /// Higher temperature: repeated runs on similar prospects should vary.
    pub generator: StageSettings,
    pub sender: SenderProfile,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            summarizer: StageSettings {
                model: DEFAULT_MODEL.to_string(),
                temperature: DEFAULT_SUMMARIZER_TEMPERATURE,
            },
            generator: StageSettings {
                model: DEFAULT_MODEL.to_string(),
                temperature: DEFAULT_GENERATOR_TEMPERATURE,
            },
            sender: SenderProfile::default(),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub pipeline: PipelineSettings,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = PipelineSettings::default();

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_base_url: optional_env("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            pipeline: PipelineSettings {
                summarizer: StageSettings {
                    model: optional_env("SUMMARIZER_MODEL").unwrap_or(defaults.summarizer.model),
                    temperature: temperature_env(
                        "SUMMARIZER_TEMPERATURE",
                        defaults.summarizer.temperature,
                    )?,
                },
                generator: StageSettings {
                    model: optional_env("GENERATOR_MODEL").unwrap_or(defaults.generator.model),
                    temperature: temperature_env(
                        "GENERATOR_TEMPERATURE",
                        defaults.generator.temperature,
                    )?,
                },
                sender: SenderProfile {
                    name: optional_env("SENDER_NAME").unwrap_or(defaults.sender.name),
                    persona: optional_env("SENDER_PERSONA").unwrap_or(defaults.sender.persona),
                },
            },
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Config {
            groq_api_key: "test-key".to_string(),
            groq_base_url: DEFAULT_BASE_URL.to_string(),
            pipeline: PipelineSettings::default(),
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank values both fall back to the default.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn temperature_env(key: &str, default: f32) -> Result<f32> {
    match optional_env(key) {
        Some(raw) => parse_temperature(key, &raw),
        None => Ok(default),
    }
}

fn parse_temperature(key: &str, raw: &str) -> Result<f32> {
    let value = raw
        .parse::<f32>()
        .with_context(|| format!("{key} must be a number, got '{raw}'"))?;
    if !(0.0..=2.0).contains(&value) {
        bail!("{key} must be between 0.0 and 2.0, got {value}");
    }
    Ok(value)
}
