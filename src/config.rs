//! Process configuration, read from the environment once at startup.

use secrecy::Secret;
use std::env;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://pefi.db?mode=rwc";
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid port: {value}")]
    InvalidPort { name: &'static str, value: String },
}

/// The static bearer token every API request must present.
#[derive(Clone)]
pub struct ApiKey(pub Secret<String>);

/// Configuration for the HTTP API server.
#[derive(Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub api_key: ApiKey,
    pub allowed_origins: Vec<String>,
    pub host: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            database_url: optional("DATABASE_URL", DEFAULT_DATABASE_URL),
            api_key: ApiKey(Secret::new(required("API_KEY")?)),
            allowed_origins,
            host: optional("HOST_ADDR", "0.0.0.0"),
            port: port("PORT", 8080)?,
        })
    }
}

/// Configuration for the Telegram relay.
#[derive(Clone)]
pub struct BotConfig {
    /// Base URL of the PeFi API, including the `/api` prefix.
    pub api_url: String,
    pub api_key: Secret<String>,
    pub telegram_bot_token: Secret<String>,
    pub telegram_api_url: String,
    pub openai_api_key: Secret<String>,
    pub openai_api_url: String,
    pub transcription_model: String,
    pub extraction_model: String,
    pub transcription_language: String,
    pub ffmpeg_path: String,
    /// Public host name used when registering the webhook.
    pub public_host: Option<String>,
    pub host: String,
    pub port: u16,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: trim_slash(required("API_URL")?),
            api_key: Secret::new(required("API_KEY")?),
            telegram_bot_token: Secret::new(required("TELEGRAM_BOT_TOKEN")?),
            telegram_api_url: trim_slash(optional("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL)),
            openai_api_key: Secret::new(required("OPENAI_API_KEY")?),
            openai_api_url: trim_slash(optional("OPENAI_API_URL", DEFAULT_OPENAI_API_URL)),
            transcription_model: optional("TRANSCRIPTION_MODEL", "gpt-4o-mini-transcribe"),
            extraction_model: optional("EXTRACTION_MODEL", "gpt-4o-mini-2024-07-18"),
            transcription_language: optional("TRANSCRIPTION_LANGUAGE", "vi"),
            ffmpeg_path: optional("FFMPEG_PATH", "ffmpeg"),
            public_host: env::var("HOST").ok().filter(|h| !h.is_empty()),
            host: optional("HOST_ADDR", "0.0.0.0"),
            port: port("PORT", 3000)?,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn port(name: &'static str, default: u16) -> Result<u16, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidPort { name, value }),
        Err(_) => Ok(default),
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
