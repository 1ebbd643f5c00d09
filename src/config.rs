// src/config.rs

use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Tunables for the review session engine.
#[derive(Debug, Clone, Copy)]
pub struct ReviewConfig {
    /// Cards per review pass.
    pub total_cards: usize,
    /// Horizontal distance a swipe must exceed to count as a grade.
    pub swipe_threshold: f32,
}

impl ReviewConfig {
    pub fn new() -> Self {
        Self {
            total_cards: 5,
            swipe_threshold: crate::gesture::SWIPE_THRESHOLD,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for the API proxy server and its upstream collaborators.
/// API keys and endpoints are always injected here; nothing in the
/// handlers reads the environment directly.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub chat_endpoint: String,
    pub chat_model: String,
    pub chat_api_key: String,
    pub tts_endpoint: String,
    pub tts_voice_id: String,
    pub tts_model_id: String,
    pub tts_output_format: String,
    pub tts_api_key: String,
    pub http_timeout: Duration,
}

impl ServerConfig {
    /// Reads the server configuration from the environment. The two API
    /// keys have no defaults and fail fast when absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: var_or("VIEWLINGO_BIND_ADDR", "0.0.0.0:8787"),
            chat_endpoint: var_or("VIEWLINGO_CHAT_ENDPOINT", "https://api.openai.com/v1"),
            chat_model: var_or("VIEWLINGO_CHAT_MODEL", "gpt-4"),
            chat_api_key: require("OPENAI_API_KEY")?,
            tts_endpoint: var_or("VIEWLINGO_TTS_ENDPOINT", "https://api.elevenlabs.io/v1"),
            tts_voice_id: var_or("VIEWLINGO_TTS_VOICE", "JBFqnCBsd6RMkjVDRZzb"),
            tts_model_id: var_or("VIEWLINGO_TTS_MODEL", "eleven_multilingual_v2"),
            tts_output_format: var_or("VIEWLINGO_TTS_FORMAT", "mp3_44100_128"),
            tts_api_key: require("ELEVENLABS_API_KEY")?,
            http_timeout: Duration::from_secs(30),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_defaults() {
        let config = ReviewConfig::new();
        assert_eq!(config.total_cards, 5);
        assert_eq!(config.swipe_threshold, 50.0);
    }

    #[test]
    fn test_missing_key_fails_fast() {
        env::remove_var("OPENAI_API_KEY");
        env::remove_var("ELEVENLABS_API_KEY");
        let err = ServerConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
