// src/api/tts.rs
// Proxy client for the text-to-speech collaborator.

use log::debug;
use serde::Deserialize;
use serde_json::json;

use super::ApiError;
use crate::config::ServerConfig;

#[derive(Debug, Deserialize)]
struct TtsRequest {
    #[serde(default)]
    text: Option<String>,
}

pub struct TtsClient {
    endpoint: String,
    voice_id: String,
    model_id: String,
    output_format: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl TtsClient {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(TtsClient {
            endpoint: config.tts_endpoint.clone(),
            voice_id: config.tts_voice_id.clone(),
            model_id: config.tts_model_id.clone(),
            output_format: config.tts_output_format.clone(),
            api_key: config.tts_api_key.clone(),
            http,
        })
    }

    /// Handles one `/api/tts` request body and returns playable audio bytes.
    pub fn handle(&self, body: &str) -> Result<Vec<u8>, ApiError> {
        let request: TtsRequest = serde_json::from_str(body)?;
        let text = request
            .text
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::BadRequest("missing text".to_string()))?;
        self.synthesize(&text)
    }

    /// Converts `text` into audio via the speech provider.
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>, ApiError> {
        let url = format!(
            "{}/text-to-speech/{}?output_format={}",
            self.endpoint.trim_end_matches('/'),
            self.voice_id,
            self.output_format
        );
        debug!("synthesizing {} chars via {}", text.len(), url);

        let response = self
            .http
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&json!({ "text": text, "model_id": self.model_id }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TtsClient {
        TtsClient {
            endpoint: "http://localhost:0".to_string(),
            voice_id: "voice".to_string(),
            model_id: "model".to_string(),
            output_format: "mp3_44100_128".to_string(),
            api_key: "test-key".to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    #[test]
    fn test_missing_text_is_a_bad_request() {
        let err = client().handle("{}").unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_empty_text_is_a_bad_request() {
        let err = client().handle(r#"{"text": ""}"#).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_malformed_json_is_a_bad_request() {
        let err = client().handle("audio please").unwrap_err();
        assert!(matches!(err, ApiError::Payload(_)));
    }
}
