// src/api/chat.rs
// Proxy client for the chat-completion collaborator (the AI coach).

use log::debug;
use serde::{Deserialize, Serialize};

use super::ApiError;
use crate::config::ServerConfig;

/// The coach persona sent when the caller supplies no system prompt. The
/// placeholder is replaced with the session's per-card grade block so the
/// coach can reference what the user just practiced.
const SYSTEM_PROMPT: &str = "You are an expert Mandarin Chinese language coach with a warm, \
encouraging, and patient teaching style. The user has just finished a flashcard review \
session of 5 Chinese words, graded themselves on each one, and is now asking you a question \
about their Chinese language learning. Provide clear, accurate explanations about grammar, \
vocabulary, pronunciation, and culture, in simple English with simplified characters and \
pinyin tone marks (e.g. 你好 (nǐ hǎo)). Reference the words they just practiced when \
relevant, celebrate progress, and suggest next steps where appropriate.\n\n\
The words they just practiced, with their self-graded results:\n\n\
[CHARACTERS_AND_GRADES_WILL_BE_INSERTED_HERE]";

const GRADES_PLACEHOLDER: &str = "[CHARACTERS_AND_GRADES_WILL_BE_INSERTED_HERE]";

/// The `/api/chat` request body. `messages` stays a raw value so that a
/// missing array can be told apart from a malformed one.
#[derive(Debug, Deserialize)]
struct ChatRequest {
    #[serde(default)]
    messages: Option<serde_json::Value>,
    #[serde(default, rename = "systemPrompt")]
    system_prompt: Option<String>,
    /// The per-card grade array produced by the results screen.
    #[serde(default)]
    grades: Option<serde_json::Value>,
}

/// One transcript entry as the app sends it. The web client uses `text`
/// and the role `ai`; the upstream API wants `content` and `assistant`.
#[derive(Debug, Deserialize)]
struct IncomingMessage {
    role: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct OutgoingMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<OutgoingMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

pub struct ChatClient {
    endpoint: String,
    model: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

impl ChatClient {
    pub fn new(config: &ServerConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.http_timeout)
            .build()?;
        Ok(ChatClient {
            endpoint: config.chat_endpoint.clone(),
            model: config.chat_model.clone(),
            api_key: config.chat_api_key.clone(),
            http,
        })
    }

    /// Handles one `/api/chat` request body end to end and returns the
    /// coach's reply text.
    pub fn handle(&self, body: &str) -> Result<String, ApiError> {
        let request: ChatRequest = serde_json::from_str(body)?;
        let conversation = match request.messages.as_ref().and_then(|m| m.as_array()) {
            Some(messages) => messages,
            None => return Err(ApiError::BadRequest("missing messages array".to_string())),
        };

        let system = request
            .system_prompt
            .unwrap_or_else(|| coach_prompt(request.grades.as_ref()));

        let mut messages = Vec::with_capacity(conversation.len() + 1);
        messages.push(OutgoingMessage {
            role: "system".to_string(),
            content: system,
        });
        for entry in conversation {
            let incoming: IncomingMessage = serde_json::from_value(entry.clone())?;
            messages.push(OutgoingMessage {
                role: normalize_role(&incoming.role),
                content: incoming.text.or(incoming.content).unwrap_or_default(),
            });
        }

        self.complete(messages)
    }

    fn complete(&self, messages: Vec<OutgoingMessage>) -> Result<String, ApiError> {
        let url = format!("{}/chat/completions", self.endpoint.trim_end_matches('/'));
        debug!("forwarding {} messages to {}", messages.len(), url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&CompletionRequest {
                model: &self.model,
                messages,
                temperature: 0.7,
            })
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let completion: CompletionResponse = response.json()?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ApiError::EmptyCompletion)
    }
}

/// Maps the app's transcript roles onto the upstream API's.
fn normalize_role(role: &str) -> String {
    if role == "ai" {
        "assistant".to_string()
    } else {
        role.to_string()
    }
}

/// Builds the default coach prompt, splicing in the grade block from the
/// just-finished session when the caller sent one.
fn coach_prompt(grades: Option<&serde_json::Value>) -> String {
    match grades {
        Some(block) => SYSTEM_PROMPT.replace(GRADES_PLACEHOLDER, &block.to_string()),
        None => SYSTEM_PROMPT.replace(GRADES_PLACEHOLDER, "(no session data available)"),
    }
}
