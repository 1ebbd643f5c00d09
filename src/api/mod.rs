// src/api/mod.rs
// The proxy backend: two thin routes over the chat and TTS collaborators.

pub mod chat;
pub mod tts;

use std::io::Read;

use log::{error, info};
use serde_json::json;
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response, Server};

use crate::config::ServerConfig;
use self::chat::ChatClient;
use self::tts::TtsClient;

/// Errors shared by the proxy route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("malformed request body: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),
    #[error("upstream returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    #[error("upstream returned an empty completion")]
    EmptyCompletion,
}

impl ApiError {
    fn status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) | ApiError::Payload(_) => 400,
            _ => 500,
        }
    }
}

/// What a route handler produced, before it becomes an HTTP response.
enum Reply {
    Json { status: u16, body: serde_json::Value },
    Audio(Vec<u8>),
}

impl Reply {
    fn error(status: u16, message: impl Into<String>) -> Self {
        Reply::Json {
            status,
            body: json!({ "error": message.into() }),
        }
    }
}

/// Serves `/api/chat` and `/api/tts`, proxying to the configured upstream
/// providers. Handler failures become error responses; they never take the
/// accept loop down.
pub struct ApiServer {
    server: Server,
    bind_addr: String,
    chat: ChatClient,
    tts: TtsClient,
}

impl ApiServer {
    pub fn bind(config: &ServerConfig) -> Result<Self, String> {
        let server = Server::http(config.bind_addr.as_str()).map_err(|e| e.to_string())?;
        let chat = ChatClient::new(config).map_err(|e| e.to_string())?;
        let tts = TtsClient::new(config).map_err(|e| e.to_string())?;
        Ok(ApiServer {
            server,
            bind_addr: config.bind_addr.clone(),
            chat,
            tts,
        })
    }

    /// Blocks serving requests until the process exits.
    pub fn run(&self) {
        info!("viewlingo api listening on {}", self.bind_addr);
        for mut request in self.server.incoming_requests() {
            let reply = self.handle(&mut request);
            if let Err(e) = respond(request, reply) {
                error!("failed to write response: {}", e);
            }
        }
    }

    fn handle(&self, request: &mut Request) -> Reply {
        let mut body = String::new();
        if let Err(e) = request.as_reader().read_to_string(&mut body) {
            return Reply::error(400, format!("unreadable body: {}", e));
        }

        match (request.method(), request.url()) {
            (Method::Post, "/api/chat") => match self.chat.handle(&body) {
                Ok(output) => Reply::Json {
                    status: 200,
                    body: json!({ "output": output }),
                },
                Err(e) => {
                    error!("chat proxy failed: {}", e);
                    Reply::error(e.status(), e.to_string())
                }
            },
            (Method::Post, "/api/tts") => match self.tts.handle(&body) {
                Ok(audio) => Reply::Audio(audio),
                Err(e) => {
                    error!("tts proxy failed: {}", e);
                    Reply::error(e.status(), e.to_string())
                }
            },
            _ => Reply::error(404, "not found"),
        }
    }
}

fn respond(request: Request, reply: Reply) -> std::io::Result<()> {
    match reply {
        Reply::Json { status, body } => {
            let response = Response::from_string(body.to_string())
                .with_status_code(status)
                .with_header(header("Content-Type", "application/json"));
            request.respond(response)
        }
        Reply::Audio(bytes) => {
            let response = Response::from_data(bytes)
                .with_header(header("Content-Type", "audio/mpeg"))
                .with_header(header("Content-Disposition", "inline; filename=\"speech.mp3\""));
            request.respond(response)
        }
    }
}

fn header(name: &str, value: &str) -> Header {
    // Both operands are static, well-formed header text.
    Header::from_bytes(name.as_bytes(), value.as_bytes()).expect("static header")
}
