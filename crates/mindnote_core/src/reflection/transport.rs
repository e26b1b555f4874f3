//! Wire types and HTTP transport for chat-completion endpoints.
//!
//! # Responsibility
//! - Define the request/response JSON shapes.
//! - Map HTTP outcomes onto `ReflectionError`.
//!
//! # Invariants
//! - Credentials are only ever placed in the `Authorization` header.

use crate::reflection::error::ReflectionError;
use serde::{Deserialize, Serialize};

/// Default chat-completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl CompletionResponse {
    /// First choice's message content, trimmed.
    ///
    /// Fails with `NoResponse` when choices are empty or carry no content.
    pub fn into_text(self) -> Result<String, ReflectionError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .map(|content| content.trim().to_string())
            .ok_or(ReflectionError::NoResponse)
    }
}

/// Sends one completion request with a bearer credential.
pub trait CompletionTransport: Send + Sync {
    fn send(
        &self,
        endpoint: &str,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ReflectionError>;
}

/// Blocking HTTP transport backed by `ureq`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::Agent::new_with_defaults(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionTransport for UreqTransport {
    fn send(
        &self,
        endpoint: &str,
        credential: &str,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ReflectionError> {
        let result = self
            .agent
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", &format!("Bearer {credential}"))
            .send_json(request);

        match result {
            Ok(response) => response
                .into_body()
                .read_json::<CompletionResponse>()
                .map_err(|err| ReflectionError::MalformedResponse(err.to_string())),
            Err(ureq::Error::StatusCode(status)) => Err(ReflectionError::from_status(status)),
            Err(err) => Err(ReflectionError::Connectivity(err.to_string())),
        }
    }
}
