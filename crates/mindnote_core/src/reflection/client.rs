//! Reflection client: configured HTTP path or canned placeholder.
//!
//! # Responsibility
//! - Turn a validated `ReflectionRequest` into reflection prose.
//! - Keep mode selection a pure function of the stored credential.
//!
//! # Invariants
//! - `Unconfigured` mode never touches the network.
//! - The client is stateless across requests; results never mutate notes.

use crate::reflection::error::ReflectionError;
use crate::reflection::prompt::{ReflectionRequest, MOCK_REFLECTION, SYSTEM_INSTRUCTION};
use crate::reflection::transport::{
    ChatMessage, CompletionRequest, CompletionTransport, UreqTransport, DEFAULT_ENDPOINT,
};
use log::{info, warn};
use std::fmt::{Debug, Formatter};
use std::time::{Duration, Instant};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, PartialEq)]
pub struct ReflectionConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Artificial latency of the unconfigured placeholder path.
    pub mock_delay: Duration,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            mock_delay: DEFAULT_MOCK_DELAY,
        }
    }
}

/// Request path selected per request from the stored credential.
#[derive(Clone, PartialEq, Eq)]
pub enum ReflectionMode {
    Configured { credential: String },
    Unconfigured,
}

impl ReflectionMode {
    /// `Configured` iff a non-blank credential is present.
    pub fn from_credential(credential: Option<&str>) -> Self {
        match credential.map(str::trim) {
            Some(value) if !value.is_empty() => Self::Configured {
                credential: value.to_string(),
            },
            _ => Self::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Configured { .. } => "configured",
            Self::Unconfigured => "unconfigured",
        }
    }
}

impl Debug for ReflectionMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configured { .. } => f
                .debug_struct("Configured")
                .field("credential", &"<redacted>")
                .finish(),
            Self::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

pub struct ReflectionClient<T: CompletionTransport = UreqTransport> {
    config: ReflectionConfig,
    transport: T,
}

impl ReflectionClient<UreqTransport> {
    /// Client over the default HTTP transport.
    pub fn new(config: ReflectionConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }
}

impl<T: CompletionTransport> ReflectionClient<T> {
    pub fn with_transport(config: ReflectionConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Produces reflection text for `request` using `mode`.
    pub fn reflect(
        &self,
        mode: &ReflectionMode,
        request: &ReflectionRequest,
    ) -> Result<String, ReflectionError> {
        let started_at = Instant::now();
        let result = match mode {
            ReflectionMode::Configured { credential } => self.reflect_remote(credential, request),
            ReflectionMode::Unconfigured => Ok(self.reflect_placeholder()),
        };

        match &result {
            Ok(text) => info!(
                "event=reflection module=reflection status=ok mode={} duration_ms={} chars={}",
                mode.label(),
                started_at.elapsed().as_millis(),
                text.chars().count()
            ),
            Err(err) => warn!(
                "event=reflection module=reflection status=error mode={} duration_ms={} error_code={}",
                mode.label(),
                started_at.elapsed().as_millis(),
                err.code()
            ),
        }
        result
    }

    /// Builds the wire request for `request`.
    pub fn completion_request(&self, request: &ReflectionRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(request.prompt()),
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        }
    }

    fn reflect_remote(
        &self,
        credential: &str,
        request: &ReflectionRequest,
    ) -> Result<String, ReflectionError> {
        let body = self.completion_request(request);
        self.transport
            .send(&self.config.endpoint, credential, &body)?
            .into_text()
    }

    fn reflect_placeholder(&self) -> String {
        if !self.config.mock_delay.is_zero() {
            std::thread::sleep(self.config.mock_delay);
        }
        MOCK_REFLECTION.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{ReflectionClient, ReflectionConfig, ReflectionMode};
    use crate::reflection::prompt::{ReflectionRequest, MOCK_REFLECTION};
    use crate::reflection::transport::{
        ChoiceMessage, CompletionChoice, CompletionRequest, CompletionResponse,
        CompletionTransport,
    };
    use crate::reflection::ReflectionError;
    use std::sync::Mutex;
    use std::time::Duration;

    struct ScriptedTransport {
        reply: Result<CompletionResponse, ReflectionError>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedTransport {
        fn replying(reply: Result<CompletionResponse, ReflectionError>) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl CompletionTransport for ScriptedTransport {
        fn send(
            &self,
            endpoint: &str,
            credential: &str,
            _request: &CompletionRequest,
        ) -> Result<CompletionResponse, ReflectionError> {
            self.calls
                .lock()
                .unwrap()
                .push((endpoint.to_string(), credential.to_string()));
            self.reply.clone()
        }
    }

    fn quick_config() -> ReflectionConfig {
        ReflectionConfig {
            mock_delay: Duration::ZERO,
            ..ReflectionConfig::default()
        }
    }

    fn text_reply(text: &str) -> CompletionResponse {
        CompletionResponse {
            choices: vec![CompletionChoice {
                message: Some(ChoiceMessage {
                    content: Some(text.to_string()),
                }),
            }],
        }
    }

    #[test]
    fn mode_follows_credential_presence() {
        assert!(ReflectionMode::from_credential(Some("sk-1")).is_configured());
        assert!(!ReflectionMode::from_credential(Some("   ")).is_configured());
        assert!(!ReflectionMode::from_credential(None).is_configured());
    }

    #[test]
    fn debug_output_redacts_credential() {
        let mode = ReflectionMode::from_credential(Some("sk-secret"));
        assert!(!format!("{mode:?}").contains("sk-secret"));
    }

    #[test]
    fn configured_mode_returns_trimmed_text() {
        let client = ReflectionClient::with_transport(
            quick_config(),
            ScriptedTransport::replying(Ok(text_reply("  insight  "))),
        );
        let request = ReflectionRequest::new("Trip", "Pack light").unwrap();
        let mode = ReflectionMode::from_credential(Some("sk-1"));

        assert_eq!(client.reflect(&mode, &request).unwrap(), "insight");
        let calls = client.transport().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, "sk-1");
    }

    #[test]
    fn configured_mode_propagates_transport_errors() {
        let client = ReflectionClient::with_transport(
            quick_config(),
            ScriptedTransport::replying(Err(ReflectionError::RateLimited)),
        );
        let request = ReflectionRequest::new("Trip", "Pack light").unwrap();
        let mode = ReflectionMode::from_credential(Some("sk-1"));

        assert_eq!(
            client.reflect(&mode, &request).unwrap_err(),
            ReflectionError::RateLimited
        );
    }

    #[test]
    fn unconfigured_mode_never_calls_transport() {
        let client = ReflectionClient::with_transport(
            quick_config(),
            ScriptedTransport::replying(Ok(text_reply("unused"))),
        );
        let request = ReflectionRequest::new("Trip", "Pack light").unwrap();

        let text = client
            .reflect(&ReflectionMode::Unconfigured, &request)
            .unwrap();
        assert_eq!(text, MOCK_REFLECTION);
        assert!(client.transport().calls.lock().unwrap().is_empty());
    }

    #[test]
    fn completion_request_uses_config_and_prompt() {
        let client = ReflectionClient::with_transport(
            quick_config(),
            ScriptedTransport::replying(Ok(CompletionResponse::default())),
        );
        let request = ReflectionRequest::new("Trip", "Pack light").unwrap();
        let body = client.completion_request(&request);

        assert_eq!(body.model, "gpt-3.5-turbo");
        assert_eq!(body.max_tokens, 300);
        assert_eq!(body.messages.len(), 2);
        assert!(body.messages[1].content.contains("Content: Pack light"));
    }
}
