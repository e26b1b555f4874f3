//! AI reflection support.
//!
//! # Responsibility
//! - Build reflection prompts from a note's title and content.
//! - Send them to a chat-completion endpoint, or return a canned placeholder
//!   when no credential is stored.
//! - Persist the credential used for configured requests.

pub mod client;
pub mod credential;
pub mod error;
pub mod prompt;
pub mod transport;

pub use client::{ReflectionClient, ReflectionConfig, ReflectionMode};
pub use credential::CredentialVault;
pub use error::ReflectionError;
pub use prompt::{build_prompt, ReflectionRequest, MOCK_REFLECTION, SYSTEM_INSTRUCTION};
pub use transport::{CompletionRequest, CompletionResponse, CompletionTransport, UreqTransport};
