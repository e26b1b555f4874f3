//! Reflection failure taxonomy.
//!
//! Every variant renders as a one-line, user-facing message.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    /// Note has neither a meaningful title nor content; rejected before any
    /// client call.
    EmptyNote,
    /// HTTP 401 from the endpoint.
    InvalidCredential,
    /// HTTP 429 from the endpoint.
    RateLimited,
    /// Any other non-success status.
    Api { status: u16 },
    /// Request never produced an HTTP status (DNS, TLS, connect, I/O).
    Connectivity(String),
    /// Response body could not be decoded.
    MalformedResponse(String),
    /// Response decoded but carried no generated text.
    NoResponse,
}

impl ReflectionError {
    /// Maps a non-success HTTP status to its error class.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => Self::InvalidCredential,
            429 => Self::RateLimited,
            other => Self::Api { status: other },
        }
    }

    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyNote => "empty_note",
            Self::InvalidCredential => "invalid_credential",
            Self::RateLimited => "rate_limited",
            Self::Api { .. } => "api_error",
            Self::Connectivity(_) => "connectivity",
            Self::MalformedResponse(_) => "malformed_response",
            Self::NoResponse => "no_response",
        }
    }
}

impl Display for ReflectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyNote => write!(f, "Please write some content in your note first."),
            Self::InvalidCredential => {
                write!(f, "Invalid API key. Please check your OpenAI API key.")
            }
            Self::RateLimited => write!(f, "Rate limit exceeded. Please try again in a moment."),
            Self::Api { status } => write!(f, "API error: {status}"),
            Self::Connectivity(_) => {
                write!(f, "Network error. Please check your internet connection.")
            }
            Self::MalformedResponse(_) => {
                write!(f, "Unexpected response from the reflection service.")
            }
            Self::NoResponse => write!(f, "No response received from the reflection service."),
        }
    }
}

impl Error for ReflectionError {}
