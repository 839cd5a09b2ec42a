//! Text-generation boundary.
//!
//! HTTP clients for concrete providers live outside core; they implement
//! [`TextGenerator`] and receive a fully prepared [`CompletionRequest`].

use crate::model::prefs::AiProvider;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const GEMINI_MODEL: &str = "gemini-pro";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Provider-neutral completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub provider: AiProvider,
    pub api_key: String,
    pub model: &'static str,
    pub system_prompt: &'static str,
    pub prompt: String,
    pub temperature: f32,
}

/// Default model name for `provider`; `None` for [`AiProvider::None`].
pub fn default_model(provider: AiProvider) -> Option<&'static str> {
    match provider {
        AiProvider::None => None,
        AiProvider::OpenAi => Some(OPENAI_MODEL),
        AiProvider::Gemini => Some(GEMINI_MODEL),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Network, HTTP or decoding failure reported by the client.
    Transport(String),
    /// The provider answered without any candidate text.
    EmptyResponse,
}

impl Display for GenerationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "{message}"),
            Self::EmptyResponse => write!(f, "provider returned no content"),
        }
    }
}

impl Error for GenerationError {}

/// Client for one or more text-generation providers.
pub trait TextGenerator {
    fn generate(&self, request: &CompletionRequest) -> Result<String, GenerationError>;
}

impl<F> TextGenerator for F
where
    F: Fn(&CompletionRequest) -> Result<String, GenerationError>,
{
    fn generate(&self, request: &CompletionRequest) -> Result<String, GenerationError> {
        self(request)
    }
}
