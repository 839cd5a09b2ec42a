//! Journal analysis through an external text-generation provider.
//!
//! # Responsibility
//! - Select the configured provider and check its credential.
//! - Build the summary prompt for the requested look-back window.
//! - Turn provider results into user-facing outcomes.
//!
//! # Invariants
//! - No request is issued without a selected provider and a non-blank key.
//! - Failure messages never carry the configured credentials.

pub mod prompt;
pub mod provider;
pub mod redact;

use crate::model::entry::JournalEntry;
use crate::model::prefs::{AiProvider, AppPrefs};
use chrono::{DateTime, TimeZone, Utc};
use log::{info, warn};
use prompt::{build_summary_prompt, AnalyzeWindow, SYSTEM_PROMPT};
use provider::{
    default_model, CompletionRequest, GenerationError, TextGenerator, DEFAULT_TEMPERATURE,
};
use redact::redact_secrets;
use std::time::Instant;

/// Text shown when the provider answered with blank content.
pub const NO_RESPONSE: &str = "No response";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    Summary(String),
    NoProvider,
    MissingKey(AiProvider),
    Failed(String),
}

impl AnalyzeOutcome {
    /// User-facing rendering of the outcome.
    pub fn message(&self) -> String {
        match self {
            Self::Summary(text) => text.clone(),
            Self::NoProvider => "Choose a provider in Settings.".to_string(),
            Self::MissingKey(provider) => {
                format!("Set your {} key in Settings.", provider.label())
            }
            Self::Failed(message) => format!("Error: {message}"),
        }
    }
}

/// Prepares the completion request, or the outcome that stops the call early.
pub fn prepare_request<T: TimeZone>(
    prefs: &AppPrefs,
    entries: &[JournalEntry],
    now: DateTime<Utc>,
    window: AnalyzeWindow,
    tz: &T,
) -> Result<CompletionRequest, AnalyzeOutcome>
where
    T::Offset: std::fmt::Display,
{
    let provider = prefs.provider;
    let model = default_model(provider).ok_or(AnalyzeOutcome::NoProvider)?;
    let api_key = prefs.key_for(provider).trim();
    if api_key.is_empty() {
        return Err(AnalyzeOutcome::MissingKey(provider));
    }

    Ok(CompletionRequest {
        provider,
        api_key: api_key.to_string(),
        model,
        system_prompt: SYSTEM_PROMPT,
        prompt: build_summary_prompt(entries, now, window, tz),
        temperature: DEFAULT_TEMPERATURE,
    })
}

/// Summarizes the entries of `window` with the configured provider.
pub fn analyze<T: TimeZone>(
    prefs: &AppPrefs,
    entries: &[JournalEntry],
    now: DateTime<Utc>,
    window: AnalyzeWindow,
    tz: &T,
    generator: &dyn TextGenerator,
) -> AnalyzeOutcome
where
    T::Offset: std::fmt::Display,
{
    let request = match prepare_request(prefs, entries, now, window, tz) {
        Ok(request) => request,
        Err(outcome) => return outcome,
    };

    let started_at = Instant::now();
    match generator.generate(&request) {
        Ok(text) if text.trim().is_empty() => AnalyzeOutcome::Summary(NO_RESPONSE.to_string()),
        Ok(text) => {
            info!(
                "event=analyze module=analyze status=ok provider={} duration_ms={}",
                request.provider.label(),
                started_at.elapsed().as_millis()
            );
            AnalyzeOutcome::Summary(text)
        }
        Err(GenerationError::EmptyResponse) => AnalyzeOutcome::Summary(NO_RESPONSE.to_string()),
        Err(GenerationError::Transport(message)) => {
            let message = redact_secrets(
                &message,
                &[prefs.openai_key.as_str(), prefs.gemini_key.as_str()],
            );
            warn!(
                "event=analyze module=analyze status=error provider={} duration_ms={} error={}",
                request.provider.label(),
                started_at.elapsed().as_millis(),
                message
            );
            AnalyzeOutcome::Failed(message)
        }
    }
}
