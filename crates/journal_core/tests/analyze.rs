use chrono::{Duration, TimeZone, Utc};
use journal_core::analyze::prompt::{PROMPT_HEADER, SYSTEM_PROMPT};
use journal_core::analyze::provider::{GEMINI_MODEL, OPENAI_MODEL};
use journal_core::analyze::NO_RESPONSE;
use journal_core::{
    analyze, AiProvider, AnalyzeOutcome, AnalyzeWindow, AppPrefs, CompletionRequest,
    GenerationError, JournalEntry, TextGenerator,
};
use std::cell::RefCell;

fn prefs(provider: AiProvider, openai_key: &str, gemini_key: &str) -> AppPrefs {
    AppPrefs {
        provider,
        openai_key: openai_key.to_string(),
        gemini_key: gemini_key.to_string(),
        ..AppPrefs::default()
    }
}

fn journal() -> Vec<JournalEntry> {
    let now = Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap();
    let mut recent = JournalEntry::new(now - Duration::days(3));
    recent.title = "run".to_string();
    recent.body = "5k before work".to_string();
    let mut old = JournalEntry::new(now - Duration::days(20));
    old.title = "old".to_string();
    vec![recent, old]
}

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
}

fn never_called(_: &CompletionRequest) -> Result<String, GenerationError> {
    panic!("generator must not be called");
}

#[test]
fn no_provider_stops_before_request() {
    let outcome = analyze(
        &prefs(AiProvider::None, "sk-unused", ""),
        &journal(),
        now(),
        AnalyzeWindow::Week,
        &Utc,
        &never_called,
    );

    assert_eq!(outcome, AnalyzeOutcome::NoProvider);
    assert_eq!(outcome.message(), "Choose a provider in Settings.");
}

#[test]
fn blank_key_stops_before_request() {
    let outcome = analyze(
        &prefs(AiProvider::Gemini, "sk-other-provider", "   "),
        &journal(),
        now(),
        AnalyzeWindow::Week,
        &Utc,
        &never_called,
    );

    assert_eq!(outcome, AnalyzeOutcome::MissingKey(AiProvider::Gemini));
    assert_eq!(outcome.message(), "Set your Gemini key in Settings.");
}

#[test]
fn summary_request_carries_window_entries_and_model() {
    let seen = RefCell::new(None);
    let generator = |request: &CompletionRequest| -> Result<String, GenerationError> {
        *seen.borrow_mut() = Some(request.clone());
        Ok("You ran a lot.".to_string())
    };

    let outcome = analyze(
        &prefs(AiProvider::OpenAi, " sk-live ", ""),
        &journal(),
        now(),
        AnalyzeWindow::Week,
        &Utc,
        &generator,
    );

    assert_eq!(outcome, AnalyzeOutcome::Summary("You ran a lot.".to_string()));
    let request = seen.into_inner().unwrap();
    assert_eq!(request.provider, AiProvider::OpenAi);
    assert_eq!(request.model, OPENAI_MODEL);
    assert_eq!(request.api_key, "sk-live");
    assert_eq!(request.system_prompt, SYSTEM_PROMPT);
    assert!(request.prompt.starts_with(PROMPT_HEADER));
    assert!(request.prompt.contains("run: 5k before work"));
    assert!(!request.prompt.contains("old:"));
}

#[test]
fn month_window_includes_older_entries() {
    let seen = RefCell::new(String::new());
    let generator = |request: &CompletionRequest| -> Result<String, GenerationError> {
        *seen.borrow_mut() = request.prompt.clone();
        assert_eq!(request.model, GEMINI_MODEL);
        Ok("ok".to_string())
    };

    analyze(
        &prefs(AiProvider::Gemini, "", "gem-key"),
        &journal(),
        now(),
        AnalyzeWindow::Month,
        &Utc,
        &generator,
    );

    assert_eq!(seen.into_inner().lines().count(), 3);
}

#[test]
fn blank_or_empty_response_reads_no_response() {
    let blank = |_: &CompletionRequest| -> Result<String, GenerationError> {
        Ok("  \n".to_string())
    };
    let empty = |_: &CompletionRequest| -> Result<String, GenerationError> {
        Err(GenerationError::EmptyResponse)
    };
    let settings = prefs(AiProvider::OpenAi, "sk-live", "");

    for generator in [&blank as &dyn TextGenerator, &empty] {
        let outcome = analyze(&settings, &journal(), now(), AnalyzeWindow::Week, &Utc, generator);
        assert_eq!(outcome, AnalyzeOutcome::Summary(NO_RESPONSE.to_string()));
    }
}

#[test]
fn transport_failure_is_reported_without_credentials() {
    let key = "sk-proj-0123456789abcdefghij";
    let generator = |request: &CompletionRequest| -> Result<String, GenerationError> {
        Err(GenerationError::Transport(format!(
            "401 Unauthorized: invalid key {} (Bearer {})",
            request.api_key, request.api_key
        )))
    };

    let outcome = analyze(
        &prefs(AiProvider::OpenAi, key, ""),
        &journal(),
        now(),
        AnalyzeWindow::Week,
        &Utc,
        &generator,
    );

    let AnalyzeOutcome::Failed(message) = &outcome else {
        panic!("expected failure, got {outcome:?}");
    };
    assert!(message.starts_with("401 Unauthorized"));
    assert!(!message.contains(key));
    assert!(outcome.message().starts_with("Error: 401 Unauthorized"));
}
