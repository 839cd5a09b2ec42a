//! Credential redaction for provider error messages.

use once_cell::sync::Lazy;
use regex::Regex;

const REDACTED: &str = "[REDACTED]";

const SECRET_PATTERN_SOURCES: [&str; 4] = [
    r"(?i)(bearer\s+)[A-Za-z0-9_\-\.]{8,}",
    r#"(?i)((?:api[_-]?)?key\s*[:=]\s*["']?)[A-Za-z0-9_\-\.]{8,}"#,
    r"\bsk-[A-Za-z0-9_\-]{16,}\b",
    r"\bAIza[0-9A-Za-z_\-]{30,}\b",
];

static SECRET_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    SECRET_PATTERN_SOURCES
        .into_iter()
        .map(|pattern| Regex::new(pattern).expect("valid secret regex"))
        .collect()
});

/// Replaces credential-looking substrings and any literal `secrets`.
pub fn redact_secrets(message: &str, secrets: &[&str]) -> String {
    let mut redacted = message.to_string();
    for secret in secrets.iter().filter(|secret| !secret.trim().is_empty()) {
        redacted = redacted.replace(secret, REDACTED);
    }
    for pattern in SECRET_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |caps: &regex::Captures<'_>| {
                let prefix = caps.get(1).map_or("", |m| m.as_str());
                format!("{prefix}{REDACTED}")
            })
            .into_owned();
    }
    redacted
}
