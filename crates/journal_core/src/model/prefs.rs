//! Application preference model.
//!
//! # Invariants
//! - Enum variants persist by ordinal; unknown ordinals decode to the default.
//! - There are always exactly [`QUICK_EMOJI_SLOTS`] quick emoji slots.

use serde::{Deserialize, Serialize};

pub const QUICK_EMOJI_SLOTS: usize = 5;

pub const DEFAULT_QUICK_EMOJIS: [&str; QUICK_EMOJI_SLOTS] = ["😀", "🙂", "😐", "🙁", "😴"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

/// External text-generation provider used by journal analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiProvider {
    #[default]
    None,
    OpenAi,
    Gemini,
}

impl ThemeMode {
    pub fn ordinal(self) -> u32 {
        match self {
            Self::System => 0,
            Self::Light => 1,
            Self::Dark => 2,
        }
    }

    pub fn from_ordinal(value: u32) -> Self {
        match value {
            1 => Self::Light,
            2 => Self::Dark,
            _ => Self::System,
        }
    }
}

impl AiProvider {
    pub fn ordinal(self) -> u32 {
        match self {
            Self::None => 0,
            Self::OpenAi => 1,
            Self::Gemini => 2,
        }
    }

    pub fn from_ordinal(value: u32) -> Self {
        match value {
            1 => Self::OpenAi,
            2 => Self::Gemini,
            _ => Self::None,
        }
    }

    /// Display label used in settings and user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
        }
    }
}

/// Snapshot of every persisted preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPrefs {
    pub theme: ThemeMode,
    pub require_biometric: bool,
    pub openai_key: String,
    pub gemini_key: String,
    pub provider: AiProvider,
    pub quick_emojis: [String; QUICK_EMOJI_SLOTS],
}

impl Default for AppPrefs {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            require_biometric: false,
            openai_key: String::new(),
            gemini_key: String::new(),
            provider: AiProvider::default(),
            quick_emojis: DEFAULT_QUICK_EMOJIS.map(str::to_string),
        }
    }
}

impl AppPrefs {
    /// Returns the credential configured for `provider`.
    pub fn key_for(&self, provider: AiProvider) -> &str {
        match provider {
            AiProvider::None => "",
            AiProvider::OpenAi => self.openai_key.as_str(),
            AiProvider::Gemini => self.gemini_key.as_str(),
        }
    }
}
