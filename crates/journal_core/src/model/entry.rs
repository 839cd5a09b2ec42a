//! Journal entry domain model.
//!
//! # Responsibility
//! - Define the canonical record written by the editor, import and generators.
//! - Validate entry invariants before persistence and after reads.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - `mood_emojis` holds at most [`MAX_MOOD_EMOJIS`] tokens.
//! - `sleep_hours` is finite and non-negative; `0.0` means "not set".
//! - `mood_rating`, when present, lies in `1..=5`.

use crate::model::mood::mood_rating_from_emojis;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a journal entry.
pub type EntryId = Uuid;

/// Maximum number of mood emojis one entry may carry.
pub const MAX_MOOD_EMOJIS: usize = 3;

/// Lowest and highest valid mood rating.
pub const MOOD_RATING_RANGE: std::ops::RangeInclusive<u8> = 1..=5;

/// The four independent activity markers attached to every entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Toggles {
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub w: bool,
}

impl Toggles {
    pub fn new(x: bool, y: bool, z: bool, w: bool) -> Self {
        Self { x, y, z, w }
    }
}

/// Canonical journal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    /// Absolute creation instant; the only temporal anchor of an entry.
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub body: String,
    /// Selection order; the first emoji is the primary mood.
    pub mood_emojis: Vec<String>,
    /// Frozen at creation from the primary emoji.
    pub mood_rating: Option<u8>,
    pub toggles: Toggles,
    /// `0.0` is the "not set" sentinel.
    pub sleep_hours: f64,
}

/// Editor input for a new entry.
///
/// The draft carries no id and no rating: both are assigned when the draft
/// becomes a [`JournalEntry`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    pub title: String,
    pub body: String,
    pub mood_emojis: Vec<String>,
    pub toggles: Toggles,
    pub sleep_hours: f64,
}

impl JournalEntry {
    /// Creates an empty entry at `created_at` with a generated id.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
            title: String::new(),
            body: String::new(),
            mood_emojis: Vec::new(),
            mood_rating: None,
            toggles: Toggles::default(),
            sleep_hours: 0.0,
        }
    }

    /// Builds an entry from editor input.
    ///
    /// `mood_rating` is derived here, from the primary emoji, and nowhere else.
    pub fn from_draft(draft: EntryDraft, created_at: DateTime<Utc>) -> Self {
        let mood_rating = mood_rating_from_emojis(&draft.mood_emojis);
        Self {
            id: Uuid::new_v4(),
            created_at,
            title: draft.title,
            body: draft.body,
            mood_emojis: draft.mood_emojis,
            mood_rating,
            toggles: draft.toggles,
            sleep_hours: draft.sleep_hours,
        }
    }

    /// Returns a copy carrying a fresh id, used by undo and import paths.
    pub fn with_fresh_id(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    /// Whether the entry recorded a sleep value.
    pub fn has_sleep(&self) -> bool {
        self.sleep_hours > 0.0
    }

    /// Validates entry invariants.
    ///
    /// # Errors
    /// - [`EntryValidationError::NilId`] for a nil id.
    /// - [`EntryValidationError::TooManyMoodEmojis`] past [`MAX_MOOD_EMOJIS`].
    /// - [`EntryValidationError::InvalidSleepHours`] for negative or non-finite values.
    /// - [`EntryValidationError::MoodRatingOutOfRange`] outside `1..=5`.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id.is_nil() {
            return Err(EntryValidationError::NilId);
        }
        if self.mood_emojis.len() > MAX_MOOD_EMOJIS {
            return Err(EntryValidationError::TooManyMoodEmojis {
                count: self.mood_emojis.len(),
            });
        }
        if !self.sleep_hours.is_finite() || self.sleep_hours < 0.0 {
            return Err(EntryValidationError::InvalidSleepHours(self.sleep_hours));
        }
        if let Some(rating) = self.mood_rating {
            if !MOOD_RATING_RANGE.contains(&rating) {
                return Err(EntryValidationError::MoodRatingOutOfRange(rating));
            }
        }
        Ok(())
    }
}

/// Entry invariant violations.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryValidationError {
    NilId,
    TooManyMoodEmojis { count: usize },
    InvalidSleepHours(f64),
    MoodRatingOutOfRange(u8),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "entry id must not be nil"),
            Self::TooManyMoodEmojis { count } => write!(
                f,
                "entry carries {count} mood emojis; at most {MAX_MOOD_EMOJIS} are allowed"
            ),
            Self::InvalidSleepHours(value) => {
                write!(f, "sleep_hours must be finite and >= 0, got {value}")
            }
            Self::MoodRatingOutOfRange(value) => {
                write!(f, "mood_rating must be within 1..=5, got {value}")
            }
        }
    }
}

impl Error for EntryValidationError {}
