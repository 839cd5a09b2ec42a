//! Portable JSON record shape for exported entries.
//!
//! The shape is independent of the storage schema: keys are camelCase,
//! `createdAt` is epoch milliseconds and every field except `createdAt` may be
//! absent on import.

use crate::model::entry::{JournalEntry, Toggles};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryRecord {
    pub created_at: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub mood_emojis: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_rating: Option<u8>,
    #[serde(default)]
    pub toggle_x: bool,
    #[serde(default)]
    pub toggle_y: bool,
    #[serde(default)]
    pub toggle_z: bool,
    #[serde(default)]
    pub toggle_w: bool,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
}

impl EntryRecord {
    pub fn from_entry(entry: &JournalEntry) -> Self {
        Self {
            created_at: entry.created_at.timestamp_millis(),
            title: Some(entry.title.clone()),
            body: Some(entry.body.clone()),
            mood_emojis: Some(entry.mood_emojis.clone()),
            mood_rating: entry.mood_rating,
            toggle_x: entry.toggles.x,
            toggle_y: entry.toggles.y,
            toggle_z: entry.toggles.z,
            toggle_w: entry.toggles.w,
            sleep_hours: Some(entry.sleep_hours),
        }
    }

    /// Converts the record into an entry.
    ///
    /// Records carry no identity, so every conversion mints a new id; this is
    /// the only place imported entries get one.
    ///
    /// Returns `None` when `createdAt` is outside the representable range.
    pub fn into_entry(self) -> Option<JournalEntry> {
        let created_at = DateTime::<Utc>::from_timestamp_millis(self.created_at)?;
        Some(JournalEntry {
            id: Uuid::new_v4(),
            created_at,
            title: self.title.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            mood_emojis: self.mood_emojis.unwrap_or_default(),
            mood_rating: self.mood_rating,
            toggles: Toggles::new(self.toggle_x, self.toggle_y, self.toggle_z, self.toggle_w),
            sleep_hours: self.sleep_hours.unwrap_or(0.0),
        })
    }
}
