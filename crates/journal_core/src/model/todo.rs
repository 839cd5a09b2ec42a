//! Calendar todo projection.
//!
//! Todos are not stored separately: an entry with a non-blank title on a
//! local date is a todo on that date, and its `x` toggle is the done flag.

use crate::model::entry::{EntryId, JournalEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: EntryId,
    pub date: NaiveDate,
    pub text: String,
    pub done: bool,
}

impl TodoItem {
    /// Projects an entry onto a todo for `date`, or `None` when the title is blank.
    pub fn from_entry(entry: &JournalEntry, date: NaiveDate) -> Option<Self> {
        if entry.title.trim().is_empty() {
            return None;
        }
        Some(Self {
            id: entry.id,
            date,
            text: entry.title.clone(),
            done: entry.toggles.x,
        })
    }
}
