//! Entry use-case service.
//!
//! # Responsibility
//! - Provide stable create/replace/delete/undo entry points for core callers.
//! - Project calendar todos from entries and generate demo data.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - `mood_rating` is derived once, when a draft becomes an entry.
//! - Undo never reuses an id; `created_at` is preserved.
//! - Service APIs never bypass repository validation.

use crate::metrics::range::{local_date, local_midnight, DateRange};
use crate::model::entry::{EntryDraft, EntryId, JournalEntry, Toggles};
use crate::model::todo::TodoItem;
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::{info, warn};
use rand::Rng;

/// Use-case service wrapper for journal entries.
pub struct EntryService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> EntryService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an entry from editor input at `now`.
    ///
    /// # Contract
    /// - Derives `mood_rating` from the primary emoji.
    /// - Returns the created stable entry ID.
    pub fn add_entry(&self, draft: EntryDraft, now: DateTime<Utc>) -> RepoResult<EntryId> {
        let entry = JournalEntry::from_draft(draft, now);
        let id = self.repo.create_entry(&entry)?;
        info!(
            "event=entry_create module=service status=ok emojis={} rated={}",
            entry.mood_emojis.len(),
            entry.mood_rating.is_some()
        );
        Ok(id)
    }

    /// Replaces an existing entry by id.
    ///
    /// The stored `mood_rating` is kept as given even when `mood_emojis`
    /// changed; ratings are frozen at creation.
    pub fn replace_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        self.repo.replace_entry(entry)
    }

    pub fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        self.repo.get_entry(id)
    }

    /// Lists every entry, newest first.
    pub fn list_entries(&self) -> RepoResult<Vec<JournalEntry>> {
        self.repo.list_entries()
    }

    /// Permanently deletes an entry and returns it for a one-shot undo.
    pub fn delete_entry(&self, id: EntryId) -> RepoResult<JournalEntry> {
        let entry = self.repo.get_entry(id)?.ok_or(RepoError::NotFound(id))?;
        self.repo.delete_entry(id)?;
        info!("event=entry_delete module=service status=ok");
        Ok(entry)
    }

    /// Re-creates a deleted entry under a new identity.
    pub fn restore_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId> {
        let restored = entry.with_fresh_id();
        let id = self.repo.create_entry(&restored)?;
        info!("event=entry_restore module=service status=ok");
        Ok(id)
    }

    /// Inserts entries in one transaction, all or nothing.
    ///
    /// Ids are taken as given; [`crate::transfer::parse_import`] already
    /// issues a fresh id per record.
    pub fn import_entries(&self, entries: &[JournalEntry]) -> RepoResult<usize> {
        let count = self.repo.create_entries(entries)?;
        info!("event=entry_import module=service status=ok count={count}");
        Ok(count)
    }

    /// Deletes every entry.
    pub fn clear_all(&self) -> RepoResult<usize> {
        let count = self.repo.clear_entries()?;
        warn!("event=entry_clear module=service status=ok count={count}");
        Ok(count)
    }

    /// Writes one demo entry per day of `range`, stamped at local midnight.
    ///
    /// Ratings are uniform in `1..=5`, toggles are fair coin flips and sleep is
    /// uniform in `[4.5, 9.0)` hours.
    pub fn generate_dummy<T: TimeZone, G: Rng>(
        &self,
        range: DateRange,
        tz: &T,
        rng: &mut G,
    ) -> RepoResult<usize> {
        let entries = range
            .days()
            .map(|date| {
                let mut entry = JournalEntry::new(local_midnight(date, tz));
                entry.mood_rating = Some(rng.random_range(1..=5));
                entry.toggles = Toggles::new(
                    rng.random(),
                    rng.random(),
                    rng.random(),
                    rng.random(),
                );
                entry.sleep_hours = rng.random_range(4.5..9.0);
                entry
            })
            .collect::<Vec<_>>();
        self.repo.create_entries(&entries)
    }

    /// Todos on a local date; see [`todos_on`].
    pub fn todos_on<T: TimeZone>(&self, date: NaiveDate, tz: &T) -> RepoResult<Vec<TodoItem>> {
        Ok(todos_on(&self.repo.list_entries()?, date, tz))
    }

    /// Adds a todo stamped at local midnight of `date`.
    pub fn add_todo<T: TimeZone>(
        &self,
        date: NaiveDate,
        text: &str,
        tz: &T,
    ) -> RepoResult<EntryId> {
        let text = text.trim();
        if text.is_empty() {
            return Err(RepoError::BlankTodo);
        }
        let mut entry = JournalEntry::new(local_midnight(date, tz));
        entry.title = text.to_string();
        self.repo.create_entry(&entry)
    }

    /// Flips the done flag of a todo and returns the new state.
    pub fn toggle_todo(&self, id: EntryId) -> RepoResult<bool> {
        let mut entry = self.repo.get_entry(id)?.ok_or(RepoError::NotFound(id))?;
        entry.toggles.x = !entry.toggles.x;
        self.repo.replace_entry(&entry)?;
        Ok(entry.toggles.x)
    }
}

/// Projects the todos of a local date from `entries`, keeping their order.
pub fn todos_on<T: TimeZone>(entries: &[JournalEntry], date: NaiveDate, tz: &T) -> Vec<TodoItem> {
    entries
        .iter()
        .filter(|entry| local_date(&entry.created_at, tz) == date)
        .filter_map(|entry| TodoItem::from_entry(entry, date))
        .collect()
}
