//! Observable entry store.
//!
//! # Responsibility
//! - Funnel every entry write through one `&mut self` path.
//! - Publish an immutable, versioned snapshot of the full entry list after
//!   each successful write.
//!
//! # Invariants
//! - Snapshot versions strictly increase; the first loaded snapshot is `1`.
//! - A new subscriber receives the current snapshot immediately.
//! - Subscribers whose receiver was dropped are pruned on the next publish.
//! - A committed write is reported as committed even when the follow-up
//!   reload fails; the snapshot then stays stale until the next write or
//!   [`EntryStore::refresh`].

use crate::metrics::range::DateRange;
use crate::model::entry::{EntryDraft, EntryId, JournalEntry};
use crate::model::todo::TodoItem;
use crate::repo::entry_repo::{EntryRepository, RepoResult};
use crate::service::entry_service::{todos_on, EntryService};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use log::{debug, error};
use rand::Rng;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Immutable view of every entry at one point in time, newest first.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrySnapshot {
    pub version: u64,
    pub entries: Vec<JournalEntry>,
}

/// Entry service plus snapshot publication.
pub struct EntryStore<R: EntryRepository> {
    service: EntryService<R>,
    latest: Arc<EntrySnapshot>,
    subscribers: Vec<Sender<Arc<EntrySnapshot>>>,
    stale: bool,
}

impl<R: EntryRepository> EntryStore<R> {
    /// Loads the initial snapshot from `repo`.
    pub fn open(repo: R) -> RepoResult<Self> {
        let service = EntryService::new(repo);
        let entries = service.list_entries()?;
        Ok(Self {
            service,
            latest: Arc::new(EntrySnapshot {
                version: 1,
                entries,
            }),
            subscribers: Vec::new(),
            stale: false,
        })
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<EntrySnapshot> {
        Arc::clone(&self.latest)
    }

    /// Registers a subscriber that receives every future snapshot.
    pub fn subscribe(&mut self) -> Receiver<Arc<EntrySnapshot>> {
        let (sender, receiver) = channel();
        // A fresh receiver is alive, so this send cannot fail.
        let _ = sender.send(self.snapshot());
        self.subscribers.push(sender);
        receiver
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Read-side use cases that do not need a publish.
    pub fn service(&self) -> &EntryService<R> {
        &self.service
    }

    pub fn add_entry(&mut self, draft: EntryDraft, now: DateTime<Utc>) -> RepoResult<EntryId> {
        self.write(|service| service.add_entry(draft, now))
    }

    pub fn replace_entry(&mut self, entry: &JournalEntry) -> RepoResult<()> {
        self.write(|service| service.replace_entry(entry))
    }

    pub fn delete_entry(&mut self, id: EntryId) -> RepoResult<JournalEntry> {
        self.write(|service| service.delete_entry(id))
    }

    pub fn restore_entry(&mut self, entry: &JournalEntry) -> RepoResult<EntryId> {
        self.write(|service| service.restore_entry(entry))
    }

    pub fn import_entries(&mut self, entries: &[JournalEntry]) -> RepoResult<usize> {
        self.write(|service| service.import_entries(entries))
    }

    pub fn clear_all(&mut self) -> RepoResult<usize> {
        self.write(EntryService::clear_all)
    }

    pub fn generate_dummy<T: TimeZone, G: Rng>(
        &mut self,
        range: DateRange,
        tz: &T,
        rng: &mut G,
    ) -> RepoResult<usize> {
        self.write(|service| service.generate_dummy(range, tz, rng))
    }

    pub fn add_todo<T: TimeZone>(
        &mut self,
        date: NaiveDate,
        text: &str,
        tz: &T,
    ) -> RepoResult<EntryId> {
        self.write(|service| service.add_todo(date, text, tz))
    }

    pub fn toggle_todo(&mut self, id: EntryId) -> RepoResult<bool> {
        self.write(|service| service.toggle_todo(id))
    }

    /// Todos of a local date, read from the latest snapshot.
    pub fn todos_on<T: TimeZone>(&self, date: NaiveDate, tz: &T) -> Vec<TodoItem> {
        todos_on(&self.latest.entries, date, tz)
    }

    /// Whether the last reload after a write failed.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    fn write<V>(&mut self, op: impl FnOnce(&EntryService<R>) -> RepoResult<V>) -> RepoResult<V> {
        let value = op(&self.service)?;
        self.publish();
        Ok(value)
    }

    /// Reloads the entry list and publishes it as a new snapshot.
    ///
    /// Recovers a stale store without writing.
    pub fn refresh(&mut self) -> RepoResult<()> {
        let entries = self.service.list_entries().inspect_err(|_| self.stale = true)?;
        self.stale = false;
        let snapshot = Arc::new(EntrySnapshot {
            version: self.latest.version + 1,
            entries,
        });
        self.latest = Arc::clone(&snapshot);
        self.subscribers
            .retain(|subscriber| subscriber.send(Arc::clone(&snapshot)).is_ok());
        debug!(
            "event=snapshot_publish module=store status=ok version={} entries={} subscribers={}",
            snapshot.version,
            snapshot.entries.len(),
            self.subscribers.len()
        );
        Ok(())
    }

    fn publish(&mut self) {
        if let Err(err) = self.refresh() {
            error!(
                "event=snapshot_publish module=store status=error version={} error={err}",
                self.latest.version
            );
        }
    }
}
