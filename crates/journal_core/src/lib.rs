//! Core domain logic for the journal app.
//! This crate is the single source of truth for entry invariants, storage
//! and statistics; UI layers call in through `journal_ffi`.

pub mod analyze;
pub mod db;
pub mod logging;
pub mod metrics;
pub mod model;
pub mod repo;
pub mod service;
pub mod transfer;

pub use analyze::prompt::AnalyzeWindow;
pub use analyze::provider::{CompletionRequest, GenerationError, TextGenerator};
pub use analyze::{analyze, AnalyzeOutcome};
pub use logging::{default_log_level, init_logging, logging_status};
pub use metrics::aggregate::{aggregate_days, DayAggregate, ToggleCounts};
pub use metrics::cache::AggregateCache;
pub use metrics::range::{local_date, local_midnight, DateRange};
pub use metrics::series::{ChartMode, ChartSeries, SeriesKind};
pub use model::entry::{EntryDraft, EntryId, EntryValidationError, JournalEntry, Toggles};
pub use model::mood::{mood_rating_from_emojis, toggle_emoji};
pub use model::prefs::{AiProvider, AppPrefs, ThemeMode};
pub use model::todo::TodoItem;
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use repo::prefs_repo::{PreferencesRepository, SqlitePreferencesRepository};
pub use service::entry_service::EntryService;
pub use service::entry_store::{EntrySnapshot, EntryStore};
pub use transfer::{export_json, import_json, parse_import, EntryRecord, TransferError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
