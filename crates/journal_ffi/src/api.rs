//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level journal functions to Dart via FRB.
//! - Convert core errors into message strings inside response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call opens its own connection to the resolved database path.
//! - Calendar dates cross the boundary as `YYYY-MM-DD` strings and are
//!   interpreted in the device's local time zone.
//! - Credentials never cross the boundary outward; only their presence does.

use chrono::{DateTime, Local, NaiveDate, Utc};
use journal_core::db::open_db;
use journal_core::transfer::export_file_name;
use journal_core::{
    aggregate_days, core_version as core_version_inner, export_json,
    init_logging as init_logging_inner, parse_import, ping as ping_inner, AiProvider, AppPrefs,
    DayAggregate, EntryDraft, EntryId, EntryService, JournalEntry, PreferencesRepository,
    SqliteEntryRepository, SqlitePreferencesRepository, TodoItem, Toggles,
};
use log::warn;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const JOURNAL_DB_FILE_NAME: &str = "journal.sqlite3";
const JOURNAL_DB_PATH_ENV: &str = "JOURNAL_DB_PATH";
static JOURNAL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Entry projection returned to the UI.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryItem {
    pub entry_id: String,
    /// Creation instant in epoch milliseconds.
    pub created_at_ms: i64,
    pub title: String,
    pub body: String,
    pub mood_emojis: Vec<String>,
    pub mood_rating: Option<u8>,
    pub toggle_x: bool,
    pub toggle_y: bool,
    pub toggle_z: bool,
    pub toggle_w: bool,
    pub sleep_hours: f64,
}

/// Entry list envelope, newest entry first.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryListResponse {
    pub ok: bool,
    pub items: Vec<EntryItem>,
    pub message: String,
}

/// Delete envelope carrying the removed entry for undo.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDeleteResponse {
    pub ok: bool,
    pub deleted: Option<EntryItem>,
    pub message: String,
}

/// Generic action response envelope for entry commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Affected entry ID, when the operation targets one entry.
    pub entry_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, entry_id: EntryId) -> Self {
        Self {
            ok: true,
            entry_id: Some(entry_id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            entry_id: None,
            message: message.into(),
        }
    }
}

/// One aggregated day for the charts.
#[derive(Debug, Clone, PartialEq)]
pub struct DayAggregateItem {
    /// Local calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub sleep_hours: f64,
    pub mood: Option<f64>,
    pub toggle_x: u32,
    pub toggle_y: u32,
    pub toggle_z: u32,
    pub toggle_w: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsResponse {
    pub ok: bool,
    pub days: Vec<DayAggregateItem>,
    pub message: String,
}

/// Export envelope carrying the JSON payload and a suggested file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    pub ok: bool,
    pub json: String,
    pub file_name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResponse {
    pub ok: bool,
    pub imported: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub entry_id: String,
    pub date: String,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    pub ok: bool,
    pub items: Vec<TodoItemView>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoToggleResponse {
    pub ok: bool,
    /// Done flag after the toggle; `false` on failure.
    pub done: bool,
    pub message: String,
}

/// Preference snapshot; enum values travel as ordinals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefsResponse {
    pub ok: bool,
    pub theme: u32,
    pub require_biometric: bool,
    pub provider: u32,
    pub provider_label: String,
    pub has_openai_key: bool,
    pub has_gemini_key: bool,
    pub quick_emojis: Vec<String>,
    pub message: String,
}

impl PrefsResponse {
    fn from_prefs(prefs: &AppPrefs) -> Self {
        Self {
            ok: true,
            theme: prefs.theme.ordinal(),
            require_biometric: prefs.require_biometric,
            provider: prefs.provider.ordinal(),
            provider_label: prefs.provider.label().to_string(),
            has_openai_key: !prefs.openai_key.trim().is_empty(),
            has_gemini_key: !prefs.gemini_key.trim().is_empty(),
            quick_emojis: prefs.quick_emojis.to_vec(),
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            theme: 0,
            require_biometric: false,
            provider: 0,
            provider_label: String::new(),
            has_openai_key: false,
            has_gemini_key: false,
            quick_emojis: Vec::new(),
            message: message.into(),
        }
    }
}

/// Creates an entry stamped with the current instant.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - `mood_rating` is derived from the first emoji; callers cannot set it.
/// - Never panics; returns the created entry ID on success.
#[flutter_rust_bridge::frb(sync)]
#[allow(clippy::too_many_arguments)]
pub fn entry_create(
    title: String,
    body: String,
    mood_emojis: Vec<String>,
    toggle_x: bool,
    toggle_y: bool,
    toggle_z: bool,
    toggle_w: bool,
    sleep_hours: f64,
) -> EntryActionResponse {
    let draft = EntryDraft {
        title: title.trim().to_string(),
        body,
        mood_emojis,
        toggles: Toggles::new(toggle_x, toggle_y, toggle_z, toggle_w),
        sleep_hours,
    };
    match with_entry_service(|service| service.add_entry(draft, Utc::now()).map_err(to_message)) {
        Ok(entry_id) => EntryActionResponse::success("Entry saved.", entry_id),
        Err(err) => EntryActionResponse::failure(failed("entry_create", &err)),
    }
}

/// Lists every entry, newest first.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_list() -> EntryListResponse {
    match with_entry_service(|service| service.list_entries().map_err(to_message)) {
        Ok(entries) => EntryListResponse {
            ok: true,
            message: format!("{} entr(ies).", entries.len()),
            items: entries.iter().map(to_entry_item).collect(),
        },
        Err(err) => EntryListResponse {
            ok: false,
            items: Vec::new(),
            message: failed("entry_list", &err),
        },
    }
}

/// Permanently deletes an entry.
///
/// # FFI contract
/// - Unknown or malformed IDs return `ok=false`.
/// - Returns the removed entry; passing it to [`entry_restore`] undoes the delete.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete(entry_id: String) -> EntryDeleteResponse {
    let result = parse_entry_id(&entry_id).and_then(|id| {
        with_entry_service(|service| service.delete_entry(id).map_err(to_message))
    });
    match result {
        Ok(entry) => EntryDeleteResponse {
            ok: true,
            deleted: Some(to_entry_item(&entry)),
            message: "Entry deleted.".to_string(),
        },
        Err(err) => EntryDeleteResponse {
            ok: false,
            deleted: None,
            message: failed("entry_delete", &err),
        },
    }
}

/// Re-creates a deleted entry under a new ID.
///
/// # FFI contract
/// - `created_at_ms`, `mood_rating` and all content are stored as given.
/// - `entry_id` of the item is only checked for shape; the result carries the new ID.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_restore(item: EntryItem) -> EntryActionResponse {
    let result = to_journal_entry(&item).and_then(|entry| {
        with_entry_service(|service| service.restore_entry(&entry).map_err(to_message))
    });
    match result {
        Ok(entry_id) => EntryActionResponse::success("Entry restored.", entry_id),
        Err(err) => EntryActionResponse::failure(failed("entry_restore", &err)),
    }
}

/// Replaces the stored entry with the same ID.
///
/// # FFI contract
/// - Full replace: every field of `item` is written, `mood_rating` included,
///   so editing emojis does not change a stored rating.
/// - Unknown IDs return `ok=false`.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_replace(item: EntryItem) -> EntryActionResponse {
    let result = to_journal_entry(&item).and_then(|entry| {
        with_entry_service(|service| service.replace_entry(&entry).map_err(to_message))?;
        Ok(entry.id)
    });
    match result {
        Ok(entry_id) => EntryActionResponse::success("Entry updated.", entry_id),
        Err(err) => EntryActionResponse::failure(failed("entry_replace", &err)),
    }
}

/// Aggregates entries per local day within `[start_date, end_date]`.
///
/// # FFI contract
/// - Dates are `YYYY-MM-DD`; a reversed range yields no days.
/// - `compact=true` omits days without entries.
#[flutter_rust_bridge::frb(sync)]
pub fn metrics_aggregate(start_date: String, end_date: String, compact: bool) -> MetricsResponse {
    let result = parse_date(&start_date).and_then(|start| {
        let end = parse_date(&end_date)?;
        let entries = with_entry_service(|service| service.list_entries().map_err(to_message))?;
        Ok(aggregate_days(&entries, start, end, compact, &Local))
    });
    match result {
        Ok(days) => MetricsResponse {
            ok: true,
            message: format!("{} day(s).", days.len()),
            days: days.iter().map(to_day_item).collect(),
        },
        Err(err) => MetricsResponse {
            ok: false,
            days: Vec::new(),
            message: failed("metrics_aggregate", &err),
        },
    }
}

/// Serializes every entry as a JSON array of records.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_export_json() -> ExportResponse {
    let now = Utc::now();
    let result = with_entry_service(|service| service.list_entries().map_err(to_message))
        .and_then(|entries| export_json(&entries).map_err(to_message));
    match result {
        Ok(json) => ExportResponse {
            ok: true,
            json,
            file_name: export_file_name(now),
            message: "Export ready.".to_string(),
        },
        Err(err) => ExportResponse {
            ok: false,
            json: String::new(),
            file_name: String::new(),
            message: failed("entries_export_json", &err),
        },
    }
}

/// Appends every record of `json` under fresh IDs, all or nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn entries_import_json(json: String) -> ImportResponse {
    let result = parse_import(&json).map_err(to_message).and_then(|entries| {
        with_entry_service(|service| service.import_entries(&entries).map_err(to_message))
    });
    match result {
        Ok(count) => ImportResponse {
            ok: true,
            imported: u32::try_from(count).unwrap_or(u32::MAX),
            message: format!("Imported {count} entr(ies)."),
        },
        Err(err) => ImportResponse {
            ok: false,
            imported: 0,
            message: failed("entries_import_json", &err),
        },
    }
}

/// Lists the todos of a local date.
#[flutter_rust_bridge::frb(sync)]
pub fn todos_on(date: String) -> TodoListResponse {
    let result = parse_date(&date).and_then(|date| {
        with_entry_service(|service| service.todos_on(date, &Local).map_err(to_message))
    });
    match result {
        Ok(todos) => TodoListResponse {
            ok: true,
            message: format!("{} todo(s).", todos.len()),
            items: todos.iter().map(to_todo_view).collect(),
        },
        Err(err) => TodoListResponse {
            ok: false,
            items: Vec::new(),
            message: failed("todos_on", &err),
        },
    }
}

/// Adds a todo on a local date; blank text is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(date: String, text: String) -> EntryActionResponse {
    let result = parse_date(&date).and_then(|date| {
        with_entry_service(|service| service.add_todo(date, &text, &Local).map_err(to_message))
    });
    match result {
        Ok(entry_id) => EntryActionResponse::success("Todo added.", entry_id),
        Err(err) => EntryActionResponse::failure(failed("todo_add", &err)),
    }
}

/// Flips the done flag of a todo.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(entry_id: String) -> TodoToggleResponse {
    let result = parse_entry_id(&entry_id).and_then(|id| {
        with_entry_service(|service| service.toggle_todo(id).map_err(to_message))
    });
    match result {
        Ok(done) => TodoToggleResponse {
            ok: true,
            done,
            message: if done { "Todo done." } else { "Todo reopened." }.to_string(),
        },
        Err(err) => TodoToggleResponse {
            ok: false,
            done: false,
            message: failed("todo_toggle", &err),
        },
    }
}

/// Loads the persisted preferences.
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_load() -> PrefsResponse {
    match with_connection(|conn| {
        SqlitePreferencesRepository::new(conn)
            .load()
            .map_err(to_message)
    }) {
        Ok(prefs) => PrefsResponse::from_prefs(&prefs),
        Err(err) => PrefsResponse::failure(failed("prefs_load", &err)),
    }
}

/// Selects the analysis provider by ordinal (`0=None, 1=OpenAI, 2=Gemini`).
///
/// # FFI contract
/// - Unknown ordinals are rejected instead of silently mapping to `None`.
/// - Returns the reloaded preferences on success.
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_set_provider(provider: u32) -> PrefsResponse {
    let selected = AiProvider::from_ordinal(provider);
    if selected.ordinal() != provider {
        return PrefsResponse::failure(failed(
            "prefs_set_provider",
            &format!("unknown provider ordinal {provider}"),
        ));
    }
    let result = with_connection(|conn| {
        let repo = SqlitePreferencesRepository::new(conn);
        repo.set_provider(selected).map_err(to_message)?;
        repo.load().map_err(to_message)
    });
    match result {
        Ok(prefs) => PrefsResponse::from_prefs(&prefs),
        Err(err) => PrefsResponse::failure(failed("prefs_set_provider", &err)),
    }
}

fn resolve_journal_db_path() -> PathBuf {
    JOURNAL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(JOURNAL_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(JOURNAL_DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let db_path = resolve_journal_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("journal DB open failed: {err}"))?;
    f(&conn)
}

fn with_entry_service<T>(
    f: impl FnOnce(&EntryService<SqliteEntryRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    with_connection(|conn| f(&EntryService::new(SqliteEntryRepository::new(conn))))
}

fn to_message(err: impl std::fmt::Display) -> String {
    err.to_string()
}

fn failed(operation: &str, err: &str) -> String {
    warn!("event=ffi_call module=ffi status=error op={operation}");
    format!("{operation} failed: {err}")
}

fn parse_entry_id(raw: &str) -> Result<EntryId, String> {
    Uuid::parse_str(raw.trim()).map_err(|_| format!("invalid entry id `{raw}`"))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    raw.trim()
        .parse::<NaiveDate>()
        .map_err(|_| format!("invalid date `{raw}`, expected YYYY-MM-DD"))
}

fn to_entry_item(entry: &JournalEntry) -> EntryItem {
    EntryItem {
        entry_id: entry.id.to_string(),
        created_at_ms: entry.created_at.timestamp_millis(),
        title: entry.title.clone(),
        body: entry.body.clone(),
        mood_emojis: entry.mood_emojis.clone(),
        mood_rating: entry.mood_rating,
        toggle_x: entry.toggles.x,
        toggle_y: entry.toggles.y,
        toggle_z: entry.toggles.z,
        toggle_w: entry.toggles.w,
        sleep_hours: entry.sleep_hours,
    }
}

fn to_journal_entry(item: &EntryItem) -> Result<JournalEntry, String> {
    let created_at = DateTime::<Utc>::from_timestamp_millis(item.created_at_ms)
        .ok_or_else(|| format!("invalid created_at_ms `{}`", item.created_at_ms))?;
    Ok(JournalEntry {
        id: parse_entry_id(&item.entry_id)?,
        created_at,
        title: item.title.trim().to_string(),
        body: item.body.clone(),
        mood_emojis: item.mood_emojis.clone(),
        mood_rating: item.mood_rating,
        toggles: Toggles::new(item.toggle_x, item.toggle_y, item.toggle_z, item.toggle_w),
        sleep_hours: item.sleep_hours,
    })
}

fn to_day_item(day: &DayAggregate) -> DayAggregateItem {
    DayAggregateItem {
        date: day.date.to_string(),
        sleep_hours: day.sleep_hours,
        mood: day.mood,
        toggle_x: day.toggle_counts.x,
        toggle_y: day.toggle_counts.y,
        toggle_z: day.toggle_counts.z,
        toggle_w: day.toggle_counts.w,
    }
}

fn to_todo_view(todo: &TodoItem) -> TodoItemView {
    TodoItemView {
        entry_id: todo.id.to_string(),
        date: todo.date.to_string(),
        text: todo.text.clone(),
        done: todo.done,
    }
}
