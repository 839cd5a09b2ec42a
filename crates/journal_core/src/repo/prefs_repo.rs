//! Preference repository over the `preferences` key/value table.
//!
//! # Invariants
//! - Missing keys decode to [`AppPrefs::default`] values.
//! - Quick emoji slot indexes are clamped to `0..QUICK_EMOJI_SLOTS`.
//! - Credential values are never logged.

use crate::model::prefs::{AiProvider, AppPrefs, ThemeMode, QUICK_EMOJI_SLOTS};
use crate::repo::entry_repo::RepoResult;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

const KEY_THEME: &str = "theme";
const KEY_BIOMETRIC: &str = "bio";
const KEY_OPENAI: &str = "openai_key";
const KEY_GEMINI: &str = "gemini_key";
const KEY_PROVIDER: &str = "provider";
const KEY_QUICK_EMOJIS: [&str; QUICK_EMOJI_SLOTS] =
    ["emoji_1", "emoji_2", "emoji_3", "emoji_4", "emoji_5"];

/// Repository interface for application preferences.
pub trait PreferencesRepository {
    fn load(&self) -> RepoResult<AppPrefs>;
    fn set_theme(&self, theme: ThemeMode) -> RepoResult<()>;
    fn set_biometric(&self, required: bool) -> RepoResult<()>;
    fn set_openai_key(&self, key: &str) -> RepoResult<()>;
    fn set_gemini_key(&self, key: &str) -> RepoResult<()>;
    fn set_provider(&self, provider: AiProvider) -> RepoResult<()>;
    /// Updates one quick emoji slot; out-of-range indexes hit the nearest slot.
    fn set_quick_emoji(&self, index: usize, emoji: &str) -> RepoResult<()>;
}

/// SQLite-backed preference repository.
pub struct SqlitePreferencesRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePreferencesRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read(&self, key: &str) -> RepoResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO preferences (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        debug!("event=prefs_write module=prefs status=ok key={key}");
        Ok(())
    }

    fn read_ordinal(&self, key: &str) -> RepoResult<u32> {
        Ok(self
            .read(key)?
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(0))
    }
}

impl PreferencesRepository for SqlitePreferencesRepository<'_> {
    fn load(&self) -> RepoResult<AppPrefs> {
        let defaults = AppPrefs::default();

        let mut quick_emojis = defaults.quick_emojis.clone();
        for (slot, key) in quick_emojis.iter_mut().zip(KEY_QUICK_EMOJIS) {
            if let Some(value) = self.read(key)? {
                *slot = value;
            }
        }

        Ok(AppPrefs {
            theme: ThemeMode::from_ordinal(self.read_ordinal(KEY_THEME)?),
            require_biometric: self.read(KEY_BIOMETRIC)?.as_deref() == Some("1"),
            openai_key: self.read(KEY_OPENAI)?.unwrap_or(defaults.openai_key),
            gemini_key: self.read(KEY_GEMINI)?.unwrap_or(defaults.gemini_key),
            provider: AiProvider::from_ordinal(self.read_ordinal(KEY_PROVIDER)?),
            quick_emojis,
        })
    }

    fn set_theme(&self, theme: ThemeMode) -> RepoResult<()> {
        self.write(KEY_THEME, &theme.ordinal().to_string())
    }

    fn set_biometric(&self, required: bool) -> RepoResult<()> {
        self.write(KEY_BIOMETRIC, if required { "1" } else { "0" })
    }

    fn set_openai_key(&self, key: &str) -> RepoResult<()> {
        self.write(KEY_OPENAI, key)
    }

    fn set_gemini_key(&self, key: &str) -> RepoResult<()> {
        self.write(KEY_GEMINI, key)
    }

    fn set_provider(&self, provider: AiProvider) -> RepoResult<()> {
        self.write(KEY_PROVIDER, &provider.ordinal().to_string())
    }

    fn set_quick_emoji(&self, index: usize, emoji: &str) -> RepoResult<()> {
        let slot = index.min(QUICK_EMOJI_SLOTS - 1);
        self.write(KEY_QUICK_EMOJIS[slot], emoji)
    }
}
