use journal_core::db::{open_db, open_db_in_memory};
use journal_core::model::prefs::DEFAULT_QUICK_EMOJIS;
use journal_core::{
    AiProvider, AppPrefs, PreferencesRepository, SqlitePreferencesRepository, ThemeMode,
};
use tempfile::tempdir;

#[test]
fn empty_store_loads_defaults() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferencesRepository::new(&conn);

    let prefs = repo.load().unwrap();

    assert_eq!(prefs, AppPrefs::default());
    assert_eq!(prefs.theme, ThemeMode::System);
    assert_eq!(prefs.provider, AiProvider::None);
    assert!(!prefs.require_biometric);
    assert_eq!(prefs.quick_emojis, DEFAULT_QUICK_EMOJIS.map(str::to_string));
}

#[test]
fn every_setting_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferencesRepository::new(&conn);

    repo.set_theme(ThemeMode::Dark).unwrap();
    repo.set_biometric(true).unwrap();
    repo.set_openai_key("sk-test").unwrap();
    repo.set_gemini_key("AIza-test").unwrap();
    repo.set_provider(AiProvider::Gemini).unwrap();
    repo.set_quick_emoji(2, "🥳").unwrap();

    let prefs = repo.load().unwrap();
    assert_eq!(prefs.theme, ThemeMode::Dark);
    assert!(prefs.require_biometric);
    assert_eq!(prefs.openai_key, "sk-test");
    assert_eq!(prefs.gemini_key, "AIza-test");
    assert_eq!(prefs.provider, AiProvider::Gemini);
    assert_eq!(prefs.key_for(AiProvider::Gemini), "AIza-test");
    assert_eq!(prefs.quick_emojis[2], "🥳");
    assert_eq!(prefs.quick_emojis[0], DEFAULT_QUICK_EMOJIS[0]);
}

#[test]
fn later_write_overwrites_value() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferencesRepository::new(&conn);

    repo.set_provider(AiProvider::OpenAi).unwrap();
    repo.set_provider(AiProvider::None).unwrap();
    repo.set_biometric(true).unwrap();
    repo.set_biometric(false).unwrap();

    let prefs = repo.load().unwrap();
    assert_eq!(prefs.provider, AiProvider::None);
    assert!(!prefs.require_biometric);
}

#[test]
fn quick_emoji_index_is_clamped_to_last_slot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePreferencesRepository::new(&conn);

    repo.set_quick_emoji(42, "🌧").unwrap();

    let prefs = repo.load().unwrap();
    assert_eq!(prefs.quick_emojis[4], "🌧");
    for (slot, default) in prefs.quick_emojis[..4].iter().zip(DEFAULT_QUICK_EMOJIS) {
        assert_eq!(slot, default);
    }
}

#[test]
fn unknown_ordinals_decode_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO preferences (key, value) VALUES ('theme', '9'), ('provider', 'abc');",
    )
    .unwrap();

    let prefs = SqlitePreferencesRepository::new(&conn).load().unwrap();
    assert_eq!(prefs.theme, ThemeMode::System);
    assert_eq!(prefs.provider, AiProvider::None);
}

#[test]
fn preferences_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("journal.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqlitePreferencesRepository::new(&conn);
        repo.set_theme(ThemeMode::Light).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let prefs = SqlitePreferencesRepository::new(&conn).load().unwrap();
    assert_eq!(prefs.theme, ThemeMode::Light);
}
