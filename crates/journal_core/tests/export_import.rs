use chrono::{TimeZone, Utc};
use journal_core::db::open_db_in_memory;
use journal_core::transfer::{export_file_name, write_export};
use journal_core::{
    export_json, import_json, parse_import, EntryDraft, EntryStore, SqliteEntryRepository,
    Toggles, TransferError,
};
use serde_json::Value;

fn sample_draft(title: &str) -> EntryDraft {
    EntryDraft {
        title: title.to_string(),
        body: "body text".to_string(),
        mood_emojis: vec!["🙁".to_string(), "😴".to_string()],
        toggles: Toggles::new(true, false, true, false),
        sleep_hours: 6.5,
    }
}

#[test]
fn export_writes_camel_case_records() {
    let conn = open_db_in_memory().unwrap();
    let mut store = EntryStore::open(SqliteEntryRepository::new(&conn)).unwrap();
    let created_at = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
    store.add_entry(sample_draft("export me"), created_at).unwrap();

    let json = export_json(&store.snapshot().entries).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    let record = &value.as_array().unwrap()[0];

    assert_eq!(record["createdAt"], created_at.timestamp_millis());
    assert_eq!(record["title"], "export me");
    assert_eq!(record["moodEmojis"][0], "🙁");
    assert_eq!(record["moodRating"], 2);
    assert_eq!(record["toggleX"], true);
    assert_eq!(record["toggleY"], false);
    assert_eq!(record["sleepHours"], 6.5);
    assert!(record.get("id").is_none());
}

#[test]
fn unrated_entries_omit_mood_rating() {
    let conn = open_db_in_memory().unwrap();
    let mut store = EntryStore::open(SqliteEntryRepository::new(&conn)).unwrap();
    store
        .add_entry(EntryDraft::default(), Utc::now())
        .unwrap();

    let json = export_json(&store.snapshot().entries).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    assert!(value[0].get("moodRating").is_none());
}

#[test]
fn export_then_import_preserves_content_with_new_ids() {
    let source_conn = open_db_in_memory().unwrap();
    let mut source = EntryStore::open(SqliteEntryRepository::new(&source_conn)).unwrap();
    let base = Utc.with_ymd_and_hms(2025, 2, 3, 4, 5, 6).unwrap();
    source.add_entry(sample_draft("one"), base).unwrap();
    source
        .add_entry(sample_draft("two"), base + chrono::Duration::milliseconds(1))
        .unwrap();

    let mut buffer = Vec::new();
    write_export(&mut buffer, &source.snapshot().entries).unwrap();
    let json = String::from_utf8(buffer).unwrap();

    let target_conn = open_db_in_memory().unwrap();
    let mut target = EntryStore::open(SqliteEntryRepository::new(&target_conn)).unwrap();
    assert_eq!(import_json(&mut target, &json).unwrap(), 2);

    let exported = &source.snapshot().entries;
    let imported = &target.snapshot().entries;
    assert_eq!(imported.len(), exported.len());
    for (source_entry, copy) in exported.iter().zip(imported.iter()) {
        assert_ne!(source_entry.id, copy.id);
        assert_eq!(source_entry.created_at, copy.created_at);
        assert_eq!(source_entry.title, copy.title);
        assert_eq!(source_entry.body, copy.body);
        assert_eq!(source_entry.mood_emojis, copy.mood_emojis);
        assert_eq!(source_entry.mood_rating, copy.mood_rating);
        assert_eq!(source_entry.toggles, copy.toggles);
        assert_eq!(source_entry.sleep_hours, copy.sleep_hours);
    }
}

#[test]
fn reimporting_the_same_payload_duplicates_entries() {
    let conn = open_db_in_memory().unwrap();
    let mut store = EntryStore::open(SqliteEntryRepository::new(&conn)).unwrap();
    let json = r#"[{"createdAt": 1700000000000, "title": "dup"}]"#;

    import_json(&mut store, json).unwrap();
    import_json(&mut store, json).unwrap();

    let entries = &store.snapshot().entries;
    assert_eq!(entries.len(), 2);
    assert_ne!(entries[0].id, entries[1].id);
}

#[test]
fn missing_fields_take_defaults() {
    let entries = parse_import(r#"[{"createdAt": 1700000000000}]"#).unwrap();

    let entry = &entries[0];
    assert_eq!(entry.created_at.timestamp_millis(), 1_700_000_000_000);
    assert_eq!(entry.title, "");
    assert_eq!(entry.body, "");
    assert!(entry.mood_emojis.is_empty());
    assert_eq!(entry.mood_rating, None);
    assert_eq!(entry.toggles, Toggles::default());
    assert_eq!(entry.sleep_hours, 0.0);
}

#[test]
fn explicit_nulls_take_defaults() {
    let json = r#"[{"createdAt": 0, "title": null, "moodEmojis": null, "sleepHours": null}]"#;
    let entries = parse_import(json).unwrap();

    assert_eq!(entries[0].title, "");
    assert!(entries[0].mood_emojis.is_empty());
    assert_eq!(entries[0].sleep_hours, 0.0);
}

#[test]
fn top_level_null_and_empty_array_import_nothing() {
    assert!(parse_import("null").unwrap().is_empty());
    assert!(parse_import("[]").unwrap().is_empty());

    let conn = open_db_in_memory().unwrap();
    let mut store = EntryStore::open(SqliteEntryRepository::new(&conn)).unwrap();
    assert_eq!(import_json(&mut store, "null").unwrap(), 0);
}

#[test]
fn record_without_created_at_is_rejected() {
    let err = parse_import(r#"[{"title": "no time"}]"#).unwrap_err();
    assert!(matches!(err, TransferError::Json(_)));
}

#[test]
fn non_array_payload_is_rejected() {
    let err = parse_import(r#"{"createdAt": 1}"#).unwrap_err();
    assert!(matches!(err, TransferError::Json(_)));
}

#[test]
fn unrepresentable_timestamp_is_rejected() {
    let json = format!(r#"[{{"createdAt": 0}}, {{"createdAt": {}}}]"#, i64::MAX);
    let err = parse_import(&json).unwrap_err();
    assert!(matches!(
        err,
        TransferError::InvalidTimestamp { index: 1, value } if value == i64::MAX
    ));
}

#[test]
fn invalid_record_aborts_whole_import() {
    let conn = open_db_in_memory().unwrap();
    let mut store = EntryStore::open(SqliteEntryRepository::new(&conn)).unwrap();
    let json = r#"[
        {"createdAt": 1700000000000, "title": "fine"},
        {"createdAt": 1700000000001, "sleepHours": -2.0}
    ]"#;

    let err = import_json(&mut store, json).unwrap_err();

    assert!(matches!(err, TransferError::InvalidRecord { index: 1, .. }));
    assert!(store.snapshot().entries.is_empty());
    assert_eq!(store.snapshot().version, 1);
}

#[test]
fn out_of_range_rating_is_rejected() {
    let err = parse_import(r#"[{"createdAt": 1, "moodRating": 9}]"#).unwrap_err();
    assert!(matches!(err, TransferError::InvalidRecord { index: 0, .. }));
}

#[test]
fn export_file_name_embeds_millis() {
    let now = Utc.timestamp_millis_opt(1_712_345_678_901).unwrap();
    assert_eq!(export_file_name(now), "journal_export_1712345678901.json");
}

#[test]
fn import_stores_ids_issued_by_parsing() {
    let conn = open_db_in_memory().unwrap();
    let mut store = EntryStore::open(SqliteEntryRepository::new(&conn)).unwrap();
    let parsed = parse_import(
        r#"[{"createdAt": 1700000000000, "title": "a"}, {"createdAt": 1700000000001}]"#,
    )
    .unwrap();
    assert_ne!(parsed[0].id, parsed[1].id);

    assert_eq!(store.import_entries(&parsed).unwrap(), 2);

    let mut stored = store
        .snapshot()
        .entries
        .iter()
        .map(|entry| entry.id)
        .collect::<Vec<_>>();
    let mut issued = parsed.iter().map(|entry| entry.id).collect::<Vec<_>>();
    stored.sort();
    issued.sort();
    assert_eq!(stored, issued);

    // The same parsed batch again collides on identity and rolls back whole.
    assert!(store.import_entries(&parsed).is_err());
    assert_eq!(store.snapshot().entries.len(), 2);
}
