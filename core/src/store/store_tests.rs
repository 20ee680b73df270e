//! Tests for the record store
//!
//! Every test works in its own temp directory; nothing touches the real data file.

use chrono::{NaiveDate, NaiveDateTime};
use tempfile::{TempDir, tempdir};

use super::{LoadOutcome, RecordSet, RecordStore, StoreError, backup_filename, export_json, write_backup};
use crate::game_data::catalogue;
use crate::respawn::{RespawnStatus, StatusKind};

fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
        .unwrap()
        .and_hms_opt(h, mi, s)
        .unwrap()
}

fn store_in(dir: &TempDir) -> RecordStore {
    RecordStore::new(dir.path().join("boss_data.json"))
}

fn assert_all_unrecorded(records: &RecordSet) {
    let names: Vec<_> = records.iter().map(|r| r.boss_name).collect();
    let expected: Vec<_> = catalogue().map(|b| b.name).collect();
    assert_eq!(names, expected);
    assert!(records.iter().all(|r| r.last_killed.is_none()));
}

#[test]
fn missing_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let loaded = store_in(&dir).load();

    assert_eq!(loaded.outcome, LoadOutcome::MissingUsedDefaults);
    assert_all_unrecorded(&loaded.records);
    assert_eq!(loaded.records, RecordSet::defaults());
}

#[test]
fn empty_file_yields_defaults() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "  \n").unwrap();

    let loaded = store.load();
    assert_eq!(loaded.outcome, LoadOutcome::MissingUsedDefaults);
    assert_all_unrecorded(&loaded.records);
}

#[test]
fn malformed_json_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{ \"佩爾利斯\": { \"respawn_minutes\": 120, ").unwrap();

    let loaded = store.load();
    assert!(matches!(
        loaded.outcome,
        LoadOutcome::CorruptFellBackToDefaults { .. }
    ));
    assert_all_unrecorded(&loaded.records);
}

#[test]
fn wrong_shape_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);

    for content in ["[1, 2, 3]", "\"hello\"", "{\"佩爾利斯\": 5}", "{\"佩爾利斯\": \"x\"}"] {
        std::fs::write(store.path(), content).unwrap();
        let loaded = store.load();
        assert!(
            matches!(loaded.outcome, LoadOutcome::CorruptFellBackToDefaults { .. }),
            "content {content:?} gave {:?}",
            loaded.outcome
        );
        assert_all_unrecorded(&loaded.records);
    }
}

#[test]
fn unreadable_path_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    // A directory where the file should be cannot be read as text
    let store = RecordStore::new(dir.path());

    let loaded = store.load();
    assert!(matches!(
        loaded.outcome,
        LoadOutcome::UnreadableFellBackToDefaults { .. }
    ));
    assert_all_unrecorded(&loaded.records);
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);

    let mut records = RecordSet::defaults();
    records.record_kill("佩爾利斯", at(2025, 8, 11, 16, 30, 0)).unwrap();
    records.record_kill("拉何", at(2025, 8, 10, 1, 2, 3)).unwrap();

    store.save(&records).unwrap();
    let loaded = store.load();

    assert_eq!(
        loaded.outcome,
        LoadOutcome::Loaded {
            unknown: vec![],
            missing: vec![],
        }
    );
    assert_eq!(loaded.records, records);
    assert_eq!(
        loaded.records.get("拉何").unwrap().last_killed.as_deref(),
        Some("2025-08-10T01:02:03")
    );
}

#[test]
fn corrupt_timestamp_survives_round_trip() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        r#"{"佩爾利斯": {"respawn_minutes": 120, "last_killed": "last tuesday"}}"#,
    )
    .unwrap();

    let loaded = store.load();
    let record = loaded.records.get("佩爾利斯").unwrap();
    assert_eq!(record.last_killed.as_deref(), Some("last tuesday"));
    assert_eq!(
        record.status(at(2025, 8, 11, 0, 0, 0)),
        RespawnStatus::Corrupted {
            raw: "last tuesday".to_string()
        }
    );

    // Saving keeps the raw value for an operator to inspect
    store.save(&loaded.records).unwrap();
    assert_eq!(store.load().records, loaded.records);
}

#[test]
fn bad_field_types_only_affect_their_record() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        r#"{
            "佩爾利斯": {"respawn_minutes": 120, "last_killed": "2025-08-11T16:30:00"},
            "巴實那": {"respawn_minutes": 150, "last_killed": 42},
            "采爾圖巴": {"respawn_minutes": "three hours", "last_killed": "2025-08-11T10:00:00"},
            "潘納洛德": {"respawn_minutes": -5, "last_killed": null},
            "安庫拉": {"respawn_minutes": 0}
        }"#,
    )
    .unwrap();

    let loaded = store.load();
    assert!(loaded.outcome.is_loaded(), "got {:?}", loaded.outcome);
    let now = at(2025, 8, 11, 17, 0, 0);

    let valid = loaded.records.get("佩爾利斯").unwrap();
    assert_eq!(valid.last_killed.as_deref(), Some("2025-08-11T16:30:00"));

    let numeric = loaded.records.get("巴實那").unwrap();
    assert_eq!(
        numeric.status(now),
        RespawnStatus::Corrupted {
            raw: "42".to_string()
        }
    );

    let bad_interval = loaded.records.get("采爾圖巴").unwrap();
    assert_eq!(bad_interval.respawn_minutes, 180);
    assert_eq!(bad_interval.status(now).kind(), StatusKind::Ready);

    assert_eq!(loaded.records.get("潘納洛德").unwrap().respawn_minutes, 180);
    assert!(loaded.records.get("潘納洛德").unwrap().last_killed.is_none());
    assert_eq!(loaded.records.get("安庫拉").unwrap().respawn_minutes, 210);
}

#[test]
fn load_reconciles_key_set_with_catalogue() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        r#"{
            "佩爾利斯": {"respawn_minutes": 120, "last_killed": "2025-08-11T16:30:00"},
            "Retired Boss": {"respawn_minutes": 60, "last_killed": null}
        }"#,
    )
    .unwrap();

    let loaded = store.load();
    let LoadOutcome::Loaded { unknown, missing } = &loaded.outcome else {
        panic!("expected loaded, got {:?}", loaded.outcome);
    };
    assert_eq!(unknown, &vec!["Retired Boss".to_string()]);
    assert_eq!(missing.len(), catalogue().len() - 1);
    assert!(!missing.contains(&"佩爾利斯".to_string()));

    assert_eq!(loaded.records.len(), catalogue().len());
    assert!(loaded.records.get("Retired Boss").is_none());
    assert_eq!(
        loaded.records.get("佩爾利斯").unwrap().last_killed.as_deref(),
        Some("2025-08-11T16:30:00")
    );
}

#[test]
fn catalogue_interval_wins_over_stored_interval() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(
        store.path(),
        r#"{"佩爾利斯": {"respawn_minutes": 5, "last_killed": null}}"#,
    )
    .unwrap();

    let loaded = store.load();
    assert_eq!(loaded.records.get("佩爾利斯").unwrap().respawn_minutes, 120);
}

#[test]
fn reset_clears_every_record() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);

    let mut records = RecordSet::defaults();
    for boss in catalogue().take(5) {
        records.record_kill(boss.name, at(2025, 8, 11, 12, 0, 0)).unwrap();
    }
    store.save(&records).unwrap();
    assert_eq!(store.load().records.recorded_count(), 5);

    let reset = store.reset_to_defaults().unwrap();
    assert_all_unrecorded(&reset);

    let loaded = store.load();
    assert!(loaded.outcome.is_loaded());
    assert_all_unrecorded(&loaded.records);
}

#[test]
fn save_failure_is_reported() {
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, "x").unwrap();

    let store = RecordStore::new(blocker.join("boss_data.json"));
    let mut records = RecordSet::defaults();
    records.record_kill("巴實那", at(2025, 8, 11, 12, 0, 0)).unwrap();

    let err = store.save(&records).unwrap_err();
    assert!(matches!(err, StoreError::CreateDir { .. }));

    // Caller's copy is untouched
    assert!(records.get("巴實那").unwrap().last_killed.is_some());
}

#[test]
fn failed_save_leaves_previous_file_intact() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);

    let mut records = RecordSet::defaults();
    records.record_kill("巴實那", at(2025, 8, 11, 12, 0, 0)).unwrap();
    store.save(&records).unwrap();

    // Directory in place of the target makes the final rename fail
    let blocked = RecordStore::new(dir.path().join("blocked"));
    std::fs::create_dir(blocked.path()).unwrap();
    assert!(matches!(
        blocked.save(&RecordSet::defaults()),
        Err(StoreError::Persist { .. })
    ));

    assert_eq!(store.load().records, records);
}

#[test]
fn unknown_boss_is_rejected() {
    let mut records = RecordSet::defaults();
    let err = records
        .record_kill("Queen Ant", at(2025, 8, 11, 12, 0, 0))
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownBoss { ref name } if name == "Queen Ant"));
    assert!(records.clear("Queen Ant").is_err());
    assert_eq!(records, RecordSet::defaults());
}

#[test]
fn clear_single_and_all() {
    let mut records = RecordSet::defaults();
    records.record_kill("佩爾利斯", at(2025, 8, 11, 12, 0, 0)).unwrap();
    records.record_kill("巴實那", at(2025, 8, 11, 12, 0, 0)).unwrap();

    records.clear("佩爾利斯").unwrap();
    assert!(records.get("佩爾利斯").unwrap().last_killed.is_none());
    assert_eq!(records.recorded_count(), 1);

    records.clear_all();
    assert_eq!(records.recorded_count(), 0);
    assert_eq!(records.len(), catalogue().len());
}

#[test]
fn export_matches_persisted_format() {
    let dir = tempdir().unwrap();
    let store = store_in(&dir);

    let mut records = RecordSet::defaults();
    records.record_kill("佩爾利斯", at(2025, 8, 11, 16, 30, 0)).unwrap();
    store.save(&records).unwrap();

    let exported = export_json(&records).unwrap();
    let on_disk = std::fs::read_to_string(store.path()).unwrap();
    assert_eq!(exported, on_disk);

    // Catalogue order, unescaped names, two-space indent
    assert!(exported.starts_with(
        "{\n  \"佩爾利斯\": {\n    \"respawn_minutes\": 120,\n    \"last_killed\": \"2025-08-11T16:30:00\"\n  },\n  \"巴實那\": {\n    \"respawn_minutes\": 150,\n    \"last_killed\": null\n  }"
    ));
}

#[test]
fn backup_written_with_timestamped_name() {
    let dir = tempdir().unwrap();
    let now = at(2025, 8, 11, 16, 30, 5);
    assert_eq!(backup_filename(now), "boss_backup_20250811_163005.json");

    let mut records = RecordSet::defaults();
    records.record_kill("佩爾利斯", at(2025, 8, 11, 14, 0, 0)).unwrap();

    let path = write_backup(&records, &dir.path().join("backups"), now).unwrap();
    assert_eq!(path, dir.path().join("backups").join("boss_backup_20250811_163005.json"));

    let restored = RecordStore::new(&path).load();
    assert_eq!(restored.records, records);
}
