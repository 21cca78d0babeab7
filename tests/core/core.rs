use charbinder::core::broker::{BrokerEvent, DbBroker};
use charbinder::core::db;
use charbinder::core::error::CharbinderError;
use charbinder::core::record::{AbilityScores, CharClass, CharacterRecord, Gender, Race};
use charbinder::core::store::Store;
use charbinder::plugins::roster;
use std::fs;
use tempfile::tempdir;

fn sample(name: &str) -> CharacterRecord {
    CharacterRecord::new(
        name.to_string(),
        Race::Elf,
        CharClass::Druid,
        Gender::Woman,
        "120".to_string(),
        AbilityScores::new(10, 14, 12, 13, 15, 8),
    )
}

#[test]
fn store_open_creates_backing_storage() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().join("nested").join("data");

    let store = Store::open(&root).expect("open should create the directory");
    assert!(root.is_dir());
    assert!(db::roster_db_path(&store.root).exists());

    // Opening an existing store is a no-op.
    Store::open(&root).expect("reopen");
}

#[test]
fn db_connect_applies_pragmas() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::open(tmp.path()).expect("open");
    let db_path = db::roster_db_path(&store.root);

    let conn = db::db_connect(&db_path.to_string_lossy()).expect("db connect");
    let fk_on: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .expect("pragma foreign_keys");
    assert_eq!(fk_on, 1);
    let mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .expect("pragma journal_mode");
    assert_eq!(mode.to_lowercase(), "wal");
}

#[test]
fn broker_records_success_and_error_events() {
    let tmp = tempdir().expect("tempdir");
    let store = Store::open(tmp.path()).expect("open");
    let db_path = db::roster_db_path(&store.root);
    let broker = DbBroker::new(&store.root);

    broker
        .with_conn(&db_path, "test.ok", |conn| {
            conn.query_row("SELECT 1", [], |_| Ok(()))?;
            Ok(())
        })
        .expect("success path");

    let result: Result<(), CharbinderError> = broker.with_conn(&db_path, "test.fail", |_| {
        Err(CharbinderError::ValidationError("intentional".to_string()))
    });
    assert!(result.is_err());

    let audit_path = store.root.join("roster.events.jsonl");
    let events: Vec<BrokerEvent> = fs::read_to_string(&audit_path)
        .expect("read audit")
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid broker event json"))
        .collect();
    assert!(events
        .iter()
        .any(|ev| ev.op == "test.ok" && ev.status == "success"));
    assert!(events
        .iter()
        .any(|ev| ev.op == "test.fail" && ev.status == "error"));
    assert!(events.iter().all(|ev| !ev.event_id.is_empty()));
}

#[test]
fn reopened_store_reads_back_identically() {
    let tmp = tempdir().expect("tempdir");
    let root = tmp.path().to_path_buf();

    let record = sample("Elowen");
    {
        let store = Store::open(&root).expect("open");
        roster::create_character(&store, &record).expect("create");
        // Store handle dropped; every operation already closed its connection.
    }

    let store = Store::open(&root).expect("reopen");
    assert_eq!(roster::list_characters(&store).expect("list"), vec!["Elowen"]);
    let loaded = roster::get_character(&store, "Elowen").expect("get");
    assert_eq!(loaded, record);
}
