//! Roster subsystem: durable CRUD over the character store.
//!
//! Every operation opens its own connection through the broker and closes it
//! before returning, so the backing file is always flushed when control comes
//! back to the caller. `name` is the primary key; `create` is insert-only and
//! `put` is a full-replacement upsert used by save-after-edit.

use crate::core::broker::DbBroker;
use crate::core::db;
use crate::core::error::CharbinderError;
use crate::core::record::CharacterRecord;
use crate::core::store::Store;
use crate::core::time;
use rusqlite::params;

/// All character names in insertion order.
pub fn list_characters(store: &Store) -> Result<Vec<String>, CharbinderError> {
    let broker = DbBroker::new(&store.root);
    let db_path = db::roster_db_path(&store.root);

    broker.with_conn(&db_path, "roster.list", |conn| {
        let mut stmt = conn.prepare("SELECT name FROM characters ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut names = Vec::new();
        for r in rows {
            names.push(r?);
        }
        Ok(names)
    })
}

pub fn get_character(store: &Store, name: &str) -> Result<CharacterRecord, CharbinderError> {
    let broker = DbBroker::new(&store.root);
    let db_path = db::roster_db_path(&store.root);

    let payload: Option<String> = broker.with_conn(&db_path, "roster.get", |conn| {
        let mut stmt = conn.prepare("SELECT record FROM characters WHERE name = ?1")?;
        let mut rows = stmt.query_map(params![name], |row| row.get::<_, String>(0))?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    })?;

    let payload = payload.ok_or_else(|| CharbinderError::NotFound(name.to_string()))?;
    decode_record(name, &payload)
}

pub fn character_exists(store: &Store, name: &str) -> Result<bool, CharbinderError> {
    let broker = DbBroker::new(&store.root);
    let db_path = db::roster_db_path(&store.root);

    broker.with_conn(&db_path, "roster.exists", |conn| {
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM characters WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    })
}

/// Insert-only write used by the creation flow and the transfer merge. The
/// primary key makes the collision check and the insert one atomic statement.
pub fn create_character(store: &Store, record: &CharacterRecord) -> Result<(), CharbinderError> {
    record.validate()?;
    let payload = encode_record(record)?;
    let broker = DbBroker::new(&store.root);
    let db_path = db::roster_db_path(&store.root);

    let result = broker.with_conn(&db_path, "roster.create", |conn| {
        conn.execute(
            "INSERT INTO characters(name, record, created_at) VALUES(?1, ?2, ?3)",
            params![record.name, payload, time::now_epoch_z()],
        )?;
        Ok(())
    });

    match result {
        Err(CharbinderError::RusqliteError(rusqlite::Error::SqliteFailure(e, _)))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Err(CharbinderError::DuplicateName(record.name.clone()))
        }
        other => other,
    }
}

/// Upsert: overwrites any existing record under the same name.
pub fn put_character(store: &Store, record: &CharacterRecord) -> Result<(), CharbinderError> {
    record.validate()?;
    let payload = encode_record(record)?;
    let broker = DbBroker::new(&store.root);
    let db_path = db::roster_db_path(&store.root);

    broker.with_conn(&db_path, "roster.put", |conn| {
        conn.execute(
            "INSERT INTO characters(name, record, created_at, updated_at)
             VALUES(?1, ?2, ?3, ?3)
             ON CONFLICT(name) DO UPDATE SET record = ?2, updated_at = ?3",
            params![record.name, payload, time::now_epoch_z()],
        )?;
        Ok(())
    })
}

pub fn delete_character(store: &Store, name: &str) -> Result<(), CharbinderError> {
    let broker = DbBroker::new(&store.root);
    let db_path = db::roster_db_path(&store.root);

    let deleted = broker.with_conn(&db_path, "roster.delete", |conn| {
        let n = conn.execute("DELETE FROM characters WHERE name = ?1", params![name])?;
        Ok(n)
    })?;

    if deleted == 0 {
        return Err(CharbinderError::NotFound(name.to_string()));
    }
    Ok(())
}

fn encode_record(record: &CharacterRecord) -> Result<String, CharbinderError> {
    serde_json::to_string(record).map_err(|e| {
        CharbinderError::ValidationError(format!(
            "cannot serialize record '{}': {}",
            record.name, e
        ))
    })
}

fn decode_record(name: &str, payload: &str) -> Result<CharacterRecord, CharbinderError> {
    serde_json::from_str(payload).map_err(|e| {
        CharbinderError::ValidationError(format!("stored record '{}' is unreadable: {}", name, e))
    })
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "roster",
        "version": "0.1.0",
        "description": "Durable character roster",
        "commands": [
            { "name": "list", "description": "List all character names" },
            { "name": "show", "description": "Render one character sheet" },
            { "name": "create", "description": "Create a new character" },
            { "name": "set", "description": "Update character fields" },
            { "name": "delete", "description": "Delete a character permanently" }
        ],
        "storage": ["roster.db", "roster.events.jsonl"]
    })
}
