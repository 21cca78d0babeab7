//! Centralized database schema definitions for the roster store.
//!
//! Charbinder keeps all durable state in one SQLite database per store root:
//! `roster.db`, a single `characters` table mapping a character's name to its
//! serialized record. The record column is the serde_json encoding of
//! [`crate::core::record::CharacterRecord`]; name is duplicated out of the
//! payload as the primary key so uniqueness is enforced by the database.

pub const ROSTER_DB_NAME: &str = "roster.db";

pub const ROSTER_DB_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS characters (
        name TEXT PRIMARY KEY,
        record TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT
    )
";
