use crate::core::broker::DbBroker;
use crate::core::error;
use crate::core::schemas;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &str) -> Result<Connection, error::CharbinderError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(error::CharbinderError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::CharbinderError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::CharbinderError::RusqliteError)?;
    Ok(conn)
}

pub fn roster_db_path(root: &Path) -> PathBuf {
    root.join(schemas::ROSTER_DB_NAME)
}

pub fn initialize_roster_db(root: &Path) -> Result<(), error::CharbinderError> {
    let db_path = roster_db_path(root);

    let broker = DbBroker::new(root);
    broker.with_conn(&db_path, "roster.init", |conn| {
        conn.execute(schemas::ROSTER_DB_SCHEMA, [])?;
        Ok(())
    })
}
