use crate::core::db;
use crate::core::error;
use crate::core::time;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The DB Broker is the single waist every store operation passes through:
/// it opens a fresh connection, runs the operation, and appends the outcome
/// to the store's audit trail. Connections live exactly as long as one
/// operation, so the backing file is flushed and checkpointed when the
/// operation returns.
pub struct DbBroker {
    audit_log_path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BrokerEvent {
    pub ts: String,
    pub event_id: String,
    pub op: String,
    pub db_id: String,
    pub status: String,
}

impl DbBroker {
    pub fn new(root: &Path) -> Self {
        Self {
            audit_log_path: root.join("roster.events.jsonl"),
        }
    }

    /// Execute a closure with a serialized connection to the specified DB.
    pub fn with_conn<F, R>(
        &self,
        db_path: &Path,
        op_name: &str,
        f: F,
    ) -> Result<R, error::CharbinderError>
    where
        F: FnOnce(&Connection) -> Result<R, error::CharbinderError>,
    {
        // One open handle at a time, process-wide.
        static DB_LOCK: Mutex<()> = Mutex::new(());
        let _lock = DB_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let db_id = db_path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let conn = db::db_connect(&db_path.to_string_lossy())?;

        let result = f(&conn);

        let status = if result.is_ok() { "success" } else { "error" };
        self.log_event(op_name, &db_id, status)?;

        result
    }

    fn log_event(
        &self,
        op: &str,
        db_id: &str,
        status: &str,
    ) -> Result<(), error::CharbinderError> {
        use std::fs::OpenOptions;
        use std::io::Write;

        let ev = BrokerEvent {
            ts: time::now_epoch_z(),
            event_id: time::new_event_id(),
            op: op.to_string(),
            db_id: db_id.to_string(),
            status: status.to_string(),
        };

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.audit_log_path)
            .map_err(error::CharbinderError::IoError)?;

        let line = serde_json::to_string(&ev)
            .map_err(|e| error::CharbinderError::ValidationError(e.to_string()))?;
        writeln!(f, "{}", line).map_err(error::CharbinderError::IoError)?;
        Ok(())
    }
}
