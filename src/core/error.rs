use rusqlite;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CharbinderError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("No character named '{0}' exists")]
    NotFound(String),
    #[error("A character named '{0}' already exists")]
    DuplicateName(String),
    #[error("Corrupt archive: {0}")]
    CorruptArchive(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}
