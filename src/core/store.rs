//! Store handle for the durable character roster.
//!
//! A `Store` is a logical container rooted at one directory on local disk.
//! The directory holds the roster database and its audit trail, nothing else.
//! Opening a store that does not exist yet creates it; the only way `open`
//! fails is when the directory itself cannot be created or accessed.

use crate::core::db;
use crate::core::error::CharbinderError;
use std::fs;
use std::path::{Path, PathBuf};

/// Handle to one roster store. Operations take the handle by reference and
/// open their own short-lived connection through the broker, so holding a
/// `Store` keeps nothing open.
#[derive(Debug, Clone)]
pub struct Store {
    /// Absolute path to the store root directory.
    pub root: PathBuf,
}

impl Store {
    /// Open (creating if absent) the store rooted at `root`.
    pub fn open(root: &Path) -> Result<Store, CharbinderError> {
        fs::create_dir_all(root).map_err(|e| {
            CharbinderError::StorageUnavailable(format!(
                "cannot create store directory {}: {}",
                root.display(),
                e
            ))
        })?;
        db::initialize_roster_db(root)?;
        Ok(Store {
            root: root.to_path_buf(),
        })
    }
}

/// Default store root: `$CHARBINDER_HOME`, else `$HOME/.charbinder/data`.
pub fn default_root() -> Result<PathBuf, CharbinderError> {
    if let Some(dir) = std::env::var_os("CHARBINDER_HOME") {
        return Ok(PathBuf::from(dir));
    }
    match std::env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home).join(".charbinder").join("data")),
        None => Err(CharbinderError::StorageUnavailable(
            "neither CHARBINDER_HOME nor HOME is set".to_string(),
        )),
    }
}
