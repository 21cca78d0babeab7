//! Archive codec: one character record in, one opaque byte blob out.
//!
//! The blob is a gzip-compressed tar holding a `manifest.toml` and the
//! backing file of a fresh single-entry store. Wrapping a whole store rather
//! than inventing a bespoke record encoding keeps pack and unpack perfectly
//! symmetric: whatever the roster store can persist, the codec can carry.
//! All scratch directories are temp dirs removed on every exit path.

use crate::core::db;
use crate::core::error::CharbinderError;
use crate::core::record::CharacterRecord;
use crate::core::schemas;
use crate::core::store::Store;
use crate::plugins::roster;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;

/// Bumped when the blob layout changes; readers reject unknown versions.
const ARCHIVE_FORMAT: u32 = 1;
const MANIFEST_NAME: &str = "manifest.toml";

#[derive(Debug, Serialize, Deserialize)]
struct ArchiveManifest {
    format: u32,
    name: String,
    db_sha256: String,
}

pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn corrupt(reason: impl Into<String>) -> CharbinderError {
    CharbinderError::CorruptArchive(reason.into())
}

/// Package the named record from `store` into a transportable blob.
///
/// The record must already exist in the caller's store; drafts that were
/// never persisted cannot be packed.
pub fn pack_character(store: &Store, name: &str) -> Result<Vec<u8>, CharbinderError> {
    let record = roster::get_character(store, name)?;

    let scratch = tempfile::tempdir().map_err(CharbinderError::IoError)?;
    let export = Store::open(scratch.path())?;
    roster::create_character(&export, &record)?;
    // The per-operation connection has closed, so the db file is complete.
    let db_bytes =
        fs::read(db::roster_db_path(&export.root)).map_err(CharbinderError::IoError)?;

    let manifest = ArchiveManifest {
        format: ARCHIVE_FORMAT,
        name: record.name.clone(),
        db_sha256: hash_bytes(&db_bytes),
    };
    let manifest_toml = toml::to_string(&manifest).map_err(|e| {
        CharbinderError::ValidationError(format!("cannot encode archive manifest: {}", e))
    })?;

    let enc = GzEncoder::new(Vec::new(), Compression::default());
    let mut ar = tar::Builder::new(enc);
    append_entry(&mut ar, MANIFEST_NAME, manifest_toml.as_bytes())?;
    append_entry(&mut ar, schemas::ROSTER_DB_NAME, &db_bytes)?;
    let enc = ar.into_inner().map_err(CharbinderError::IoError)?;
    let bytes = enc.finish().map_err(CharbinderError::IoError)?;

    Ok(bytes)
}

fn append_entry<W: Write>(
    ar: &mut tar::Builder<W>,
    name: &str,
    data: &[u8],
) -> Result<(), CharbinderError> {
    let mut header = tar::Header::new_gnu();
    header.set_size(data.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    ar.append_data(&mut header, name, data)
        .map_err(CharbinderError::IoError)
}

/// Reverse of [`pack_character`]: extract the blob, open it as a store, and
/// copy out the single record it must contain.
///
/// Any defect (bad compression, bad tar, bad manifest, hash mismatch, not
/// exactly one record) is `CorruptArchive`. A stream cut off mid-transfer
/// surfaces here the same way.
pub fn unpack_character(bytes: &[u8]) -> Result<(String, CharacterRecord), CharbinderError> {
    let scratch = tempfile::tempdir().map_err(CharbinderError::IoError)?;

    let mut ar = tar::Archive::new(GzDecoder::new(bytes));
    ar.unpack(scratch.path())
        .map_err(|e| corrupt(format!("cannot extract archive: {}", e)))?;

    let manifest_text = fs::read_to_string(scratch.path().join(MANIFEST_NAME))
        .map_err(|e| corrupt(format!("archive has no readable manifest: {}", e)))?;
    let manifest: ArchiveManifest = toml::from_str(&manifest_text)
        .map_err(|e| corrupt(format!("archive manifest is malformed: {}", e)))?;
    if manifest.format != ARCHIVE_FORMAT {
        return Err(corrupt(format!(
            "unsupported archive format {}",
            manifest.format
        )));
    }

    let db_bytes = fs::read(scratch.path().join(schemas::ROSTER_DB_NAME))
        .map_err(|e| corrupt(format!("archive has no store file: {}", e)))?;
    if hash_bytes(&db_bytes) != manifest.db_sha256 {
        return Err(corrupt("store file content hash mismatch"));
    }

    let store = Store::open(scratch.path())
        .map_err(|e| corrupt(format!("extracted store cannot be opened: {}", e)))?;
    let names = roster::list_characters(&store)
        .map_err(|e| corrupt(format!("extracted store cannot be read: {}", e)))?;
    if names.len() != 1 {
        return Err(corrupt(format!(
            "expected exactly one record, found {}",
            names.len()
        )));
    }
    if names[0] != manifest.name {
        return Err(corrupt(format!(
            "manifest names '{}' but store holds '{}'",
            manifest.name, names[0]
        )));
    }

    let record = roster::get_character(&store, &names[0])
        .map_err(|e| corrupt(format!("extracted record is unreadable: {}", e)))?;
    Ok((record.name.clone(), record))
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "codec",
        "version": "0.1.0",
        "description": "Single-record archive packing and unpacking",
        "commands": [],
        "storage": []
    })
}
