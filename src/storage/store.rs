//! Crash-safe persistence for the alias document.
//!
//! The document is always written whole. A save stages the new contents in
//! a sibling temp file, copies the current file to `<path>.bak`, then
//! renames the staged file over the target. Readers either see the old
//! document or the new one, never a partial write.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::{NamedTempFile, PersistError};

use super::clock::{Clock, SystemClock};
use super::models::{AliasDocument, AliasRecord, DocumentMetadata, DOCUMENT_VERSION};

/// Suffix appended to the document path for the transient backup.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Suffix of the staging file created next to the document.
const STAGING_SUFFIX: &str = ".tmp";

/// Reasons a stored document could not be used.
///
/// Never surfaced to callers: every variant collapses into the default
/// document in [`DocumentStore::load`].
#[derive(Debug, thiserror::Error)]
enum LoadError {
    #[error("failed to read alias file: {0}")]
    Io(#[from] io::Error),

    #[error("alias file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("alias file has an invalid shape: {0}")]
    Shape(&'static str),
}

/// Reasons a save did not complete.
#[derive(Debug, thiserror::Error)]
enum SaveError {
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write alias file: {0}")]
    Io(#[from] io::Error),
}

/// Moves a staged file onto the target path.
type PersistFn = fn(NamedTempFile, &Path) -> Result<(), PersistError>;

fn persist_staging(staging: NamedTempFile, target: &Path) -> Result<(), PersistError> {
    staging.persist(target).map(|_| ())
}

/// Durable load/save of one JSON document at a fixed path.
pub struct DocumentStore {
    path: PathBuf,
    clock: Box<dyn Clock + Send + Sync>,
    persist: PersistFn,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl DocumentStore {
    /// Creates a store for the document at `path` using wall-clock time.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_clock(path, SystemClock)
    }

    /// Creates a store that reads the current time from `clock`.
    pub fn with_clock(path: impl Into<PathBuf>, clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            path: path.into(),
            clock: Box::new(clock),
            persist: persist_staging,
        }
    }

    /// Swaps the rename primitive used by the replace step.
    #[cfg(test)]
    fn with_persist(mut self, persist: PersistFn) -> Self {
        self.persist = persist;
        self
    }

    /// Path of the persisted document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the transient backup written during a save.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(BACKUP_SUFFIX);
        PathBuf::from(name)
    }

    /// Current time according to the store's clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.now()
    }

    /// Loads the document, or a fresh empty one.
    ///
    /// A missing, unreadable, unparseable, or wrongly shaped file all
    /// yield the default document. Corrupt state is treated as empty
    /// state. Inside a well-shaped document a malformed record only costs
    /// its own bad fields, or itself if it has no session path.
    pub fn load(&self) -> AliasDocument {
        match self.read_document() {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::debug!("No alias file at {:?}, starting empty", self.path);
                AliasDocument::new(self.now())
            }
            Err(e) => {
                tracing::warn!("Ignoring alias file {:?}: {}", self.path, e);
                AliasDocument::new(self.now())
            }
        }
    }

    fn read_document(&self) -> Result<Option<AliasDocument>, LoadError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut object = match serde_json::from_str::<Value>(&content)? {
            Value::Object(object) => object,
            _ => return Err(LoadError::Shape("document is not an object")),
        };
        let raw_aliases = match object.remove("aliases") {
            Some(Value::Object(aliases)) => aliases,
            _ => return Err(LoadError::Shape("missing aliases object")),
        };

        // Past the shape check, bad fields are dropped one at a time.
        let version = object
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(DOCUMENT_VERSION)
            .to_string();
        let metadata = object
            .remove("metadata")
            .and_then(|m| serde_json::from_value::<DocumentMetadata>(m).ok())
            .unwrap_or_default();

        let mut aliases = BTreeMap::new();
        for (name, raw) in &raw_aliases {
            match parse_record(name, raw) {
                Some(record) => {
                    aliases.insert(name.clone(), record);
                }
                None => tracing::warn!("Skipping alias '{}': no usable sessionPath", name),
            }
        }

        Ok(Some(AliasDocument {
            version,
            aliases,
            metadata,
        }))
    }

    /// Saves the document atomically.
    ///
    /// Stamps `version`, `metadata.total_count` and `metadata.last_updated`
    /// before writing. Returns `false` if anything failed, in which case the
    /// previously persisted file is untouched.
    pub fn save(&self, doc: &mut AliasDocument) -> bool {
        self.try_save(doc).is_ok()
    }

    /// Like [`save`](Self::save), but reports why a failed save failed.
    pub fn try_save(&self, doc: &mut AliasDocument) -> Result<(), String> {
        doc.version = DOCUMENT_VERSION.to_string();
        doc.metadata.total_count = doc.aliases.len();
        doc.metadata.last_updated = Some(self.now());
        self.try_write_atomic(doc)
    }

    /// Writes any serializable value to the document path with the same
    /// stage/backup/replace guarantees as [`save`](Self::save).
    pub fn write_atomic<T: Serialize + ?Sized>(&self, value: &T) -> bool {
        self.try_write_atomic(value).is_ok()
    }

    /// Like [`write_atomic`](Self::write_atomic), with the failure reason.
    pub fn try_write_atomic<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), String> {
        match self.try_write(value) {
            Ok(()) => {
                tracing::debug!("Saved alias file {:?}", self.path);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to save alias file {:?}: {}", self.path, e);
                Err(e.to_string())
            }
        }
    }

    fn try_write<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), SaveError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Dropping `staging` on any early return deletes the temp file.
        let mut staging = tempfile::Builder::new()
            .prefix(&format!(".{file_name}."))
            .suffix(STAGING_SUFFIX)
            .tempfile_in(dir)?;
        {
            let mut writer = BufWriter::new(staging.as_file_mut());
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }
        staging.as_file().sync_all()?;

        let backup = self.create_backup()?;

        match self.replace(staging) {
            Ok(()) => {
                if let Some(backup) = backup {
                    if let Err(e) = fs::remove_file(&backup) {
                        tracing::warn!("Failed to remove backup {:?}: {}", backup, e);
                    }
                }
                Ok(())
            }
            Err(e) => {
                if let Some(backup) = backup {
                    self.restore_backup(&backup);
                }
                Err(e)
            }
        }
    }

    /// Copies the current document aside, if there is one.
    fn create_backup(&self) -> Result<Option<PathBuf>, SaveError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let backup = self.backup_path();
        if let Err(e) = fs::copy(&self.path, &backup) {
            let _ = fs::remove_file(&backup);
            return Err(e.into());
        }
        Ok(Some(backup))
    }

    /// Renames the staged file over the target.
    ///
    /// Falls back to remove-then-rename where the platform refuses to
    /// rename over an existing file.
    fn replace(&self, staging: NamedTempFile) -> Result<(), SaveError> {
        match (self.persist)(staging, &self.path) {
            Ok(()) => Ok(()),
            Err(err) if self.path.exists() => {
                tracing::debug!(
                    "Rename over {:?} failed ({}), removing target first",
                    self.path,
                    err.error
                );
                let staging = err.file;
                fs::remove_file(&self.path)?;
                (self.persist)(staging, &self.path).map_err(|e| SaveError::Io(e.error))
            }
            Err(err) => Err(SaveError::Io(err.error)),
        }
    }

    /// Puts the backup back if the target went missing, then drops it.
    fn restore_backup(&self, backup: &Path) {
        if self.path.exists() {
            let _ = fs::remove_file(backup);
            return;
        }

        match fs::rename(backup, &self.path) {
            Ok(()) => tracing::warn!("Restored {:?} from backup", self.path),
            Err(e) => tracing::warn!("Failed to restore {:?} from backup: {}", self.path, e),
        }
    }
}

/// Reads one alias record, salvaging what it can from a malformed one.
///
/// Returns `None` only when there is no non-blank `sessionPath` string.
fn parse_record(name: &str, raw: &Value) -> Option<AliasRecord> {
    if let Ok(record) = AliasRecord::deserialize(raw) {
        if !record.session_path.trim().is_empty() {
            return Some(record);
        }
    }

    let session_path = raw.get("sessionPath")?.as_str()?;
    if session_path.trim().is_empty() {
        return None;
    }
    tracing::warn!("Alias '{}' has malformed fields, keeping what parses", name);

    Some(AliasRecord {
        session_path: session_path.to_string(),
        title: raw.get("title").and_then(Value::as_str).map(str::to_string),
        created_at: raw.get("createdAt").and_then(parse_timestamp),
        updated_at: raw.get("updatedAt").and_then(parse_timestamp),
    })
}

/// RFC 3339, or a bare date/datetime taken as UTC.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    let text = value.as_str()?;
    if let Ok(time) = DateTime::parse_from_rfc3339(text) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(time.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()?
        .and_hms_opt(0, 0, 0)
        .map(|time| time.and_utc())
}
