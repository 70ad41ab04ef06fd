//! Alias table operations and queries.
//!
//! Every call is a complete load/mutate/save cycle against the
//! [`DocumentStore`]. Nothing is cached between calls, so each operation
//! sees whatever is on disk when it starts.
//!
//! # Submodules
//!
//! - `validate` - syntax rules for names, paths, and titles
//! - `table` - create, update, delete, rename, retitle
//! - `query` - resolve, list, reverse lookup, cleanup

pub mod query;
pub mod table;
pub mod validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::config::Config;
use crate::storage::{AliasDocument, Clock, DocumentStore};

pub use query::{CleanupReport, ListOptions, RemovedAlias};
pub use table::{DeleteOutcome, RenameOutcome, SetOutcome, TitleOutcome};
pub use validate::ValidationError;

/// Expected failures of alias operations.
///
/// These are returned, never panicked. The `Display` text is the
/// human-readable error shown to users.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    /// An input failed a syntax rule.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The referenced alias does not exist.
    #[error("Alias '{0}' not found")]
    NotFound(String),

    /// A rename target is already used by a different alias.
    #[error("Alias '{0}' already exists")]
    AlreadyExists(String),

    /// The document could not be persisted. Nothing changed on disk.
    #[error("Failed to save aliases")]
    SaveFailed,

    /// A rename could not be persisted and was undone.
    #[error("rolled back: {0}")]
    RolledBack(String),
}

/// The uniform `{ success, error?, ...fields }` result shape.
///
/// Used where results leave the process, e.g. JSON output.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationReport<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub fields: Option<T>,
}

impl<T: Serialize> From<Result<T, AliasError>> for OperationReport<T> {
    fn from(result: Result<T, AliasError>) -> Self {
        match result {
            Ok(fields) => Self {
                success: true,
                error: None,
                fields: Some(fields),
            },
            Err(e) => Self {
                success: false,
                error: Some(e.to_string()),
                fields: None,
            },
        }
    }
}

/// Alias table backed by one JSON document on disk.
#[derive(Debug)]
pub struct AliasStore {
    file: DocumentStore,
}

impl AliasStore {
    /// Opens the alias table stored at `path`.
    ///
    /// The file is not touched until the first operation.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: DocumentStore::new(path),
        }
    }

    /// Opens the alias table with a custom time source.
    pub fn with_clock(path: impl Into<PathBuf>, clock: impl Clock + Send + Sync + 'static) -> Self {
        Self {
            file: DocumentStore::with_clock(path, clock),
        }
    }

    /// Opens the alias table at the location resolved from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::open(config.aliases_path()?))
    }

    /// Opens the alias table using the default configuration.
    pub fn open_default() -> Result<Self> {
        let config = Config::load()?;
        Self::from_config(&config)
    }

    /// Path of the persisted document.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the current document, or an empty one.
    pub fn load(&self) -> AliasDocument {
        self.file.load()
    }

    /// Saves a whole document atomically. Returns `false` on failure.
    pub fn save(&self, doc: &mut AliasDocument) -> bool {
        self.file.save(doc)
    }

    /// Saves a whole document atomically, returning the failure reason.
    pub fn try_save(&self, doc: &mut AliasDocument) -> Result<(), String> {
        self.file.try_save(doc)
    }

    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.file.now()
    }
}
