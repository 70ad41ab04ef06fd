//! Core data models for the alias document
//!
//! The whole alias table is persisted as one JSON document. Field names
//! are camelCase on disk so the file stays readable by the hook scripts
//! that share it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format tag written on every save.
pub const DOCUMENT_VERSION: &str = "1.0";

/// The entire persisted unit: every alias plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AliasDocument {
    /// Format tag, opaque to readers
    #[serde(default = "default_version")]
    pub version: String,

    /// Alias name to record
    pub aliases: BTreeMap<String, AliasRecord>,

    /// Recomputed on every save
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

/// A single alias entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasRecord {
    /// The session this alias points at (opaque to the store)
    pub session_path: String,

    /// Optional human label
    #[serde(default)]
    pub title: Option<String>,

    /// When the alias was first created. Never changed afterwards.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// When the record was last mutated
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AliasRecord {
    /// The timestamp used for recency ordering.
    ///
    /// Falls back to `created_at` when `updated_at` is missing. A record
    /// with neither yields `None`, which orders before any timestamp.
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }
}

/// Document-level bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Number of aliases at the last successful save
    #[serde(default)]
    pub total_count: usize,

    /// Time of the last successful save
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl AliasDocument {
    /// Creates an empty document stamped with `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            version: DOCUMENT_VERSION.to_string(),
            aliases: BTreeMap::new(),
            metadata: DocumentMetadata {
                total_count: 0,
                last_updated: Some(now),
            },
        }
    }
}

fn default_version() -> String {
    DOCUMENT_VERSION.to_string()
}

/// A flattened view of one alias, as returned by queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasEntry {
    /// The alias name
    #[serde(rename = "alias")]
    pub name: String,
    pub session_path: String,
    pub title: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AliasEntry {
    /// Builds an entry from a map key and its record.
    pub fn from_record(name: &str, record: &AliasRecord) -> Self {
        Self {
            name: name.to_string(),
            session_path: record.session_path.clone(),
            title: record.title.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }

    /// Same ordering key as [`AliasRecord::recency`].
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.updated_at.or(self.created_at)
    }
}
