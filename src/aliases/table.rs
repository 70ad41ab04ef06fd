//! Mutating alias operations.
//!
//! Each operation validates its inputs, loads the document, applies the
//! change in memory, and performs exactly one atomic save.

use serde::Serialize;
use serde_json::Value;

use super::validate::{
    normalize_title, normalize_title_value, validate_alias_name, validate_session_path,
};
use super::{AliasError, AliasStore};
use crate::storage::clock::not_before;
use crate::storage::AliasRecord;

/// Result of [`AliasStore::set_alias`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOutcome {
    pub alias: String,
    pub session_path: String,
    pub title: Option<String>,
    /// True if the alias did not exist before this call
    pub is_new: bool,
}

/// Result of [`AliasStore::delete_alias`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub alias: String,
    pub deleted_session_path: String,
}

/// Result of [`AliasStore::rename_alias`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameOutcome {
    pub old_alias: String,
    pub new_alias: String,
    pub session_path: String,
}

/// Result of [`AliasStore::update_alias_title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleOutcome {
    pub alias: String,
    pub title: Option<String>,
}

impl AliasStore {
    /// Creates an alias, or repoints an existing one.
    ///
    /// An existing alias keeps its `created_at`; its session path and
    /// title are replaced and `updated_at` is refreshed. An empty title
    /// is stored as `None`.
    pub fn set_alias(
        &self,
        name: &str,
        session_path: &str,
        title: Option<&str>,
    ) -> Result<SetOutcome, AliasError> {
        validate_alias_name(name)?;
        validate_session_path(session_path)?;
        let title = normalize_title(title);

        let mut doc = self.load();
        let now = self.now();

        let is_new = match doc.aliases.get_mut(name) {
            Some(record) => {
                record.session_path = session_path.to_string();
                record.title = title.clone();
                record.updated_at = Some(not_before(now, record.updated_at));
                false
            }
            None => {
                doc.aliases.insert(
                    name.to_string(),
                    AliasRecord {
                        session_path: session_path.to_string(),
                        title: title.clone(),
                        created_at: Some(now),
                        updated_at: Some(now),
                    },
                );
                true
            }
        };

        if !self.save(&mut doc) {
            return Err(AliasError::SaveFailed);
        }

        tracing::debug!("Set alias '{}' -> {} (new: {})", name, session_path, is_new);
        Ok(SetOutcome {
            alias: name.to_string(),
            session_path: session_path.to_string(),
            title,
            is_new,
        })
    }

    /// Removes an alias.
    pub fn delete_alias(&self, name: &str) -> Result<DeleteOutcome, AliasError> {
        let mut doc = self.load();

        let record = doc
            .aliases
            .remove(name)
            .ok_or_else(|| AliasError::NotFound(name.to_string()))?;

        if !self.save(&mut doc) {
            return Err(AliasError::SaveFailed);
        }

        tracing::debug!("Deleted alias '{}'", name);
        Ok(DeleteOutcome {
            alias: name.to_string(),
            deleted_session_path: record.session_path,
        })
    }

    /// Moves an alias to a new name.
    ///
    /// Session path, title and `created_at` carry over unchanged;
    /// `updated_at` is refreshed. Renaming onto a different existing alias
    /// fails with [`AliasError::AlreadyExists`]. If the save fails the
    /// rename is undone and [`AliasError::RolledBack`] is returned.
    pub fn rename_alias(&self, old_name: &str, new_name: &str) -> Result<RenameOutcome, AliasError> {
        let mut doc = self.load();

        if !doc.aliases.contains_key(old_name) {
            return Err(AliasError::NotFound(old_name.to_string()));
        }
        validate_alias_name(new_name)?;
        if new_name != old_name && doc.aliases.contains_key(new_name) {
            return Err(AliasError::AlreadyExists(new_name.to_string()));
        }

        let original = doc
            .aliases
            .remove(old_name)
            .ok_or_else(|| AliasError::NotFound(old_name.to_string()))?;
        let mut moved = original.clone();
        moved.updated_at = Some(not_before(self.now(), original.updated_at));
        let session_path = moved.session_path.clone();
        doc.aliases.insert(new_name.to_string(), moved);

        if let Err(reason) = self.try_save(&mut doc) {
            doc.aliases.remove(new_name);
            doc.aliases.insert(old_name.to_string(), original);
            tracing::warn!("Rename '{}' -> '{}' rolled back: {}", old_name, new_name, reason);
            return Err(AliasError::RolledBack(reason));
        }

        tracing::debug!("Renamed alias '{}' -> '{}'", old_name, new_name);
        Ok(RenameOutcome {
            old_alias: old_name.to_string(),
            new_alias: new_name.to_string(),
            session_path,
        })
    }

    /// Replaces an alias title. `None` or `""` clears it.
    pub fn update_alias_title(
        &self,
        name: &str,
        title: Option<&str>,
    ) -> Result<TitleOutcome, AliasError> {
        let value = title.map_or(Value::Null, |t| Value::String(t.to_string()));
        self.update_alias_title_value(name, &value)
    }

    /// Replaces an alias title from untyped input.
    ///
    /// Accepts a JSON string or null; an empty string clears the title.
    /// Any other JSON value fails with a `NotString` validation error.
    pub fn update_alias_title_value(
        &self,
        name: &str,
        title: &Value,
    ) -> Result<TitleOutcome, AliasError> {
        let mut doc = self.load();
        let now = self.now();

        let record = doc
            .aliases
            .get_mut(name)
            .ok_or_else(|| AliasError::NotFound(name.to_string()))?;
        let title = normalize_title_value(title)?;

        record.title = title.clone();
        record.updated_at = Some(not_before(now, record.updated_at));

        if !self.save(&mut doc) {
            return Err(AliasError::SaveFailed);
        }

        Ok(TitleOutcome {
            alias: name.to_string(),
            title,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliases::ValidationError;
    use crate::storage::FixedClock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    /// Creates an alias store in a temporary directory.
    fn create_test_store() -> (AliasStore, tempfile::TempDir) {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = AliasStore::open(dir.path().join("session-aliases.json"));
        (store, dir)
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    /// A store over `dir` whose clock reads `time`.
    fn store_at(dir: &tempfile::TempDir, time: DateTime<Utc>) -> AliasStore {
        AliasStore::with_clock(dir.path().join("session-aliases.json"), FixedClock(time))
    }

    /// Makes every future save fail by replacing the store's parent
    /// directory with a regular file.
    fn break_storage(dir: &tempfile::TempDir) -> AliasStore {
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").expect("write blocker");
        AliasStore::open(blocker.join("session-aliases.json"))
    }

    #[test]
    fn test_set_alias_new_then_update() {
        let (store, _dir) = create_test_store();

        let first = store
            .set_alias("proj-a", "/s/1", Some("Proj A"))
            .expect("first set");
        assert!(first.is_new);

        let second = store.set_alias("proj-a", "/s/2", None).expect("second set");
        assert!(!second.is_new);

        let resolved = store.resolve_alias("proj-a").expect("resolves");
        assert_eq!(resolved.session_path, "/s/2");
        assert_eq!(resolved.title, None, "Omitted title should clear");
    }

    #[test]
    fn test_set_alias_preserves_created_at() {
        let dir = tempdir().expect("tempdir");

        store_at(&dir, at(0)).set_alias("work", "/s/1", None).expect("set");
        store_at(&dir, at(10)).set_alias("work", "/s/2", None).expect("update");

        let entry = store_at(&dir, at(20)).resolve_alias("work").expect("resolves");
        assert_eq!(entry.created_at, Some(at(0)));
        assert_eq!(entry.updated_at, Some(at(10)));
    }

    #[test]
    fn test_set_alias_updated_at_never_goes_backwards() {
        let dir = tempdir().expect("tempdir");

        store_at(&dir, at(30)).set_alias("work", "/s/1", None).expect("set");
        store_at(&dir, at(5)).set_alias("work", "/s/2", None).expect("update");

        let entry = store_at(&dir, at(40)).resolve_alias("work").expect("resolves");
        assert_eq!(entry.updated_at, Some(at(30)));
    }

    #[test]
    fn test_set_alias_empty_title_is_null() {
        let (store, _dir) = create_test_store();

        let outcome = store.set_alias("work", "/s/1", Some("")).expect("set");

        assert_eq!(outcome.title, None);
        assert_eq!(store.resolve_alias("work").expect("resolves").title, None);
    }

    #[test]
    fn test_set_alias_rejects_invalid_input() {
        let (store, _dir) = create_test_store();

        let err = store.set_alias("LIST", "/s/1", None).expect_err("reserved");
        assert!(err.to_string().contains("reserved"));

        assert_eq!(
            store.set_alias("", "/s/1", None),
            Err(AliasError::Invalid(ValidationError::EmptyName))
        );
        assert_eq!(
            store.set_alias("bad name", "/s/1", None),
            Err(AliasError::Invalid(ValidationError::InvalidChars))
        );
        assert_eq!(
            store.set_alias("work", "  ", None),
            Err(AliasError::Invalid(ValidationError::EmptyPath))
        );
        assert!(!store.path().exists(), "Rejected input must not write");
    }

    #[test]
    fn test_set_alias_save_failure() {
        let dir = tempdir().expect("tempdir");
        let store = break_storage(&dir);

        assert_eq!(
            store.set_alias("work", "/s/1", None),
            Err(AliasError::SaveFailed)
        );
    }

    #[test]
    fn test_delete_alias() {
        let (store, _dir) = create_test_store();
        store.set_alias("work", "/s/1", None).expect("set");

        let outcome = store.delete_alias("work").expect("delete");
        assert_eq!(outcome.deleted_session_path, "/s/1");
        assert!(store.resolve_alias("work").is_none());

        assert_eq!(
            store.delete_alias("work"),
            Err(AliasError::NotFound("work".to_string()))
        );
    }

    #[test]
    fn test_rename_alias_moves_record() {
        let dir = tempdir().expect("tempdir");
        store_at(&dir, at(0))
            .set_alias("old", "/s/1", Some("Title"))
            .expect("set");

        let outcome = store_at(&dir, at(15))
            .rename_alias("old", "new")
            .expect("rename");
        assert_eq!(outcome.session_path, "/s/1");

        let store = store_at(&dir, at(20));
        assert!(store.resolve_alias("old").is_none());
        let entry = store.resolve_alias("new").expect("renamed");
        assert_eq!(entry.session_path, "/s/1");
        assert_eq!(entry.title.as_deref(), Some("Title"));
        assert_eq!(entry.created_at, Some(at(0)));
        assert_eq!(entry.updated_at, Some(at(15)));
    }

    #[test]
    fn test_rename_alias_onto_existing_fails() {
        let (store, _dir) = create_test_store();
        store.set_alias("a", "/s/a", None).expect("set a");
        store.set_alias("b", "/s/b", None).expect("set b");
        let before = store.load().aliases;

        assert_eq!(
            store.rename_alias("a", "b"),
            Err(AliasError::AlreadyExists("b".to_string()))
        );
        assert_eq!(store.load().aliases, before, "Both aliases must be unchanged");
    }

    #[test]
    fn test_rename_alias_errors() {
        let (store, _dir) = create_test_store();
        store.set_alias("a", "/s/a", None).expect("set");

        assert_eq!(
            store.rename_alias("missing", "x"),
            Err(AliasError::NotFound("missing".to_string()))
        );
        assert_eq!(
            store.rename_alias("a", "help"),
            Err(AliasError::Invalid(ValidationError::Reserved("help".to_string())))
        );
        assert!(store.resolve_alias("a").is_some());
    }

    #[test]
    fn test_rename_alias_to_same_name() {
        let (store, _dir) = create_test_store();
        store.set_alias("a", "/s/a", None).expect("set");

        store.rename_alias("a", "a").expect("self rename");

        assert_eq!(store.load().aliases.len(), 1);
        assert!(store.resolve_alias("a").is_some());
    }

    #[test]
    fn test_rename_alias_save_failure_rolls_back() {
        let dir = tempdir().expect("tempdir");
        let store = AliasStore::open(dir.path().join("aliases").join("session-aliases.json"));
        store.set_alias("old", "/s/1", None).expect("set");
        let before = fs::read(store.path()).expect("read");

        // A directory squatting on the backup path makes the save fail
        // after staging, before anything is replaced.
        fs::create_dir(format!("{}.bak", store.path().display())).expect("mkdir");

        let err = store.rename_alias("old", "new").expect_err("save fails");
        assert!(matches!(err, AliasError::RolledBack(_)));
        assert!(err.to_string().starts_with("rolled back: failed to write alias file"));
        assert_ne!(err, AliasError::RolledBack(AliasError::SaveFailed.to_string()));

        assert_eq!(fs::read(store.path()).expect("read"), before);
        assert!(store.resolve_alias("old").is_some());
        assert!(store.resolve_alias("new").is_none());
    }

    #[test]
    fn test_update_alias_title() {
        let (store, _dir) = create_test_store();
        store.set_alias("work", "/s/1", Some("Old")).expect("set");

        let outcome = store
            .update_alias_title("work", Some("New"))
            .expect("retitle");
        assert_eq!(outcome.title.as_deref(), Some("New"));
        assert_eq!(
            store.resolve_alias("work").expect("resolves").title.as_deref(),
            Some("New")
        );

        store.update_alias_title("work", Some("")).expect("clear");
        assert_eq!(store.resolve_alias("work").expect("resolves").title, None);
    }

    #[test]
    fn test_update_alias_title_value_rejects_non_string() {
        let (store, _dir) = create_test_store();
        store.set_alias("work", "/s/1", Some("Keep")).expect("set");

        assert_eq!(
            store.update_alias_title_value("work", &json!(42)),
            Err(AliasError::Invalid(ValidationError::NotString))
        );
        assert_eq!(
            store.resolve_alias("work").expect("resolves").title.as_deref(),
            Some("Keep")
        );

        store
            .update_alias_title_value("work", &json!(null))
            .expect("null clears");
        assert_eq!(store.resolve_alias("work").expect("resolves").title, None);
    }

    #[test]
    fn test_update_alias_title_missing() {
        let (store, _dir) = create_test_store();

        assert_eq!(
            store.update_alias_title("ghost", Some("x")),
            Err(AliasError::NotFound("ghost".to_string()))
        );
    }
}
