//! Read-side alias operations and bulk cleanup.

use serde::Serialize;

use super::validate::has_alias_syntax;
use super::AliasStore;
use crate::storage::AliasEntry;

/// Filters for [`AliasStore::list_aliases`].
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Case-insensitive substring matched against name or title
    pub search: Option<String>,
    /// Maximum entries to return. `None` or `Some(0)` means no limit.
    pub limit: Option<usize>,
}

/// An alias dropped by [`AliasStore::cleanup_aliases`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedAlias {
    pub name: String,
    pub session_path: String,
}

/// Result of [`AliasStore::cleanup_aliases`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Number of aliases removed
    pub removed: usize,
    /// Removed plus remaining
    pub total_checked: usize,
    pub removed_aliases: Vec<RemovedAlias>,
}

impl AliasStore {
    /// Looks up an alias by name.
    ///
    /// Returns `None` for empty input, for names with characters outside
    /// `[A-Za-z0-9_-]`, and for unknown names.
    pub fn resolve_alias(&self, name: &str) -> Option<AliasEntry> {
        if !has_alias_syntax(name) {
            return None;
        }

        let doc = self.load();
        doc.aliases
            .get(name)
            .map(|record| AliasEntry::from_record(name, record))
    }

    /// Returns the session path behind `input` if it is an alias, or
    /// `input` itself otherwise.
    pub fn resolve_session_alias(&self, input: &str) -> String {
        self.resolve_alias(input)
            .map(|entry| entry.session_path)
            .unwrap_or_else(|| input.to_string())
    }

    /// Lists aliases, most recently updated first.
    ///
    /// Records without timestamps sort last. Equal timestamps keep map
    /// order.
    pub fn list_aliases(&self, options: &ListOptions) -> Vec<AliasEntry> {
        let doc = self.load();
        let needle = options.search.as_deref().map(str::to_lowercase);

        let mut entries: Vec<AliasEntry> = doc
            .aliases
            .iter()
            .filter(|(name, record)| match &needle {
                Some(needle) => {
                    name.to_lowercase().contains(needle)
                        || record
                            .title
                            .as_ref()
                            .is_some_and(|t| t.to_lowercase().contains(needle))
                }
                None => true,
            })
            .map(|(name, record)| AliasEntry::from_record(name, record))
            .collect();

        entries.sort_by(|a, b| b.recency().cmp(&a.recency()));

        if let Some(limit) = options.limit.filter(|&n| n > 0) {
            entries.truncate(limit);
        }

        entries
    }

    /// Every alias whose session path equals `session_path` exactly.
    pub fn get_aliases_for_session(&self, session_path: &str) -> Vec<AliasEntry> {
        let doc = self.load();
        doc.aliases
            .iter()
            .filter(|(_, record)| record.session_path == session_path)
            .map(|(name, record)| AliasEntry::from_record(name, record))
            .collect()
    }

    /// Removes every alias whose session no longer exists.
    ///
    /// `exists` is called once per alias with its session path. Aliases
    /// for which it returns `Ok(false)` are removed, then the document is
    /// saved once. An `Err` from `exists` is returned as-is and nothing is
    /// saved.
    pub fn cleanup_aliases<F, E>(&self, mut exists: F) -> Result<CleanupReport, E>
    where
        F: FnMut(&str) -> Result<bool, E>,
    {
        let mut doc = self.load();

        let mut doomed = Vec::new();
        for (name, record) in &doc.aliases {
            if !exists(&record.session_path)? {
                doomed.push(RemovedAlias {
                    name: name.clone(),
                    session_path: record.session_path.clone(),
                });
            }
        }

        for removed in &doomed {
            doc.aliases.remove(&removed.name);
        }
        let total_checked = doomed.len() + doc.aliases.len();

        let error = if !doomed.is_empty() && !self.save(&mut doc) {
            Some("Failed to save aliases after cleanup".to_string())
        } else {
            None
        };

        if error.is_none() && !doomed.is_empty() {
            tracing::info!("Cleaned up {} stale aliases", doomed.len());
        }

        Ok(CleanupReport {
            success: error.is_none(),
            error,
            removed: doomed.len(),
            total_checked,
            removed_aliases: doomed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{AliasDocument, AliasRecord, FixedClock};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn create_test_store() -> (AliasStore, tempfile::TempDir) {
        let dir = tempdir().expect("Failed to create temp directory");
        let store = AliasStore::open(dir.path().join("session-aliases.json"));
        (store, dir)
    }

    fn at(minutes: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    /// Writes a document with hand-picked timestamps.
    fn seed(store: &AliasStore, records: &[(&str, &str, Option<&str>, Option<i64>, Option<i64>)]) {
        let mut doc = AliasDocument::new(Utc::now());
        for (name, path, title, created, updated) in records {
            doc.aliases.insert(
                name.to_string(),
                AliasRecord {
                    session_path: path.to_string(),
                    title: title.map(str::to_string),
                    created_at: created.map(at),
                    updated_at: updated.map(at),
                },
            );
        }
        assert!(store.save(&mut doc), "Failed to seed document");
    }

    fn names(entries: &[AliasEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_resolve_alias_fails_closed() {
        let (store, _dir) = create_test_store();
        store.set_alias("work", "/s/1", Some("Work")).expect("set");

        assert!(store.resolve_alias("").is_none());
        assert!(store.resolve_alias("wo rk").is_none());
        assert!(store.resolve_alias("../work").is_none());
        assert!(store.resolve_alias("missing").is_none());

        let entry = store.resolve_alias("work").expect("resolves");
        assert_eq!(entry.name, "work");
        assert_eq!(entry.session_path, "/s/1");
        assert_eq!(entry.title.as_deref(), Some("Work"));
        assert!(entry.created_at.is_some());
    }

    #[test]
    fn test_resolve_session_alias_passes_through() {
        let (store, _dir) = create_test_store();
        store.set_alias("work", "/s/1", None).expect("set");

        assert_eq!(store.resolve_session_alias("work"), "/s/1");
        assert_eq!(store.resolve_session_alias("/s/literal"), "/s/literal");
        assert_eq!(store.resolve_session_alias("unknown"), "unknown");
    }

    #[test]
    fn test_list_aliases_sorted_by_recency() {
        let (store, _dir) = create_test_store();
        seed(
            &store,
            &[
                ("old", "/s/1", None, Some(0), Some(10)),
                ("new", "/s/2", None, Some(0), Some(20)),
                ("bare", "/s/3", None, None, None),
                ("created-only", "/s/4", None, Some(15), None),
            ],
        );

        let entries = store.list_aliases(&ListOptions::default());

        assert_eq!(names(&entries), vec!["new", "created-only", "old", "bare"]);
    }

    #[test]
    fn test_list_aliases_search_name_or_title() {
        let (store, _dir) = create_test_store();
        seed(
            &store,
            &[
                ("auth-fix", "/s/1", None, Some(0), Some(1)),
                ("misc", "/s/2", Some("OAuth refresh"), Some(0), Some(2)),
                ("other", "/s/3", Some("Docs"), Some(0), Some(3)),
                ("untitled", "/s/4", None, Some(0), Some(4)),
            ],
        );

        let options = ListOptions {
            search: Some("AUTH".to_string()),
            limit: None,
        };
        let found: HashSet<String> = store
            .list_aliases(&options)
            .into_iter()
            .map(|e| e.name)
            .collect();

        let expected: HashSet<String> = ["auth-fix", "misc"].iter().map(|s| s.to_string()).collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_list_aliases_limit() {
        let (store, _dir) = create_test_store();
        seed(
            &store,
            &[
                ("a", "/s/1", None, Some(0), Some(1)),
                ("b", "/s/2", None, Some(0), Some(2)),
                ("c", "/s/3", None, Some(0), Some(3)),
            ],
        );

        let limited = store.list_aliases(&ListOptions {
            search: None,
            limit: Some(2),
        });
        assert_eq!(names(&limited), vec!["c", "b"]);

        let zero = store.list_aliases(&ListOptions {
            search: None,
            limit: Some(0),
        });
        assert_eq!(zero.len(), 3, "A zero limit returns everything");
    }

    #[test]
    fn test_newest_alias_lists_first() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("session-aliases.json");
        AliasStore::with_clock(&path, FixedClock(at(1)))
            .set_alias("old", "/s/1", None)
            .expect("set old");
        AliasStore::with_clock(&path, FixedClock(at(2)))
            .set_alias("new", "/s/2", None)
            .expect("set new");

        let entries = AliasStore::open(&path).list_aliases(&ListOptions::default());
        assert_eq!(entries[0].name, "new");
    }

    #[test]
    fn test_get_aliases_for_session_exact_match() {
        let (store, _dir) = create_test_store();
        store.set_alias("one", "/sessions/abc", None).expect("set");
        store.set_alias("two", "/sessions/abc", None).expect("set");
        store.set_alias("three", "/sessions/abc123", None).expect("set");

        let found = store.get_aliases_for_session("/sessions/abc");

        let mut found_names = names(&found);
        found_names.sort();
        assert_eq!(found_names, vec!["one", "two"]);
        assert!(store.get_aliases_for_session("/sessions/ab").is_empty());
    }

    #[test]
    fn test_cleanup_removes_missing_sessions() {
        let (store, _dir) = create_test_store();
        store.set_alias("alive", "/s/alive", None).expect("set");
        store.set_alias("dead-1", "/s/dead-1", None).expect("set");
        store.set_alias("dead-2", "/s/dead-2", None).expect("set");

        let report = store
            .cleanup_aliases(|path| Ok::<_, std::io::Error>(!path.contains("dead")))
            .expect("cleanup");

        assert!(report.success);
        assert_eq!(report.removed, 2);
        assert_eq!(report.total_checked, 3);
        let removed: Vec<&str> = report.removed_aliases.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(removed, vec!["dead-1", "dead-2"]);
        assert_eq!(report.removed_aliases[0].session_path, "/s/dead-1");

        assert!(store.resolve_alias("alive").is_some());
        assert!(store.resolve_alias("dead-1").is_none());
        assert_eq!(store.load().metadata.total_count, 1);
    }

    #[test]
    fn test_cleanup_nothing_to_remove() {
        let (store, _dir) = create_test_store();
        store.set_alias("alive", "/s/alive", None).expect("set");

        let report = store
            .cleanup_aliases(|_| Ok::<_, std::io::Error>(true))
            .expect("cleanup");

        assert!(report.success);
        assert_eq!(report.removed, 0);
        assert_eq!(report.total_checked, 1);
        assert!(report.removed_aliases.is_empty());
    }

    #[test]
    fn test_cleanup_predicate_error_propagates_without_saving() {
        let (store, _dir) = create_test_store();
        store.set_alias("a", "/s/a", None).expect("set");
        store.set_alias("b", "/s/b", None).expect("set");
        store.set_alias("c", "/s/c", None).expect("set");

        let mut calls = 0;
        let result = store.cleanup_aliases(|path| {
            calls += 1;
            if path == "/s/b" {
                Err("permission denied")
            } else {
                Ok(false)
            }
        });

        assert_eq!(result, Err("permission denied"));
        assert_eq!(calls, 2, "Cleanup stops at the first failure");
        assert_eq!(store.load().aliases.len(), 3, "Nothing may be removed");
    }
}
