//! Per-user one-shot flags stored in `user_prefs.json`

use crate::cache::{DocumentCache, PerUser};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

/// Flags for one user. Keys other than `tutorial_shown` are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(default)]
    pub tutorial_shown: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

type PreferenceDocument = PerUser<PreferenceRecord>;

pub struct PreferenceStore {
    cache: Arc<DocumentCache>,
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(cache: Arc<DocumentCache>, path: PathBuf) -> Self {
        Self { cache, path }
    }

    /// The user's record, or the default record if they have none
    pub fn get(&self, user_id: &str) -> PreferenceRecord {
        self.cache
            .load_or(&self.path, PreferenceDocument::new())
            .remove(user_id)
            .unwrap_or_default()
    }

    /// True unless the tutorial has been marked complete for this user
    pub fn is_first_time(&self, user_id: &str) -> bool {
        !self.get(user_id).tutorial_shown
    }

    pub fn mark_tutorial_complete(&self, user_id: &str) -> Result<()> {
        let mut document: PreferenceDocument = self.cache.load(&self.path)?.unwrap_or_default();
        document.entry(user_id.to_string()).or_default().tutorial_shown = true;
        self.cache.put(&self.path, &document)?;
        tracing::info!("Tutorial marked complete for user {}", user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_store() -> (PreferenceStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = PreferenceStore::new(
            Arc::new(DocumentCache::new()),
            dir.path().join("user_prefs.json"),
        );
        (store, dir)
    }

    #[test]
    fn test_first_time_flips_after_tutorial() {
        let (store, _dir) = make_store();
        assert!(store.is_first_time("alice"));

        store.mark_tutorial_complete("alice").unwrap();
        assert!(!store.is_first_time("alice"));
        assert!(store.is_first_time("bob"));
    }

    #[test]
    fn test_mark_is_idempotent() {
        let (store, _dir) = make_store();
        store.mark_tutorial_complete("alice").unwrap();
        store.mark_tutorial_complete("alice").unwrap();
        assert!(store.get("alice").tutorial_shown);
    }

    #[test]
    fn test_other_flags_preserved() {
        let (store, dir) = make_store();
        let path = dir.path().join("user_prefs.json");
        std::fs::write(&path, r#"{"alice": {"theme": "dark", "tutorial_shown": false}}"#).unwrap();
        assert!(store.is_first_time("alice"));

        store.mark_tutorial_complete("alice").unwrap();

        let record = store.get("alice");
        assert!(record.tutorial_shown);
        assert_eq!(record.extra.get("theme"), Some(&Value::from("dark")));
    }
}
